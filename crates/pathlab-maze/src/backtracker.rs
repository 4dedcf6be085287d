//! Recursive-backtracker maze carving.
//!
//! The maze is a `width × height` lattice of *cells*. Cell `(cx, cy)` lives
//! at `(2cx + 1, 2cy + 1)` in an output grid of `(2w + 1) × (2h + 1)` that
//! starts as solid wall; the odd/odd positions are rooms and the positions
//! between two rooms are the walls that carving knocks down.

use std::time::{SystemTime, UNIX_EPOCH};

use pathlab_core::{Cell, Grid, Point, Range};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Rejected maze requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Width or height below 2, or too large to lay out.
    #[error("maze dimensions must be at least 2x2 (got {width}x{height})")]
    InvalidDimensions { width: i32, height: i32 },
}

/// A generated maze.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeResult {
    /// Width of `grid` (`2 × requested width + 1`).
    pub width: i32,
    /// Height of `grid` (`2 × requested height + 1`).
    pub height: i32,
    pub grid: Grid,
    /// The caller's seed, echoed back.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub seed: Option<i64>,
}

/// Maze carver driven by a random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl MazeGen<StdRng> {
    /// Deterministic generator: the same seed always carves the same maze.
    pub fn seeded(seed: i64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed as u64))
    }

    /// Generator seeded from the wall clock.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_rng(StdRng::seed_from_u64(nanos))
    }
}

impl<R: Rng> MazeGen<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Carve a `width × height` cell maze and return the output grid.
    ///
    /// Memory grows with `width × height`; there is no upper bound here, so
    /// callers taking sizes from untrusted input must cap them first.
    pub fn carve(&mut self, width: i32, height: i32) -> Result<Grid, MazeError> {
        let invalid = MazeError::InvalidDimensions { width, height };
        if width < 2 || height < 2 {
            return Err(invalid);
        }
        let (Some(grid_w), Some(grid_h)) = (output_size(width), output_size(height)) else {
            return Err(invalid);
        };

        let mut grid = Grid::filled(grid_w, grid_h, Cell::WALL);
        let cells = Range::new(0, 0, width, height);
        let mut visited = vec![false; cells.len()];
        let idx = |c: Point| c.y as usize * width as usize + c.x as usize;

        let origin = Point::ZERO;
        visited[idx(origin)] = true;
        grid.set(room(origin), Cell::FLOOR);
        let mut stack = vec![origin];
        let mut candidates = Vec::with_capacity(4);

        while let Some(&current) = stack.last() {
            candidates.clear();
            candidates.extend(
                current
                    .neighbors_4()
                    .into_iter()
                    .filter(|&n| cells.contains(n) && !visited[idx(n)]),
            );
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            let next = candidates[self.rng.random_range(0..candidates.len())];
            grid.set(room(next), Cell::FLOOR);
            grid.set(wall_between(current, next), Cell::FLOOR);
            visited[idx(next)] = true;
            stack.push(next);
        }

        Ok(grid)
    }
}

/// Output grid position of a cell.
#[inline]
fn room(c: Point) -> Point {
    Point::new(2 * c.x + 1, 2 * c.y + 1)
}

/// Output grid position of the wall separating two adjacent cells.
#[inline]
fn wall_between(a: Point, b: Point) -> Point {
    Point::new(a.x + b.x + 1, a.y + b.y + 1)
}

fn output_size(cells: i32) -> Option<i32> {
    cells.checked_mul(2)?.checked_add(1)
}

/// Generate a perfect maze of `width × height` cells.
///
/// With `seed` the output is reproducible; without one the generator is
/// seeded from the current time. The seed is echoed in the result.
///
/// Only the lower bound is enforced. See [`MazeGen::carve`] for sizing.
pub fn generate(width: i32, height: i32, seed: Option<i64>) -> Result<MazeResult, MazeError> {
    let mut mg = match seed {
        Some(s) => MazeGen::seeded(s),
        None => MazeGen::from_time(),
    };
    let grid = mg.carve(width, height)?;
    log::debug!(
        "carved {}x{} maze into {}x{} grid (seed {:?})",
        width,
        height,
        grid.width(),
        grid.height(),
        seed
    );
    Ok(MazeResult {
        width: grid.width(),
        height: grid.height(),
        grid,
        seed,
    })
}
