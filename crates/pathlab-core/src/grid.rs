//! A rectangular walkability grid.
//!
//! [`Cell`] is a newtype over `i32`: `0` is walkable floor, anything else
//! blocks movement (mazes use `1`). [`Grid`] stores cells row-major in a
//! single buffer and is only ever borrowed by the search algorithms, so it
//! cannot change while a search runs.

use crate::geom::{Point, Range};
use thiserror::Error;

/// A grid cell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cell(pub i32);

impl Cell {
    /// Walkable floor.
    pub const FLOOR: Cell = Cell(0);
    /// Impassable wall.
    pub const WALL: Cell = Cell(1);

    /// Only `0` is walkable.
    pub const fn is_walkable(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Rejected grid shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("grid has inconsistent dimensions: row {row} has width {len}, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A 2D grid of [`Cell`] values. Every row has the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a `width × height` grid with every cell set to `cell`.
    ///
    /// Non-positive dimensions produce an empty grid.
    pub fn filled(width: i32, height: i32, cell: Cell) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![cell; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Create an all-floor grid.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Cell::FLOOR)
    }

    /// Build a grid from rows of cells, rejecting empty and ragged input.
    pub fn from_rows<R, C>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0usize;
        for (y, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(Into::into));
            let len = cells.len() - before;
            match width {
                None => width = Some(len),
                Some(expected) if expected != len => {
                    return Err(GridError::Ragged {
                        row: y,
                        len,
                        expected,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }
        let width = match width {
            Some(w) if w > 0 => w,
            _ => return Err(GridError::Empty),
        };
        Ok(Self {
            cells,
            width: width as i32,
            height: height as i32,
        })
    }

    /// Returns the bounding range `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Whether the cell at `p` is floor. Out-of-bounds points are never
    /// walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.at(p).is_some_and(Cell::is_walkable)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if !self.in_bounds(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over the rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `max(1)` keeps `chunks` happy on an empty grid, which has no cells.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        for row in self.rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<Cell>>::deserialize(deserializer)?;
        Grid::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
