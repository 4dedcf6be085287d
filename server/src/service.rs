//! Request validation and dispatch into the core crates.
//!
//! Both services are synchronous; the HTTP layer runs them on the blocking
//! pool. A [`CancelToken`] is consulted once, before any work starts.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{error, info, warn};
use pathlab_core::{Cell, Grid, GridError, Point};
use pathlab_maze::{MazeError, MazeResult};
use pathlab_paths::{Algorithm, SearchError, SearchResult};
use serde::Deserialize;
use thiserror::Error;

/// Everything a service call can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("maze dimensions must be at most {max}x{max} (got {width}x{height})")]
    DimensionsTooLarge { width: i32, height: i32, max: i32 },
    #[error("{0}")]
    Validation(String),
    #[error("request cancelled before it started")]
    Cancelled,
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Caller mistakes, as opposed to server-side failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Cancelled | ServiceError::Internal(_))
    }
}

fn report(what: &str, err: &ServiceError) {
    if err.is_client_error() {
        warn!("{what} rejected error={err}");
    } else {
        error!("{what} failed error={err}");
    }
}

// ---------------------------------------------------------------------------
// Cancellation

/// Shared flag telling queued work that nobody is waiting for it any more.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Guard that cancels this token when dropped.
    pub fn drop_guard(&self) -> CancelGuard {
        CancelGuard(self.clone())
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        Ok(())
    }
}

/// Cancels its token on drop; see [`CancelToken::drop_guard`].
#[derive(Debug)]
pub struct CancelGuard(CancelToken);

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

// ---------------------------------------------------------------------------
// Maze generation

/// Body of `POST /maze/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateMazeRequest {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub seed: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct MazeService {
    max_dimension: i32,
}

impl MazeService {
    pub fn new(max_dimension: i32) -> Self {
        Self { max_dimension }
    }

    pub fn generate(
        &self,
        req: &GenerateMazeRequest,
        cancel: &CancelToken,
    ) -> Result<MazeResult, ServiceError> {
        info!(
            "maze requested width={} height={} seed={:?}",
            req.width, req.height, req.seed
        );
        let out = self.generate_checked(req, cancel);
        match &out {
            Ok(maze) => info!(
                "maze generated width={} height={} grid={}x{}",
                req.width, req.height, maze.width, maze.height
            ),
            Err(err) => report("maze", err),
        }
        out
    }

    fn generate_checked(
        &self,
        req: &GenerateMazeRequest,
        cancel: &CancelToken,
    ) -> Result<MazeResult, ServiceError> {
        cancel.check()?;
        if req.width > self.max_dimension || req.height > self.max_dimension {
            return Err(ServiceError::DimensionsTooLarge {
                width: req.width,
                height: req.height,
                max: self.max_dimension,
            });
        }
        Ok(pathlab_maze::generate(req.width, req.height, req.seed)?)
    }
}

// ---------------------------------------------------------------------------
// Simulation

/// Body of `POST /simulate`.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
    pub algorithm: String,
    pub grid: Vec<Vec<Cell>>,
    pub start: Point,
    pub goal: Point,
}

/// A finished search plus how long it took.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub algorithm: Algorithm,
    pub result: SearchResult,
    pub elapsed: Duration,
}

impl Simulation {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Validates a request and runs the named search on it.
#[derive(Debug, Clone, Default)]
pub struct SimulationService;

impl SimulationService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(
        &self,
        req: SimulationRequest,
        cancel: &CancelToken,
    ) -> Result<Simulation, ServiceError> {
        info!(
            "simulation requested algorithm={} rows={} start={} goal={}",
            req.algorithm,
            req.grid.len(),
            req.start,
            req.goal
        );
        let out = self.run_checked(req, cancel);
        match &out {
            Ok(sim) => info!(
                "simulation completed algorithm={} found={} expanded_nodes={} path_length={} elapsed_ms={:.3}",
                sim.algorithm,
                sim.result.found,
                sim.result.expanded_nodes,
                sim.result.path_length,
                sim.elapsed_ms()
            ),
            Err(err) => report("simulation", err),
        }
        out
    }

    fn run_checked(
        &self,
        req: SimulationRequest,
        cancel: &CancelToken,
    ) -> Result<Simulation, ServiceError> {
        cancel.check()?;
        if req.algorithm.trim().is_empty() {
            return Err(ServiceError::Validation("algorithm is required".into()));
        }
        let algorithm: Algorithm = req.algorithm.parse()?;
        let grid = Grid::from_rows(req.grid)?;

        let began = Instant::now();
        let result = algorithm.search(&grid, req.start, req.goal)?;
        Ok(Simulation {
            algorithm,
            result,
            elapsed: began.elapsed(),
        })
    }
}
