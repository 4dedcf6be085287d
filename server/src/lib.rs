//! HTTP front end for pathlab.
//!
//! A thin warp adapter over the core crates: JSON in, typed core calls on
//! the blocking pool, JSON out. Every domain failure becomes an
//! [`ApiError`] with a stable [`ErrorCode`].

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

pub use config::Config;
pub use error::{ApiError, ErrorCode};
pub use routes::{AppState, routes};
pub use service::{CancelToken, MazeService, ServiceError, SimulationService};

use anyhow::{Context, ensure};

/// Bind `config.addr` and serve until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    if let Some(dir) = &config.static_dir {
        ensure!(dir.is_dir(), "static dir {} is not a directory", dir.display());
    }
    let state = AppState::new(&config);
    let filter = routes(state, &config);
    let (addr, server) = warp::serve(filter)
        .try_bind_ephemeral(config.addr)
        .with_context(|| format!("binding {}", config.addr))?;
    log::info!(
        "listening on {} (dev={}, static_dir={:?}, max_maze_dimension={})",
        addr,
        config.dev,
        config.static_dir,
        config.max_maze_dimension
    );
    server.await;
    Ok(())
}
