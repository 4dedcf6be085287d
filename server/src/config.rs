//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_MAX_MAZE_DIMENSION: i32 = 100;
pub const DEFAULT_MAX_BODY_BYTES: u64 = 4 * 1024 * 1024;

fn default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Server settings. Every flag falls back to a `PATHLAB_*` variable.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "Maze generation and path search over HTTP", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "PATHLAB_ADDR", default_value_t = default_addr())]
    pub addr: SocketAddr,

    /// Development mode: allow cross-origin requests from any origin
    #[arg(long, env = "PATHLAB_DEV")]
    pub dev: bool,

    /// Directory of frontend assets; unknown GET paths fall back to its index.html
    #[arg(long, env = "PATHLAB_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Largest accepted maze width or height, in cells
    #[arg(
        long,
        env = "PATHLAB_MAX_MAZE_DIMENSION",
        default_value_t = DEFAULT_MAX_MAZE_DIMENSION,
        value_parser = clap::value_parser!(i32).range(2..)
    )]
    pub max_maze_dimension: i32,

    /// Largest accepted JSON request body, in bytes
    #[arg(long, env = "PATHLAB_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: u64,

    /// Default log filter; RUST_LOG takes precedence
    #[arg(long, env = "PATHLAB_LOG", default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            dev: false,
            static_dir: None,
            max_maze_dimension: DEFAULT_MAX_MAZE_DIMENSION,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_level: "info".to_string(),
        }
    }
}
