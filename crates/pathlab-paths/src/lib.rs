//! Grid search algorithms for pathlab.
//!
//! Three traversals share one contract: given a [`Pather`] (usually a
//! [`Grid`](pathlab_core::Grid)), a start and a goal, they either fail fast
//! with a [`SearchError`] or run to completion and return a
//! [`SearchResult`] recording the path and the expansion order.
//!
//! - **BFS** ([`bfs`]): FIFO frontier, shortest path on unit-cost grids.
//! - **DFS** ([`dfs`]): LIFO frontier, some path if one exists.
//! - **A\*** ([`astar`]): Manhattan-guided best-first search, shortest path.
//!
//! Every algorithm expands neighbours in the fixed north, east, south, west
//! order, so results (including `visited_order`) are fully deterministic.
//! Each call allocates its own frontier, visited and parent maps; nothing
//! is shared between calls.

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod error;
mod heap;
mod neighbors;
mod result;
mod traits;

pub use algorithm::{Algorithm, search};
pub use astar::{astar, heuristic};
pub use bfs::bfs;
pub use dfs::dfs;
pub use error::SearchError;
pub use heap::{HeapHandle, MinHeap};
pub use neighbors::Neighbors;
pub use result::SearchResult;
pub use traits::Pather;
