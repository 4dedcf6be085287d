//! Maze generation for pathlab.
//!
//! [`generate`] carves a *perfect* maze (exactly one simple path between
//! any two cells) with the recursive-backtracker algorithm and returns it
//! as a walkability [`Grid`](pathlab_core::Grid) ready for the search
//! algorithms in `pathlab-paths`.

mod backtracker;

pub use backtracker::{MazeError, MazeGen, MazeResult, generate};
