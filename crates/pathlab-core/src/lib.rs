//! **pathlab-core**: grid model shared by the pathlab search and maze crates.
//!
//! This crate provides the value types every algorithm works on: integer
//! [`Point`]s, half-open [`Range`]s, [`Cell`] codes and the rectangular
//! walkability [`Grid`].

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid, GridError};
