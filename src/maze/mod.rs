//! Maze model and generation
//!
//! The model is pure data; the generator is the only thing that mutates it.

pub mod generator;
pub mod grid;

pub use generator::MazeGenerator;
pub use grid::{Cell, Direction, Maze};
