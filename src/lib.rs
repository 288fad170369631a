//! Maze Ball - roll a ball through a randomly carved maze
//!
//! Core modules:
//! - `maze`: Maze model and randomized depth-first generator
//! - `geometry`: Compiles a maze into static rectangle obstacles
//! - `engine`: Physics collaborator interface
//! - `sim`: Minimal deterministic physics world implementing `engine`
//! - `session`: Input and win-condition handling over a physics world
//! - `settings`: Run configuration

pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod maze;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::MazeError;
pub use geometry::{BallSpawn, Layout, Obstacle, Viewport, compile};
pub use maze::{Cell, Direction, Maze, MazeGenerator};
pub use session::{Session, SessionPhase};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Thickness of a compiled maze wall (pixels)
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Thickness of the four viewport boundary walls (pixels)
    pub const BOUNDARY_THICKNESS: f32 = 2.0;

    /// Goal side length as a fraction of the unit length
    pub const GOAL_SCALE: f32 = 0.7;
    /// Ball radius as a fraction of the unit length
    pub const BALL_RADIUS_SCALE: f32 = 0.25;

    /// Velocity added per directional key press (pixels/tick)
    pub const VELOCITY_STEP: f32 = 5.0;
    /// Vertical gravity switched on once the goal is reached
    pub const SOLVED_GRAVITY: f32 = 1.0;

    /// Acceleration applied per tick for one unit of gravity (pixels/tick²)
    pub const GRAVITY_SCALE: f32 = 0.25;
    /// Fraction of velocity lost to air drag each tick
    pub const AIR_FRICTION: f32 = 0.01;
    /// Separation under which two bodies still count as touching
    pub const CONTACT_SLOP: f32 = 0.5;
    /// Largest distance a body may move between contact checks (pixels)
    pub const MAX_SUBSTEP_TRAVEL: f32 = 2.0;
    /// Maximum substeps per tick
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Default grid side length
    pub const DEFAULT_CELLS: usize = 6;
    /// Default square viewport side (pixels)
    pub const DEFAULT_VIEWPORT: f32 = 600.0;
    /// Rounding allowed when checking the grid against the viewport height (pixels)
    pub const MAZE_FIT_TOLERANCE: f32 = 0.01;
}
