//! Minimal deterministic physics world
//!
//! Provides just enough dynamics to play a maze session headless:
//! - Fixed ticks, velocities in pixels per tick
//! - Axis-aligned rectangles and circles, no rotation
//! - Dynamic bodies are pushed out of whatever they overlap
//! - Collision-start events are queued until drained

pub mod body;
pub mod collision;
pub mod world;

pub use body::{Body, Shape};
pub use collision::{Contact, contact};
pub use world::World;
