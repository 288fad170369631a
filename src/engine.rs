//! Physics collaborator interface
//!
//! The session never touches dynamics directly. It builds bodies, nudges
//! velocities and flips static flags through this trait, and receives
//! collision-start notifications by draining them after each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque identifier for a body inside an engine world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Semantic label attached to every body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyTag {
    /// Closed boundary between two maze cells
    Wall,
    /// Target square in the bottom-right cell
    Goal,
    /// Player-controlled ball
    Ball,
    /// One of the four viewport edges
    Boundary,
}

impl BodyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyTag::Wall => "wall",
            BodyTag::Goal => "goal",
            BodyTag::Ball => "ball",
            BodyTag::Boundary => "boundary",
        }
    }
}

/// Two tags whose bodies started touching during the last step
pub type CollisionPair = (BodyTag, BodyTag);

/// Narrow physics-engine interface consumed by [`crate::Session`]
pub trait PhysicsEngine {
    /// Create an empty world with the given gravity
    fn create_world(gravity: Vec2) -> Self
    where
        Self: Sized;

    fn add_static_rectangle(
        &mut self,
        center: Vec2,
        width: f32,
        height: f32,
        tag: BodyTag,
    ) -> BodyHandle;

    fn add_static_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle;

    fn add_dynamic_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle;

    /// Current velocity (zero for unknown handles)
    fn body_velocity(&self, body: BodyHandle) -> Vec2;

    fn set_body_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    fn is_body_static(&self, body: BodyHandle) -> bool;

    fn set_body_static(&mut self, body: BodyHandle, is_static: bool);

    fn gravity(&self) -> Vec2;

    fn set_gravity_y(&mut self, value: f32);

    /// Advance the world by one tick
    fn step(&mut self);

    /// Take the collision-start notifications queued since the last drain
    fn drain_collision_starts(&mut self) -> Vec<CollisionPair>;
}
