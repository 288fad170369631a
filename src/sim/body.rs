//! Bodies held by the simulation world

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::{BodyHandle, BodyTag};

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned box given by half extents
    Rectangle { half: Vec2 },
    Circle { radius: f32 },
}

/// A rigid body (no rotation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub handle: BodyHandle,
    pub tag: BodyTag,
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub shape: Shape,
    /// Static bodies ignore gravity and are never pushed
    pub is_static: bool,
}

impl Body {
    pub fn rectangle(
        handle: BodyHandle,
        tag: BodyTag,
        center: Vec2,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            handle,
            tag,
            pos: center,
            vel: Vec2::ZERO,
            shape: Shape::Rectangle {
                half: Vec2::new(width / 2.0, height / 2.0),
            },
            is_static: true,
        }
    }

    pub fn circle(handle: BodyHandle, tag: BodyTag, center: Vec2, radius: f32) -> Self {
        Self {
            handle,
            tag,
            pos: center,
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
            is_static: true,
        }
    }

    #[inline]
    pub fn is_rectangle(&self) -> bool {
        matches!(self.shape, Shape::Rectangle { .. })
    }

    /// Apply one tick of gravity and drag to the velocity
    pub fn accelerate(&mut self, gravity: Vec2, air_friction: f32) {
        if self.is_static {
            return;
        }
        self.vel += gravity;
        self.vel *= 1.0 - air_friction;
    }

    /// Move by `fraction` of one tick's velocity
    #[inline]
    pub fn translate(&mut self, fraction: f32) {
        if !self.is_static {
            self.pos += self.vel * fraction;
        }
    }
}
