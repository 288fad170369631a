//! Fixed-tick physics world
//!
//! Advances all dynamic bodies one tick at a time, pushes them out of
//! anything they overlap and records which pairs started touching.

use std::collections::HashSet;

use glam::Vec2;

use super::body::Body;
use super::collision::{Contact, contact};
use crate::consts::*;
use crate::engine::{BodyHandle, BodyTag, CollisionPair, PhysicsEngine};

/// Deterministic world implementing [`PhysicsEngine`]
#[derive(Debug, Clone)]
pub struct World {
    /// Indexed by handle
    bodies: Vec<Body>,
    gravity: Vec2,
    /// Pairs in contact at the end of the last tick (smaller handle first)
    touching: HashSet<(BodyHandle, BodyHandle)>,
    pending: Vec<CollisionPair>,
    ticks: u64,
}

impl World {
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0 as usize)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0 as usize)
    }

    fn insert(&mut self, build: impl FnOnce(BodyHandle) -> Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(build(handle));
        handle
    }

    /// Separate overlapping pairs and queue pairs that were not touching last tick
    ///
    /// Dynamic bodies are checked against static bodies and dynamic circles only;
    /// released walls pass through each other.
    fn resolve_contacts(&mut self, current: &mut HashSet<(BodyHandle, BodyHandle)>) {
        let mut statics = Vec::new();
        let mut movers = Vec::new();
        let mut circles = Vec::new();
        for (i, body) in self.bodies.iter().enumerate() {
            if body.is_static {
                statics.push(i);
            } else {
                movers.push(i);
                if !body.is_rectangle() {
                    circles.push(i);
                }
            }
        }

        for &i in &movers {
            let is_rectangle = self.bodies[i].is_rectangle();
            // Each dynamic pair once: rectangles own their circle pairs
            let others = circles.iter().copied().filter(|&j| is_rectangle || j > i);
            for j in statics.iter().copied().chain(others) {
                self.touch(i, j, current);
            }
        }
    }

    /// Check one pair, queue it if it just started touching and push it apart
    fn touch(&mut self, i: usize, j: usize, current: &mut HashSet<(BodyHandle, BodyHandle)>) {
        let (a, b) = (&self.bodies[i], &self.bodies[j]);
        let c = contact(a, b);
        if c.penetration < -CONTACT_SLOP {
            return;
        }

        let key = (a.handle.min(b.handle), a.handle.max(b.handle));
        if current.insert(key) && !self.touching.contains(&key) {
            self.pending.push((a.tag, b.tag));
        }
        if c.penetration > 0.0 {
            self.separate(i, j, c);
        }
    }

    /// Push bodies `i` (dynamic) and `j` apart along the contact normal
    fn separate(&mut self, i: usize, j: usize, c: Contact) {
        let n = c.normal;
        if self.bodies[j].is_static {
            let a = &mut self.bodies[i];
            a.pos += n * c.penetration;
            let vn = a.vel.dot(n);
            if vn < 0.0 {
                a.vel -= n * vn;
            }
            return;
        }

        let half = n * (c.penetration / 2.0);
        self.bodies[i].pos += half;
        self.bodies[j].pos -= half;
        let vn = (self.bodies[i].vel - self.bodies[j].vel).dot(n);
        if vn < 0.0 {
            let impulse = n * (vn / 2.0);
            self.bodies[i].vel -= impulse;
            self.bodies[j].vel += impulse;
        }
    }
}

impl PhysicsEngine for World {
    fn create_world(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            gravity,
            touching: HashSet::new(),
            pending: Vec::new(),
            ticks: 0,
        }
    }

    fn add_static_rectangle(
        &mut self,
        center: Vec2,
        width: f32,
        height: f32,
        tag: BodyTag,
    ) -> BodyHandle {
        self.insert(|h| Body::rectangle(h, tag, center, width, height))
    }

    fn add_static_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle {
        self.insert(|h| Body::circle(h, tag, center, radius))
    }

    fn add_dynamic_circle(&mut self, center: Vec2, radius: f32, tag: BodyTag) -> BodyHandle {
        self.insert(|h| Body {
            is_static: false,
            ..Body::circle(h, tag, center, radius)
        })
    }

    fn body_velocity(&self, body: BodyHandle) -> Vec2 {
        self.body(body).map(|b| b.vel).unwrap_or(Vec2::ZERO)
    }

    fn set_body_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.vel = velocity;
        }
    }

    fn is_body_static(&self, body: BodyHandle) -> bool {
        self.body(body).is_some_and(|b| b.is_static)
    }

    fn set_body_static(&mut self, body: BodyHandle, is_static: bool) {
        if let Some(b) = self.body_mut(body) {
            if is_static {
                b.vel = Vec2::ZERO;
            }
            b.is_static = is_static;
        }
    }

    fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn set_gravity_y(&mut self, value: f32) {
        self.gravity.y = value;
    }

    fn step(&mut self) {
        self.ticks += 1;

        let gravity = self.gravity * GRAVITY_SCALE;
        for body in &mut self.bodies {
            body.accelerate(gravity, AIR_FRICTION);
        }

        // Split fast motion so thin walls cannot be skipped over
        let max_speed = self
            .bodies
            .iter()
            .filter(|b| !b.is_static)
            .map(|b| b.vel.length())
            .fold(0.0, f32::max);
        let substeps = ((max_speed / MAX_SUBSTEP_TRAVEL).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        let fraction = 1.0 / substeps as f32;

        let mut current = HashSet::new();
        for _ in 0..substeps {
            for body in &mut self.bodies {
                body.translate(fraction);
            }
            self.resolve_contacts(&mut current);
        }
        self.touching = current;
    }

    fn drain_collision_starts(&mut self) -> Vec<CollisionPair> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut world = World::create_world(Vec2::ZERO);
        let a = world.add_static_rectangle(Vec2::ZERO, 10.0, 10.0, BodyTag::Wall);
        let b = world.add_dynamic_circle(Vec2::new(50.0, 0.0), 5.0, BodyTag::Ball);
        assert_eq!(a, BodyHandle(0));
        assert_eq!(b, BodyHandle(1));
        assert!(world.is_body_static(a));
        assert!(!world.is_body_static(b));
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let mut world = World::create_world(Vec2::ZERO);
        world.set_body_velocity(BodyHandle(9), Vec2::ONE);
        world.set_body_static(BodyHandle(9), false);
        assert_eq!(world.body_velocity(BodyHandle(9)), Vec2::ZERO);
        assert!(!world.is_body_static(BodyHandle(9)));
    }

    #[test]
    fn test_ball_stops_at_wall_and_reports_once() {
        let mut world = World::create_world(Vec2::ZERO);
        world.add_static_rectangle(Vec2::new(100.0, 0.0), 5.0, 100.0, BodyTag::Wall);
        let ball = world.add_dynamic_circle(Vec2::new(50.0, 0.0), 10.0, BodyTag::Ball);
        world.set_body_velocity(ball, Vec2::new(5.0, 0.0));

        let mut starts = Vec::new();
        for _ in 0..60 {
            world.step();
            starts.extend(world.drain_collision_starts());
        }

        assert_eq!(starts, vec![(BodyTag::Ball, BodyTag::Wall)]);
        let pos = world.body(ball).unwrap().pos;
        assert!(pos.x <= 100.0 - 2.5 - 10.0 + 1e-3);
        assert!(world.body_velocity(ball).x.abs() < 1e-3);
        assert_eq!(world.ticks(), 60);
    }

    #[test]
    fn test_gravity_moves_only_dynamic_bodies() {
        let mut world = World::create_world(Vec2::ZERO);
        let wall = world.add_static_rectangle(Vec2::new(50.0, 50.0), 40.0, 5.0, BodyTag::Wall);
        let floor =
            world.add_static_rectangle(Vec2::new(50.0, 200.0), 200.0, 2.0, BodyTag::Boundary);

        world.set_gravity_y(1.0);
        world.step();
        assert_eq!(world.body(wall).unwrap().pos, Vec2::new(50.0, 50.0));

        world.set_body_static(wall, false);
        for _ in 0..200 {
            world.step();
        }
        let wall_pos = world.body(wall).unwrap().pos;
        assert!(wall_pos.y > 150.0);
        // Resting on the floor, not through it
        assert!(wall_pos.y <= 200.0 - 1.0 - 2.5 + 1e-3);
        assert_eq!(world.body(floor).unwrap().pos, Vec2::new(50.0, 200.0));
    }

    #[test]
    fn test_released_walls_pass_through_each_other() {
        let mut world = World::create_world(Vec2::ZERO);
        let a = world.add_static_rectangle(Vec2::ZERO, 10.0, 10.0, BodyTag::Wall);
        let b = world.add_static_rectangle(Vec2::new(4.0, 0.0), 10.0, 10.0, BodyTag::Wall);
        world.set_body_static(a, false);
        world.set_body_static(b, false);
        world.step();

        assert!(world.drain_collision_starts().is_empty());
        assert_eq!(world.body(a).unwrap().pos, Vec2::ZERO);
        assert_eq!(world.body(b).unwrap().pos, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_released_wall_still_hits_ball() {
        let mut world = World::create_world(Vec2::new(0.0, 1.0));
        let wall = world.add_static_rectangle(Vec2::new(0.0, 0.0), 40.0, 5.0, BodyTag::Wall);
        let other = world.add_static_rectangle(Vec2::new(2.0, 0.0), 40.0, 5.0, BodyTag::Wall);
        let ball = world.add_dynamic_circle(Vec2::new(0.0, 40.0), 10.0, BodyTag::Ball);
        world.add_static_rectangle(Vec2::new(0.0, 60.0), 200.0, 2.0, BodyTag::Boundary);
        world.set_body_static(wall, false);
        world.set_body_static(other, false);

        let mut starts = Vec::new();
        for _ in 0..120 {
            world.step();
            starts.extend(world.drain_collision_starts());
        }

        assert!(starts.contains(&(BodyTag::Wall, BodyTag::Ball)));
        assert!(starts.contains(&(BodyTag::Ball, BodyTag::Boundary)));
        assert!(!starts.contains(&(BodyTag::Wall, BodyTag::Wall)));
        // Stacked on the ball, which rests on the floor
        let wall_y = world.body(wall).unwrap().pos.y;
        let ball_y = world.body(ball).unwrap().pos.y;
        assert!(ball_y <= 60.0 - 1.0 - 10.0 + 1.0);
        assert!(wall_y < ball_y - 10.0);
    }

    #[test]
    fn test_static_circle_deflects_ball() {
        let mut world = World::create_world(Vec2::ZERO);
        let post = world.add_static_circle(Vec2::new(0.0, 30.0), 10.0, BodyTag::Wall);
        let ball = world.add_dynamic_circle(Vec2::ZERO, 10.0, BodyTag::Ball);
        world.set_body_velocity(ball, Vec2::new(0.0, 4.0));
        for _ in 0..20 {
            world.step();
        }

        assert!(world.body(ball).unwrap().pos.y <= 10.0 + 1e-3);
        assert_eq!(world.body(post).unwrap().pos, Vec2::new(0.0, 30.0));
        assert_eq!(world.drain_collision_starts(), vec![(BodyTag::Ball, BodyTag::Wall)]);
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut world = World::create_world(Vec2::ZERO);
        world.add_static_rectangle(Vec2::ZERO, 20.0, 20.0, BodyTag::Goal);
        world.add_dynamic_circle(Vec2::new(12.0, 0.0), 5.0, BodyTag::Ball);
        world.step();
        assert_eq!(world.drain_collision_starts(), vec![(BodyTag::Ball, BodyTag::Goal)]);
        assert!(world.drain_collision_starts().is_empty());
    }
}
