//! Maze session
//!
//! Builds a physics world from a compiled layout and reacts to the two events
//! the outside world produces:
//! - Directional key presses nudge the ball's velocity
//! - A ball/goal collision start solves the maze: gravity switches on and
//!   every wall is released to fall
//!
//! Solving is one-way. Repeated goal collisions change nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::engine::{BodyHandle, BodyTag, PhysicsEngine};
use crate::error::MazeError;
use crate::geometry::{Layout, compile};
use crate::input::{direction_for_key, direction_for_key_code};
use crate::maze::{Direction, Maze, MazeGenerator};
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Walls are static, ball is steering toward the goal
    Playing,
    /// Goal reached; gravity on, walls dynamic
    Solved,
}

/// Physical state of one spawned obstacle, tracked apart from its geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyState {
    pub handle: BodyHandle,
    pub tag: BodyTag,
    pub is_static: bool,
}

/// A generated maze together with its compiled layout
#[derive(Debug, Clone)]
pub struct Level {
    /// Seed the maze was generated from
    pub seed: u64,
    pub maze: Maze,
    pub layout: Layout,
}

impl Level {
    /// Generate and compile a maze as described by `settings`
    pub fn generate(settings: &Settings) -> Result<Self, MazeError> {
        settings.validate()?;

        let mut mazegen = match settings.seed {
            Some(seed) => MazeGenerator::new(seed),
            None => MazeGenerator::from_entropy(),
        };
        let seed = mazegen.seed();
        let maze = mazegen.generate(settings.cells)?;
        let layout = compile(&maze, settings.viewport(), settings.unit_length())?;

        log::info!(
            "Generated {}x{} maze (seed {}): {} walls",
            settings.cells,
            settings.cells,
            seed,
            layout.walls.len()
        );
        Ok(Self { seed, maze, layout })
    }
}

/// Ball-in-a-maze session over a physics engine
pub struct Session<E: PhysicsEngine> {
    engine: E,
    layout: Layout,
    ball: BodyHandle,
    /// One entry per obstacle, in [`Layout::obstacles`] order
    bodies: Vec<BodyState>,
    phase: SessionPhase,
    velocity_step: f32,
    solved_gravity: f32,
}

impl<E: PhysicsEngine> Session<E> {
    /// Create a zero-gravity world and spawn every obstacle plus the ball
    pub fn new(layout: Layout, settings: &Settings) -> Self {
        let mut engine = E::create_world(Vec2::ZERO);

        let bodies = layout
            .obstacles()
            .map(|o| BodyState {
                handle: engine.add_static_rectangle(o.center, o.width, o.height, o.tag),
                tag: o.tag,
                is_static: o.is_static,
            })
            .collect();
        let ball = engine.add_dynamic_circle(layout.ball.center, layout.ball.radius, BodyTag::Ball);

        Self {
            engine,
            layout,
            ball,
            bodies,
            phase: SessionPhase::Playing,
            velocity_step: settings.velocity_step,
            solved_gravity: settings.solved_gravity,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn ball(&self) -> BodyHandle {
        self.ball
    }

    pub fn bodies(&self) -> &[BodyState] {
        &self.bodies
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.phase == SessionPhase::Solved
    }

    /// Add one velocity step to the ball along `dir`
    ///
    /// Presses accumulate; there is no cap or debounce.
    pub fn on_key(&mut self, dir: Direction) {
        let s = self.velocity_step;
        let delta = match dir {
            Direction::Up => Vec2::new(0.0, -s),
            Direction::Right => Vec2::new(s, 0.0),
            Direction::Down => Vec2::new(0.0, s),
            Direction::Left => Vec2::new(-s, 0.0),
        };
        let vel = self.engine.body_velocity(self.ball) + delta;
        self.engine.set_body_velocity(self.ball, vel);
        log::trace!("Key {:?}: ball velocity now {}", dir, vel);
    }

    /// Handle a key by name; returns false for keys that do not steer
    pub fn on_key_name(&mut self, name: &str) -> bool {
        match direction_for_key(name) {
            Some(dir) => {
                self.on_key(dir);
                true
            }
            None => false,
        }
    }

    /// Handle a legacy key code; returns false for keys that do not steer
    pub fn on_key_code(&mut self, code: u32) -> bool {
        match direction_for_key_code(code) {
            Some(dir) => {
                self.on_key(dir);
                true
            }
            None => false,
        }
    }

    /// React to two bodies starting to touch
    ///
    /// Only the ball/goal pair (either order) matters; anything else is ignored.
    pub fn on_collision_start(&mut self, a: BodyTag, b: BodyTag) {
        match (a, b) {
            (BodyTag::Ball, BodyTag::Goal) | (BodyTag::Goal, BodyTag::Ball) => self.solve(),
            _ => log::debug!("Ignoring collision {}/{}", a.as_str(), b.as_str()),
        }
    }

    /// Advance the world one tick and dispatch collision starts
    pub fn step(&mut self) {
        self.engine.step();
        for (a, b) in self.engine.drain_collision_starts() {
            self.on_collision_start(a, b);
        }
    }

    fn solve(&mut self) {
        if self.is_solved() {
            return;
        }
        self.phase = SessionPhase::Solved;
        self.engine.set_gravity_y(self.solved_gravity);

        let mut released = 0;
        for body in self.bodies.iter_mut() {
            if body.tag == BodyTag::Wall && body.is_static {
                self.engine.set_body_static(body.handle, false);
                body.is_static = false;
                released += 1;
            }
        }
        log::info!("Maze solved! Released {} walls", released);
    }
}
