//! Maze-to-geometry compilation
//!
//! Turns a finished maze into the static rectangles a physics world needs:
//! one thin wall per closed cell boundary, four viewport edges, the goal
//! square in the bottom-right cell and the ball spawn in the top-left cell.
//! Compilation is a pure function of its inputs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::engine::BodyTag;
use crate::error::MazeError;
use crate::maze::Maze;

/// Pixel extent of the playing field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixels per cell when `cells` columns span the width
    pub fn unit_length(&self, cells: usize) -> f32 {
        self.width / cells as f32
    }
}

/// A static rectangle descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center position (pixels)
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub tag: BodyTag,
    /// Static at spawn; walls may later be released by the session
    pub is_static: bool,
}

impl Obstacle {
    fn fixed(center: Vec2, width: f32, height: f32, tag: BodyTag) -> Self {
        Self {
            center,
            width,
            height,
            tag,
            is_static: true,
        }
    }

    /// True if `point` lies strictly inside the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.width / 2.0 && d.y < self.height / 2.0
    }
}

/// Where and how big the ball starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpawn {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything the session hands to the physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Viewport,
    pub unit_length: f32,
    /// Viewport edges (top, bottom, left, right)
    pub boundaries: Vec<Obstacle>,
    /// Closed horizontal boundaries first, then closed vertical boundaries
    pub walls: Vec<Obstacle>,
    pub goal: Obstacle,
    pub ball: BallSpawn,
}

impl Layout {
    /// All rectangles: boundaries, walls, then the goal
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.boundaries
            .iter()
            .chain(self.walls.iter())
            .chain(std::iter::once(&self.goal))
    }
}

/// Compile `maze` into obstacles sized to `unit_length` pixels per cell
///
/// Fails with [`MazeError::InvalidConfiguration`] if `unit_length` or either
/// viewport dimension is not a positive finite number.
pub fn compile(maze: &Maze, viewport: Viewport, unit_length: f32) -> Result<Layout, MazeError> {
    if !(unit_length.is_finite() && unit_length > 0.0) {
        return Err(MazeError::invalid(format!(
            "unit length must be positive, got {}",
            unit_length
        )));
    }
    if !(viewport.width.is_finite() && viewport.width > 0.0)
        || !(viewport.height.is_finite() && viewport.height > 0.0)
    {
        return Err(MazeError::invalid(format!(
            "viewport must be positive, got {}x{}",
            viewport.width, viewport.height
        )));
    }

    let u = unit_length;
    let mut walls = Vec::with_capacity(maze.closed_boundaries());

    for (row, line) in maze.horizontals().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            let center = Vec2::new(col as f32 * u + u / 2.0, row as f32 * u + u);
            walls.push(Obstacle::fixed(center, u, WALL_THICKNESS, BodyTag::Wall));
        }
    }

    for (row, line) in maze.verticals().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            let center = Vec2::new(col as f32 * u + u, row as f32 * u + u / 2.0);
            walls.push(Obstacle::fixed(center, WALL_THICKNESS, u, BodyTag::Wall));
        }
    }

    let Viewport { width, height } = viewport;
    let boundaries = vec![
        Obstacle::fixed(
            Vec2::new(width / 2.0, 0.0),
            width,
            BOUNDARY_THICKNESS,
            BodyTag::Boundary,
        ),
        Obstacle::fixed(
            Vec2::new(width / 2.0, height),
            width,
            BOUNDARY_THICKNESS,
            BodyTag::Boundary,
        ),
        Obstacle::fixed(
            Vec2::new(0.0, height / 2.0),
            BOUNDARY_THICKNESS,
            height,
            BodyTag::Boundary,
        ),
        Obstacle::fixed(
            Vec2::new(width, height / 2.0),
            BOUNDARY_THICKNESS,
            height,
            BodyTag::Boundary,
        ),
    ];

    let goal_size = u * GOAL_SCALE;
    let goal = Obstacle::fixed(
        Vec2::new(width - u / 2.0, height - u / 2.0),
        goal_size,
        goal_size,
        BodyTag::Goal,
    );

    let ball = BallSpawn {
        center: Vec2::new(u / 2.0, u / 2.0),
        radius: u * BALL_RADIUS_SCALE,
    };

    log::debug!(
        "Compiled {} walls for {}x{} maze at {} px/cell",
        walls.len(),
        maze.cells(),
        maze.cells(),
        u
    );

    Ok(Layout {
        viewport,
        unit_length: u,
        boundaries,
        walls,
        goal,
        ball,
    })
}
