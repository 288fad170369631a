//! Run settings
//!
//! Persisted as JSON; every field falls back to its default when missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::MazeError;
use crate::geometry::Viewport;

/// Maze and session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid side length
    pub cells: usize,
    /// Viewport width (pixels)
    pub width: f32,
    /// Viewport height (pixels)
    pub height: f32,
    /// Maze seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Velocity added per key press (pixels/tick)
    pub velocity_step: f32,
    /// Vertical gravity applied when the goal is reached
    pub solved_gravity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            width: DEFAULT_VIEWPORT,
            height: DEFAULT_VIEWPORT,
            seed: None,
            velocity_step: VELOCITY_STEP,
            solved_gravity: SOLVED_GRAVITY,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MazeError> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Check that these settings can produce a maze and a session
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.cells < 2 {
            return Err(MazeError::invalid(format!(
                "cells must be at least 2, got {}",
                self.cells
            )));
        }
        let finite = self.width.is_finite() && self.height.is_finite();
        if !(finite && self.width > 0.0 && self.height > 0.0) {
            return Err(MazeError::invalid(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        // Cells are square and sized from the width, so the grid must fit vertically
        let maze_height = self.cells as f32 * self.unit_length();
        if maze_height > self.height + MAZE_FIT_TOLERANCE {
            return Err(MazeError::invalid(format!(
                "{} cells on a {}x{} viewport need {} px of height",
                self.cells, self.width, self.height, maze_height
            )));
        }
        if maze_height < self.height - MAZE_FIT_TOLERANCE {
            log::warn!(
                "Viewport is {} px taller than the maze; the goal sits below the last row",
                self.height - maze_height
            );
        }
        if !self.velocity_step.is_finite() {
            return Err(MazeError::invalid("velocity step must be finite"));
        }
        if !self.solved_gravity.is_finite() || self.solved_gravity == 0.0 {
            return Err(MazeError::invalid("solved gravity must be a finite nonzero value"));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Pixels per cell (viewport width split across the columns)
    pub fn unit_length(&self) -> f32 {
        self.viewport().unit_length(self.cells)
    }
}
