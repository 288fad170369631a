//! Maze Ball entry point
//!
//! Prints generated mazes, or plays one headless by feeding a key script into
//! the simulation and reporting whether the ball reached the goal.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use maze_ball::Settings;
use maze_ball::input::parse_key_script;
use maze_ball::session::{Level, Session};
use maze_ball::sim::World;

/// Roll a ball through a randomly carved maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    maze: MazeArgs,

    #[command(subcommand)]
    command: Command,
}

/// Maze options; flags override values from the settings file
#[derive(Args, Debug)]
struct MazeArgs {
    /// JSON settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Grid side length
    #[arg(long, global = true)]
    cells: Option<usize>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    width: Option<f32>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    height: Option<f32>,

    /// Random seed
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a generated maze
    Generate {
        /// Also print the compiled layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate the session with scripted key presses
    Play {
        /// Keys to press in order: U, R, D, L
        #[arg(short, long, default_value = "")]
        keys: String,

        /// Ticks between key presses
        #[arg(long, default_value_t = 30)]
        key_interval: u64,

        /// Ticks to simulate
        #[arg(long, default_value_t = 600)]
        ticks: u64,
    },
}

impl MazeArgs {
    fn resolve(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Could not load settings from {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(cells) = self.cells {
            settings.cells = cells;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.maze.resolve()?;
    let level = Level::generate(&settings)?;

    match cli.command {
        Command::Generate { json } => {
            print!("{}", level.maze);
            println!("seed: {}", level.seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&level.layout)?);
            }
        }
        Command::Play {
            keys,
            key_interval,
            ticks,
        } => play(&settings, level, &keys, key_interval, ticks)?,
    }
    Ok(())
}

/// Run a bounded headless session, pressing one scripted key every `key_interval` ticks
fn play(
    settings: &Settings,
    level: Level,
    keys: &str,
    key_interval: u64,
    ticks: u64,
) -> anyhow::Result<()> {
    let keys = parse_key_script(keys)?;
    let key_interval = key_interval.max(1);
    let unit_length = level.layout.unit_length;

    print!("{}", level.maze);
    log::info!(
        "Playing seed {} for {} ticks, {} key presses",
        level.seed,
        ticks,
        keys.len()
    );

    let mut session: Session<World> = Session::new(level.layout, settings);
    let mut pending = keys.into_iter();
    let mut solved_at = None;

    for tick in 0..ticks {
        if tick % key_interval == 0
            && let Some(dir) = pending.next()
        {
            session.on_key(dir);
        }
        session.step();
        if solved_at.is_none() && session.is_solved() {
            solved_at = Some(tick + 1);
        }
    }

    let ball = session
        .engine()
        .body(session.ball())
        .context("Ball missing from world")?;
    let row = (ball.pos.y / unit_length).floor().max(0.0) as usize;
    let column = (ball.pos.x / unit_length).floor().max(0.0) as usize;

    match solved_at {
        Some(tick) => println!("Solved at tick {}.", tick),
        None => println!("Not solved after {} ticks.", session.engine().ticks()),
    }
    println!(
        "Ball at ({:.1}, {:.1}), cell ({}, {})",
        ball.pos.x, ball.pos.y, row, column
    );
    Ok(())
}
