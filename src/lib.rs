//! Flappy Bird - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, collisions)
//! - `renderer`: Scene building and the WebGPU sprite pipeline
//! - `assets`: The five sprite images and their decoded pixels
//! - `highscores`: Remote leaderboard and score submission
//! - `net`: Score service clients (browser fetch / native HTTP)
//! - `config`: Server, user and asset settings

pub mod assets;
pub mod config;
pub mod highscores;
pub mod net;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use highscores::{HighScoreEntry, HighScores};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (20 ms per tick)
    pub const SIM_DT: f32 = 0.020;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical canvas size in pixels
    pub const CANVAS_WIDTH: f32 = 288.0;
    pub const CANVAS_HEIGHT: f32 = 512.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (units/tick, negative is up)
    pub const JUMP_VELOCITY: f32 = -6.0;
    /// Pipe scroll speed (px/tick)
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Bird geometry - fixed column, square hitbox
    pub const BIRD_X: f32 = 10.0;
    pub const BIRD_SIZE: f32 = 24.0;
    pub const BIRD_START_Y: f32 = 150.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_GAP: f32 = 100.0;
    pub const FIRST_PIPE_X: f32 = 300.0;
    pub const FIRST_PIPE_Y: f32 = 0.0;
    /// New pipes enter at the right edge
    pub const PIPE_SPAWN_X: f32 = CANVAS_WIDTH;

    /// Stock sprite heights, used until real assets are decoded
    pub const DEFAULT_PIPE_HEIGHT: f32 = 242.0;
    pub const DEFAULT_GROUND_HEIGHT: f32 = 118.0;
}
