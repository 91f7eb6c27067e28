//! Game state and core simulation types
//!
//! Everything a run needs to advance deterministically lives here.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::pipes::{Pipe, PipeField};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for a (re)start, or the last run crashed
    #[default]
    Idle,
    /// Active gameplay
    Running,
}

/// Sprite-derived dimensions the simulation depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Height of one pipe sprite
    pub pipe_height: f32,
    /// Height of the ground strip at the bottom of the canvas
    pub ground_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            pipe_height: DEFAULT_PIPE_HEIGHT,
            ground_height: DEFAULT_GROUND_HEIGHT,
        }
    }
}

impl Layout {
    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_line(&self) -> f32 {
        CANVAS_HEIGHT - self.ground_height
    }
}

/// The bird. Its column is fixed at `BIRD_X`, only the vertical axis moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top edge (px, y grows downward)
    pub y: f32,
    /// Vertical velocity (units/tick)
    pub velocity: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            y: BIRD_START_Y,
            velocity: 0.0,
        }
    }
}

impl Bird {
    /// Bottom edge of the hitbox
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + BIRD_SIZE
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Pipe,
    Ground,
    Ceiling,
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A pipe left the screen; `score` is the new total
    PipePassed { score: u32 },
    /// The run ended; `score` is final and should be submitted
    Crashed { score: u32, cause: CrashCause },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the pipe RNG for the current run
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeField,
    /// Pipes passed this run
    pub score: u32,
    /// Ticks advanced this run
    pub time_ticks: u64,
    pub layout: Layout,
}

impl GameState {
    /// Create an idle game with the given pipe seed and stock layout
    pub fn new(seed: u64) -> Self {
        Self::with_layout(seed, Layout::default())
    }

    /// Create an idle game with sprite-derived dimensions
    pub fn with_layout(seed: u64, layout: Layout) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            bird: Bird::default(),
            pipes: Self::starting_pipes(),
            score: 0,
            time_ticks: 0,
            layout,
        }
    }

    fn starting_pipes() -> PipeField {
        PipeField::with_pipe(Pipe::new(FIRST_PIPE_X, FIRST_PIPE_Y))
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Put bird, score and pipes back to the start position and begin a run.
    /// The pipe RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.bird = Bird::default();
        self.score = 0;
        self.pipes = Self::starting_pipes();
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
    }

    /// Reset and reseed the pipe RNG
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset();
    }

    /// Player input. Replaces the current velocity with the jump impulse
    /// while running; ignored otherwise. Returns whether it applied.
    pub fn flap(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.bird.velocity = JUMP_VELOCITY;
        true
    }

    /// End the run
    pub fn stop(&mut self) {
        self.phase = GamePhase::Idle;
    }

    /// Swap in new sprite dimensions (after assets finish loading)
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Vertical offset for a freshly spawned pipe: an integer in
    /// `[-pipe_height, 0)`
    pub fn random_pipe_offset(&mut self) -> f32 {
        let height = self.layout.pipe_height.max(1.0) as u32;
        self.rng.random_range(0..height) as f32 - height as f32
    }
}
