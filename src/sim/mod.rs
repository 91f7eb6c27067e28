//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::check_collision;
pub use pipes::{MAX_PIPES, Pipe, PipeField};
pub use state::{Bird, CrashCause, GameEvent, GamePhase, GameState, Layout};
pub use tick::tick;
