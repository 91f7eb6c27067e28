//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::check_collision;
use super::pipes::Pipe;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Advance the game state by one 20 ms tick.
///
/// Does nothing while idle. While running: gravity, bird movement, pipe
/// scroll and recycle, then the collision test. A crash stops the run and
/// is reported once through the returned events.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.is_running() {
        return events;
    }

    state.time_ticks += 1;

    // Position integrates the velocity from before this tick's gravity
    let prev_velocity = state.bird.velocity;
    state.bird.velocity += GRAVITY;
    state.bird.y += prev_velocity;

    state.pipes.scroll(SCROLL_SPEED);
    recycle_front_pipe(state, &mut events);

    if let Some(cause) = check_collision(&state.bird, &state.pipes, &state.layout) {
        state.stop();
        log::info!(
            "Crashed into {:?} after {} ticks, score {}",
            cause,
            state.time_ticks,
            state.score
        );
        events.push(GameEvent::Crashed {
            score: state.score,
            cause,
        });
    }

    events
}

/// Replace the front pipe with a fresh one at the right edge once it has
/// fully left the screen. Pipes are ordered by x, so only the front pipe
/// can be first to leave.
fn recycle_front_pipe(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let offscreen = state.pipes.front().is_some_and(Pipe::is_offscreen);
    if !offscreen {
        return;
    }

    state.pipes.pop_front();
    state.score += 1;

    let y = state.random_pipe_offset();
    state.pipes.push(Pipe::new(PIPE_SPAWN_X, y));

    log::debug!("Pipe passed, score {} (next gap offset {})", state.score, y);
    events.push(GameEvent::PipePassed { score: state.score });
}
