//! Fixed-step clock
//!
//! Turns variable animation-frame deltas into whole simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta (seconds) and return how many ticks to run now.
    /// Deltas above `MAX_FRAME_DT` are clamped (tab switches, debugger
    /// pauses) and at most `MAX_SUBSTEPS` ticks are released per frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Time carried into the next frame
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_frames_accumulate() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(0.012), 0);
        assert_eq!(clock.advance(0.012), 1);
        assert!((clock.pending() - 0.004).abs() < 1e-5);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        // A 2 second stall only yields MAX_FRAME_DT worth of ticks
        let mut stalled = FixedStep::new();
        let mut capped = FixedStep::new();
        assert_eq!(stalled.advance(2.0), capped.advance(MAX_FRAME_DT));
        assert_eq!(stalled.pending(), capped.pending());
        assert!(stalled.pending() < SIM_DT);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FixedStep { accumulator: 0.5 };
        assert_eq!(clock.advance(0.0), MAX_SUBSTEPS);
        assert!(clock.pending() > 0.3);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FixedStep::new();
        clock.advance(0.015);
        clock.reset();
        assert_eq!(clock.pending(), 0.0);
    }
}
