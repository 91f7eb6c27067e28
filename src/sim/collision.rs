//! Collision detection
//!
//! The bird is a `BIRD_SIZE` square at column `BIRD_X`. All comparisons are
//! inclusive, so touching an edge counts as a hit.

use super::pipes::{Pipe, PipeField};
use super::state::{Bird, CrashCause, Layout};
use crate::consts::{BIRD_SIZE, BIRD_X, PIPE_WIDTH};

/// Bird column overlaps the pipe column
#[inline]
pub fn overlaps_horizontally(pipe: &Pipe) -> bool {
    BIRD_X + BIRD_SIZE >= pipe.x && BIRD_X <= pipe.x + PIPE_WIDTH
}

/// Bird is outside the gap of this pipe (touching the upper or lower pipe)
#[inline]
pub fn outside_gap(bird: &Bird, pipe: &Pipe, layout: &Layout) -> bool {
    bird.y <= pipe.gap_top(layout) || bird.bottom() >= pipe.gap_bottom(layout)
}

/// Bird hits this pipe pair
pub fn hits_pipe(bird: &Bird, pipe: &Pipe, layout: &Layout) -> bool {
    overlaps_horizontally(pipe) && outside_gap(bird, pipe, layout)
}

/// Bird bottom touches the ground line
#[inline]
pub fn hits_ground(bird: &Bird, layout: &Layout) -> bool {
    bird.bottom() >= layout.ground_line()
}

/// Bird top touches the top of the canvas
#[inline]
pub fn hits_ceiling(bird: &Bird) -> bool {
    bird.y <= 0.0
}

/// Check the bird against every active pipe and the canvas bounds
pub fn check_collision(bird: &Bird, pipes: &PipeField, layout: &Layout) -> Option<CrashCause> {
    if pipes.iter().any(|pipe| hits_pipe(bird, pipe, layout)) {
        return Some(CrashCause::Pipe);
    }
    if hits_ground(bird, layout) {
        return Some(CrashCause::Ground);
    }
    if hits_ceiling(bird) {
        return Some(CrashCause::Ceiling);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PIPE_GAP;

    fn bird_at(y: f32) -> Bird {
        Bird { y, velocity: 0.0 }
    }

    /// Pipe far to the right, no horizontal overlap
    fn far_pipes() -> PipeField {
        PipeField::with_pipe(Pipe::new(300.0, 0.0))
    }

    #[test]
    fn test_ceiling_boundary() {
        let layout = Layout::default();
        assert_eq!(
            check_collision(&bird_at(0.0), &far_pipes(), &layout),
            Some(CrashCause::Ceiling)
        );
        assert_eq!(check_collision(&bird_at(1.0), &far_pipes(), &layout), None);
    }

    #[test]
    fn test_ground_boundary() {
        let layout = Layout::default();
        let touching = layout.ground_line() - BIRD_SIZE;
        assert_eq!(
            check_collision(&bird_at(touching), &far_pipes(), &layout),
            Some(CrashCause::Ground)
        );
        assert_eq!(
            check_collision(&bird_at(touching - 0.5), &far_pipes(), &layout),
            None
        );
    }

    #[test]
    fn test_horizontal_overlap_edges() {
        // Pipe left edge exactly on the bird's right edge
        assert!(overlaps_horizontally(&Pipe::new(BIRD_X + BIRD_SIZE, 0.0)));
        assert!(!overlaps_horizontally(&Pipe::new(BIRD_X + BIRD_SIZE + 1.0, 0.0)));
        // Pipe right edge exactly on the bird's left edge
        assert!(overlaps_horizontally(&Pipe::new(BIRD_X - PIPE_WIDTH, 0.0)));
        assert!(!overlaps_horizontally(&Pipe::new(BIRD_X - PIPE_WIDTH - 1.0, 0.0)));
    }

    #[test]
    fn test_bird_inside_gap_survives() {
        let layout = Layout::default();
        let pipe = Pipe::new(0.0, -100.0);
        let gap_top = pipe.gap_top(&layout);
        // Strictly between the pipes
        let bird = bird_at(gap_top + 10.0);
        assert!(bird.bottom() < pipe.gap_bottom(&layout));
        assert!(!hits_pipe(&bird, &pipe, &layout));
    }

    #[test]
    fn test_bird_touching_upper_pipe() {
        let layout = Layout::default();
        let pipe = Pipe::new(0.0, -100.0);
        let bird = bird_at(pipe.gap_top(&layout));
        assert!(hits_pipe(&bird, &pipe, &layout));
        assert_eq!(
            check_collision(&bird, &PipeField::with_pipe(pipe), &layout),
            Some(CrashCause::Pipe)
        );
    }

    #[test]
    fn test_bird_touching_lower_pipe() {
        let layout = Layout::default();
        let pipe = Pipe::new(0.0, -100.0);
        let bird = bird_at(pipe.gap_top(&layout) + PIPE_GAP - BIRD_SIZE);
        assert!(hits_pipe(&bird, &pipe, &layout));
        let bird = bird_at(pipe.gap_top(&layout) + PIPE_GAP - BIRD_SIZE - 0.5);
        assert!(!hits_pipe(&bird, &pipe, &layout));
    }

    #[test]
    fn test_outside_gap_without_overlap_is_safe() {
        let layout = Layout::default();
        // Bird well above the gap but the pipe is off to the right
        let pipe = Pipe::new(200.0, 0.0);
        let bird = bird_at(50.0);
        assert!(outside_gap(&bird, &pipe, &layout));
        assert!(!hits_pipe(&bird, &pipe, &layout));
    }

    #[test]
    fn test_every_pipe_is_checked() {
        let layout = Layout::default();
        let mut pipes = PipeField::new();
        pipes.push(Pipe::new(-40.0, -100.0)); // overlapping, bird in its gap
        pipes.push(Pipe::new(20.0, -200.0)); // overlapping, bird outside its gap
        let bird = bird_at(160.0);
        assert!(!hits_pipe(&bird, &pipes.as_slice()[0], &layout));
        assert_eq!(check_collision(&bird, &pipes, &layout), Some(CrashCause::Pipe));
    }
}
