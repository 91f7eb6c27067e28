//! Scene building
//!
//! Turns game state into an ordered list of sprite placements in canvas
//! pixels. Later entries draw over earlier ones.

use glam::Vec2;

use crate::assets::{AssetKind, SpriteMetrics};
use crate::consts::{BIRD_X, CANVAS_HEIGHT};
use crate::sim::GameState;

/// One sprite placed on the canvas (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: AssetKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl SpriteDraw {
    fn at(sprite: AssetKind, pos: Vec2, metrics: &SpriteMetrics) -> Self {
        Self {
            sprite,
            pos,
            size: metrics.size(sprite),
        }
    }
}

/// Background, each pipe pair, ground strip, bird
pub fn build_scene(state: &GameState, metrics: &SpriteMetrics) -> Vec<SpriteDraw> {
    let mut draws = Vec::with_capacity(3 + state.pipes.len() * 2);

    draws.push(SpriteDraw::at(AssetKind::Background, Vec2::ZERO, metrics));

    for pipe in &state.pipes {
        draws.push(SpriteDraw::at(
            AssetKind::PipeUp,
            Vec2::new(pipe.x, pipe.y),
            metrics,
        ));
        draws.push(SpriteDraw::at(
            AssetKind::PipeBottom,
            Vec2::new(pipe.x, pipe.gap_bottom(&state.layout)),
            metrics,
        ));
    }

    let ground_height = metrics.size(AssetKind::Foreground).y;
    draws.push(SpriteDraw::at(
        AssetKind::Foreground,
        Vec2::new(0.0, CANVAS_HEIGHT - ground_height),
        metrics,
    ));

    draws.push(SpriteDraw::at(
        AssetKind::Bird,
        Vec2::new(BIRD_X, state.bird.y),
        metrics,
    ));

    draws
}

/// Score overlay text
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PIPE_GAP;
    use crate::sim::Pipe;

    #[test]
    fn test_scene_order() {
        let state = GameState::new(1);
        let scene = build_scene(&state, &SpriteMetrics::stock());
        let kinds: Vec<_> = scene.iter().map(|d| d.sprite).collect();
        assert_eq!(
            kinds,
            vec![
                AssetKind::Background,
                AssetKind::PipeUp,
                AssetKind::PipeBottom,
                AssetKind::Foreground,
                AssetKind::Bird,
            ]
        );
    }

    #[test]
    fn test_scene_positions() {
        let mut state = GameState::new(1);
        state.bird.y = 123.0;
        state.pipes.clear();
        state.pipes.push(Pipe::new(100.0, -60.0));
        state.pipes.push(Pipe::new(250.0, -10.0));

        let metrics = SpriteMetrics::stock();
        let scene = build_scene(&state, &metrics);
        assert_eq!(scene.len(), 7);

        assert_eq!(scene[1].pos, Vec2::new(100.0, -60.0));
        assert_eq!(scene[2].pos, Vec2::new(100.0, -60.0 + 242.0 + PIPE_GAP));
        assert_eq!(scene[3].pos, Vec2::new(250.0, -10.0));

        let ground = scene[5];
        assert_eq!(ground.sprite, AssetKind::Foreground);
        assert_eq!(ground.pos, Vec2::new(0.0, 512.0 - 118.0));

        let bird = scene[6];
        assert_eq!(bird.pos, Vec2::new(BIRD_X, 123.0));
        assert_eq!(bird.size, metrics.size(AssetKind::Bird));
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(0), "Score: 0");
        assert_eq!(score_text(31), "Score: 31");
    }
}
