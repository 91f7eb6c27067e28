//! Rendering
//!
//! `scene` decides what goes where; `sprite_pipeline` puts it on screen
//! with WebGPU (WebGL2 fallback).

pub mod scene;
pub mod sprite_pipeline;
pub mod vertex;

pub use scene::{SpriteDraw, build_scene, score_text};
pub use sprite_pipeline::SpriteRenderState;
