//! Vertex types for sprite rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::scene::SpriteDraw;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// 2D vertex with clip-space position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    pub const fn new(position: [f32; 2], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Map canvas pixels (origin top-left, y down) to NDC (-1..1, y up)
#[inline]
pub fn canvas_to_ndc(p: Vec2) -> Vec2 {
    Vec2::new(
        p.x / CANVAS_WIDTH * 2.0 - 1.0,
        1.0 - p.y / CANVAS_HEIGHT * 2.0,
    )
}

/// Two triangles covering a sprite placement
pub fn sprite_quad(draw: &SpriteDraw) -> [SpriteVertex; 6] {
    let tl = canvas_to_ndc(draw.pos);
    let br = canvas_to_ndc(draw.pos + draw.size);

    let top_left = SpriteVertex::new([tl.x, tl.y], [0.0, 0.0]);
    let top_right = SpriteVertex::new([br.x, tl.y], [1.0, 0.0]);
    let bottom_left = SpriteVertex::new([tl.x, br.y], [0.0, 1.0]);
    let bottom_right = SpriteVertex::new([br.x, br.y], [1.0, 1.0]);

    [
        top_left,
        bottom_left,
        top_right,
        top_right,
        bottom_left,
        bottom_right,
    ]
}

/// Sky color behind everything
pub mod colors {
    pub const CLEAR: wgpu::Color = wgpu::Color {
        r: 0.44,
        g: 0.77,
        b: 0.81,
        a: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;

    #[test]
    fn test_canvas_corners_to_ndc() {
        assert_eq!(canvas_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(
            canvas_to_ndc(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(
            canvas_to_ndc(Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_full_canvas_quad() {
        let draw = SpriteDraw {
            sprite: AssetKind::Background,
            pos: Vec2::ZERO,
            size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        };
        let quad = sprite_quad(&draw);
        assert_eq!(quad[0], SpriteVertex::new([-1.0, 1.0], [0.0, 0.0]));
        assert_eq!(quad[5], SpriteVertex::new([1.0, -1.0], [1.0, 1.0]));
        // Shared diagonal
        assert_eq!(quad[1], quad[4]);
        assert_eq!(quad[2], quad[3]);
    }
}
