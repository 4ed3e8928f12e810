//! Vertex format shared by every shape

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Colored 2D point. Shapes emit canvas pixels; the pipeline rewrites
/// positions to clip space before upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(point: Vec2, color: [f32; 4]) -> Self {
        Self::new(point.x, point.y, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Fixed colors; brick colors come from the config palette
pub mod colors {
    /// Canvas clear color (#1a1a2e)
    pub const BACKGROUND: [f32; 4] = [0.102, 0.102, 0.180, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_GLOW: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Thin outline around each brick
    pub const BRICK_STROKE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
