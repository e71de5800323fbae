//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::Transform2;
use crate::Rgba8;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(position: Vec2, color: Rgba8) -> Self {
        Self::new(position.x, position.y, color.to_f32())
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from(self.position)
    }

    /// Same vertex with alpha replaced (0-1)
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Local-space vertex moved into world space
    pub fn transformed(mut self, transform: &Transform2) -> Self {
        self.position = transform.apply(self.pos()).into();
        self
    }

    /// Byte distance between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}
