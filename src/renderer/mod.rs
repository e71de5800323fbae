//! Rendering interface
//!
//! The simulation never talks to a GPU. Entities hand local-space triangle
//! lists plus a [`Transform2`] to a [`Renderer`]; a backend decides what to do
//! with them. [`RecordingRenderer`] is the headless backend used by the binary
//! and the tests.

pub mod recording;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use recording::{DrawCall, RecordingRenderer};
pub use scene::render_game;
pub use vertex::Vertex;

use glam::Vec2;

use crate::Rgba8;

/// Local-to-world transform: scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    pub position: Vec2,
    pub rotation_degrees: f32,
    pub scale: f32,
}

impl Transform2 {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation_degrees: 0.0,
        scale: 1.0,
    };

    pub fn new(position: Vec2, rotation_degrees: f32, scale: f32) -> Self {
        Self {
            position,
            rotation_degrees,
            scale,
        }
    }

    pub fn apply(&self, local: Vec2) -> Vec2 {
        let rotation = Vec2::from_angle(self.rotation_degrees.to_radians());
        self.position + rotation.rotate(local * self.scale)
    }
}

/// Orthographic view of a rectangle of world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Offset applied to the whole view (screen shake)
    pub position: Vec2,
    pub bottom_left: Vec2,
    pub top_right: Vec2,
    /// Color the target is cleared to before drawing, if any
    pub clear_color: Option<Rgba8>,
}

impl Camera {
    pub fn ortho(bottom_left: Vec2, top_right: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            bottom_left,
            top_right,
            clear_color: None,
        }
    }

    pub fn with_clear(mut self, color: Rgba8) -> Self {
        self.clear_color = Some(color);
        self
    }

    /// Visible rectangle after the offset is applied
    pub fn view_bounds(&self) -> (Vec2, Vec2) {
        (
            self.bottom_left + self.position,
            self.top_right + self.position,
        )
    }
}

/// Draw target for the scene pass
pub trait Renderer {
    /// Clear the target
    fn clear(&mut self, color: Rgba8);

    fn begin_camera(&mut self, camera: &Camera);

    fn end_camera(&mut self, camera: &Camera);

    /// Draw a triangle list given in local space
    fn draw_vertices(&mut self, vertices: &mut dyn Iterator<Item = Vertex>, transform: &Transform2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_order() {
        let t = Transform2::new(Vec2::new(5.0, 5.0), 180.0, 3.0);
        let p = t.apply(Vec2::new(1.0, 0.0));
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
        assert_eq!(Transform2::IDENTITY.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_camera_view_bounds_follow_offset() {
        let mut camera = Camera::ortho(Vec2::ZERO, Vec2::new(200.0, 100.0));
        camera.position = Vec2::new(2.0, -1.0);
        assert_eq!(
            camera.view_bounds(),
            (Vec2::new(2.0, -1.0), Vec2::new(202.0, 99.0))
        );
    }
}
