//! Headless renderer
//!
//! Records every draw in world space instead of submitting it to a GPU. The
//! binary uses it to exercise the full render pass; tests use it to inspect
//! what a frame would have drawn.

use glam::Vec2;

use super::vertex::Vertex;
use super::{Camera, Renderer, Transform2};
use crate::Rgba8;

/// One `draw_vertices` call, already transformed to world space
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Index into [`RecordingRenderer::cameras`] of the camera it was drawn under
    pub camera: usize,
    pub vertices: Vec<Vertex>,
}

/// Renderer that keeps everything it is asked to draw
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub clears: Vec<Rgba8>,
    /// Cameras in the order they were begun
    pub cameras: Vec<Camera>,
    pub draws: Vec<DrawCall>,
    active: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn vertex_count(&self) -> usize {
        self.draws.iter().map(|d| d.vertices.len()).sum()
    }

    pub fn draws_under(&self, camera: usize) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |d| d.camera == camera)
    }

    /// Vertices drawn under `camera`, mapped into normalized device
    /// coordinates the way a GPU backend would upload them
    pub fn ndc_vertices(&self, camera: usize) -> Vec<Vertex> {
        let Some(view) = self.cameras.get(camera) else {
            return Vec::new();
        };
        self.draws_under(camera)
            .flat_map(|d| d.vertices.iter())
            .map(|v| {
                let p = to_ndc(view, v.pos());
                Vertex::new(p.x, p.y, v.color)
            })
            .collect()
    }

    /// Vertex buffer contents for `camera`
    pub fn vertex_bytes(&self, camera: usize) -> Vec<u8> {
        bytemuck::cast_slice(&self.ndc_vertices(camera)).to_vec()
    }
}

/// Map a world point inside the camera's view rectangle to [-1, 1]
pub fn to_ndc(camera: &Camera, point: Vec2) -> Vec2 {
    let (min, max) = camera.view_bounds();
    let extent = (max - min).max(Vec2::splat(f32::EPSILON));
    (point - min) / extent * 2.0 - Vec2::ONE
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Rgba8) {
        self.clears.push(color);
    }

    fn begin_camera(&mut self, camera: &Camera) {
        if self.active.is_some() {
            log::warn!("begin_camera while another camera is active");
        }
        self.cameras.push(*camera);
        self.active = Some(self.cameras.len() - 1);
    }

    fn end_camera(&mut self, _camera: &Camera) {
        self.active = None;
    }

    fn draw_vertices(
        &mut self,
        vertices: &mut dyn Iterator<Item = Vertex>,
        transform: &Transform2,
    ) {
        let Some(camera) = self.active else {
            log::warn!("Draw outside of a camera ignored");
            return;
        };
        let vertices: Vec<Vertex> = vertices.map(|v| v.transformed(transform)).collect();
        if vertices.is_empty() {
            return;
        }
        self.draws.push(DrawCall { camera, vertices });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_recorded_in_world_space() {
        let camera = Camera::ortho(Vec2::ZERO, Vec2::new(200.0, 100.0));
        let mut r = RecordingRenderer::new();
        r.begin_camera(&camera);
        let mut verts = [Vertex::at(Vec2::new(1.0, 0.0), Rgba8::WHITE)].into_iter();
        r.draw_vertices(&mut verts, &Transform2::new(Vec2::new(50.0, 50.0), 0.0, 2.0));
        r.end_camera(&camera);

        assert_eq!(r.draws.len(), 1);
        assert_eq!(r.draws[0].vertices[0].pos(), Vec2::new(52.0, 50.0));
        assert_eq!(r.vertex_count(), 1);
    }

    #[test]
    fn test_draw_outside_camera_dropped() {
        let mut r = RecordingRenderer::new();
        let mut verts = [Vertex::at(Vec2::ZERO, Rgba8::WHITE)].into_iter();
        r.draw_vertices(&mut verts, &Transform2::IDENTITY);
        assert!(r.draws.is_empty());
    }

    #[test]
    fn test_ndc_mapping() {
        let mut camera = Camera::ortho(Vec2::ZERO, Vec2::new(200.0, 100.0));
        assert_eq!(to_ndc(&camera, Vec2::new(100.0, 50.0)), Vec2::ZERO);
        assert_eq!(to_ndc(&camera, Vec2::new(200.0, 0.0)), Vec2::new(1.0, -1.0));
        camera.position = Vec2::new(100.0, 0.0);
        assert_eq!(to_ndc(&camera, Vec2::new(100.0, 0.0)), Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_vertex_bytes() {
        let camera = Camera::ortho(Vec2::ZERO, Vec2::new(200.0, 100.0));
        let mut r = RecordingRenderer::new();
        r.begin_camera(&camera);
        let mut verts = vec![Vertex::at(Vec2::ZERO, Rgba8::WHITE); 3].into_iter();
        r.draw_vertices(&mut verts, &Transform2::IDENTITY);
        r.end_camera(&camera);
        assert_eq!(r.vertex_bytes(0).len(), 3 * Vertex::STRIDE);
        assert!(r.vertex_bytes(1).is_empty());
    }
}
