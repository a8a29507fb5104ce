//! Rendering capability
//!
//! The core computes every vertex and color; a [`Renderer`] only rasterizes.
//! [`TriangleBuffer`] is the headless implementation used by the binary and
//! by tests: it flattens lines and rings into triangles in one vertex stream.

pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Color, Vertex, colors, rgba8, with_alpha};

/// Segments used when a ring is flattened into triangles
pub const RING_SEGMENTS: u32 = 24;

/// Drawing services provided by the host
pub trait Renderer {
    fn draw_triangles(&mut self, vertices: &[Vertex]);
    fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Color);
    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color);
}

/// Collects a frame's geometry as one triangle list
#[derive(Debug, Default)]
pub struct TriangleBuffer {
    vertices: Vec<Vertex>,
    pub lines: usize,
    pub rings: usize,
}

impl TriangleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.lines = 0;
        self.rings = 0;
    }
}

impl Renderer for TriangleBuffer {
    fn draw_triangles(&mut self, vertices: &[Vertex]) {
        self.vertices.extend_from_slice(vertices);
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: Color) {
        self.lines += 1;
        self.vertices.extend(shapes::line(start, end, thickness, color));
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        self.rings += 1;
        self.vertices
            .extend(shapes::ring(center, radius, thickness, color, RING_SEGMENTS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_flattens_primitives() {
        let mut buffer = TriangleBuffer::new();
        buffer.draw_line(Vec2::ZERO, Vec2::X, 0.5, colors::STAR);
        buffer.draw_ring(Vec2::ZERO, 1.0, 0.1, colors::STAR);
        assert_eq!(buffer.lines, 1);
        assert_eq!(buffer.rings, 1);
        assert_eq!(buffer.triangle_count(), 2 + RING_SEGMENTS as usize * 2);
        assert_eq!(buffer.as_bytes().len(), buffer.vertices().len() * std::mem::size_of::<Vertex>());

        buffer.clear();
        assert!(buffer.vertices().is_empty());
    }
}
