//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Build a color from 8-bit channels
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0]
}

/// Same color with a new alpha (0..=1)
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgba8};

    pub const BACKGROUND: Color = rgba8(0, 0, 0, 255);
    pub const SHIP_A: Color = rgba8(102, 153, 204, 255);
    pub const SHIP_B: Color = rgba8(153, 0, 0, 255);
    pub const PROJECTILE: Color = rgba8(255, 255, 0, 255);
    pub const PROJECTILE_TAIL: Color = rgba8(255, 0, 0, 255);
    pub const ASTEROID: Color = rgba8(100, 100, 100, 255);
    pub const BEETLE: Color = rgba8(0, 100, 50, 255);
    pub const WASP: Color = rgba8(255, 255, 0, 255);
    pub const STAR: Color = rgba8(255, 255, 255, 255);
    pub const HIT_FLASH: Color = rgba8(255, 51, 51, 255);

    pub const HEALTH_BACK: Color = rgba8(255, 0, 0, 255);
    pub const HEALTH_FILL: Color = rgba8(0, 255, 0, 255);
    pub const COOLDOWN_PENDING: Color = rgba8(192, 192, 192, 192);
    pub const SPECIAL_A_READY: Color = rgba8(255, 205, 0, 255);
    pub const SPECIAL_B_READY: Color = rgba8(255, 94, 0, 255);
    pub const SPLIT_DIVIDER: Color = rgba8(255, 255, 255, 100);

    pub const DEBUG_PHYSICS: Color = rgba8(0, 255, 255, 255);
    pub const DEBUG_COSMETIC: Color = rgba8(255, 0, 255, 255);
    pub const DEBUG_FORWARD: Color = rgba8(255, 0, 0, 255);
    pub const DEBUG_LEFT: Color = rgba8(0, 255, 0, 255);
    pub const DEBUG_VELOCITY: Color = rgba8(255, 255, 0, 255);
    pub const DEBUG_LINK: Color = rgba8(50, 50, 50, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_normalizes() {
        assert_eq!(rgba8(255, 0, 0, 255), [1.0, 0.0, 0.0, 1.0]);
        let half = rgba8(0, 0, 0, 51);
        assert!((half[3] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        let verts = [Vertex::new(1.0, 2.0, colors::STAR)];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 24);
    }
}
