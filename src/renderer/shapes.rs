//! Shape generation for 2D primitives
//!
//! Local-space outlines for each entity kind plus the generic builders
//! (circle, ring, thick line, radial fan) that turn them into triangles.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Color, Vertex};
use crate::direction_from_degrees;

/// Rotate by `orientation_deg`, scale, then translate a local-space point
#[inline]
pub fn to_world(local: Vec2, position: Vec2, orientation_deg: f32, scale: f32) -> Vec2 {
    position + direction_from_degrees(orientation_deg).rotate(local * scale)
}

/// Transform a local-space triangle list into world-space vertices of one color
pub fn transform_triangles(
    local: &[Vec2],
    position: Vec2,
    orientation_deg: f32,
    scale: f32,
    color: Color,
) -> Vec<Vertex> {
    local
        .iter()
        .map(|p| {
            let w = to_world(*p, position, orientation_deg, scale);
            Vertex::new(w.x, w.y, color)
        })
        .collect()
}

/// Triangle fan around the origin through points at `radii[i]`, evenly spaced in angle
///
/// Used for the asteroid and debris silhouettes: one triangle per outline edge.
pub fn radial_fan(radii: &[f32]) -> Vec<Vec2> {
    let n = radii.len();
    if n < 3 {
        return Vec::new();
    }
    let step = 360.0 / n as f32;
    let point = |i: usize| direction_from_degrees(step * i as f32) * radii[i];

    let mut tris = Vec::with_capacity(n * 3);
    for i in 0..n {
        tris.push(point(i));
        tris.push(point((i + 1) % n));
        tris.push(Vec2::ZERO);
    }
    tris
}

/// Player ship, nose along +X
pub const SHIP_TRIANGLES: [Vec2; 15] = [
    // Left wing
    Vec2::new(2.0, 1.0),
    Vec2::new(0.0, 2.0),
    Vec2::new(-2.0, 1.0),
    // Body
    Vec2::new(0.0, 1.0),
    Vec2::new(-2.0, 1.0),
    Vec2::new(-2.0, -1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-2.0, -1.0),
    Vec2::new(0.0, -1.0),
    // Nose
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    // Right wing
    Vec2::new(2.0, -1.0),
    Vec2::new(-2.0, -1.0),
    Vec2::new(0.0, -2.0),
];

/// Wasp, two swept wings, nose along +X
pub const WASP_TRIANGLES: [Vec2; 6] = [
    Vec2::new(3.0, 0.0),
    Vec2::new(-0.5, 2.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(3.0, 0.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(-0.5, -2.0),
];

/// Beetle, a squat quad with a pointed front
pub const BEETLE_TRIANGLES: [Vec2; 6] = [
    Vec2::new(2.0, 0.0),
    Vec2::new(-1.5, 1.5),
    Vec2::new(-1.5, -1.5),
    Vec2::new(-1.5, 1.5),
    Vec2::new(-2.0, 0.0),
    Vec2::new(-1.5, -1.5),
];

/// Four-pointed star, centered on the origin
pub const STAR_TRIANGLES: [Vec2; 18] = [
    Vec2::new(-3.0, 0.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 3.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(3.0, 0.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(0.0, -3.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// Projectile: a bright head and a tail fading to transparent
pub fn projectile(position: Vec2, orientation_deg: f32, head: Color, tail: Color) -> Vec<Vertex> {
    let faded_tail = [tail[0], tail[1], tail[2], 0.0];
    let local = [
        (Vec2::new(0.5, 0.0), head),
        (Vec2::new(0.0, 0.5), head),
        (Vec2::new(0.0, -0.5), head),
        (Vec2::new(0.0, -0.5), tail),
        (Vec2::new(0.0, 0.5), tail),
        (Vec2::new(-2.0, 0.0), faded_tail),
    ];
    local
        .iter()
        .map(|(p, c)| {
            let w = to_world(*p, position, orientation_deg, 1.0);
            Vertex::new(w.x, w.y, *c)
        })
        .collect()
}

/// Exhaust flame behind a ship
pub fn flame(position: Vec2, orientation_deg: f32, length: f32, color: Color) -> Vec<Vertex> {
    let forward = direction_from_degrees(orientation_deg);
    let tail = position - forward * 2.0;
    let tip = tail - forward * length;
    let left = tail + forward.perp();
    let right = tail - forward.perp();
    vec![
        Vertex::new(tip.x, tip.y, color),
        Vertex::new(right.x, right.y, color),
        Vertex::new(left.x, left.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle) of `thickness` centered on `radius`
pub fn ring(center: Vec2, radius: f32, thickness: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let inner_radius = (radius - thickness * 0.5).max(0.0);
    let outer_radius = radius + thickness * 0.5;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a thick line segment with square caps
pub fn line(start: Vec2, end: Vec2, thickness: f32, color: Color) -> Vec<Vertex> {
    let half = thickness * 0.5;
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = dir.perp() * half;
    let a = start - dir * half;
    let b = end + dir * half;

    let c1 = a + perp;
    let c2 = a - perp;
    let c3 = b + perp;
    let c4 = b - perp;
    vec![
        Vertex::new(c1.x, c1.y, color),
        Vertex::new(c2.x, c2.y, color),
        Vertex::new(c3.x, c3.y, color),
        Vertex::new(c3.x, c3.y, color),
        Vertex::new(c2.x, c2.y, color),
        Vertex::new(c4.x, c4.y, color),
    ]
}
