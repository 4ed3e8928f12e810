//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in canvas pixels (y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Segments used for each rounded corner
pub const CORNER_SEGMENTS: u32 = 6;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }

    vertices
}

/// Perimeter of a rounded rectangle, clockwise on screen starting at the
/// top-left corner. Every call with the same `segments` yields the same
/// number of points, so two outlines can be stitched together.
fn rounded_rect_outline_points(
    min: Vec2,
    size: Vec2,
    radius: f32,
    segments: u32,
) -> Vec<Vec2> {
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    let max = min + size;
    // (arc center, start angle); y grows downward so PI..1.5PI is the top-left
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];

    let mut points = Vec::with_capacity(corners.len() * (segments as usize + 1));
    for (center, start) in corners {
        for i in 0..=segments {
            let theta = start + FRAC_PI_2 * (i as f32 / segments as f32);
            points.push(center + Vec2::from_angle(theta) * r);
        }
    }
    points
}

/// Generate vertices for a filled rounded rectangle
pub fn rounded_rect(min: Vec2, size: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let points = rounded_rect_outline_points(min, size, radius, CORNER_SEGMENTS);
    let center = min + size / 2.0;
    let mut vertices = Vec::with_capacity(points.len() * 3);

    // Convex outline: a fan from the center covers it
    for (i, &p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(p1, color));
        vertices.push(Vertex::at(p2, color));
    }

    vertices
}

/// Generate vertices for a rounded rectangle stroke centered on its edge
pub fn rounded_rect_stroke(
    min: Vec2,
    size: Vec2,
    radius: f32,
    line_width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let half = Vec2::splat(line_width / 2.0);
    let outer = rounded_rect_outline_points(
        min - half,
        size + half * 2.0,
        radius + half.x,
        CORNER_SEGMENTS,
    );
    let inner = rounded_rect_outline_points(
        min + half,
        (size - half * 2.0).max(Vec2::ZERO),
        (radius - half.x).max(0.0),
        CORNER_SEGMENTS,
    );

    let n = outer.len();
    let mut vertices = Vec::with_capacity(n * 6);
    for i in 0..n {
        let j = (i + 1) % n;
        let (inner1, outer1, inner2, outer2) = (inner[i], outer[i], inner[j], outer[j]);

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 8.0, WHITE, 24).len(), 72);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        for v in circle(Vec2::new(10.0, 10.0), 8.0, WHITE, 16) {
            let p = Vec2::from(v.position);
            assert!(p.distance(Vec2::new(10.0, 10.0)) <= 8.0 + 1e-4);
        }
    }

    #[test]
    fn test_rounded_rect_within_bounds() {
        let min = Vec2::new(35.0, 60.0);
        let size = Vec2::new(75.0, 25.0);
        let vertices = rounded_rect(min, size, 5.0, WHITE);
        let corners = 4 * (CORNER_SEGMENTS as usize + 1);
        assert_eq!(vertices.len(), corners * 3);
        for v in vertices {
            assert!(v.position[0] >= min.x - 1e-4 && v.position[0] <= min.x + size.x + 1e-4);
            assert!(v.position[1] >= min.y - 1e-4 && v.position[1] <= min.y + size.y + 1e-4);
        }
    }

    #[test]
    fn test_radius_clamped_to_half_height() {
        let vertices = rounded_rect(Vec2::ZERO, Vec2::new(120.0, 15.0), 40.0, WHITE);
        for v in vertices {
            assert!(v.position[1] >= -1e-4 && v.position[1] <= 15.0 + 1e-4);
        }
    }

    #[test]
    fn test_stroke_straddles_edge() {
        let min = Vec2::new(10.0, 10.0);
        let size = Vec2::new(75.0, 25.0);
        let vertices = rounded_rect_stroke(min, size, 5.0, 1.0, WHITE);
        assert_eq!(vertices.len(), 4 * (CORNER_SEGMENTS as usize + 1) * 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let min_x = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max_x = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min_x - 9.5).abs() < 1e-4);
        assert!((max_x - 85.5).abs() < 1e-4);
    }
}
