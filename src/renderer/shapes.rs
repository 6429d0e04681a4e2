//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> [Vertex; 6] {
    let (right, bottom) = (x + width, y + height);
    [
        Vertex::new(x, y, color),
        Vertex::new(right, y, color),
        Vertex::new(x, bottom, color),
        Vertex::new(x, bottom, color),
        Vertex::new(right, y, color),
        Vertex::new(right, bottom, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
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

/// Segment count that keeps small and large circles looking round
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(12, 48)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(10.0, 20.0, 30.0, 40.0, [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_points_on_radius() {
        let center = Vec2::new(50.0, 50.0);
        let verts = circle(center, 10.0, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [50.0, 50.0]);
            for edge in &tri[1..] {
                let p = Vec2::from(edge.position);
                assert!(((p - center).length() - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_circle_segments_bounds() {
        assert_eq!(circle_segments(5.0), 12);
        assert_eq!(circle_segments(25.0), 20);
        assert_eq!(circle_segments(500.0), 48);
    }
}
