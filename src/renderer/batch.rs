//! Triangle batch backend for [`DrawSurface`]

use glam::Vec2;

use super::DrawSurface;
use super::shapes;
use super::vertex::Vertex;

/// Collects one frame of draw calls as arena-space triangles
#[derive(Debug, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    clear_color: [f32; 4],
    alpha: f32,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            alpha: 1.0,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Background color from the last `clear`
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    fn tint(&self, color: [f32; 4]) -> [f32; 4] {
        let alpha = (color[3] * self.alpha).clamp(0.0, 1.0);
        [color[0], color[1], color[2], alpha]
    }
}

impl DrawSurface for VertexBatch {
    fn clear(&mut self, color: [f32; 4]) {
        self.vertices.clear();
        self.clear_color = color;
        self.alpha = 1.0;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
        let color = self.tint(color);
        self.vertices
            .extend_from_slice(&shapes::rect(x, y, width, height, color));
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
        let color = self.tint(color);
        let segments = shapes::circle_segments(radius);
        self.vertices.extend(shapes::circle(
            Vec2::new(cx, cy),
            radius,
            color,
            segments,
        ));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_applies_to_following_fills() {
        let mut batch = VertexBatch::new();
        batch.clear([0.1, 0.1, 0.1, 1.0]);
        batch.fill_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        batch.set_alpha(0.5);
        batch.fill_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);

        let verts = batch.vertices();
        assert_eq!(verts.len(), 12);
        assert_eq!(verts[0].color[3], 1.0);
        assert_eq!(verts[6].color[3], 0.5);
    }

    #[test]
    fn test_clear_discards_previous_frame() {
        let mut batch = VertexBatch::new();
        batch.set_alpha(0.2);
        batch.fill_circle(10.0, 10.0, 5.0, [1.0; 4]);
        assert!(!batch.vertices().is_empty());

        batch.clear([0.0, 0.0, 1.0, 1.0]);
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.clear_color(), [0.0, 0.0, 1.0, 1.0]);

        batch.fill_rect(0.0, 0.0, 1.0, 1.0, [1.0; 4]);
        assert_eq!(batch.vertices()[0].color[3], 1.0);
    }
}
