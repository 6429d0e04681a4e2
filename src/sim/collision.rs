//! Axis-aligned bounding box collision
//!
//! Every entity in the arena is an upright rectangle, so contact is a plain
//! interval test on both axes. Touching edges do not count as contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box (top-left corner plus extent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box with its top-left corner at `pos`
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Anything that occupies a box in the arena
pub trait Bounded {
    fn aabb(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn aabb(&self) -> Aabb {
        *self
    }
}

/// True iff the boxes' projections intersect on both axes (strictly)
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// [`overlaps`] for any two bounded entities
#[inline]
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    overlaps(&a.aabb(), &b.aabb())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_separated_boxes_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(20.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));

        // Overlap on x only
        let c = Aabb::new(5.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &c));
    }

    #[test]
    fn test_edge_touching_is_exclusive() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::new(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        let corner = Aabb::new(10.0, 10.0, 5.0, 5.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_partial_and_contained_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let partial = Aabb::new(9.5, 9.5, 10.0, 10.0);
        assert!(overlaps(&a, &partial));

        let big = Aabb::new(-100.0, -100.0, 300.0, 300.0);
        assert!(overlaps(&a, &big));
        assert!(overlaps(&big, &a));
    }

    #[test]
    fn test_center() {
        let a = Aabb::new(10.0, 20.0, 40.0, 40.0);
        assert_eq!(a.center(), Vec2::new(30.0, 40.0));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..200.0, 0.5f32..200.0)
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn overlap_matches_interval_intersection(a in arb_box(), b in arb_box()) {
            let x_hit = a.x.max(b.x) < a.right().min(b.right());
            let y_hit = a.y.max(b.y) < a.bottom().min(b.bottom());
            prop_assert_eq!(overlaps(&a, &b), x_hit && y_hit);
        }

        #[test]
        fn box_overlaps_itself(a in arb_box()) {
            prop_assert!(overlaps(&a, &a));
        }
    }
}
