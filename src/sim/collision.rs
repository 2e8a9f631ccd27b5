//! Collision detection for square bounding boxes
//!
//! Ship and asteroids are both axis-aligned squares; rotation is cosmetic and
//! never enlarges the box.

use glam::Vec2;

/// Axis-aligned bounding box (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square box with top-left corner at `pos`
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Strict overlap test: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// True when the box lies entirely outside a `width` x `height` field
    /// on at least one side
    pub fn outside_field(&self, width: f32, height: f32) -> bool {
        self.max.x <= 0.0 || self.min.x >= width || self.max.y <= 0.0 || self.min.y >= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 50.0);
        let b = Aabb::new(Vec2::new(25.0, 25.0), 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 50.0);
        let right = Aabb::new(Vec2::new(50.0, 0.0), 20.0);
        let below = Aabb::new(Vec2::new(10.0, 50.0), 20.0);
        let corner = Aabb::new(Vec2::new(50.0, 50.0), 20.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!a.overlaps(&corner));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let big = Aabb::new(Vec2::new(0.0, 0.0), 60.0);
        let small = Aabb::new(Vec2::new(20.0, 20.0), 10.0);
        assert!(big.overlaps(&small));
        assert!(small.overlaps(&big));
    }

    #[test]
    fn test_outside_field() {
        let (w, h) = (800.0, 600.0);
        // Fully above (just spawned at -size)
        assert!(Aabb::new(Vec2::new(100.0, -30.0), 30.0).outside_field(w, h));
        // Fully below
        assert!(Aabb::new(Vec2::new(100.0, 600.0), 30.0).outside_field(w, h));
        // Fully left / right
        assert!(Aabb::new(Vec2::new(-40.0, 100.0), 40.0).outside_field(w, h));
        assert!(Aabb::new(Vec2::new(800.0, 100.0), 40.0).outside_field(w, h));
        // Partially visible
        assert!(!Aabb::new(Vec2::new(100.0, -29.0), 30.0).outside_field(w, h));
        assert!(!Aabb::new(Vec2::new(799.0, 599.0), 30.0).outside_field(w, h));
        assert!(!Aabb::new(Vec2::new(-39.0, 100.0), 40.0).outside_field(w, h));
    }
}
