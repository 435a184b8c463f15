//! Axis-aligned box tests between the player and platforms
//!
//! Screen coordinates: x grows right, y grows down. A box is anchored at its
//! top-left corner.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned bounding box (top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Player box at `pos`
    pub fn player(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Platform box at `pos`
    pub fn platform(pos: Vec2) -> Self {
        Self::new(pos, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict overlap on the horizontal axis
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

/// Strict overlap on both axes. Touching edges do not overlap.
///
/// Order of arguments does not matter.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps_horizontally(b) && a.bottom() > b.top() && a.top() < b.bottom()
}

/// `a` shares horizontal span with `b` and its bottom edge is at or above `b`'s top
#[inline]
pub fn rests_above(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps_horizontally(b) && a.bottom() <= b.top()
}

/// Player at `player_pos` overlaps the platform at `platform_pos`
pub fn collides_with(player_pos: Vec2, platform_pos: Vec2) -> bool {
    overlaps(&Aabb::player(player_pos), &Aabb::platform(platform_pos))
}

/// Player at `player_pos` is over the platform at `platform_pos` without touching it
pub fn is_above(player_pos: Vec2, platform_pos: Vec2) -> bool {
    rests_above(&Aabb::player(player_pos), &Aabb::platform(platform_pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collides_overlapping_boxes() {
        // Player bottom edge 10 units into the platform top
        assert!(collides_with(Vec2::new(100.0, 510.0), Vec2::new(50.0, 600.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Bottom edge exactly on the platform top
        assert!(!collides_with(Vec2::new(100.0, 500.0), Vec2::new(50.0, 600.0)));
        // Player right edge exactly on platform left edge
        assert!(!collides_with(Vec2::new(100.0, 550.0), Vec2::new(200.0, 600.0)));
        // Platform right edge exactly on player left edge
        assert!(!collides_with(Vec2::new(100.0, 550.0), Vec2::new(-100.0, 600.0)));
    }

    #[test]
    fn test_is_above() {
        let platform = Vec2::new(50.0, 600.0);
        assert!(is_above(Vec2::new(100.0, 500.0), platform));
        assert!(is_above(Vec2::new(100.0, 0.0), platform));
        // Bottom past the top edge
        assert!(!is_above(Vec2::new(100.0, 500.5), platform));
        // No horizontal overlap
        assert!(!is_above(Vec2::new(300.0, 400.0), platform));
    }

    #[test]
    fn test_above_and_colliding_are_exclusive() {
        let platform = Vec2::new(0.0, 600.0);
        for y in [480.0, 499.0, 500.0, 501.0, 520.0] {
            let pos = Vec2::new(50.0, y);
            assert!(!(collides_with(pos, platform) && is_above(pos, platform)));
        }
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -500.0f32..1500.0, ay in -500.0f32..1500.0,
            bx in -500.0f32..1500.0, by in -500.0f32..1500.0,
        ) {
            let a = Aabb::player(Vec2::new(ax, ay));
            let b = Aabb::platform(Vec2::new(bx, by));
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_collides_matches_axis_test(
            x in -300.0f32..800.0, y in -300.0f32..900.0,
            px in -300.0f32..800.0, py in -300.0f32..900.0,
        ) {
            let expected = x < px + 200.0 && x + 100.0 > px && y + 100.0 > py && y < py + 50.0;
            prop_assert_eq!(collides_with(Vec2::new(x, y), Vec2::new(px, py)), expected);
        }
    }
}
