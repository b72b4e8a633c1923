//! Collision detection between movables, buildings and blasts
//!
//! Two tests cover the whole game: axis-aligned rectangle overlap (a movable
//! hitting a building) and rectangle vs. circle (a movable caught in a blast).
//!
//! The anchors differ on purpose. Against buildings a movable's box is centred
//! on its position; against blasts the box is anchored at the position and the
//! circle distance is measured from that corner. Spawn geometry is laid out
//! around these conventions, so they must not be "fixed" independently.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` whose top-left corner is `corner`
    #[inline]
    pub fn anchored(corner: Vec2, size: Vec2) -> Self {
        Self { pos: corner, size }
    }

    /// Rectangle of `size` centred on `center`
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// True iff the rectangles overlap. Shared edges do not count.
pub fn rect_intersects(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && b.pos.x < a.right() && a.pos.y < b.bottom() && b.pos.y < a.bottom()
}

/// Rounded-rectangle vs. circle test, distances measured from the rect corner
pub fn rect_circle_intersects(rect: &Rect, center: Vec2, radius: f32) -> bool {
    let dx = (center.x - rect.pos.x).abs();
    let dy = (center.y - rect.pos.y).abs();
    let half_w = rect.size.x / 2.0;
    let half_h = rect.size.y / 2.0;

    if dx > half_w + radius || dy > half_h + radius {
        return false;
    }

    if dx <= half_w || dy <= half_h {
        return true;
    }

    let corner_sq = (dx - half_w).powi(2) + (dy - half_h).powi(2);
    corner_sq <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(rect_intersects(&a, &b));
        assert!(rect_intersects(&b, &a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!rect_intersects(&a, &right));
        assert!(!rect_intersects(&a, &below));
    }

    #[test]
    fn test_rect_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(rect_intersects(&outer, &inner));
    }

    #[test]
    fn test_centered_rect() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(30.0, 20.0));
        assert_eq!(r.pos, Vec2::new(35.0, 40.0));
        assert_eq!(r.right(), 65.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_circle_far_away_misses() {
        let rect = Rect::new(100.0, 100.0, 30.0, 30.0);
        // dx = 100 > 15 + 50
        assert!(!rect_circle_intersects(&rect, Vec2::new(200.0, 100.0), 50.0));
        assert!(!rect_circle_intersects(&rect, Vec2::new(100.0, 200.0), 50.0));
    }

    #[test]
    fn test_circle_in_band_hits() {
        let rect = Rect::new(100.0, 100.0, 30.0, 30.0);
        // dx within half width, dy within half height + radius
        assert!(rect_circle_intersects(&rect, Vec2::new(110.0, 150.0), 40.0));
        // dy within half height
        assert!(rect_circle_intersects(&rect, Vec2::new(150.0, 105.0), 40.0));
    }

    #[test]
    fn test_circle_corner_distance() {
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        // Corner offset (10, 10) from the half extents, distance ~14.14
        assert!(rect_circle_intersects(&rect, Vec2::new(20.0, 20.0), 15.0));
        assert!(!rect_circle_intersects(&rect, Vec2::new(20.0, 20.0), 14.0));
    }

    #[test]
    fn test_circle_anchor_is_corner_not_center() {
        // A blast centred on the rect's corner is a direct hit even when tiny
        let rect = Rect::new(300.0, 300.0, 70.0, 40.0);
        assert!(rect_circle_intersects(&rect, rect.pos, 1.0));
    }

    proptest! {
        #[test]
        fn prop_rect_intersects_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            w in 1.0f32..200.0, h in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, w, h);
            let b = Rect::new(bx, by, h, w);
            prop_assert_eq!(rect_intersects(&a, &b), rect_intersects(&b, &a));
        }

        #[test]
        fn prop_growing_radius_never_loses_hit(
            cx in -300.0f32..300.0, cy in -300.0f32..300.0,
            r in 0.0f32..200.0, grow in 0.0f32..100.0,
        ) {
            let rect = Rect::new(0.0, 0.0, 30.0, 30.0);
            let center = Vec2::new(cx, cy);
            if rect_circle_intersects(&rect, center, r) {
                prop_assert!(rect_circle_intersects(&rect, center, r + grow));
            }
        }
    }
}
