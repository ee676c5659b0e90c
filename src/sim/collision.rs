//! Wall collision rule
//!
//! The logo is an axis-aligned square centred on its position. It touches a
//! wall as soon as an edge reaches the boundary on that axis.

use glam::Vec2;

use crate::consts::{BOUNDARY, HALF_EXTENT};

/// Which walls the logo is touching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    /// Left or right wall
    pub horizontal: bool,
    /// Top or bottom wall
    pub vertical: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }

    /// Both axes in the same evaluation
    pub fn is_corner(&self) -> bool {
        self.horizontal && self.vertical
    }
}

/// Square body inside a square viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRule {
    pub half_extent: f32,
    pub boundary: f32,
}

impl Default for CollisionRule {
    fn default() -> Self {
        Self {
            half_extent: HALF_EXTENT,
            boundary: BOUNDARY,
        }
    }
}

impl CollisionRule {
    pub fn new(half_extent: f32, boundary: f32) -> Self {
        Self {
            half_extent,
            boundary,
        }
    }

    pub fn check(&self, position: Vec2) -> WallHit {
        WallHit {
            horizontal: self.touches(position.x),
            vertical: self.touches(position.y),
        }
    }

    #[inline]
    fn touches(&self, center: f32) -> bool {
        center - self.half_extent <= -self.boundary || center + self.half_extent >= self.boundary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_is_clear() {
        let hit = CollisionRule::default().check(Vec2::ZERO);
        assert_eq!(hit, WallHit::default());
        assert!(!hit.any());
    }

    #[test]
    fn test_right_wall() {
        let hit = CollisionRule::default().check(Vec2::new(1.05, 0.2));
        assert!(hit.horizontal);
        assert!(!hit.vertical);
        assert!(!hit.is_corner());
    }

    #[test]
    fn test_bottom_wall() {
        let hit = CollisionRule::default().check(Vec2::new(0.0, -0.85));
        assert!(!hit.horizontal);
        assert!(hit.vertical);
    }

    #[test]
    fn test_corner() {
        let hit = CollisionRule::default().check(Vec2::new(1.05, 1.05));
        assert!(hit.is_corner());
        let hit = CollisionRule::default().check(Vec2::new(-0.9, 0.95));
        assert!(hit.is_corner());
    }

    #[test]
    fn test_custom_extent() {
        let rule = CollisionRule::new(0.5, 1.0);
        assert!(rule.check(Vec2::new(0.6, 0.0)).horizontal);
        assert!(!CollisionRule::default().check(Vec2::new(0.6, 0.0)).horizontal);
    }

    proptest! {
        #[test]
        fn interior_positions_never_hit(x in -0.79f32..0.79, y in -0.79f32..0.79) {
            let hit = CollisionRule::default().check(Vec2::new(x, y));
            prop_assert!(!hit.any());
        }

        #[test]
        fn positions_past_a_wall_hit_that_axis(
            x in prop_oneof![0.8f32..3.0, -3.0f32..-0.8],
            y in -0.5f32..0.5,
        ) {
            let rule = CollisionRule::default();
            prop_assert!(rule.check(Vec2::new(x, y)).horizontal);
            prop_assert!(rule.check(Vec2::new(y, x)).vertical);
        }

        #[test]
        fn corner_iff_both_axes(x in -2.0f32..2.0, y in -2.0f32..2.0) {
            let hit = CollisionRule::default().check(Vec2::new(x, y));
            prop_assert_eq!(hit.is_corner(), hit.horizontal && hit.vertical);
        }
    }
}
