//! Aiming and hit detection
//!
//! Arrows are points; targets are axis-aligned rectangles anchored at their
//! left edge and centred vertically on `y`.

use glam::Vec2;

use super::state::Target;

/// Minimum aim distance; anything closer has no usable direction
pub const MIN_AIM_DISTANCE: f32 = 1e-4;

/// Unit vector from `from` toward `to`, or `None` when the points coincide
pub fn aim_direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist < MIN_AIM_DISTANCE || !dist.is_finite() {
        return None;
    }
    Some(delta / dist)
}

/// Point-in-rectangle test, edges inclusive
pub fn point_hits_target(point: Vec2, target: &Target) -> bool {
    let half_h = target.height / 2.0;
    point.x >= target.x
        && point.x <= target.x + target.width
        && point.y >= target.y - half_h
        && point.y <= target.y + half_h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_horizontal() {
        let dir = aim_direction(Vec2::new(120.0, 200.0), Vec2::new(500.0, 200.0)).unwrap();
        assert!((dir - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_aim_is_unit_length() {
        let dir = aim_direction(Vec2::ZERO, Vec2::new(3.0, 4.0)).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_aim_zero_distance() {
        let p = Vec2::new(120.0, 200.0);
        assert!(aim_direction(p, p).is_none());
    }

    #[test]
    fn test_point_hits_target_edges() {
        let target = Target::new(1, 500.0);
        assert!(point_hits_target(Vec2::new(500.0, 200.0), &target));
        assert!(point_hits_target(Vec2::new(540.0, 240.0), &target));
        assert!(point_hits_target(Vec2::new(520.0, 160.0), &target));
        assert!(!point_hits_target(Vec2::new(499.9, 200.0), &target));
        assert!(!point_hits_target(Vec2::new(520.0, 240.1), &target));
    }
}
