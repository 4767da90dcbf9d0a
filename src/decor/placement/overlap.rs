// src/decor/placement/overlap.rs
//! Overlap rejection against static obstacles and this pass' accepted anchors.

use bevy::prelude::*;

use crate::decor::core::ObstacleQuery;

/// Anchors accepted so far in one decoration pass (all groups).
#[derive(Clone, Debug, Default)]
pub struct UsedPositions {
    points: Vec<Vec3>,
}

impl UsedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, p: Vec3) {
        self.points.push(p);
    }

    /// Any accepted anchor strictly closer than `radius`.
    pub fn any_within(&self, position: Vec3, radius: f32) -> bool {
        let r2 = radius * radius;
        self.points.iter().any(|p| p.distance_squared(position) < r2)
    }
}

/// Blocked if an obstacle intersects the radius or an earlier anchor is too close.
pub fn is_blocked(
    position: Vec3,
    radius: f32,
    used: &UsedPositions,
    obstacles: &dyn ObstacleQuery,
) -> bool {
    obstacles.is_obstructed(position, radius) || used.any_within(position, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::core::NoObstacles;

    #[test]
    fn test_distance_is_strict() {
        let mut used = UsedPositions::new();
        used.push(Vec3::ZERO);
        assert!(is_blocked(Vec3::new(0.99, 0.0, 0.0), 1.0, &used, &NoObstacles));
        assert!(!is_blocked(Vec3::new(1.0, 0.0, 0.0), 1.0, &used, &NoObstacles));
    }

    #[test]
    fn test_obstacle_query_blocks() {
        let used = UsedPositions::new();
        let wall = |p: Vec3, r: f32| p.x + r > 4.0;
        assert!(is_blocked(Vec3::new(3.5, 0.0, 0.0), 1.0, &used, &wall));
        assert!(!is_blocked(Vec3::new(2.0, 0.0, 0.0), 1.0, &used, &wall));
    }

    #[test]
    fn test_zero_radius_never_collides_with_anchors() {
        let mut used = UsedPositions::new();
        used.push(Vec3::ONE);
        assert!(!is_blocked(Vec3::ONE, 0.0, &used, &NoObstacles));
    }
}
