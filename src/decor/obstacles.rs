//! Static obstacles that decoration keeps clear of (walls, pillars, hand-placed furniture).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::core::ObstacleQuery;

/// Collision volume for an obstacle, in the owning entity's space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    Sphere { radius: f32 },
    /// Oriented box; follows the entity's rotation.
    Box { half_extents: Vec3 },
}

/// Put this on any entity that decoration must avoid.
#[derive(Component, Clone, Copy, Debug)]
pub struct DecorObstacle(pub ObstacleShape);

/// A world-space obstacle volume.
#[derive(Clone, Copy, Debug)]
pub struct PlacedObstacle {
    pub shape: ObstacleShape,
    pub center: Vec3,
    pub rotation: Quat,
}

impl PlacedObstacle {
    /// True if the sphere (`position`, `radius`) touches this volume.
    pub fn intersects_sphere(&self, position: Vec3, radius: f32) -> bool {
        match self.shape {
            ObstacleShape::Sphere { radius: r } => {
                let reach = r + radius;
                self.center.distance_squared(position) < reach * reach
            }
            ObstacleShape::Box { half_extents } => {
                let local = self.rotation.inverse() * (position - self.center);
                let closest = local.clamp(-half_extents, half_extents);
                if closest == local {
                    // Center inside the box.
                    return true;
                }
                local.distance_squared(closest) < radius * radius
            }
        }
    }
}

/// Read-only snapshot of every obstacle, taken once per decoration pass.
#[derive(Clone, Debug, Default)]
pub struct ObstacleSet {
    items: Vec<PlacedObstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: ObstacleShape, center: Vec3, rotation: Quat) {
        self.items.push(PlacedObstacle { shape, center, rotation });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collect from ECS obstacles. Scale is folded into the shape sizes.
    pub fn from_query<'a>(
        obstacles: impl IntoIterator<Item = (&'a DecorObstacle, &'a GlobalTransform)>,
    ) -> Self {
        let mut set = Self::new();
        for (obstacle, global) in obstacles {
            let (scale, rotation, translation) = global.to_scale_rotation_translation();
            let shape = match obstacle.0 {
                ObstacleShape::Sphere { radius } => ObstacleShape::Sphere {
                    radius: radius * scale.abs().max_element(),
                },
                ObstacleShape::Box { half_extents } => ObstacleShape::Box {
                    half_extents: half_extents * scale.abs(),
                },
            };
            set.push(shape, translation, rotation);
        }
        set
    }
}

impl ObstacleQuery for ObstacleSet {
    fn is_obstructed(&self, position: Vec3, radius: f32) -> bool {
        self.items.iter().any(|o| o.intersects_sphere(position, radius))
    }
}
