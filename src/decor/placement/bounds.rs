// src/decor/placement/bounds.rs
//! Room extents check, done on room-relative points before height is applied.

use bevy::prelude::*;

use crate::decor::core::Room;

/// `relative` is frame-local minus the room offset.
#[inline]
pub fn inside_room_bounds(relative: Vec3, room: &Room) -> bool {
    let half = room.half_extents_xz();
    relative.x.abs() <= half.x
        && relative.y >= 0.0
        && relative.y <= room.size.y
        && relative.z.abs() <= half.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_inclusive() {
        let room = Room::new(Vec3::new(10.0, 3.0, 6.0));
        assert!(inside_room_bounds(Vec3::new(5.0, 0.0, 3.0), &room));
        assert!(inside_room_bounds(Vec3::new(-5.0, 3.0, -3.0), &room));
        assert!(!inside_room_bounds(Vec3::new(5.01, 0.0, 0.0), &room));
        assert!(!inside_room_bounds(Vec3::new(0.0, 0.0, -3.01), &room));
    }

    #[test]
    fn test_floor_plane_passes_height_check() {
        let room = Room::new(Vec3::new(4.0, 0.0, 4.0));
        assert!(inside_room_bounds(Vec3::ZERO, &room));
        assert!(!inside_room_bounds(Vec3::new(0.0, -0.1, 0.0), &room));
        assert!(!inside_room_bounds(Vec3::new(0.0, 0.1, 0.0), &room));
    }
}
