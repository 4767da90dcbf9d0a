// src/decor/placement/walls.rs
//! Wall snapping for paintings, sconces and anything else that hangs on a wall.

use bevy::prelude::*;

use crate::decor::core::Room;

/// Snap a world-space candidate onto the nearest wall of `room`, keeping it
/// `padding` away from the corners. Deterministic; applying it twice is a no-op.
pub fn align_to_nearest_wall(world: Vec3, room: &Room, padding: f32) -> Vec3 {
    let relative = room.to_relative(room.frame.to_local(world));
    let snapped = snap_relative(relative, room.half_extents_xz(), padding);
    room.frame.to_world(room.from_relative(snapped))
}

/// Room-relative version of [`align_to_nearest_wall`]. `half` holds the X/Z half extents.
pub fn snap_relative(mut p: Vec3, half: Vec2, padding: f32) -> Vec3 {
    // Distance to the east/west wall vs the north/south wall.
    let to_x_wall = half.x - p.x.abs();
    let to_z_wall = half.y - p.z.abs();

    if to_x_wall < to_z_wall {
        p.x = p.x.signum() * half.x;
    } else {
        p.z = p.z.signum() * half.y;
    }

    p.x = clamp_padded(p.x, half.x, padding);
    p.z = clamp_padded(p.z, half.y, padding);
    p
}

/// Clamp into [-extent + padding, extent - padding]; collapses to 0 when the
/// padding eats the whole extent.
#[inline]
fn clamp_padded(v: f32, extent: f32, padding: f32) -> f32 {
    let limit = (extent - padding).max(0.0);
    v.clamp(-limit, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::frame::RoomFrame;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn room() -> Room {
        Room::new(Vec3::new(10.0, 3.0, 10.0))
    }

    #[test]
    fn test_snaps_to_east_wall() {
        let p = align_to_nearest_wall(Vec3::new(3.0, 0.0, 1.0), &room(), 0.5);
        assert!((p - Vec3::new(4.5, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_snaps_to_south_wall_on_tie() {
        let p = align_to_nearest_wall(Vec3::new(-2.0, 0.0, -2.0), &room(), 0.0);
        assert!((p - Vec3::new(-2.0, 0.0, -5.0)).length() < 1e-5);
    }

    #[test]
    fn test_corner_is_clamped_on_both_axes() {
        let p = align_to_nearest_wall(Vec3::new(4.9, 0.0, 4.8), &room(), 1.0);
        assert!((p - Vec3::new(4.0, 0.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_oversized_padding_collapses_to_center_line() {
        let p = snap_relative(Vec3::new(0.5, 0.0, 0.2), Vec2::new(1.0, 1.0), 4.0);
        assert_eq!(p, Vec3::ZERO);
    }

    #[test]
    fn test_rectangular_room_prefers_nearer_wall() {
        // Narrow room: the x wall is 0.5 away, the z wall 4.0 away.
        let p = snap_relative(Vec3::new(1.5, 0.0, 1.0), Vec2::new(2.0, 5.0), 0.0);
        assert!((p - Vec3::new(2.0, 0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_idempotent_in_rotated_offset_room() {
        let room = Room::new(Vec3::new(8.0, 3.0, 5.0))
            .with_offset(Vec3::new(1.0, 0.5, -2.0))
            .with_frame(RoomFrame::new(
                Vec3::new(20.0, 1.0, -7.0),
                Quat::from_rotation_y(0.6),
            ));
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let local = Vec3::new(
                rng.random_range(-5.0..5.0),
                0.5,
                rng.random_range(-4.0..4.0),
            );
            let padding = rng.random_range(0.0..1.0);
            let once = align_to_nearest_wall(room.frame.to_world(local), &room, padding);
            let twice = align_to_nearest_wall(once, &room, padding);
            assert!((once - twice).length() < 1e-4, "{once:?} vs {twice:?}");
        }
    }
}
