// src/decor/placement/sampler.rs
//! Candidate sampling inside a group's spawn region (annulus-like band, XZ only).

use bevy::prelude::*;
use rand::Rng;

use super::walls::snap_relative;
use crate::decor::core::{Room, SpawnGroup};

/// One candidate. `relative` is room-relative and always on the floor plane.
#[derive(Clone, Copy, Debug)]
pub struct PlacementAttempt {
    pub world: Vec3,
    pub relative: Vec3,
}

/// Uniform in [min, max]; a collapsed band returns `min` without touching the range sampler.
#[inline]
pub fn sample_band<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Draw one candidate for `group` inside `room`.
pub fn sample_candidate<R: Rng + ?Sized>(
    rng: &mut R,
    group: &SpawnGroup,
    room: &Room,
) -> PlacementAttempt {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let dir = Vec2::new(angle.cos(), angle.sin());
    let d = sample_band(rng, group.min_distance_from_center, group.max_distance_from_center);

    let half_area = Vec2::new(group.spawn_area_size.x, group.spawn_area_size.z) * 0.5;
    let xz = dir * half_area * d
        + Vec2::new(group.spawn_area_offset.x, group.spawn_area_offset.z);

    let mut relative = Vec3::new(xz.x, 0.0, xz.y);
    if group.align_with_walls {
        relative = snap_relative(relative, room.half_extents_xz(), group.overlap_radius * 0.5);
    }

    // World follows from relative, so relative Y stays exactly 0 in any frame.
    let world = room.frame.to_world(room.from_relative(relative));
    PlacementAttempt { world, relative }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::core::AssetVariant;
    use crate::decor::frame::RoomFrame;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn group() -> SpawnGroup {
        SpawnGroup::new(
            "crates",
            vec![AssetVariant::Scene { path: "crate.glb#Scene0".into() }],
        )
    }

    #[test]
    fn test_candidates_stay_in_band() {
        let room = Room::new(Vec3::new(10.0, 3.0, 10.0));
        let g = group().with_distance_band(0.4, 0.8);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let a = sample_candidate(&mut rng, &g, &room);
            // Square 10x10 area: radius = 5 * d
            let r = Vec2::new(a.relative.x, a.relative.z).length();
            assert!(r >= 2.0 - 1e-4 && r <= 4.0 + 1e-4, "r = {r}");
            assert!(a.relative.y.abs() < 1e-5);
        }
    }

    #[test]
    fn test_collapsed_band_is_constant() {
        let room = Room::new(Vec3::new(10.0, 3.0, 10.0));
        let g = group().with_distance_band(0.5, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let a = sample_candidate(&mut rng, &g, &room);
            let r = Vec2::new(a.relative.x, a.relative.z).length();
            assert!((r - 2.5).abs() < 1e-4);
        }
        assert_eq!(sample_band(&mut rng, 0.5, 0.5), 0.5);
    }

    #[test]
    fn test_offset_and_frame_are_applied() {
        let frame = RoomFrame::new(Vec3::new(100.0, 2.0, 0.0), Quat::from_rotation_y(1.2));
        let room = Room::new(Vec3::new(10.0, 3.0, 10.0))
            .with_offset(Vec3::new(0.0, 1.0, 0.0))
            .with_frame(frame);
        let mut g = group().with_distance_band(0.0, 0.0);
        g.spawn_area_offset = Vec3::new(2.0, 0.0, -1.0);

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let a = sample_candidate(&mut rng, &g, &room);
        assert!((a.relative - Vec3::new(2.0, 0.0, -1.0)).length() < 1e-4);
        let expected = frame.to_world(Vec3::new(2.0, 1.0, -1.0));
        assert!((a.world - expected).length() < 1e-4);
    }

    #[test]
    fn test_wall_groups_land_on_walls() {
        let room = Room::new(Vec3::new(10.0, 3.0, 6.0));
        let mut g = group().with_overlap(true, 0.0);
        g.align_with_walls = true;
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..200 {
            let a = sample_candidate(&mut rng, &g, &room);
            let on_x = (a.relative.x.abs() - 5.0).abs() < 1e-4;
            let on_z = (a.relative.z.abs() - 3.0).abs() < 1e-4;
            assert!(on_x || on_z, "{:?}", a.relative);
        }
    }
}
