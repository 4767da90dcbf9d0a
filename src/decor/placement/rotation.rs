// src/decor/placement/rotation.rs
//! Orientation for accepted placements: facing (wall/center/none) + configured offset.

use bevy::math::EulerRot;
use bevy::prelude::*;

use crate::decor::core::SpawnGroup;
use crate::decor::frame::RoomFrame;

/// Below this horizontal length the look direction is treated as undefined.
const MIN_LOOK_LEN_SQ: f32 = 1e-8;

/// Yaw whose forward (-Z) points from `relative` to the room center, on the XZ plane.
/// Identity when the point sits on the center's vertical axis.
pub fn facing_toward_center(relative: Vec3) -> Quat {
    let to_center = Vec3::new(-relative.x, 0.0, -relative.z);
    if to_center.length_squared() <= MIN_LOOK_LEN_SQ {
        return Quat::IDENTITY;
    }
    let dir = to_center.normalize();
    Quat::from_rotation_y(f32::atan2(-dir.x, -dir.z))
}

/// Euler degrees -> quaternion, applied Z then X then Y.
#[inline]
pub fn euler_offset(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        degrees.y.to_radians(),
        degrees.x.to_radians(),
        degrees.z.to_radians(),
    )
}

/// `frame * facing * offset`, where facing follows the group's priority:
/// wall alignment, then face-center, then none.
pub fn placement_rotation(group: &SpawnGroup, relative: Vec3, frame: &RoomFrame) -> Quat {
    // Wall pieces look back into the room, the same way center-facing props do.
    let facing = if group.align_with_walls || group.face_center {
        facing_toward_center(relative)
    } else {
        Quat::IDENTITY
    };
    frame.rotate_to_world(facing * euler_offset(group.rotation_offset)).normalize()
}
