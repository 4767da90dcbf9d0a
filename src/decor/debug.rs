// src/decor/debug.rs
//! Read-only gizmo overlay: room bounds, per-group distance bands, anchors.
//! Draws from registry data and spawned instances; never touches placement.

use bevy::prelude::*;

use super::core::{Room, SpawnGroup};
use super::frame::RoomFrame;
use super::plugin::{registry_ready, DecorRegistryHandle, DecorSettings, RoomDecorator};
use super::registry::DecorRegistry;
use super::spawn::DecorInstance;

pub struct DecorDebugPlugin;
impl Plugin for DecorDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            draw_decor_gizmos.run_if(gizmos_enabled).run_if(registry_ready),
        );
    }
}

fn gizmos_enabled(settings: Res<DecorSettings>) -> bool {
    settings.show_gizmos
}

/// Band color: green at the center, red at the edge.
#[inline]
pub fn band_color(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::srgb(t, 1.0 - t, 0.0)
}

/// Wire box covering the whole room volume.
pub fn room_box(room: &Room, frame: &RoomFrame) -> Transform {
    let center = frame.to_world(room.from_relative(Vec3::Y * room.size.y * 0.5));
    Transform { translation: center, rotation: frame.rotation, scale: room.size }
}

/// Inner or outer band outline for `group` at band value `t`.
pub fn band_box(room: &Room, frame: &RoomFrame, group: &SpawnGroup, t: f32) -> Transform {
    let o = group.spawn_area_offset;
    let center = frame.to_world(room.from_relative(Vec3::new(o.x, 0.025, o.z)));
    let size = Vec3::new(group.spawn_area_size.x * t, 0.0, group.spawn_area_size.z * t);
    Transform { translation: center, rotation: frame.rotation, scale: size }
}

fn draw_decor_gizmos(
    mut gizmos: Gizmos,
    rooms: Query<(&RoomDecorator, &GlobalTransform)>,
    instances: Query<(&DecorInstance, &GlobalTransform)>,
    regs: Res<Assets<DecorRegistry>>,
    handle: Res<DecorRegistryHandle>,
) {
    let Some(reg) = regs.get(&handle.0) else { return };

    for (decorator, global) in &rooms {
        let Some(layout) = reg.get(&decorator.layout) else { continue };
        let frame = RoomFrame::from_global(global);

        gizmos.cuboid(room_box(&layout.room, &frame), Color::srgba(0.2, 0.8, 1.0, 0.3));

        for group in &layout.groups {
            let (inner, outer) = (group.min_distance_from_center, group.max_distance_from_center);
            gizmos.cuboid(band_box(&layout.room, &frame, group, inner), band_color(inner));
            gizmos.cuboid(band_box(&layout.room, &frame, group, outer), band_color(outer));
        }
    }

    for (inst, global) in &instances {
        let top = global.translation();
        gizmos.line(inst.anchor, top, Color::WHITE);
        gizmos.cuboid(
            Transform::from_translation(inst.anchor).with_scale(Vec3::splat(0.1)),
            Color::WHITE,
        );
    }
}
