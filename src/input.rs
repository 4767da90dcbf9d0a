use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use room_decorator::decor::plugin::{DecorSettings, DecorateRoom, RoomDecorated};

use crate::setup::DemoRoom;

pub fn redecorate_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    rooms: Query<Entity, With<DemoRoom>>,
    mut requests: EventWriter<DecorateRoom>,
) {
    if !keys.just_pressed(KeyCode::KeyR) { return; }
    for room in &rooms {
        requests.write(DecorateRoom(room));
        info!("Redecorating {:?}", room);
    }
}

pub fn toggle_gizmos(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<DecorSettings>) {
    if keys.just_pressed(KeyCode::KeyG) {
        settings.show_gizmos = !settings.show_gizmos;
    }
}

pub fn report_decorated_rooms(mut evr: EventReader<RoomDecorated>) {
    for ev in evr.read() {
        for g in &ev.groups {
            if g.is_complete() {
                info!("  {}: {}/{}", g.name, g.placed, g.requested);
            } else {
                warn!("  {}: {}/{} (short by {})", g.name, g.placed, g.requested, g.missing());
            }
        }
    }
}
