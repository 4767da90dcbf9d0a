use bevy::prelude::*;

mod input;
mod setup;

use input::{redecorate_on_key, report_decorated_rooms, toggle_gizmos};
use room_decorator::decor::plugin::DecorSettings;
use room_decorator::DecorStackPlugin;

fn main() {
    App::new()
        // core engine plugins
        .add_plugins(DefaultPlugins)
        // registry + decoration passes + spawn queue + gizmos
        .insert_resource(DecorSettings {
            show_gizmos: true,
            ..default()
        })
        .add_plugins(DecorStackPlugin)
        // camera, lights, floor, the room and its obstacles
        .add_systems(Startup, setup::setup)
        // R: redecorate, G: toggle gizmos
        .add_systems(Update, (redecorate_on_key, toggle_gizmos, report_decorated_rooms))
        .run();
}
