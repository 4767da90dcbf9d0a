// src/decor/stack.rs
use bevy::prelude::*;
use crate::decor::debug::DecorDebugPlugin;
use crate::decor::plugin::DecorPlugin;

pub struct DecorStackPlugin;
impl Plugin for DecorStackPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DecorPlugin)        // registry + seed + passes + spawn queue
           .add_plugins(DecorDebugPlugin);  // gizmo overlay (off unless enabled)
    }
}
