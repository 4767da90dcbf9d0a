// src/decor/spawn.rs
//! Turns queued placements into entities parented under their room.

use bevy::pbr::MeshMaterial3d;
use bevy::prelude::*;

use crate::decor::core::AssetVariant;
use crate::decor::plugin::RoomDecorator;
use crate::decor::queue::{DecorSpawnQueue, SpawnQueueConfig, SpawnRequest};

/// Tag on each spawned decoration instance.
#[derive(Component, Debug, Clone)]
pub struct DecorInstance {
    pub room: Entity,
    pub group: String,
    /// World-space floor point the placement was accepted at.
    pub anchor: Vec3,
}

pub fn drain_decor_spawn_queue(
    mut commands: Commands,
    assets: Res<AssetServer>,
    mut queue: ResMut<DecorSpawnQueue>,
    cfg: Res<SpawnQueueConfig>,
    rooms: Query<(), With<RoomDecorator>>,
) {
    let take = cfg.max_per_frame.min(queue.items.len());
    if take == 0 { return; }

    // Newest requests spawn first; placement already fixed every pose.
    for _ in 0..take {
        let Some(req) = queue.items.pop() else { break };
        if rooms.get(req.room).is_err() {
            // Room went away between planning and spawning.
            continue;
        }
        spawn_decor_instance(&mut commands, &assets, req);
    }
}

/// Spawn one queued request as a child of its room.
pub fn spawn_decor_instance(
    commands: &mut Commands,
    assets: &AssetServer,
    req: SpawnRequest,
) -> Entity {
    let tag = DecorInstance { room: req.room, group: req.group, anchor: req.anchor };
    let e = spawn_variant(commands, assets, Some(req.room), &req.variant, req.transform);
    commands.entity(e).insert((tag, Name::new("decor")));
    e
}

/// Spawn an `AssetVariant` at `transform` (parent-relative when `parent` is set).
pub fn spawn_variant(
    commands: &mut Commands,
    assets: &AssetServer,
    parent: Option<Entity>,
    variant: &AssetVariant,
    transform: Transform,
) -> Entity {
    let mut e = match variant {
        AssetVariant::Scene { path } => {
            let scene: Handle<Scene> = assets.load(path.as_str());
            commands.spawn((transform, Visibility::Visible, SceneRoot(scene)))
        }

        AssetVariant::MeshMaterial { mesh, material } => {
            let mesh_h: Handle<Mesh> = assets.load(mesh.as_str());
            let mat_h: Handle<StandardMaterial> = match material {
                Some(m) => assets.load(m.as_str()),
                None => assets.add(StandardMaterial::default()),
            };
            commands.spawn((transform, Visibility::Visible, Mesh3d(mesh_h), MeshMaterial3d(mat_h)))
        }

        AssetVariant::Cuboid { size, color } => {
            let mesh_h: Handle<Mesh> = assets.add(Mesh::from(Cuboid::from_size(*size)));
            let mat_h = assets.add(StandardMaterial {
                base_color: Color::srgb(color[0], color[1], color[2]),
                ..default()
            });
            // Boxes sit on the floor rather than straddle it.
            let lifted = transform.with_translation(
                transform.translation + transform.rotation * Vec3::Y * (size.y * 0.5),
            );
            commands.spawn((lifted, Visibility::Visible, Mesh3d(mesh_h), MeshMaterial3d(mat_h)))
        }
    };

    if let Some(p) = parent { e.insert(ChildOf(p)); }
    e.id()
}
