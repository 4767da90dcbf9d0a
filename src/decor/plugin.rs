//! Decor plugin wiring (glue).
//! - Registry asset/loader
//! - DecorSeed + settings
//! - Room decoration passes + events
//! - Spawn queue drain

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::core::{DecorSeed, Room};
use super::frame::RoomFrame;
use super::obstacles::{DecorObstacle, ObstacleSet};
use super::placement::{decorate, GroupReport, PlacementShortfall};
use super::queue::{DecorSpawnQueue, QueueFactory, SpawnQueueConfig};
use super::registry::{DecorRegistry, DecorRegistryAssetPlugin};
use super::spawn::{drain_decor_spawn_queue, DecorInstance};

/// Configure where the registry manifest lives and the decoration seed.
#[derive(Resource, Clone)]
pub struct DecorSettings {
    pub registry_path: String,
    pub world_seed: u64,
    /// Draw room bounds, distance bands and anchors.
    pub show_gizmos: bool,
}
impl Default for DecorSettings {
    fn default() -> Self {
        Self {
            registry_path: "decor/rooms.decor.ron".to_string(),
            world_seed: 1337,
            show_gizmos: false,
        }
    }
}

/// Handle to the loaded DecorRegistry asset.
#[derive(Resource, Default)]
pub struct DecorRegistryHandle(pub Handle<DecorRegistry>);

/// Marks an entity as a room; its `GlobalTransform` is the room frame.
/// Keep room entities unscaled: size comes from the layout.
#[derive(Component, Clone, Debug)]
pub struct RoomDecorator {
    /// Layout name in the registry.
    pub layout: String,
    /// Mixed into the world seed so identical layouts still differ per room.
    pub salt: u64,
    /// Bumped by every `DecorateRoom`; each pass draws a fresh arrangement.
    pub pass: u32,
}

impl RoomDecorator {
    pub fn new(layout: impl Into<String>, salt: u64) -> Self {
        Self { layout: layout.into(), salt, pass: 0 }
    }
}

/// Present once a room has had its pass (successful or not).
#[derive(Component, Clone, Debug, Default)]
pub struct Decorated {
    pub requested: u32,
    pub placed: u32,
}

/// Ask for a room to be cleared and decorated again.
#[derive(Event, Clone, Copy, Debug)]
pub struct DecorateRoom(pub Entity);

/// Fired after every pass with what was asked for and what fit.
#[derive(Event, Clone, Debug)]
pub struct RoomDecorated {
    pub room: Entity,
    pub groups: Vec<GroupReport>,
    pub shortfalls: Vec<PlacementShortfall>,
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DecorSet {
    Request,
    Place,
    Spawn,
}

pub struct DecorPlugin;
impl Plugin for DecorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DecorRegistryAssetPlugin)
            .init_resource::<DecorSettings>()
            .init_resource::<DecorRegistryHandle>()
            .init_resource::<DecorSpawnQueue>()
            .init_resource::<SpawnQueueConfig>()
            .add_event::<DecorateRoom>()
            .add_event::<RoomDecorated>()
            .configure_sets(
                Update,
                (DecorSet::Request, DecorSet::Place, DecorSet::Spawn).chain(),
            )
            .add_systems(Startup, (init_decor_seed_from_settings, load_registry))
            .add_systems(Update, monitor_registry_ready)
            .add_systems(Update, handle_decorate_requests.in_set(DecorSet::Request))
            .add_systems(
                Update,
                decorate_pending_rooms.in_set(DecorSet::Place).run_if(registry_ready),
            )
            .add_systems(Update, drain_decor_spawn_queue.in_set(DecorSet::Spawn));
    }
}

/// Startup: insert DecorSeed based on DecorSettings.
fn init_decor_seed_from_settings(mut commands: Commands, settings: Res<DecorSettings>) {
    commands.insert_resource(DecorSeed(settings.world_seed));
}

/// Startup: request loading the registry manifest, store handle.
fn load_registry(
    mut handle_res: ResMut<DecorRegistryHandle>,
    settings: Res<DecorSettings>,
    assets: Res<AssetServer>,
) {
    if handle_res.0.is_strong() { return; }
    let h: Handle<DecorRegistry> = assets.load(settings.registry_path.as_str());
    handle_res.0 = h;
    info!(
        "Decor: loading registry from '{}', world_seed={}",
        settings.registry_path, settings.world_seed
    );
}

/// Update: log once when the registry becomes available.
fn monitor_registry_ready(
    handle_res: Res<DecorRegistryHandle>,
    registries: Res<Assets<DecorRegistry>>,
    mut logged: Local<bool>,
) {
    if *logged { return; }
    if let Some(reg) = registries.get(&handle_res.0) {
        *logged = true;
        info!("Decor: registry ready with {} layouts", reg.layouts.len());
    }
}

pub fn registry_ready(
    handle: Res<DecorRegistryHandle>,
    regs: Res<Assets<DecorRegistry>>,
) -> bool {
    regs.get(&handle.0).is_some()
}

/// Per-room RNG, stable per (seed, salt, pass).
#[inline]
pub fn rng_for(seed: DecorSeed, salt: u64, pass: u32) -> ChaCha8Rng {
    let mix = seed.0
        ^ salt.rotate_left(29)
        ^ u64::from(pass).wrapping_mul(0xA24B_AED4_963E_E407)
        ^ 0x9E37_79B9_7F4A_7C15u64;
    ChaCha8Rng::seed_from_u64(mix)
}

/// Frame a room is decorated in. Root rooms read their `Transform`, which is
/// current even before propagation fills in `GlobalTransform`.
pub fn room_frame(
    global: &GlobalTransform,
    local: Option<&Transform>,
    parent: Option<&ChildOf>,
) -> RoomFrame {
    match (local, parent) {
        (Some(t), None) => RoomFrame::from_transform(t),
        _ => RoomFrame::from_global(global),
    }
}

/// Clear rooms that asked for a new pass: despawn instances, drop queued spawns.
fn handle_decorate_requests(
    mut commands: Commands,
    mut events: EventReader<DecorateRoom>,
    mut queue: ResMut<DecorSpawnQueue>,
    mut rooms: Query<&mut RoomDecorator>,
    instances: Query<(Entity, &DecorInstance)>,
) {
    for DecorateRoom(room) in events.read() {
        if let Ok(mut decorator) = rooms.get_mut(*room) {
            decorator.pass = decorator.pass.wrapping_add(1);
        }
        let dropped = queue.cancel_room(*room);
        let mut despawned = 0;
        for (e, inst) in &instances {
            if inst.room == *room {
                commands.entity(e).despawn();
                despawned += 1;
            }
        }
        if let Ok(mut ec) = commands.get_entity(*room) {
            ec.remove::<Decorated>();
        }
        debug!("Decor: reset room {:?} ({} despawned, {} dropped)", room, despawned, dropped);
    }
}

type PendingRooms<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static RoomDecorator,
        &'static GlobalTransform,
        Option<&'static Transform>,
        Option<&'static ChildOf>,
    ),
    Without<Decorated>,
>;

/// Run one decoration pass for every room that hasn't had one yet.
#[allow(clippy::too_many_arguments)]
fn decorate_pending_rooms(
    mut commands: Commands,
    rooms: PendingRooms,
    obstacles: Query<(&DecorObstacle, &GlobalTransform)>,
    regs: Res<Assets<DecorRegistry>>,
    handle: Res<DecorRegistryHandle>,
    seed: Res<DecorSeed>,
    mut queue: ResMut<DecorSpawnQueue>,
    mut done: EventWriter<RoomDecorated>,
) {
    let Some(reg) = regs.get(&handle.0) else { return };
    if rooms.is_empty() { return; }

    // One snapshot for every room this frame; obstacles are static during a pass.
    let obstacle_set = ObstacleSet::from_query(obstacles.iter());
    if obstacle_set.is_empty() {
        debug!("Decor: no obstacles registered");
    }

    for (entity, decorator, global, local, parent) in &rooms {
        let Some(layout) = reg.get(&decorator.layout) else {
            warn!("Decor: room {:?} wants unknown layout '{}'", entity, decorator.layout);
            commands.entity(entity).insert(Decorated::default());
            continue;
        };

        let room = Room { frame: room_frame(global, local, parent), ..layout.room.clone() };
        let mut rng = rng_for(*seed, decorator.salt, decorator.pass);
        let mut factory = QueueFactory { queue: &mut *queue, room: entity };

        match decorate(&room, &layout.groups, &obstacle_set, &mut factory, &mut rng) {
            Ok(out) => {
                let placed = out.handles.len() as u32;
                let requested = out.plan.requested();
                info!(
                    "Decor: room {:?} layout '{}' pass {} queued {}/{} ({} obstacles)",
                    entity,
                    layout.name,
                    decorator.pass,
                    placed,
                    requested,
                    obstacle_set.len()
                );
                commands.entity(entity).insert(Decorated { requested, placed });
                done.write(RoomDecorated {
                    room: entity,
                    groups: out.plan.groups,
                    shortfalls: out.plan.shortfalls,
                });
            }
            Err(e) => {
                warn!(
                    "Decor: room {:?} layout '{}' rejected (group {}): {}",
                    entity,
                    layout.name,
                    e.group().unwrap_or("-"),
                    e
                );
                commands.entity(entity).insert(Decorated::default());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::core::{AssetVariant, SpawnGroup};
    use crate::decor::obstacles::ObstacleShape;
    use crate::decor::registry::RoomLayout;
    use rand::Rng;

    #[test]
    fn test_rng_for_is_stable_and_salted() {
        let a: u64 = rng_for(DecorSeed(1), 2, 0).random();
        let b: u64 = rng_for(DecorSeed(1), 2, 0).random();
        let c: u64 = rng_for(DecorSeed(1), 3, 0).random();
        let d: u64 = rng_for(DecorSeed(1), 2, 1).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    fn test_app(layouts: Vec<RoomLayout>) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<DecorRegistry>()
            .insert_resource(DecorSeed(42))
            .init_resource::<DecorSpawnQueue>()
            .add_event::<DecorateRoom>()
            .add_event::<RoomDecorated>()
            .add_systems(
                Update,
                (handle_decorate_requests, decorate_pending_rooms).chain(),
            );

        let reg = DecorRegistry::from_layouts(layouts).unwrap();
        let h = app.world_mut().resource_mut::<Assets<DecorRegistry>>().add(reg);
        app.insert_resource(DecorRegistryHandle(h));
        app
    }

    fn boxes(name: &str, n: u32) -> SpawnGroup {
        SpawnGroup::new(name, vec![AssetVariant::Cuboid { size: Vec3::splat(0.5), color: [1.0, 0.0, 0.0] }])
            .with_count(n, n)
    }

    #[test]
    fn test_room_gets_queued_once() {
        let layout = RoomLayout {
            name: "den".into(),
            room: Room::new(Vec3::new(10.0, 3.0, 10.0)),
            groups: vec![boxes("crates", 4)],
        };
        let mut app = test_app(vec![layout]);
        let room = app
            .world_mut()
            .spawn((RoomDecorator::new("den", 1), GlobalTransform::from_xyz(3.0, 0.0, 3.0)))
            .id();

        app.update();
        app.update();

        let queue = app.world().resource::<DecorSpawnQueue>();
        assert_eq!(queue.items.len(), 4);
        assert!(queue.items.iter().all(|r| r.room == room && r.group == "crates"));
        let decorated = app.world().get::<Decorated>(room).unwrap();
        assert_eq!((decorated.requested, decorated.placed), (4, 4));
    }

    #[test]
    fn test_obstacles_and_unknown_layouts() {
        let layout = RoomLayout {
            name: "den".into(),
            room: Room::new(Vec3::new(4.0, 3.0, 4.0)),
            groups: vec![boxes("crates", 3)],
        };
        let mut app = test_app(vec![layout]);
        // Fills the whole room.
        app.world_mut().spawn((
            DecorObstacle(ObstacleShape::Box { half_extents: Vec3::new(5.0, 5.0, 5.0) }),
            GlobalTransform::IDENTITY,
        ));
        let blocked = app
            .world_mut()
            .spawn((RoomDecorator::new("den", 0), GlobalTransform::IDENTITY))
            .id();
        let missing = app
            .world_mut()
            .spawn((RoomDecorator::new("nope", 0), GlobalTransform::IDENTITY))
            .id();

        app.update();

        assert!(app.world().resource::<DecorSpawnQueue>().items.is_empty());
        assert_eq!(app.world().get::<Decorated>(blocked).unwrap().placed, 0);
        assert!(app.world().get::<Decorated>(missing).is_some());
    }

    #[test]
    fn test_decorate_request_resets_room() {
        let layout = RoomLayout {
            name: "den".into(),
            room: Room::new(Vec3::new(10.0, 3.0, 10.0)),
            groups: vec![boxes("crates", 2)],
        };
        let mut app = test_app(vec![layout]);
        let room = app
            .world_mut()
            .spawn((RoomDecorator::new("den", 9), GlobalTransform::IDENTITY))
            .id();

        app.update();
        assert_eq!(app.world().resource::<DecorSpawnQueue>().items.len(), 2);

        app.world_mut().send_event(DecorateRoom(room));
        app.update();
        app.update();

        // Old requests dropped, one fresh pass queued.
        assert_eq!(app.world().resource::<DecorSpawnQueue>().items.len(), 2);
        assert!(app.world().get::<Decorated>(room).is_some());
    }

    fn queued_translations(app: &App) -> Vec<Vec3> {
        app.world()
            .resource::<DecorSpawnQueue>()
            .items
            .iter()
            .map(|r| r.transform.translation)
            .collect()
    }

    #[test]
    fn test_redecorate_draws_new_arrangement() {
        let layout = RoomLayout {
            name: "den".into(),
            room: Room::new(Vec3::new(10.0, 3.0, 10.0)),
            groups: vec![boxes("crates", 3)],
        };
        let mut app = test_app(vec![layout]);
        let room = app
            .world_mut()
            .spawn((RoomDecorator::new("den", 9), GlobalTransform::IDENTITY))
            .id();

        app.update();
        let first = queued_translations(&app);

        app.world_mut().send_event(DecorateRoom(room));
        app.update();
        let second = queued_translations(&app);

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
        assert_ne!(first, second);
        assert_eq!(app.world().get::<RoomDecorator>(room).unwrap().pass, 1);
    }

    #[test]
    fn test_root_room_uses_transform_before_propagation() {
        let layout = RoomLayout {
            name: "den".into(),
            room: Room::new(Vec3::new(4.0, 3.0, 4.0)),
            groups: vec![boxes("crates", 3)],
        };
        let mut app = test_app(vec![layout]);
        // GlobalTransform still at the origin, as it is before PostUpdate runs.
        app.world_mut().spawn((
            RoomDecorator::new("den", 2),
            Transform::from_xyz(100.0, 0.0, -50.0),
            GlobalTransform::IDENTITY,
        ));

        app.update();

        let queue = app.world().resource::<DecorSpawnQueue>();
        assert_eq!(queue.items.len(), 3);
        for req in &queue.items {
            assert!((req.anchor.x - 100.0).abs() <= 2.0 + 1e-4, "{:?}", req.anchor);
            assert!((req.anchor.z + 50.0).abs() <= 2.0 + 1e-4, "{:?}", req.anchor);
        }
    }

    #[test]
    fn test_room_frame_prefers_global_for_children() {
        let global = GlobalTransform::from_xyz(5.0, 0.0, 0.0);
        let local = Transform::from_xyz(1.0, 0.0, 0.0);
        let child = ChildOf(Entity::from_raw(3));

        assert_eq!(room_frame(&global, Some(&local), None).translation, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(room_frame(&global, Some(&local), Some(&child)).translation, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(room_frame(&global, None, None).translation, Vec3::new(5.0, 0.0, 0.0));
    }
}
