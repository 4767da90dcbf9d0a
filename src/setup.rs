use bevy::prelude::*;
use room_decorator::decor::obstacles::{DecorObstacle, ObstacleShape};
use room_decorator::decor::plugin::RoomDecorator;

#[derive(Component)]
pub struct MainCamera;

/// Marks the demo room so input can find it.
#[derive(Component)]
pub struct DemoRoom;

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // 1) Light
    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));

    // 2) Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-9.0, 11.0, 14.0).looking_at(Vec3::new(2.0, 0.0, 1.0), Vec3::Y),
        MainCamera,
    ));

    // 3) Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.32, 0.28))),
    ));

    // 4) Room: off-origin and turned, so local/world mistakes show up.
    commands.spawn((
        RoomDecorator::new("tavern", 1),
        Transform::from_xyz(2.0, 0.0, 1.0).with_rotation(Quat::from_rotation_y(0.35)),
        Visibility::default(),
        DemoRoom,
    ));

    // 5) A pillar and a bar counter the props must leave alone.
    let stone = materials.add(Color::srgb(0.5, 0.5, 0.55));
    commands.spawn((
        DecorObstacle(ObstacleShape::Sphere { radius: 0.6 }),
        Mesh3d(meshes.add(Cylinder::new(0.4, 3.0))),
        MeshMaterial3d(stone.clone()),
        Transform::from_xyz(3.5, 1.5, 2.0),
    ));
    commands.spawn((
        DecorObstacle(ObstacleShape::Box { half_extents: Vec3::new(2.0, 0.5, 0.4) }),
        Mesh3d(meshes.add(Cuboid::new(4.0, 1.0, 0.8))),
        MeshMaterial3d(stone),
        Transform::from_xyz(0.0, 0.5, -1.5),
    ));
}
