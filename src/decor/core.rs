// src/decor/core.rs
//! Core types/traits for constrained room decoration.
//! Keep this file dependency-light; placement and the Bevy glue build on it.

use bevy::prelude::*; // Vec3, Quat, Resource
use serde::{Deserialize, Serialize};

use super::frame::RoomFrame;

/// Attempts per instance before it is skipped.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Global decoration seed; changing this reshuffles every room.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecorSeed(pub u64);

// ---------- Room ----------

/// The bounded volume props are placed in.
///
/// `size` is (width, height, depth). The floor sits at local Y = `offset.y`,
/// the footprint is centered on `offset.xz`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default = "default_room_size")]
    pub size: Vec3,
    #[serde(default = "default_zero")]
    pub offset: Vec3,
    /// Placement in world space. Hosts usually overwrite this from a transform.
    #[serde(default)]
    pub frame: RoomFrame,
}

impl Default for Room {
    fn default() -> Self {
        Self { size: default_room_size(), offset: Vec3::ZERO, frame: RoomFrame::IDENTITY }
    }
}

impl Room {
    pub fn new(size: Vec3) -> Self {
        Self { size, ..Default::default() }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_frame(mut self, frame: RoomFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Half extents on X and Z.
    #[inline]
    pub fn half_extents_xz(&self) -> Vec2 {
        Vec2::new(self.size.x * 0.5, self.size.z * 0.5)
    }

    /// Frame-local point -> room-relative point (origin on the floor center).
    #[inline]
    pub fn to_relative(&self, local: Vec3) -> Vec3 {
        local - self.offset
    }

    #[inline]
    pub fn from_relative(&self, relative: Vec3) -> Vec3 {
        relative + self.offset
    }
}

fn default_room_size() -> Vec3 {
    Vec3::new(10.0, 3.0, 10.0)
}
fn default_zero() -> Vec3 {
    Vec3::ZERO
}

// ---------- Asset variants ----------

/// What gets instantiated for an accepted placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AssetVariant {
    /// glTF scene (or any `Scene` asset) by path.
    Scene { path: String },
    /// Mesh + optional material by path.
    MeshMaterial { mesh: String, material: Option<String> },
    /// Plain colored box; needs no asset files.
    Cuboid { size: Vec3, color: [f32; 3] },
}

// ---------- Spawn groups ----------

/// One category of decorative asset and the rules for placing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    /// Human-readable name ("tables", "chests", "lamps").
    pub name: String,
    /// One is picked uniformly per placed instance.
    #[serde(default)]
    pub variants: Vec<AssetVariant>,

    #[serde(default = "default_min_count")]
    pub min_count: u32,
    #[serde(default = "default_max_count")]
    pub max_count: u32,

    /// Size of the sampling region in room space (Y unused).
    #[serde(default = "default_area_size")]
    pub spawn_area_size: Vec3,
    /// Sampling region center relative to the room center. Y lifts the height band.
    #[serde(default = "default_zero")]
    pub spawn_area_offset: Vec3,
    /// Normalized [0, 1] band relative to the spawn region half extents.
    #[serde(default)]
    pub min_distance_from_center: f32,
    #[serde(default = "default_one")]
    pub max_distance_from_center: f32,
    /// Inclusive (min, max) height above the floor.
    #[serde(default = "default_height_range")]
    pub height_range: Vec2,

    #[serde(default)]
    pub face_center: bool,
    /// Snap to the nearest wall and face into the room. Wins over `face_center`.
    #[serde(default)]
    pub align_with_walls: bool,
    /// Extra rotation in Euler degrees (X, Y, Z), applied last.
    #[serde(default = "default_zero")]
    pub rotation_offset: Vec3,

    #[serde(default = "default_true")]
    pub avoid_overlap: bool,
    #[serde(default = "default_one")]
    pub overlap_radius: f32,
}

impl SpawnGroup {
    /// Group with the default rules and the given variants.
    pub fn new(name: impl Into<String>, variants: Vec<AssetVariant>) -> Self {
        Self {
            name: name.into(),
            variants,
            min_count: default_min_count(),
            max_count: default_max_count(),
            spawn_area_size: default_area_size(),
            spawn_area_offset: Vec3::ZERO,
            min_distance_from_center: 0.0,
            max_distance_from_center: 1.0,
            height_range: default_height_range(),
            face_center: false,
            align_with_walls: false,
            rotation_offset: Vec3::ZERO,
            avoid_overlap: true,
            overlap_radius: 1.0,
        }
    }

    pub fn with_count(mut self, min: u32, max: u32) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    pub fn with_distance_band(mut self, min: f32, max: f32) -> Self {
        self.min_distance_from_center = min;
        self.max_distance_from_center = max;
        self
    }

    pub fn with_overlap(mut self, avoid: bool, radius: f32) -> Self {
        self.avoid_overlap = avoid;
        self.overlap_radius = radius;
        self
    }
}

fn default_min_count() -> u32 {
    1
}
fn default_max_count() -> u32 {
    3
}
fn default_area_size() -> Vec3 {
    Vec3::new(10.0, 0.0, 10.0)
}
fn default_height_range() -> Vec2 {
    Vec2::new(0.0, 2.0)
}
fn default_one() -> f32 {
    1.0
}
fn default_true() -> bool {
    true
}

// ---------- Placement I/O ----------

/// Accepted placement, ready to be instantiated.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementResult {
    /// Index of the group in the pass' group list.
    pub group: usize,
    pub group_name: String,
    pub variant: AssetVariant,
    /// Final world position (height applied).
    pub position: Vec3,
    pub rotation: Quat,
    /// World position that passed bounds + overlap checks (before height).
    pub anchor: Vec3,
}

// ---------- Collaborators ----------

/// Static obstacles the decorator must keep clear of.
pub trait ObstacleQuery {
    /// True if any obstacle intersects the sphere of `radius` at `position`.
    fn is_obstructed(&self, position: Vec3, radius: f32) -> bool;
}

/// Empty scene: nothing ever obstructs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObstacles;

impl ObstacleQuery for NoObstacles {
    fn is_obstructed(&self, _position: Vec3, _radius: f32) -> bool {
        false
    }
}

impl<F> ObstacleQuery for F
where
    F: Fn(Vec3, f32) -> bool,
{
    fn is_obstructed(&self, position: Vec3, radius: f32) -> bool {
        self(position, radius)
    }
}

/// Materializes accepted placements. The core never inspects the handle.
pub trait InstanceFactory {
    type Handle;

    /// Build `placement.variant` at `placement.position` / `placement.rotation`
    /// (world space), owned by the room at `parent`.
    fn instantiate(&mut self, placement: &PlacementResult, parent: &RoomFrame) -> Self::Handle;
}
