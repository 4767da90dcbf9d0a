// src/decor/frame.rs
//! Room-local <-> world conversions. Translation + rotation only; room scale is
//! expressed through `Room::size`, never through the frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomFrame {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for RoomFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RoomFrame {
    pub const IDENTITY: Self = Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation: rotation.normalize() }
    }

    /// Drops scale; rooms are sized explicitly.
    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.translation, transform.rotation)
    }

    pub fn from_global(global: &GlobalTransform) -> Self {
        let (_scale, rotation, translation) = global.to_scale_rotation_translation();
        Self::new(translation, rotation)
    }

    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.translation)
    }

    /// Local orientation -> world orientation.
    #[inline]
    pub fn rotate_to_world(&self, local: Quat) -> Quat {
        self.rotation * local
    }

    /// World orientation -> local orientation.
    #[inline]
    pub fn rotate_to_local(&self, world: Quat) -> Quat {
        self.rotation.inverse() * world
    }
}
