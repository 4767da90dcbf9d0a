// src/decor/queue.rs
use bevy::prelude::*;

use crate::decor::core::{AssetVariant, InstanceFactory, PlacementResult};
use crate::decor::frame::RoomFrame;

/// One spawn request (what to spawn, under which room, where).
#[derive(Clone, Debug)]
pub struct SpawnRequest {
    pub ticket: SpawnTicket,
    pub room: Entity,
    pub group: String,
    pub variant: AssetVariant,
    /// Relative to the room entity.
    pub transform: Transform,
    /// World-space floor point the placement was accepted at.
    pub anchor: Vec3,
}

/// Receipt for a queued placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnTicket(pub u64);

/// Queue resource filled by decoration passes.
#[derive(Resource, Default)]
pub struct DecorSpawnQueue {
    pub items: Vec<SpawnRequest>,
    issued: u64,
}

impl DecorSpawnQueue {
    /// Forget everything still waiting for `room`.
    pub fn cancel_room(&mut self, room: Entity) -> usize {
        let before = self.items.len();
        self.items.retain(|r| r.room != room);
        before - self.items.len()
    }

    fn next_ticket(&mut self) -> SpawnTicket {
        self.issued += 1;
        SpawnTicket(self.issued)
    }
}

/// config: how many to actually spawn per frame
#[derive(Resource)]
pub struct SpawnQueueConfig {
    pub max_per_frame: usize,
}
impl Default for SpawnQueueConfig {
    fn default() -> Self { Self { max_per_frame: 200 } }
}

/// `InstanceFactory` that defers instantiation to the spawn queue.
pub struct QueueFactory<'a> {
    pub queue: &'a mut DecorSpawnQueue,
    pub room: Entity,
}

impl InstanceFactory for QueueFactory<'_> {
    type Handle = SpawnTicket;

    fn instantiate(&mut self, placement: &PlacementResult, parent: &RoomFrame) -> SpawnTicket {
        let ticket = self.queue.next_ticket();
        // Children inherit the room transform, so store the pose in room space.
        let transform = Transform {
            translation: parent.to_local(placement.position),
            rotation: parent.rotate_to_local(placement.rotation),
            ..default()
        };
        self.queue.items.push(SpawnRequest {
            ticket,
            room: self.room,
            group: placement.group_name.clone(),
            variant: placement.variant.clone(),
            transform,
            anchor: placement.anchor,
        });
        ticket
    }
}
