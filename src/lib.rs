//! Constrained random room decoration, with a Bevy plugin on top.

pub mod decor;

pub use decor::core::{
    AssetVariant, InstanceFactory, NoObstacles, ObstacleQuery, PlacementResult, Room, SpawnGroup,
};
pub use decor::error::{DecorError, DecorResult};
pub use decor::frame::RoomFrame;
pub use decor::placement::{decorate, materialize, plan_decoration, Decoration, DecorationPlan};
pub use decor::DecorStackPlugin;
