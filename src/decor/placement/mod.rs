// src/decor/placement/mod.rs
//! Constrained random placement: sampling, wall snapping, bounds, overlap,
//! rotation, and the per-group runner that ties them together.

pub mod bounds;
pub mod overlap;
pub mod rotation;
pub mod runner;
pub mod sampler;
pub mod walls;

pub use bounds::inside_room_bounds;
pub use overlap::{is_blocked, UsedPositions};
pub use rotation::{euler_offset, facing_toward_center, placement_rotation};
pub use runner::{
    decorate, find_valid_position, materialize, plan_decoration, validate_layout, Decoration,
    DecorationPlan, GroupReport, PlacementShortfall,
};
pub use sampler::{sample_candidate, PlacementAttempt};
pub use walls::align_to_nearest_wall;
