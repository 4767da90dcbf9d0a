use bevy::prelude::*;
use rand::Rng;

use super::bounds::inside_room_bounds;
use super::overlap::{is_blocked, UsedPositions};
use super::rotation::placement_rotation;
use super::sampler::{sample_band, sample_candidate, PlacementAttempt};
use crate::decor::core::*;
use crate::decor::error::{DecorError, DecorResult};

/// One instance that ran out of attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementShortfall {
    pub group: String,
    pub attempts: u32,
}

/// Requested vs placed for a single group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupReport {
    pub name: String,
    pub requested: u32,
    pub placed: u32,
}

impl GroupReport {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placed >= self.requested
    }

    #[inline]
    pub fn missing(&self) -> u32 {
        self.requested.saturating_sub(self.placed)
    }
}

/// Everything a pass decided, before anything is instantiated.
#[derive(Clone, Debug, Default)]
pub struct DecorationPlan {
    pub placements: Vec<PlacementResult>,
    pub groups: Vec<GroupReport>,
    pub shortfalls: Vec<PlacementShortfall>,
}

impl DecorationPlan {
    pub fn requested(&self) -> u32 {
        self.groups.iter().map(|g| g.requested).sum()
    }

    pub fn placed(&self) -> usize {
        self.placements.len()
    }
}

/// Plan plus whatever the factory handed back, in placement order.
#[derive(Clone, Debug)]
pub struct Decoration<H> {
    pub plan: DecorationPlan,
    pub handles: Vec<H>,
}

/// Reject configurations that can't be sampled, naming the first bad group.
pub fn validate_layout(room: &Room, groups: &[SpawnGroup]) -> DecorResult<()> {
    let s = room.size;
    if !(s.x >= 0.0 && s.y >= 0.0 && s.z >= 0.0) {
        return Err(DecorError::NegativeRoomSize { x: s.x, y: s.y, z: s.z });
    }

    for g in groups {
        if g.variants.is_empty() {
            return Err(DecorError::EmptyVariants { group: g.name.clone() });
        }
        if g.min_count > g.max_count {
            return Err(DecorError::InvalidCountRange {
                group: g.name.clone(),
                min: g.min_count,
                max: g.max_count,
            });
        }
        let (dmin, dmax) = (g.min_distance_from_center, g.max_distance_from_center);
        if !(0.0 <= dmin && dmin <= dmax && dmax <= 1.0) {
            return Err(DecorError::InvalidDistanceBand { group: g.name.clone(), min: dmin, max: dmax });
        }
        let (hmin, hmax) = (g.height_range.x, g.height_range.y);
        if !(hmin.is_finite() && hmax.is_finite() && hmin <= hmax) {
            return Err(DecorError::InvalidHeightRange { group: g.name.clone(), min: hmin, max: hmax });
        }
        if !(g.overlap_radius.is_finite() && g.overlap_radius >= 0.0) {
            return Err(DecorError::InvalidOverlapRadius {
                group: g.name.clone(),
                radius: g.overlap_radius,
            });
        }
    }
    Ok(())
}

/// Sample -> bounds -> overlap, up to `MAX_PLACEMENT_ATTEMPTS` times.
pub fn find_valid_position<R: Rng + ?Sized>(
    rng: &mut R,
    group: &SpawnGroup,
    room: &Room,
    used: &UsedPositions,
    obstacles: &dyn ObstacleQuery,
) -> Option<PlacementAttempt> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let attempt = sample_candidate(rng, group, room);

        if !inside_room_bounds(attempt.relative, room) {
            continue;
        }
        if group.avoid_overlap && is_blocked(attempt.world, group.overlap_radius, used, obstacles) {
            continue;
        }
        return Some(attempt);
    }
    None
}

/// Compute every placement for one pass over `groups`, in order.
/// Overlap state is shared by all groups of the pass.
pub fn plan_decoration<R: Rng + ?Sized>(
    room: &Room,
    groups: &[SpawnGroup],
    obstacles: &dyn ObstacleQuery,
    rng: &mut R,
) -> DecorResult<DecorationPlan> {
    validate_layout(room, groups)?;

    let mut plan = DecorationPlan::default();
    let mut used = UsedPositions::new();

    for (gi, group) in groups.iter().enumerate() {
        let requested = rng.random_range(group.min_count..=group.max_count);
        let mut placed = 0;

        for _ in 0..requested {
            let Some(attempt) = find_valid_position(rng, group, room, &used, obstacles) else {
                warn!(
                    "No valid position for '{}' after {} attempts",
                    group.name, MAX_PLACEMENT_ATTEMPTS
                );
                plan.shortfalls.push(PlacementShortfall {
                    group: group.name.clone(),
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                });
                continue;
            };

            let rotation = placement_rotation(group, attempt.relative, &room.frame);
            let variant = &group.variants[rng.random_range(0..group.variants.len())];

            // Height goes on after acceptance; it never affects bounds or overlap.
            let height = sample_band(rng, group.height_range.x, group.height_range.y);
            let lifted = attempt.relative + Vec3::Y * (height + group.spawn_area_offset.y);
            let position = room.frame.to_world(room.from_relative(lifted));

            plan.placements.push(PlacementResult {
                group: gi,
                group_name: group.name.clone(),
                variant: variant.clone(),
                position,
                rotation,
                anchor: attempt.world,
            });
            used.push(attempt.world);
            placed += 1;
        }

        debug!("Group '{}': placed {}/{}", group.name, placed, requested);
        plan.groups.push(GroupReport { name: group.name.clone(), requested, placed });
    }

    Ok(plan)
}

/// Hand every planned placement to `factory`.
pub fn materialize<F: InstanceFactory>(
    plan: &DecorationPlan,
    room: &Room,
    factory: &mut F,
) -> Vec<F::Handle> {
    plan.placements
        .iter()
        .map(|p| factory.instantiate(p, &room.frame))
        .collect()
}

/// Plan and instantiate a full decoration pass.
pub fn decorate<F: InstanceFactory, R: Rng + ?Sized>(
    room: &Room,
    groups: &[SpawnGroup],
    obstacles: &dyn ObstacleQuery,
    factory: &mut F,
    rng: &mut R,
) -> DecorResult<Decoration<F::Handle>> {
    let plan = plan_decoration(room, groups, obstacles, rng)?;
    let handles = materialize(&plan, room, factory);

    info!(
        "Decorated room: {} groups, placed {}/{}",
        plan.groups.len(),
        plan.placed(),
        plan.requested()
    );

    Ok(Decoration { plan, handles })
}
