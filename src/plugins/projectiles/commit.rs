//! Return commit: recycle knives back into the pool.
//!
//! This system is the owner of the *Inactive invariants*:
//! - hidden
//! - velocity = 0
//! - collide with nothing (filters empty)
//!
//! Centralizing these writes here prevents inconsistencies.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{KnifeEntity, KnifeState, PooledKnife};
use super::pool::{inactive_knife_layers, KnifePool};

pub fn return_to_pool_commit(
    mut pool: ResMut<KnifePool>,
    mut q: Query<
        (
            Entity,
            &mut KnifeState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        With<PooledKnife>,
    >,
) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != KnifeState::PendingReturn {
            continue;
        }

        *state = KnifeState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_knife_layers();

        pool.push_free(KnifeEntity(e));
    }
}
