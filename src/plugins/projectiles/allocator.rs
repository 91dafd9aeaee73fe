//! Throw consumer: activate knives from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled knife entities.
//! - Therefore, a popped entity must match the knife query.
//!
//! If this is violated, we `expect()` and crash loudly. A drained pool is
//! different: that is a capacity decision, and the request is dropped.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{KnifeEntity, KnifeState, PooledKnife};
use super::messages::ThrowKnifeRequest;
use super::pool::{active_knife_layers, KnifePool};
use crate::common::tunables::Tunables;

pub fn activate_knives_from_pool(
    tunables: Res<Tunables>,
    mut pool: ResMut<KnifePool>,
    mut reader: MessageReader<ThrowKnifeRequest>,
    mut q: Query<
        (
            &mut KnifeState,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledKnife>,
    >,
) {
    for req in reader.read() {
        let Some(KnifeEntity(e)) = pool.pop_free() else {
            debug!("knife pool drained, dropping throw request");
            continue;
        };

        let (mut state, mut tf, mut vel, mut vis, mut layers) = q
            .get_mut(e)
            .expect("KnifePool contained an entity missing pooled knife components");

        let heading = req.dir.unit();

        *state = KnifeState::Active;
        tf.translation = (req.origin + heading * tunables.knife_offset).extend(2.0);
        vel.0 = heading * tunables.knife_speed;
        *vis = Visibility::Visible;
        *layers = active_knife_layers();
    }
}
