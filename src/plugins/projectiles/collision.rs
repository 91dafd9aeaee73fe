//! Knife contact resolution.
//!
//! Walls consume the knife. Live enemies die and consume the knife. Dead
//! enemies are ignored, their filters are already cleared by the teardown
//! system, and a late event for one must not re-kill or eat a knife.
//!
//! This system never touches `CollisionLayers`; dead-enemy layer clearing
//! belongs to `enemies::enemy_death_teardown`, which runs right after.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{KnifeState, PooledKnife};
use crate::common::contacts::{in_layer, sides};
use crate::common::layers::Layer;
use crate::plugins::enemies::EnemyLifeState;

pub fn process_knife_collisions(
    mut started: MessageReader<CollisionStart>,
    // Fast "is this a pooled knife?" check
    q_is_knife: Query<(), With<PooledKnife>>,
    mut q_knives: Query<&mut KnifeState, With<PooledKnife>>,
    // Read layers from collider entities
    q_layers: Query<&CollisionLayers>,
    mut q_life: Query<&mut EnemyLifeState>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (s1, s2) = sides(ev);

        // Identify the knife side without get_mut probing
        let k1 = q_is_knife.contains(s1.collider);
        let k2 = q_is_knife.contains(s2.collider);
        if !(k1 ^ k2) {
            continue; // must be exactly one knife
        }
        let (knife_side, other_side) = if k1 { (s1, s2) } else { (s2, s1) };

        // Deduplicate per knife collider
        if !seen.insert(knife_side.collider) {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        let Ok(mut state) = q_knives.get_mut(knife_side.collider) else {
            continue;
        };

        // Ignore if somehow not active (shouldn't happen with empty filters, but safe)
        if *state != KnifeState::Active {
            continue;
        }

        // WORLD: wall eats the knife
        if in_layer(other_layers, Layer::World) {
            *state = KnifeState::PendingReturn;
            continue;
        }

        // ENEMY: live enemies die; dead ones don't consume the knife
        if in_layer(other_layers, Layer::Enemy) {
            let enemy_entity = other_side.gameplay_owner();

            let Ok(mut life) = q_life.get_mut(enemy_entity) else {
                continue;
            };
            if *life != EnemyLifeState::Alive {
                continue;
            }

            *life = EnemyLifeState::Dead;
            *state = KnifeState::PendingReturn;
            continue;
        }
    }
}
