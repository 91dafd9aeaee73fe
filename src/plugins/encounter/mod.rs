//! Encounter plugin: resolves player contacts.
//!
//! Two rules, both driven by Avian `CollisionStart` messages:
//! - player <-> enemy: knock the player back away from the enemy, apply
//!   damage, publish the new health. On the killing hit, the player's
//!   collision filters drop the Enemy layer for good.
//! - player <-> chest: record the chest as the player's active container;
//!   the player's action system consumes it.
//!
//! Repeat hits inside the hurt window resolve to nothing because
//! [`player::apply_damage`] ignores them, so no per-frame dedupe is needed
//! here.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::contacts::{in_layer, sides};
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::enemies::{Enemy, EnemyLifeState};
use crate::plugins::events::{EventChannel, GameEvent};
use crate::plugins::player::{self, ActiveChest, CombatState, Health, Player};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        process_player_contacts
            .after(avian2d::collision::narrow_phase::CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Collision layers for a dead player: the enemy layer is gone, so no
/// further damage contacts can start.
#[inline]
fn dead_player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Chest])
}

pub(crate) fn process_player_contacts(
    tunables: Res<Tunables>,
    mut channel: ResMut<EventChannel>,
    mut started: MessageReader<CollisionStart>,
    q_layers: Query<&CollisionLayers, Without<Player>>,
    mut q_player: Query<
        (
            Entity,
            &Transform,
            &mut Health,
            &mut CombatState,
            &mut LinearVelocity,
            &mut ActiveChest,
            &mut CollisionLayers,
        ),
        With<Player>,
    >,
    q_enemy_tf: Query<&Transform, (With<Enemy>, Without<Player>)>,
    q_enemy_life: Query<&EnemyLifeState>,
) {
    let Ok((player_entity, player_tf, mut health, mut state, mut vel, mut active, mut player_layers)) =
        q_player.single_mut()
    else {
        return;
    };

    for ev in started.read() {
        let (s1, s2) = sides(ev);

        let (_, other_side) = if s1.gameplay_owner() == player_entity {
            (s1, s2)
        } else if s2.gameplay_owner() == player_entity {
            (s2, s1)
        } else {
            continue;
        };

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };

        if in_layer(other_layers, Layer::Enemy) {
            let enemy_entity = other_side.gameplay_owner();

            // A contact raised the same tick an enemy died still resolves
            // as a hit from a live enemy only.
            if !matches!(q_enemy_life.get(enemy_entity), Ok(EnemyLifeState::Alive)) {
                continue;
            }

            let Ok(enemy_tf) = q_enemy_tf.get(enemy_entity) else {
                continue;
            };

            let delta = player_tf.translation.truncate() - enemy_tf.translation.truncate();
            let away = if delta.length_squared() > 1e-4 {
                delta.normalize()
            } else {
                Vec2::Y
            };
            let knockback = away * tunables.knockback;

            if let Some(new_health) =
                player::apply_damage(&mut health, &mut state, &mut vel, knockback)
            {
                channel.emit(GameEvent::PlayerHealthChange(new_health));

                if new_health == 0 {
                    *player_layers = dead_player_layers();
                }
            }
            continue;
        }

        if in_layer(other_layers, Layer::Chest) {
            active.0 = Some(other_side.gameplay_owner());
        }
    }
}

#[cfg(test)]
mod tests;
