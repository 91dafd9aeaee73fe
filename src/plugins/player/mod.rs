//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, tick hurt recovery, then run the combat-gated
//!   action/movement system (`player_update`).
//! - FixedPostUpdate (in the encounter plugin): contacts feed
//!   [`apply_damage`], which owns the health/combat transition rules.
//!
//! Movement and actions are suppressed while the player is Hurt or Dead;
//! the knockback velocity written by `apply_damage` persists untouched
//! until the hurt window elapses.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::dir::CardinalDir;
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::events::{EventChannel, GameEvent};
use crate::plugins::projectiles::messages::ThrowKnifeRequest;
use crate::plugins::treasure::Chest;

#[derive(Component)]
pub struct Player;

#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Purse {
    pub coins: u32,
}

/// Player combat state machine.
///
/// Hurt carries its own elapsed time; recovery is driven by accumulated
/// frame deltas, not a scheduled callback, so there is nothing to cancel
/// on despawn. Dead is terminal.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum CombatState {
    Idle,
    Hurt { elapsed_ms: f32 },
    Dead,
}

/// Last movement direction; knives are thrown this way.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Facing(pub CardinalDir);

/// Chest the player is currently touching, if any. Set by the encounter
/// plugin on contact, cleared here when the player moves away.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActiveChest(pub Option<Entity>);

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub action_just_pressed: bool,
}

impl PlayerInput {
    #[inline]
    pub fn any_direction(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, tick_hurt_recovery, player_update)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, apply_combat_tint.run_if(in_state(GameState::InGame)));
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Enemy, Layer::Chest],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Health {
            current: tunables.max_health,
            max: tunables.max_health,
        },
        Purse::default(),
        CombatState::Idle,
        Facing::default(),
        ActiveChest::default(),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(13.0),
        layers,
        LinearVelocity::ZERO,
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    input.left = keys.pressed(KeyCode::ArrowLeft);
    input.right = keys.pressed(KeyCode::ArrowRight);
    input.up = keys.pressed(KeyCode::ArrowUp);
    input.down = keys.pressed(KeyCode::ArrowDown);
    input.action_just_pressed = keys.just_pressed(KeyCode::Space);
}

/// Accumulate time spent Hurt and return to Idle once the invulnerability
/// window has fully elapsed.
pub(crate) fn tick_hurt_recovery(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<&mut CombatState, With<Player>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;

    for mut state in &mut q {
        let CombatState::Hurt { elapsed_ms } = &mut *state else {
            continue;
        };

        *elapsed_ms += delta_ms;
        if *elapsed_ms >= tunables.hurt_window_ms {
            *state = CombatState::Idle;
        }
    }
}

/// Per-frame action and movement resolution.
///
/// Only runs game logic when the player is Idle. An action press resolves
/// the active chest if there is one, otherwise throws a knife; either way
/// the frame ends without touching velocity. Movement is exclusive with
/// priority left > right > up > down.
pub fn player_update(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut channel: ResMut<EventChannel>,
    mut throws: MessageWriter<ThrowKnifeRequest>,
    mut q_player: Query<
        (
            &Transform,
            &CombatState,
            &mut Facing,
            &mut ActiveChest,
            &mut LinearVelocity,
            &mut Purse,
        ),
        With<Player>,
    >,
    mut q_chests: Query<&mut Chest>,
) {
    let Ok((tf, state, mut facing, mut active, mut vel, mut purse)) = q_player.single_mut() else {
        return;
    };

    if *state != CombatState::Idle {
        return;
    }

    if input.action_just_pressed {
        match active.0 {
            Some(chest_entity) => {
                let Ok(mut chest) = q_chests.get_mut(chest_entity) else {
                    active.0 = None;
                    return;
                };
                let reward = chest.open(&mut rand::rng());
                purse.coins += reward;
                channel.emit(GameEvent::PlayerCoinsChange(purse.coins));
            }
            None => {
                throws.write(ThrowKnifeRequest {
                    origin: tf.translation.truncate(),
                    dir: facing.0,
                });
            }
        }
        return;
    }

    if input.any_direction() {
        active.0 = None;
    }

    if input.left {
        facing.0 = CardinalDir::Left;
        vel.0 = Vec2::new(-tunables.player_speed, 0.0);
    } else if input.right {
        facing.0 = CardinalDir::Right;
        vel.0 = Vec2::new(tunables.player_speed, 0.0);
    } else if input.up {
        facing.0 = CardinalDir::Up;
        vel.0 = Vec2::new(0.0, tunables.player_speed);
    } else if input.down {
        facing.0 = CardinalDir::Down;
        vel.0 = Vec2::new(0.0, -tunables.player_speed);
    } else {
        vel.0 = Vec2::ZERO;
    }
}

/// Apply one enemy contact to the player.
///
/// Rules:
/// - Hurt or Dead: the hit is ignored entirely, returns None.
/// - Idle: health decrements (floored at 0). At 0 the player is Dead and
///   stops moving; otherwise it enters Hurt with the knockback velocity.
///
/// Returns the new health total when a decrement happened, so the caller
/// can publish it.
pub fn apply_damage(
    health: &mut Health,
    state: &mut CombatState,
    vel: &mut LinearVelocity,
    knockback: Vec2,
) -> Option<i32> {
    if *state != CombatState::Idle {
        return None;
    }

    health.current = (health.current - 1).max(0);

    if health.current <= 0 {
        *state = CombatState::Dead;
        vel.0 = Vec2::ZERO;
    } else {
        *state = CombatState::Hurt { elapsed_ms: 0.0 };
        vel.0 = knockback;
    }

    Some(health.current)
}

/// Presentation derived from combat state: red while Hurt, faded out when
/// Dead.
fn apply_combat_tint(mut q: Query<(&CombatState, &mut Sprite), With<Player>>) {
    for (state, mut sprite) in &mut q {
        sprite.color = match state {
            CombatState::Idle => Color::srgb(0.2, 0.75, 0.9),
            CombatState::Hurt { .. } => Color::srgb(0.95, 0.25, 0.25),
            CombatState::Dead => Color::srgba(0.4, 0.4, 0.45, 0.6),
        };
    }
}
