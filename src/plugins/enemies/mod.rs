//! Enemies plugin: wandering creatures with a small life state machine.
//!
//! Pipeline:
//! - Update: tick the wander decision timer, pick new directions.
//! - FixedUpdate: apply the wander direction to the kinematic velocity.
//! - FixedPostUpdate: react to wall contacts and to deaths resolved by the
//!   collision systems (clear layers so corpses stop interacting).
//! - PostUpdate: structural cleanup, despawn dead enemies.
//!
//! Death never despawns inside the fixed step. The collision systems only
//! flip `EnemyLifeState`; teardown and despawn are centralized here so
//! structural changes stay out of physics resolution.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::contacts::{in_layer, sides};
use crate::common::dir::CardinalDir;
use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct Enemy;

/// Enemy lifecycle. Dead is terminal: no system transitions out of it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyLifeState {
    Alive,
    Dead,
}

/// Wander AI state: current heading plus the repeating decision timer.
///
/// The timer lives on the component, so despawning the enemy releases it
/// with the entity and a stale callback can never fire.
#[derive(Component, Debug)]
pub struct Wander {
    pub direction: CardinalDir,
    pub decision_timer: Timer,
}

impl Wander {
    pub fn new(direction: CardinalDir, interval_secs: f32) -> Self {
        Self {
            direction,
            decision_timer: Timer::from_seconds(interval_secs, TimerMode::Repeating),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        wander_decide.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        apply_wander_velocity.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        wall_contact_redirect
            .after(avian2d::collision::narrow_phase::CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );

    // Runs after knife collisions so it sees deaths resolved this tick.
    app.add_systems(
        FixedPostUpdate,
        enemy_death_teardown
            .after(crate::plugins::projectiles::collision::process_knife_collisions)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_dead_enemies.run_if(in_state(GameState::InGame)),
    );
}

/// Collision layers for an enemy that should no longer interact with
/// anything. Membership stays "Enemy" but the filters are cleared, which
/// stops new contacts without a structural change.
#[inline]
fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

pub fn spawn_enemy(commands: &mut Commands, tunables: &Tunables, pos: Vec2) {
    commands.spawn((
        Name::new("Enemy"),
        Enemy,
        EnemyLifeState::Alive,
        Wander::new(CardinalDir::Right, tunables.wander_interval_secs),
        Sprite {
            color: Color::srgb(0.45, 0.75, 0.3),
            custom_size: Some(Vec2::splat(16.0)),
            ..default()
        },
        Transform::from_translation(pos.extend(1.0)),
        RigidBody::Dynamic,
        LockedAxes::ROTATION_LOCKED,
        Collider::circle(8.0),
        CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::Knife]),
        LinearVelocity::ZERO,
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Tick decision timers and pick a new heading when one elapses.
///
/// The new heading always differs from the current one, so a decision is
/// visible as a direction change.
pub(crate) fn wander_decide(
    time: Res<Time>,
    mut q: Query<(&EnemyLifeState, &mut Wander), With<Enemy>>,
) {
    let mut rng = rand::rng();

    for (life, mut wander) in &mut q {
        if *life != EnemyLifeState::Alive {
            continue;
        }

        wander.decision_timer.tick(time.delta());
        if wander.decision_timer.just_finished() {
            wander.direction = wander.direction.random_other(&mut rng);
        }
    }
}

/// Drive velocity from the wander heading. Dead enemies hold still.
pub(crate) fn apply_wander_velocity(
    tunables: Res<Tunables>,
    mut q: Query<(&EnemyLifeState, &Wander, &mut LinearVelocity), With<Enemy>>,
) {
    for (life, wander, mut vel) in &mut q {
        vel.0 = if *life == EnemyLifeState::Alive {
            wander.direction.unit() * tunables.enemy_speed
        } else {
            Vec2::ZERO
        };
    }
}

/// Re-decide the heading immediately when a wandering enemy hits a wall,
/// instead of grinding against it until the timer fires.
pub(crate) fn wall_contact_redirect(
    mut started: MessageReader<CollisionStart>,
    q_layers: Query<&CollisionLayers>,
    mut q_enemies: Query<(&EnemyLifeState, &mut Wander), With<Enemy>>,
) {
    let mut rng = rand::rng();

    for ev in started.read() {
        let (s1, s2) = sides(ev);

        for (own, other) in [(s1, s2), (s2, s1)] {
            let Ok(other_layers) = q_layers.get(other.collider) else {
                continue;
            };
            if !in_layer(other_layers, Layer::World) {
                continue;
            }

            let Ok((life, mut wander)) = q_enemies.get_mut(own.gameplay_owner()) else {
                continue;
            };
            if *life != EnemyLifeState::Alive {
                continue;
            }

            wander.direction = wander.direction.random_other(&mut rng);
        }
    }
}

/// Enforce the dead-enemy invariants: no collision interaction, no motion.
///
/// Idempotent on purpose; it re-asserts the invariants every fixed tick an
/// enemy stays dead, which keeps it correct however many systems flip the
/// state.
pub(crate) fn enemy_death_teardown(
    mut q: Query<(&EnemyLifeState, &mut CollisionLayers, &mut LinearVelocity), With<Enemy>>,
) {
    for (life, mut layers, mut vel) in &mut q {
        if *life != EnemyLifeState::Dead {
            continue;
        }
        *layers = non_interacting_enemy_layers();
        vel.0 = Vec2::ZERO;
    }
}

/// Despawn dead enemies after fixed-step work is done.
pub(crate) fn despawn_dead_enemies(
    mut commands: Commands,
    q: Query<(Entity, &EnemyLifeState), With<Enemy>>,
) {
    for (e, life) in &q {
        if *life == EnemyLifeState::Dead {
            commands.entity(e).despawn();
        }
    }
}
