//! Projectiles plugin: message-based producer -> consumer knife throwing
//! over a fixed-size pool.
//!
//! # Data flow
//! ```text
//! Update schedule (variable dt)
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Producer: player action system                              │
//! │      - writes: ThrowKnifeRequest message                     │
//! │                                                              │
//! │  Consumer: activate_knives_from_pool                         │
//! │      - reads: ThrowKnifeRequest messages                     │
//! │      - mutates: KnifePool.free (Vec<KnifeEntity>)            │
//! │      - mutates: KnifeState, Transform, LinearVelocity,       │
//! │                 Visibility, CollisionLayers                  │
//! └──────────────────────────────────────────────────────────────┘
//!                │
//!                v
//! FixedPostUpdate (fixed dt)
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Physics emits CollisionStart messages (Avian)               │
//! │                                                              │
//! │  Resolve: process_knife_collisions                           │
//! │      - wall contact  -> KnifeState::PendingReturn            │
//! │      - enemy contact -> EnemyLifeState::Dead + PendingReturn │
//! │                                                              │
//! │  Commit: return_to_pool_commit                               │
//! │      - writes the Inactive invariants                        │
//! │      - mutates: KnifePool.free.push(KnifeEntity)             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The producer never borrows `ResMut<KnifePool>`; it only enqueues intent.
//! The allocator is the single writer that pops the pool, and the commit
//! system is the single writer that pushes it back.
//!
//! A full pool is a capacity decision, not an error: excess requests are
//! dropped silently (at most `knife_pool_capacity` knives in flight).

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player;

pub struct ProjectilesPlugin;

/// Maintain throw request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_throw_messages(mut msgs: ResMut<Messages<messages::ThrowKnifeRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app.world().resource::<Tunables>().knife_pool_capacity;

        app.insert_resource(pool::KnifePool::new(capacity))
            .add_systems(Startup, pool::init_knife_pool);

        app.init_resource::<Messages<messages::ThrowKnifeRequest>>();
        app.add_systems(PostUpdate, update_throw_messages);

        // Consumer runs after the producer so a throw lands the same frame.
        app.add_systems(
            Update,
            allocator::activate_knives_from_pool
                .after(player::player_update)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::process_knife_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            commit::return_to_pool_commit
                .after(collision::process_knife_collisions)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
