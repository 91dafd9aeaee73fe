//! Headless-safe HUD mirror.
//!
//! Subscribes to the gameplay event channel and mirrors the latest health
//! and coin totals into a readout resource, logging each change. Works
//! without any render infrastructure, so integration tests can observe the
//! same values a real HUD would draw.
//!
//! Subscriptions are taken on entering the game and released on exit, so a
//! torn-down HUD can never act on a stale world.

use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;

use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::events::{EventChannel, GameEvent, SubscriptionHandle, Topic};

pub fn plugin(app: &mut App) {
    app.init_resource::<HudReadout>()
        .init_resource::<HudSubscriptions>()
        .add_systems(OnEnter(GameState::InGame), connect)
        .add_systems(OnExit(GameState::InGame), disconnect);
}

/// Latest published totals, readable from any thread.
#[derive(Resource, Clone, Default)]
pub struct HudReadout {
    health: Arc<AtomicI32>,
    coins: Arc<AtomicU32>,
}

impl HudReadout {
    pub fn health(&self) -> i32 {
        self.health.load(Ordering::SeqCst)
    }

    pub fn coins(&self) -> u32 {
        self.coins.load(Ordering::SeqCst)
    }
}

#[derive(Resource, Default)]
struct HudSubscriptions(Vec<SubscriptionHandle>);

fn connect(
    tunables: Res<Tunables>,
    readout: Res<HudReadout>,
    mut channel: ResMut<EventChannel>,
    mut subs: ResMut<HudSubscriptions>,
) {
    readout.health.store(tunables.max_health, Ordering::SeqCst);
    readout.coins.store(0, Ordering::SeqCst);

    let health = Arc::clone(&readout.health);
    subs.0.push(channel.subscribe(Topic::PlayerHealthChange, move |ev| {
        if let GameEvent::PlayerHealthChange(value) = ev {
            health.store(*value, Ordering::SeqCst);
            info!("player health: {value}");
        }
    }));

    let coins = Arc::clone(&readout.coins);
    subs.0.push(channel.subscribe(Topic::PlayerCoinsChange, move |ev| {
        if let GameEvent::PlayerCoinsChange(total) = ev {
            coins.store(*total, Ordering::SeqCst);
            info!("player coins: {total}");
        }
    }));
}

fn disconnect(mut channel: ResMut<EventChannel>, mut subs: ResMut<HudSubscriptions>) {
    for handle in subs.0.drain(..) {
        channel.unsubscribe(handle);
    }
}
