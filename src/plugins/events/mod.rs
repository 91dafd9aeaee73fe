//! Gameplay event channel: a topic-keyed publish/subscribe resource.
//!
//! Gameplay systems publish player-facing facts (health changed, coins
//! changed) without knowing who listens. Consumers register boxed handlers
//! per topic and are invoked synchronously, in subscription order, from the
//! publishing system.
//!
//! Handlers cannot subscribe or unsubscribe while an emit is in flight:
//! `emit` borrows the channel mutably, so re-entrant mutation is ruled out
//! by ownership rather than by a runtime guard.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<EventChannel>();
}

/// Topics a handler can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    PlayerHealthChange,
    PlayerCoinsChange,
}

/// A published gameplay fact, carrying the new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// New health total after a decrement.
    PlayerHealthChange(i32),
    /// New coin total after a pickup.
    PlayerCoinsChange(u32),
}

impl GameEvent {
    #[inline]
    pub fn topic(self) -> Topic {
        match self {
            GameEvent::PlayerHealthChange(_) => Topic::PlayerHealthChange,
            GameEvent::PlayerCoinsChange(_) => Topic::PlayerCoinsChange,
        }
    }
}

/// Proof of a subscription; pass back to [`EventChannel::unsubscribe`].
///
/// Handles are cheap to copy and remain valid until unsubscribed. Using a
/// stale handle is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionHandle {
    topic: Topic,
    id: u64,
}

type Handler = Box<dyn FnMut(&GameEvent) + Send + Sync>;

#[derive(Resource, Default)]
pub struct EventChannel {
    next_id: u64,
    topics: HashMap<Topic, Vec<(u64, Handler)>>,
}

impl EventChannel {
    /// Register `handler` for `topic`. Handlers for a topic run in
    /// subscription order; duplicate registrations are allowed and each
    /// gets its own handle.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        handler: impl FnMut(&GameEvent) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.topics
            .entry(topic)
            .or_default()
            .push((id, Box::new(handler)));
        SubscriptionHandle { topic, id }
    }

    /// Remove the subscription identified by `handle`.
    ///
    /// Safe to call with an already-removed handle.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        if let Some(handlers) = self.topics.get_mut(&handle.topic) {
            handlers.retain(|(id, _)| *id != handle.id);
        }
    }

    /// Remove every subscription for `topic`. Other topics are untouched.
    pub fn unsubscribe_all(&mut self, topic: Topic) {
        if let Some(handlers) = self.topics.get_mut(&topic) {
            handlers.clear();
        }
    }

    /// Invoke every handler subscribed to the event's topic, in
    /// subscription order. Emitting on a topic with no subscribers is a
    /// no-op.
    pub fn emit(&mut self, event: GameEvent) {
        if let Some(handlers) = self.topics.get_mut(&event.topic()) {
            for (_, handler) in handlers.iter_mut() {
                handler(&event);
            }
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics.get(&topic).map_or(0, Vec::len)
    }
}
