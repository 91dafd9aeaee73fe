//! Treasure plugin: chests that pay out once.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::{layers::Layer, state::GameState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChestState {
    Closed,
    Open,
}

/// A one-shot reward container.
#[derive(Component, Debug)]
pub struct Chest {
    state: ChestState,
}

impl Chest {
    pub const REWARD_MIN: u32 = 50;
    pub const REWARD_MAX: u32 = 200;

    pub fn new() -> Self {
        Self {
            state: ChestState::Closed,
        }
    }

    #[inline]
    pub fn state(&self) -> ChestState {
        self.state
    }

    /// Open the chest and return its reward.
    ///
    /// The first call transitions Closed -> Open and pays a uniformly
    /// random amount in `REWARD_MIN..=REWARD_MAX`. Every later call pays 0
    /// and leaves the chest Open.
    pub fn open(&mut self, rng: &mut impl Rng) -> u32 {
        if self.state == ChestState::Open {
            return 0;
        }
        self.state = ChestState::Open;
        rng.random_range(Self::REWARD_MIN..=Self::REWARD_MAX)
    }
}

impl Default for Chest {
    fn default() -> Self {
        Self::new()
    }
}

pub fn spawn_chest(commands: &mut Commands, pos: Vec2) {
    commands.spawn((
        Name::new("Chest"),
        Chest::new(),
        Sprite {
            color: Color::srgb(0.75, 0.55, 0.2),
            custom_size: Some(Vec2::splat(16.0)),
            ..default()
        },
        Transform::from_translation(pos.extend(1.0)),
        RigidBody::Static,
        Collider::rectangle(16.0, 16.0),
        CollisionLayers::new(Layer::Chest, [Layer::Player]),
        DespawnOnExit(GameState::InGame),
    ));
}
