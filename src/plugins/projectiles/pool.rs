use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{KnifeEntity, KnifeState, PooledKnife};
use crate::common::layers::Layer;

#[derive(Resource, Debug)]
pub struct KnifePool {
    free: Vec<KnifeEntity>,
    capacity: usize,
}

impl KnifePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<KnifeEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, knife: KnifeEntity) {
        self.free.push(knife);
    }
}

#[inline]
pub fn active_knife_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Knife, [Layer::World, Layer::Enemy])
}

/// "Disabled" without structural changes: empty filters means an inactive
/// knife collides with nothing and generates no collision events.
#[inline]
pub fn inactive_knife_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Knife, [] as [Layer; 0])
}

/// Pre-spawn the whole pool, inactive.
///
/// Physics components stay present for the lifetime of the entity; only
/// layers, visibility and velocity toggle with activation. That keeps pooled
/// knives in one archetype.
pub fn init_knife_pool(mut commands: Commands, mut pool: ResMut<KnifePool>) {
    let cap = pool.capacity();

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Knife(Pooled)"),
                PooledKnife,
                KnifeState::Inactive,
                Sprite {
                    color: Color::srgb(0.85, 0.85, 0.9),
                    custom_size: Some(Vec2::new(12.0, 4.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Kinematic,
                Collider::circle(4.0),
                inactive_knife_layers(),
                LinearVelocity(Vec2::ZERO),
                CollisionEventsEnabled,
            ))
            .id();

        pool.push_free(KnifeEntity(e));
    }
}
