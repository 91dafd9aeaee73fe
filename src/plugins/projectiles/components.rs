use bevy::prelude::*;

#[derive(Component)]
pub struct PooledKnife;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnifeState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// Newtype for entities known to carry the pooled-knife component set.
///
/// Only the pool init system constructs these, so holding one is proof the
/// entity was spawned with the full bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnifeEntity(pub Entity);
