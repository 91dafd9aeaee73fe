//! Collision contact helpers shared by the resolution systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

/// One side of a `CollisionStart` contact.
#[derive(Clone, Copy, Debug)]
pub struct ContactSide {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl ContactSide {
    /// The entity gameplay systems should act on: the rigid body if the
    /// contact reported one, otherwise the collider itself.
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub fn sides(ev: &CollisionStart) -> (ContactSide, ContactSide) {
    (
        ContactSide {
            collider: ev.collider1,
            body: ev.body1,
        },
        ContactSide {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
pub fn in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}
