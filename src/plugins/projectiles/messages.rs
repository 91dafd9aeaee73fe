//! Buffered throw requests.
//!
//! Producers create *intent*; the allocator applies it (pool pop +
//! component writes). This is a producer -> queue -> consumer pipeline.

use bevy::prelude::*;

use crate::common::dir::CardinalDir;

#[derive(Message, Clone, Copy, Debug)]
pub struct ThrowKnifeRequest {
    /// Thrower position; the knife spawns offset along `dir`.
    pub origin: Vec2,
    pub dir: CardinalDir,
}
