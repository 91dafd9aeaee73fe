//! Cardinal movement directions.

use bevy::prelude::*;
use rand::Rng;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardinalDir {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl CardinalDir {
    pub const ALL: [CardinalDir; 4] = [
        CardinalDir::Up,
        CardinalDir::Down,
        CardinalDir::Left,
        CardinalDir::Right,
    ];

    /// Unit vector in world space (+Y is up).
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            CardinalDir::Up => Vec2::Y,
            CardinalDir::Down => Vec2::NEG_Y,
            CardinalDir::Left => Vec2::NEG_X,
            CardinalDir::Right => Vec2::X,
        }
    }

    /// Pick a uniformly random direction that is guaranteed to differ
    /// from `self`.
    pub fn random_other(self, rng: &mut impl Rng) -> CardinalDir {
        let mut others = [CardinalDir::Up; 3];
        let mut n = 0;
        for dir in CardinalDir::ALL {
            if dir != self {
                others[n] = dir;
                n += 1;
            }
        }
        others[rng.random_range(0..3)]
    }
}
