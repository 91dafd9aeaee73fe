//! World plugin: level layout and arena spawning.
//!
//! The layout is plain data (serde-friendly records) so levels can later be
//! loaded from files; the default layout is a walled arena with a couple of
//! enemies and chests.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use serde::{Deserialize, Serialize};

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::{enemies, treasure};

const TILE: i32 = 16;
const HALF_W: i32 = TILE * 20;
const HALF_H: i32 = TILE * 12;

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelLayout>();
    app.add_systems(OnEnter(GameState::InGame), (spawn_level, spawn_floor));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementKind {
    Enemy,
    Chest,
}

/// One entity to place when the level is entered.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned static wall, centered on (x, y).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WallRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct LevelLayout {
    pub walls: Vec<WallRect>,
    pub placements: Vec<Placement>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        let thickness = 30.0;
        let (hw, hh) = (HALF_W as f32, HALF_H as f32);

        Self {
            walls: vec![
                WallRect {
                    x: 0.0,
                    y: hh + thickness * 0.5,
                    width: hw * 2.0 + thickness * 2.0,
                    height: thickness,
                },
                WallRect {
                    x: 0.0,
                    y: -hh - thickness * 0.5,
                    width: hw * 2.0 + thickness * 2.0,
                    height: thickness,
                },
                WallRect {
                    x: -hw - thickness * 0.5,
                    y: 0.0,
                    width: thickness,
                    height: hh * 2.0,
                },
                WallRect {
                    x: hw + thickness * 0.5,
                    y: 0.0,
                    width: thickness,
                    height: hh * 2.0,
                },
            ],
            placements: vec![
                Placement {
                    kind: PlacementKind::Enemy,
                    x: 200.0,
                    y: 80.0,
                },
                Placement {
                    kind: PlacementKind::Enemy,
                    x: -160.0,
                    y: -40.0,
                },
                Placement {
                    kind: PlacementKind::Chest,
                    x: 64.0,
                    y: -96.0,
                },
                Placement {
                    kind: PlacementKind::Chest,
                    x: -224.0,
                    y: 112.0,
                },
            ],
        }
    }
}

pub(crate) fn spawn_level(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    tunables: Res<Tunables>,
) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let wall_layers =
        CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy, Layer::Knife]);

    for (i, wall) in layout.walls.iter().enumerate() {
        let size = Vec2::new(wall.width, wall.height);
        commands.spawn((
            Name::new(format!("Wall{i}")),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(wall.x, wall.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }

    for placement in &layout.placements {
        let pos = Vec2::new(placement.x, placement.y);
        match placement.kind {
            PlacementKind::Enemy => enemies::spawn_enemy(&mut commands, &tunables, pos),
            PlacementKind::Chest => treasure::spawn_chest(&mut commands, pos),
        }
    }
}

/// Spawn a simple checkerboard floor from solid-color sprites; the project
/// ships no art assets.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..=HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..=HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new(x as f32 * TILE as f32, y as f32 * TILE as f32, 0.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(world_pos),
                DespawnOnExit(GameState::InGame),
            ));
        });
}

#[cfg(test)]
mod tests;
