use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::Enemy;
use crate::plugins::treasure::Chest;

fn level_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(super::LevelLayout::default());
    world
}

#[test]
fn spawns_walls_on_enter() {
    let mut world = level_world();
    run_system_once(&mut world, super::spawn_level);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn spawns_every_placement() {
    let mut world = level_world();

    let layout = world.resource::<super::LevelLayout>();
    let expected_enemies = layout
        .placements
        .iter()
        .filter(|p| p.kind == super::PlacementKind::Enemy)
        .count();
    let expected_chests = layout
        .placements
        .iter()
        .filter(|p| p.kind == super::PlacementKind::Chest)
        .count();

    run_system_once(&mut world, super::spawn_level);

    let enemies = world.query::<&Enemy>().iter(&world).count();
    let chests = world.query::<&Chest>().iter(&world).count();
    assert_eq!(enemies, expected_enemies);
    assert_eq!(chests, expected_chests);
}

#[test]
fn custom_layout_overrides_default() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(super::LevelLayout {
        walls: vec![super::WallRect {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 10.0,
        }],
        placements: vec![super::Placement {
            kind: super::PlacementKind::Chest,
            x: 5.0,
            y: 5.0,
        }],
    });

    run_system_once(&mut world, super::spawn_level);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, _)| n.as_str().starts_with("Wall"))
        .count();
    assert_eq!(walls, 1);
    assert_eq!(world.query::<&Enemy>().iter(&world).count(), 0);
    assert_eq!(world.query::<&Chest>().iter(&world).count(), 1);
}
