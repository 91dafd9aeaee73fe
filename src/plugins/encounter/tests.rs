use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use super::process_player_contacts;
use crate::common::layers::Layer;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{Enemy, EnemyLifeState};
use crate::plugins::events::{EventChannel, GameEvent, Topic};
use crate::plugins::player::{ActiveChest, CombatState, Health, Player};

fn contact_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<EventChannel>();
    world.init_resource::<Messages<CollisionStart>>();
    world
}

fn spawn_contact_player(world: &mut World, pos: Vec2, health: i32, state: CombatState) -> Entity {
    world
        .spawn((
            Player,
            Transform::from_translation(pos.extend(1.0)),
            Health { current: health, max: 3 },
            state,
            LinearVelocity::ZERO,
            ActiveChest::default(),
            CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::Chest]),
        ))
        .id()
}

fn spawn_contact_enemy(world: &mut World, pos: Vec2, life: EnemyLifeState) -> Entity {
    world
        .spawn((
            Enemy,
            life,
            Transform::from_translation(pos.extend(1.0)),
            CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::Knife]),
        ))
        .id()
}

fn write_collision_start(world: &mut World, a: Entity, b: Entity) {
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

fn capture_health_events(world: &mut World) -> Arc<Mutex<Vec<i32>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    world
        .resource_mut::<EventChannel>()
        .subscribe(Topic::PlayerHealthChange, move |ev| {
            if let GameEvent::PlayerHealthChange(h) = ev {
                sink.lock().unwrap().push(*h);
            }
        });
    seen
}

#[test]
fn enemy_contact_damages_knocks_back_and_publishes() {
    let mut world = contact_world();
    let knockback = Tunables::default().knockback;
    let player = spawn_contact_player(&mut world, Vec2::new(10.0, 0.0), 3, CombatState::Idle);
    let enemy = spawn_contact_enemy(&mut world, Vec2::ZERO, EnemyLifeState::Alive);
    let seen = capture_health_events(&mut world);

    write_collision_start(&mut world, player, enemy);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<Health>(player).unwrap().current, 2);
    assert_eq!(
        *world.get::<CombatState>(player).unwrap(),
        CombatState::Hurt { elapsed_ms: 0.0 }
    );
    // Pushed away from the enemy, along +X.
    assert_eq!(
        world.get::<LinearVelocity>(player).unwrap().0,
        Vec2::new(knockback, 0.0)
    );
    assert_eq!(*seen.lock().unwrap(), [2]);
}

#[test]
fn hits_inside_the_hurt_window_resolve_to_nothing() {
    let mut world = contact_world();
    let player = spawn_contact_player(
        &mut world,
        Vec2::new(10.0, 0.0),
        2,
        CombatState::Hurt { elapsed_ms: 80.0 },
    );
    let enemy = spawn_contact_enemy(&mut world, Vec2::ZERO, EnemyLifeState::Alive);
    let seen = capture_health_events(&mut world);

    write_collision_start(&mut world, player, enemy);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<Health>(player).unwrap().current, 2);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn the_killing_hit_drops_the_enemy_filter_for_good() {
    let mut world = contact_world();
    let player = spawn_contact_player(&mut world, Vec2::new(10.0, 0.0), 1, CombatState::Idle);
    let enemy = spawn_contact_enemy(&mut world, Vec2::ZERO, EnemyLifeState::Alive);
    let seen = capture_health_events(&mut world);

    write_collision_start(&mut world, player, enemy);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<Health>(player).unwrap().current, 0);
    assert_eq!(*world.get::<CombatState>(player).unwrap(), CombatState::Dead);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
    assert_eq!(*seen.lock().unwrap(), [0]);

    let layers = world.get::<CollisionLayers>(player).unwrap();
    assert!(!layers.filters.has_all(Layer::Enemy));
    assert!(layers.filters.has_all(Layer::World));
    assert!(layers.filters.has_all(Layer::Chest));
}

#[test]
fn overlapping_positions_knock_upward() {
    let mut world = contact_world();
    let knockback = Tunables::default().knockback;
    let pos = Vec2::new(5.0, 5.0);
    let player = spawn_contact_player(&mut world, pos, 3, CombatState::Idle);
    let enemy = spawn_contact_enemy(&mut world, pos, EnemyLifeState::Alive);

    write_collision_start(&mut world, player, enemy);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(
        world.get::<LinearVelocity>(player).unwrap().0,
        Vec2::new(0.0, knockback)
    );
}

#[test]
fn contacts_with_dead_enemies_are_ignored() {
    let mut world = contact_world();
    let player = spawn_contact_player(&mut world, Vec2::new(10.0, 0.0), 3, CombatState::Idle);
    let enemy = spawn_contact_enemy(&mut world, Vec2::ZERO, EnemyLifeState::Dead);
    let seen = capture_health_events(&mut world);

    write_collision_start(&mut world, player, enemy);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<Health>(player).unwrap().current, 3);
    assert_eq!(*world.get::<CombatState>(player).unwrap(), CombatState::Idle);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn chest_contact_records_the_active_container() {
    let mut world = contact_world();
    let player = spawn_contact_player(&mut world, Vec2::ZERO, 3, CombatState::Idle);
    let chest = world
        .spawn(CollisionLayers::new(Layer::Chest, [Layer::Player]))
        .id();

    // Chest reported first; side order must not matter.
    world.write_message(CollisionStart {
        collider1: chest,
        collider2: player,
        body1: None,
        body2: Some(player),
    });
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<ActiveChest>(player).unwrap().0, Some(chest));
}

#[test]
fn contacts_not_involving_the_player_are_ignored() {
    let mut world = contact_world();
    let player = spawn_contact_player(&mut world, Vec2::ZERO, 3, CombatState::Idle);
    let enemy = spawn_contact_enemy(&mut world, Vec2::new(50.0, 0.0), EnemyLifeState::Alive);
    let wall = world
        .spawn(CollisionLayers::new(
            Layer::World,
            [Layer::Player, Layer::Enemy, Layer::Knife],
        ))
        .id();

    write_collision_start(&mut world, enemy, wall);
    run_system_once(&mut world, process_player_contacts);

    assert_eq!(world.get::<Health>(player).unwrap().current, 3);
    assert_eq!(*world.get::<CombatState>(player).unwrap(), CombatState::Idle);
}
