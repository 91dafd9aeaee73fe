mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use dungeon_crawler::common::layers::Layer;
use dungeon_crawler::plugins::enemies::Enemy;
use dungeon_crawler::plugins::events::{EventChannel, GameEvent, Topic};
use dungeon_crawler::plugins::player::{CombatState, Health, Player};
use dungeon_crawler::plugins::ui::debug_hud::HudReadout;

#[test]
fn three_enemy_hits_kill_the_player() {
    let mut app = common::app_headless();
    app.update();

    let world = app.world_mut();
    let player = world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .next()
        .expect("player should exist");
    let enemy = world
        .query_filtered::<Entity, With<Enemy>>()
        .iter(world)
        .next()
        .expect("level should place at least one enemy");

    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let sink = Arc::clone(&seen);
        app.world_mut()
            .resource_mut::<EventChannel>()
            .subscribe(Topic::PlayerHealthChange, move |ev| {
                if let GameEvent::PlayerHealthChange(h) = ev {
                    sink.lock().unwrap().push(*h);
                }
            });
    }

    for expected in [2, 1, 0] {
        app.world_mut().write_message(CollisionStart {
            collider1: player,
            collider2: enemy,
            body1: Some(player),
            body2: Some(enemy),
        });
        app.world_mut().run_schedule(FixedPostUpdate);

        assert_eq!(app.world().get::<Health>(player).unwrap().current, expected);

        if expected > 0 {
            // Model the hurt window expiring before the next contact.
            *app.world_mut().get_mut::<CombatState>(player).unwrap() = CombatState::Idle;
        }
    }

    assert_eq!(
        *app.world().get::<CombatState>(player).unwrap(),
        CombatState::Dead
    );
    assert_eq!(
        app.world().get::<LinearVelocity>(player).unwrap().0,
        Vec2::ZERO
    );
    let layers = app.world().get::<CollisionLayers>(player).unwrap();
    assert!(!layers.filters.has_all(Layer::Enemy));

    // Dead is terminal: a fourth contact changes nothing.
    app.world_mut().write_message(CollisionStart {
        collider1: player,
        collider2: enemy,
        body1: Some(player),
        body2: Some(enemy),
    });
    app.world_mut().run_schedule(FixedPostUpdate);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 0);
    assert_eq!(*seen.lock().unwrap(), [2, 1, 0]);

    // The readout mirrored every total as it was published.
    assert_eq!(app.world().resource::<HudReadout>().health(), 0);
}
