//! Integration test harness.
//!
//! Keeps integration tests headless: `MinimalPlugins` provides the core ECS
//! runtime, then `dungeon_crawler::game::configure_headless` installs the
//! gameplay plugins without any render surface.

use bevy::asset::AssetPlugin;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for the physics stack.
    // InputPlugin supplies `ButtonInput<KeyCode>` (provided by DefaultPlugins
    // in the full app) that the gameplay input system reads.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        InputPlugin,
    ));

    dungeon_crawler::game::configure_headless(&mut app);
    app
}
