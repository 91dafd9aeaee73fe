//! Camera plugin (render-only): smoothed follow of the player.
//!
//! The follow system runs in PostUpdate before transform propagation so the
//! camera sees this frame's player position.
//!
//! The two Transform queries are kept disjoint with `Without<...>` filters
//! (B0001): the player is never a camera and the camera is never a player.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();

    tf_cam.translation.x += (tf_player.translation.x - tf_cam.translation.x) * alpha;
    tf_cam.translation.y += (tf_player.translation.y - tf_cam.translation.y) * alpha;
}
