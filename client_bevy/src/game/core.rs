use bevy::prelude::*;
use bevy::time::Virtual;
use bevy_rapier3d::prelude::{PhysicsSet, RapierConfiguration, TimestepMode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

use goalie_shared::config::GameConfig;

use crate::constants::{
    color_from_hex, Colors, CAMERA_EYE, CAMERA_TARGET, GRAVITY_Y, PHYSICS_DT,
    PHYSICS_MAX_CATCHUP_SECS, PHYSICS_MAX_STEPS_PER_FRAME, PHYSICS_SUBSTEPS,
};
use crate::coord::array_to_world;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Rules,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Simulate,
    PostPhysics,
    Spawn,
}

/// Game rules configuration, fixed for the session.
#[derive(Resource, Clone)]
pub(crate) struct GameSettings(pub(crate) GameConfig);

/// Randomness for ball launches.
#[derive(Resource)]
pub(crate) struct SessionRng(pub(crate) ChaCha8Rng);

pub struct CorePlugin {
    pub config: GameConfig,
    pub seed: u64,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameSettings(self.config.clone()))
            .insert_resource(SessionRng(ChaCha8Rng::seed_from_u64(self.seed)))
            .insert_resource(ClearColor(color_from_hex(Colors::SKY)))
            .insert_resource(Time::<Fixed>::from_seconds(PHYSICS_DT as f64))
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: PHYSICS_SUBSTEPS,
            })
            .configure_sets(
                Update,
                (UpdateSet::Input, UpdateSet::Rules, UpdateSet::Visuals).chain(),
            )
            .configure_sets(
                FixedUpdate,
                (FixedSet::Simulate, FixedSet::PostPhysics, FixedSet::Spawn).chain(),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::Simulate.before(PhysicsSet::SyncBackend),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::PostPhysics.after(PhysicsSet::Writeback),
            )
            .add_systems(
                Startup,
                (
                    setup_camera,
                    setup_light,
                    configure_virtual_time_catchup_cap,
                    configure_rapier_gravity,
                )
                    .chain(),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(array_to_world(CAMERA_EYE))
            .looking_at(array_to_world(CAMERA_TARGET), Vec3::Y),
        // The scoreboard texture camera must not take the UI
        IsDefaultUiCamera,
        MainCamera,
    ));
}

fn setup_light(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn configure_rapier_gravity(mut q_config: Query<&mut RapierConfiguration>) {
    for mut cfg in &mut q_config {
        cfg.gravity = Vec3::new(0.0, GRAVITY_Y, 0.0);
    }
}

fn configure_virtual_time_catchup_cap(mut virtual_time: ResMut<Time<Virtual>>) {
    // Limit catch-up to a few fixed steps per frame after a stall.
    let max_delta = Duration::from_secs_f64(PHYSICS_MAX_CATCHUP_SECS);
    debug_assert_eq!(
        PHYSICS_MAX_CATCHUP_SECS,
        (PHYSICS_DT as f64) * (PHYSICS_MAX_STEPS_PER_FRAME as f64)
    );
    virtual_time.set_max_delta(max_delta);
}
