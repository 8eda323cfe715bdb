use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use goalie_shared::goal_loop::BallId;

use crate::constants::{color_from_hex, Colors};
use crate::coord::field_to_world;

use super::core::GameSettings;
use super::rules::{DespawnBallMessage, SpawnBallMessage};
use super::FixedSet;

pub struct BallPlugin;

const BALL_FRICTION: f32 = 0.4;
const BALL_DENSITY: f32 = 1.2;

#[derive(Component)]
pub(crate) struct BallTag {
    pub(crate) id: BallId,
}

/// Mesh and material shared by every ball.
#[derive(Resource)]
struct BallAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ball_assets).add_systems(
            FixedUpdate,
            (despawn_ball_system, spawn_ball_system)
                .chain()
                .in_set(FixedSet::Spawn),
        );
    }
}

fn setup_ball_assets(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let radius = settings.0.ball_radius as f32;
    commands.insert_resource(BallAssets {
        mesh: meshes.add(Sphere::new(radius).mesh().uv(24, 16)),
        material: materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::BALL),
            perceptual_roughness: 0.6,
            ..default()
        }),
    });
}

fn spawn_ball_system(
    mut commands: Commands,
    mut reader: MessageReader<SpawnBallMessage>,
    settings: Res<GameSettings>,
    assets: Res<BallAssets>,
) {
    for msg in reader.read() {
        let ball = msg.ball;
        debug!("Spawning ball {} at {:?}", ball.id, ball.position);

        commands.spawn((
            // Physics
            RigidBody::Dynamic,
            Collider::ball(settings.0.ball_radius as f32),
            ColliderMassProperties::Density(BALL_DENSITY),
            Restitution::coefficient(settings.0.ball_restitution as f32),
            Friction::coefficient(BALL_FRICTION),
            ActiveEvents::COLLISION_EVENTS,
            Ccd::enabled(),
            Velocity::linear(field_to_world(ball.velocity)),
            Transform::from_translation(field_to_world(ball.position)),
            // Visual
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
            // Game state
            BallTag { id: ball.id },
        ));
    }
}

fn despawn_ball_system(
    mut commands: Commands,
    mut reader: MessageReader<DespawnBallMessage>,
    q_ball: Query<(Entity, &BallTag)>,
) {
    for msg in reader.read() {
        for (entity, tag) in &q_ball {
            if tag.id == msg.id {
                commands.entity(entity).despawn();
            }
        }
    }
}
