use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use goalie_shared::config::DetectionMode;

use crate::board::geometry::{goal_frame, goal_sensor, BoxDef};
use crate::constants::{color_from_hex, Colors, FIELD_HALF_EXTENTS, FIELD_TOP};

use super::core::GameSettings;

pub struct FieldPlugin;

/// Sensor volume behind the goal line. Only present with trigger detection.
#[derive(Component)]
pub(crate) struct GoalSensor;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_field, spawn_goal).chain());
    }
}

fn spawn_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let [hx, hy, hz] = FIELD_HALF_EXTENTS;
    commands.spawn((
        RigidBody::Fixed,
        Collider::cuboid(hx, hy, hz),
        Friction::coefficient(0.8),
        Restitution::coefficient(0.5),
        Transform::from_xyz(0.0, FIELD_TOP - hy, 0.0),
        Mesh3d(meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::TURF),
            perceptual_roughness: 0.95,
            ..default()
        })),
    ));
}

fn spawn_goal(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let frame_material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::GOAL_FRAME),
        ..default()
    });

    for part in goal_frame(&settings.0.goal) {
        commands.spawn((
            RigidBody::Fixed,
            box_collider(part),
            Restitution::coefficient(0.6),
            Transform::from_translation(part.center),
            Mesh3d(meshes.add(Cuboid::from_size(part.half_extents * 2.0))),
            MeshMaterial3d(frame_material.clone()),
        ));
    }

    if settings.0.detection != DetectionMode::Trigger {
        return;
    }

    let sensor = goal_sensor(&settings.0.goal, settings.0.ball_radius as f32);
    commands.spawn((
        RigidBody::Fixed,
        box_collider(sensor),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_translation(sensor.center),
        GoalSensor,
    ));
    debug!("Goal sensor at {:?}", sensor.center);
}

fn box_collider(def: BoxDef) -> Collider {
    let h = def.half_extents;
    Collider::cuboid(h.x, h.y, h.z)
}
