use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::board::geometry::{stick, StickDef};
use crate::board::stick_logic::step_stick;
use crate::constants::{color_from_hex, Colors};

use super::input::InputState;
use super::FixedSet;

pub struct StickPlugin;

const STICK_RESTITUTION: f32 = 0.4;
const SHAFT_RADIUS: f32 = 0.015;
const SHAFT_LENGTH: f32 = 1.1;

#[derive(Component)]
pub(crate) struct Stick {
    pub(crate) def: StickDef,
    pub(crate) pos: Vec2,
}

impl Plugin for StickPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_stick)
            .add_systems(FixedUpdate, stick_system.in_set(FixedSet::Simulate));
    }
}

fn spawn_stick(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let def = stick();
    let h = def.head_half_extents;
    let material = materials.add(StandardMaterial {
        base_color: color_from_hex(Colors::STICK),
        ..default()
    });

    commands
        .spawn((
            // Physics
            RigidBody::KinematicPositionBased,
            Collider::cuboid(h.x, h.y, h.z),
            Restitution::coefficient(STICK_RESTITUTION),
            Ccd::enabled(),
            Transform::from_xyz(def.start.x, def.start.y, def.plane_z),
            // Visual
            Mesh3d(meshes.add(Cuboid::from_size(h * 2.0))),
            MeshMaterial3d(material.clone()),
            // Game state
            Stick {
                def,
                pos: def.start,
            },
        ))
        .with_children(|head| {
            // Shaft is visual only
            head.spawn((
                Mesh3d(meshes.add(Cylinder::new(SHAFT_RADIUS, SHAFT_LENGTH))),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, -(h.y + SHAFT_LENGTH * 0.5), 0.0),
            ));
        });
}

fn stick_system(
    input: Res<InputState>,
    mut q: Query<(&mut Transform, &mut Stick)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut stick) in &mut q {
        stick.pos = step_stick(stick.pos, input.dir, dt, &stick.def);
        transform.translation = Vec3::new(stick.pos.x, stick.pos.y, stick.def.plane_z);
    }
}
