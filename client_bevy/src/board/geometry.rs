use bevy::prelude::{Vec2, Vec3};

use goalie_shared::config::GoalVolume;

use crate::constants::FIELD_TOP;
use crate::coord::field_to_world;

/// Axis-aligned box given by center and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDef {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxDef {
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }
}

pub const POST_HALF_THICKNESS: f32 = 0.03;

/// Smallest half extent a sensor may shrink to
const MIN_SENSOR_HALF_EXTENT: f32 = 0.01;

/// Height used to close off a goal volume with no upper bound (m)
const SENSOR_CEILING: f64 = 10.0;

/// Goalie stick head, guarding a plane in front of the goal mouth.
#[derive(Clone, Copy, Debug)]
pub struct StickDef {
    pub plane_z: f32,
    pub head_half_extents: Vec3,
    pub min: Vec2,
    pub max: Vec2,
    pub start: Vec2,
}

pub fn stick() -> StickDef {
    StickDef {
        plane_z: -1.0,
        head_half_extents: Vec3::new(0.15, 0.2, 0.03),
        min: Vec2::new(-1.4, FIELD_TOP + 0.2),
        max: Vec2::new(1.4, 2.2),
        start: Vec2::new(0.0, 1.0),
    }
}

/// Frame of the goal: two posts and a crossbar around the mouth, plus a ground bar at the back.
pub fn goal_frame(goal: &GoalVolume) -> Vec<BoxDef> {
    let (min, max) = goal.finite_box(FIELD_TOP as f64, SENSOR_CEILING);
    let (min, max) = (field_to_world(min), field_to_world(max));
    let t = POST_HALF_THICKNESS;
    let top = max.y + t;
    let front_z = min.z - t;

    let post = |x: f32| {
        BoxDef::from_min_max(
            Vec3::new(x - t, FIELD_TOP, front_z - t),
            Vec3::new(x + t, top, front_z + t),
        )
    };

    vec![
        post(min.x - t),
        post(max.x + t),
        BoxDef::from_min_max(
            Vec3::new(min.x - 2.0 * t, max.y, front_z - t),
            Vec3::new(max.x + 2.0 * t, top + t, front_z + t),
        ),
        BoxDef::from_min_max(
            Vec3::new(min.x - 2.0 * t, FIELD_TOP, max.z),
            Vec3::new(max.x + 2.0 * t, FIELD_TOP + 2.0 * t, max.z + 2.0 * t),
        ),
    ]
}

/// Sensor box for trigger-based detection.
///
/// The box is the goal volume shrunk by the ball radius, so overlap starts
/// when the ball center crosses a face of the volume.
pub fn goal_sensor(goal: &GoalVolume, ball_radius: f32) -> BoxDef {
    let (min, max) = goal.finite_box(FIELD_TOP as f64, SENSOR_CEILING);
    let full = BoxDef::from_min_max(field_to_world(min), field_to_world(max));
    BoxDef {
        center: full.center,
        half_extents: (full.half_extents - Vec3::splat(ball_radius))
            .max(Vec3::splat(MIN_SENSOR_HALF_EXTENT)),
    }
}
