use rand::Rng;

use crate::config::LaunchConfig;
use crate::vec3::{self, vec3, Vec3};

/// Initial state of a freshly launched ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallLaunch {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Velocity of magnitude `speed` pointing from `from` to `to`.
pub fn aim_velocity(from: Vec3, to: Vec3, speed: f64) -> Vec3 {
    let dir = vec3::normalize_or_zero(vec3::sub(to, from));
    vec3::scale(dir, speed)
}

/// Pick a spawn point behind the goal at a random lateral offset and aim it at the target.
pub fn random_launch(config: &LaunchConfig, rng: &mut impl Rng) -> BallLaunch {
    let x = (rng.gen::<f64>() - 0.5) * 2.0 * config.spawn_half_width;
    let position = vec3(x, config.spawn_height, config.spawn_depth);
    BallLaunch {
        position,
        velocity: aim_velocity(position, config.aim_target, config.speed),
    }
}
