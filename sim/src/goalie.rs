//! Goalie bot that guards the goal mouth.
//!
//! The bot slides along a fixed plane in front of the goal. After each launch
//! it waits a random reaction delay, then moves toward the x where the ball is
//! predicted to cross its plane, limited by `max_speed`.

use rand::Rng;

use crate::config::GoalieConfig;
use crate::physics::FlightBall;

#[derive(Debug)]
pub struct Goalie {
    config: GoalieConfig,
    /// Lateral stick position (m)
    pub x: f64,
    /// Lateral travel limit (m)
    pub half_range: f64,
    reaction_left: f64,
}

impl Goalie {
    pub fn new(config: GoalieConfig, half_range: f64) -> Self {
        Self {
            config,
            x: 0.0,
            half_range,
            reaction_left: 0.0,
        }
    }

    /// Called on every launch; the bot freezes for a fresh reaction delay.
    pub fn on_launch(&mut self, rng: &mut impl Rng) {
        let (min, max) = (self.config.reaction_min, self.config.reaction_max);
        self.reaction_left = min + rng.gen::<f64>() * (max - min);
    }

    /// Where the ball will cross the guarded plane, if it is heading there.
    pub fn predicted_crossing_x(&self, ball: &FlightBall) -> Option<f64> {
        let dz = self.config.plane_z - ball.position.z;
        if ball.velocity.z <= 0.0 || dz < 0.0 {
            return None;
        }
        let t = dz / ball.velocity.z;
        Some(ball.position.x + ball.velocity.x * t)
    }

    pub fn track(&mut self, ball: Option<&FlightBall>, dt: f64) {
        if !self.config.enabled {
            return;
        }
        if self.reaction_left > 0.0 {
            self.reaction_left -= dt;
            return;
        }

        let target = ball
            .and_then(|b| self.predicted_crossing_x(b))
            .unwrap_or(0.0)
            .clamp(-self.half_range, self.half_range);
        let max_step = self.config.max_speed * dt;
        self.x += (target - self.x).clamp(-max_step, max_step);
    }

    /// Deflect the ball if it crossed the guarded plane within reach this step.
    pub fn try_block(&self, ball: &mut FlightBall, prev_z: f64) -> bool {
        if !self.config.enabled {
            return false;
        }
        let plane = self.config.plane_z;
        let crossed = prev_z < plane && ball.position.z >= plane;
        if !crossed {
            return false;
        }
        let within_reach = (ball.position.x - self.x).abs() <= self.config.reach;
        let within_height = ball.position.y <= self.config.max_height;
        if within_reach && within_height {
            ball.deflect_z(plane);
            tracing::debug!("Goalie blocked at x={:.2}", self.x);
            true
        } else {
            false
        }
    }
}
