use goalie_shared::vec3::{self, Vec3};

/// Horizontal speed kept on each ground bounce
const GROUND_FRICTION: f64 = 0.9;

/// Below this vertical speed a ball resting on the ground stops bouncing
const REST_SPEED: f64 = 0.05;

/// Point-mass ball under gravity bouncing on a flat field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightBall {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f64,
    pub restitution: f64,
}

impl FlightBall {
    pub fn new(position: Vec3, velocity: Vec3, radius: f64, restitution: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
            restitution,
        }
    }

    /// Semi-implicit Euler step with a ground bounce at `floor_y`.
    pub fn step(&mut self, dt: f64, gravity: f64, floor_y: f64) {
        self.velocity.y += gravity * dt;
        self.position = vec3::add(self.position, vec3::scale(self.velocity, dt));

        let ground = floor_y + self.radius;
        if self.position.y < ground {
            self.position.y = ground;
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y * self.restitution;
                self.velocity.x *= GROUND_FRICTION;
                self.velocity.z *= GROUND_FRICTION;
            }
            if self.velocity.y.abs() < REST_SPEED {
                self.velocity.y = 0.0;
            }
        }
    }

    /// Reflect off a stick at depth `plane_z`, sending the ball back downfield.
    pub fn deflect_z(&mut self, plane_z: f64) {
        self.velocity.z = -self.velocity.z.abs() * self.restitution;
        self.position.z = plane_z - self.radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalie_shared::vec3::vec3;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn free_flight_follows_gravity() {
        let mut ball = FlightBall::new(vec3(0.0, 10.0, 0.0), Vec3::ZERO, 0.25, 0.7);
        for _ in 0..60 {
            ball.step(DT, -9.81, 0.0);
        }
        assert!((ball.velocity.y + 9.81).abs() < 1e-9);
        assert!(ball.position.y < 10.0 - 4.5 && ball.position.y > 10.0 - 5.2);
    }

    #[test]
    fn never_sinks_below_floor() {
        let mut ball = FlightBall::new(vec3(0.0, 1.5, -10.0), vec3(0.0, -5.0, 12.0), 0.25, 0.7);
        for _ in 0..600 {
            ball.step(DT, -9.81, 0.25);
            assert!(ball.position.y >= 0.5 - 1e-12);
        }
    }

    #[test]
    fn bounce_loses_energy() {
        let mut ball = FlightBall::new(vec3(0.0, 0.6, 0.0), vec3(0.0, -4.0, 0.0), 0.25, 0.7);
        ball.step(DT, 0.0, 0.25);
        ball.step(DT, 0.0, 0.25);
        assert!(ball.velocity.y > 0.0);
        assert!((ball.velocity.y - 2.8).abs() < 1e-9);
    }

    #[test]
    fn deflect_sends_ball_back() {
        let mut ball = FlightBall::new(vec3(0.3, 1.0, -0.95), vec3(0.0, 0.0, 12.0), 0.25, 0.7);
        ball.deflect_z(-1.0);
        assert!(ball.velocity.z < 0.0);
        assert!(ball.position.z < -1.0);
    }
}
