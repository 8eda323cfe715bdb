use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::goal_loop::{Ball, Phase};
use crate::scoreboard::Scoreboard;

/// Everything a front end needs to draw the current game state.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub score: u32,
    pub game_over: bool,
    pub phase: Phase,
    pub ball: Option<BallWire>,
    pub scoreboard: Scoreboard,
    pub shots: u32,
    pub timeouts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct BallWire {
    pub id: u32,
    pub pos: [f64; 3],
    pub vel: [f64; 3],
    /// Seconds since launch
    pub age: f64,
}

impl BallWire {
    pub fn from_ball(ball: &Ball, now: f64) -> Self {
        Self {
            id: ball.id,
            pos: ball.position.to_array().map(round4),
            vel: ball.velocity.to_array().map(round4),
            age: round4(now - ball.spawned_at),
        }
    }
}

/// Round to 4 decimal places (sub-millimeter, keeps JSON small)
#[inline]
pub fn round4(v: f64) -> f64 {
    (v * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::vec3;

    #[test]
    fn snapshot_serializes_camel_case() {
        let snap = GameSnapshot {
            score: 3,
            game_over: false,
            phase: Phase::BallInFlight,
            ball: Some(BallWire {
                id: 4,
                pos: [0.1, 1.2, -3.0],
                vel: [0.0, 0.0, 12.0],
                age: 0.5,
            }),
            scoreboard: Scoreboard::render(3, false),
            shots: 4,
            timeouts: 0,
        };
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"gameOver\":false"));
        assert!(json.contains("\"phase\":\"ball_in_flight\""));
        assert!(json.contains("\"scoreLine\":\"Score: 3\""));

        let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.score, 3);
        assert_eq!(parsed.ball.map(|b| b.id), Some(4));
    }

    #[test]
    fn ball_wire_rounds_and_ages() {
        let ball = Ball {
            id: 9,
            position: vec3(0.123456, 1.0, -9.99999),
            velocity: vec3(1.0, 2.0, 3.0),
            spawned_at: 10.0,
        };
        let wire = BallWire::from_ball(&ball, 11.25);
        assert_eq!(wire.pos, [0.1235, 1.0, -10.0]);
        assert_eq!(wire.age, 1.25);
    }
}
