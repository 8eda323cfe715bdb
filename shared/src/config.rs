use std::fmt;
use std::str::FromStr;

use crate::vec3::{self, vec3, Vec3};

/// Open or closed-off range along one axis. Both ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisBounds {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn below(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Strictly inside: a value on either bound is outside.
    pub fn contains(&self, v: f64) -> bool {
        self.min.is_none_or(|min| v > min) && self.max.is_none_or(|max| v < max)
    }

    fn validate(&self, axis: &str) -> Result<(), String> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(format!("goal.{axis} bounds must be finite"));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(format!("goal.{axis}.min must be < goal.{axis}.max"));
            }
        }
        Ok(())
    }
}

/// Axis-aligned scoring volume in field space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GoalVolume {
    pub x: AxisBounds,
    pub y: AxisBounds,
    pub z: AxisBounds,
}

impl Default for GoalVolume {
    fn default() -> Self {
        Self {
            x: AxisBounds::between(-0.91, 0.91),
            y: AxisBounds::below(1.83),
            z: AxisBounds::between(-0.02, 2.0),
        }
    }
}

impl GoalVolume {
    /// Whether a ball center at `p` has scored.
    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Closed box usable as a sensor shape. Open ends are capped at `floor`
    /// (below) or `ceiling` (above).
    pub fn finite_box(&self, floor: f64, ceiling: f64) -> (Vec3, Vec3) {
        let lo = |b: AxisBounds| b.min.unwrap_or(floor);
        let hi = |b: AxisBounds| b.max.unwrap_or(ceiling);
        (
            vec3(lo(self.x), lo(self.y), lo(self.z)),
            vec3(hi(self.x), hi(self.y), hi(self.z)),
        )
    }
}

/// How goals are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMode {
    /// Ball position is compared to the goal volume every tick.
    #[default]
    Polling,
    /// A sensor over the goal volume reports overlap events.
    Trigger,
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" | "poll" => Ok(DetectionMode::Polling),
            "trigger" | "event" => Ok(DetectionMode::Trigger),
            other => Err(format!("unknown detection mode '{other}'")),
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::Polling => f.write_str("polling"),
            DetectionMode::Trigger => f.write_str("trigger"),
        }
    }
}

/// Where balls are launched from and where they are aimed.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Spawn x is uniform in [-half_width, half_width)
    pub spawn_half_width: f64,
    pub spawn_height: f64,
    pub spawn_depth: f64,
    pub aim_target: Vec3,
    /// Launch speed (m/s)
    pub speed: f64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            spawn_half_width: 5.0,
            spawn_height: 1.5,
            spawn_depth: -10.0,
            aim_target: vec3(0.0, 1.2, 1.0),
            speed: 12.0,
        }
    }
}

/// Game configuration. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub goal: GoalVolume,
    pub launch: LaunchConfig,
    pub detection: DetectionMode,
    pub initial_spawn_delay: f64,
    /// Ball is discarded if it has not scored this long after spawning
    pub ball_timeout: f64,
    pub timeout_respawn_delay: f64,
    pub goal_respawn_delay: f64,
    /// Goals conceded that end the game
    pub max_score: u32,
    pub ball_radius: f64,
    pub ball_restitution: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal: GoalVolume::default(),
            launch: LaunchConfig::default(),
            detection: DetectionMode::Polling,
            initial_spawn_delay: 5.0,
            ball_timeout: 4.0,
            timeout_respawn_delay: 3.0,
            goal_respawn_delay: 2.5,
            max_score: 5,
            ball_radius: 0.25,
            ball_restitution: 0.7,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid game config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.goal.x.validate("x")?;
        self.goal.y.validate("y")?;
        self.goal.z.validate("z")?;

        for (name, value) in [
            ("initial_spawn_delay", self.initial_spawn_delay),
            ("timeout_respawn_delay", self.timeout_respawn_delay),
            ("goal_respawn_delay", self.goal_respawn_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0"));
            }
        }
        if !self.ball_timeout.is_finite() || self.ball_timeout <= 0.0 {
            return Err("ball_timeout must be finite and > 0".to_string());
        }
        if self.max_score == 0 {
            return Err("max_score must be >= 1".to_string());
        }
        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err("ball_radius must be finite and > 0".to_string());
        }
        if !self.ball_restitution.is_finite() || !(0.0..=1.0).contains(&self.ball_restitution) {
            return Err("ball_restitution must be within [0, 1]".to_string());
        }

        let launch = &self.launch;
        if !launch.spawn_half_width.is_finite() || launch.spawn_half_width < 0.0 {
            return Err("launch.spawn_half_width must be finite and >= 0".to_string());
        }
        if !launch.spawn_height.is_finite() || !launch.spawn_depth.is_finite() {
            return Err("launch spawn position must be finite".to_string());
        }
        if !vec3::is_finite(launch.aim_target) {
            return Err("launch.aim_target must be finite".to_string());
        }
        if !launch.speed.is_finite() || launch.speed <= 0.0 {
            return Err("launch.speed must be finite and > 0".to_string());
        }
        Ok(())
    }
}
