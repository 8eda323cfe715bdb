use std::str::FromStr;

use goalie_shared::config::{DetectionMode, GameConfig};

/// How the match loop is paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// One tick per `1 / tick_rate_hz` of wall-clock time
    RealTime,
    /// Ticks back to back; simulated time is unaffected
    AsFastAsPossible,
}

impl FromStr for Pacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "realtime" | "real_time" => Ok(Pacing::RealTime),
            "fast" | "as_fast_as_possible" => Ok(Pacing::AsFastAsPossible),
            other => Err(format!("unknown pacing '{other}'")),
        }
    }
}

/// Goalie bot tuning
#[derive(Debug, Clone)]
pub struct GoalieConfig {
    pub enabled: bool,
    /// Depth of the plane the stick guards (m)
    pub plane_z: f64,
    /// Lateral speed limit (m/s)
    pub max_speed: f64,
    /// Half-width the stick covers, ball radius included (m)
    pub reach: f64,
    /// Highest ball center the stick can block (m)
    pub max_height: f64,
    /// Reaction delay range after a launch (s)
    pub reaction_min: f64,
    pub reaction_max: f64,
}

impl Default for GoalieConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            plane_z: -1.0,
            max_speed: 1.5,
            reach: 0.45,
            max_height: 1.9,
            reaction_min: 0.1,
            reaction_max: 0.6,
        }
    }
}

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub tick_rate_hz: u32,
    pub broadcast_rate_hz: u32,
    pub rng_seed: u64,
    pub pacing: Pacing,
    /// Session ends after this much simulated time even without game over
    pub max_session_secs: f64,
    /// Vertical acceleration (m/s^2)
    pub gravity: f64,
    /// Height of the field surface (m)
    pub floor_y: f64,
    pub goalie: GoalieConfig,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            broadcast_rate_hz: 10,
            rng_seed: 42,
            pacing: Pacing::RealTime,
            max_session_secs: 120.0,
            gravity: -9.81,
            floor_y: 0.25,
            goalie: GoalieConfig::default(),
            game: GameConfig::default(),
        }
    }
}

impl SimConfig {
    /// Defaults overridden by environment variables:
    /// `GOALIE_CONFIG` (JSON game config path), `GOALIE_SEED`,
    /// `GOALIE_DETECTION`, `GOALIE_PACING`, `GOALIE_MAX_SECS`, `GOALIE_NO_BOT`.
    pub fn from_env() -> Result<Self, String> {
        let mut config = SimConfig::default();

        if let Ok(path) = std::env::var("GOALIE_CONFIG") {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            config.game = GameConfig::from_json_str(&json)?;
        }
        if let Ok(seed) = std::env::var("GOALIE_SEED") {
            config.rng_seed = seed
                .parse()
                .map_err(|e| format!("GOALIE_SEED '{seed}': {e}"))?;
        }
        if let Ok(mode) = std::env::var("GOALIE_DETECTION") {
            config.game.detection = mode.parse::<DetectionMode>()?;
        }
        if let Ok(pacing) = std::env::var("GOALIE_PACING") {
            config.pacing = pacing.parse()?;
        }
        if let Ok(secs) = std::env::var("GOALIE_MAX_SECS") {
            config.max_session_secs = secs
                .parse()
                .map_err(|e| format!("GOALIE_MAX_SECS '{secs}': {e}"))?;
        }
        if std::env::var("GOALIE_NO_BOT").is_ok() {
            config.goalie.enabled = false;
        }

        Ok(config)
    }

    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }

    pub fn validate(&self) -> Result<(), String> {
        self.game.validate()?;

        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.broadcast_rate_hz == 0 || self.broadcast_rate_hz > self.tick_rate_hz {
            return Err("broadcast_rate_hz must be in 1..=tick_rate_hz".to_string());
        }
        if !self.max_session_secs.is_finite() || self.max_session_secs <= 0.0 {
            return Err("max_session_secs must be finite and > 0".to_string());
        }
        if !self.gravity.is_finite() || !self.floor_y.is_finite() {
            return Err("gravity and floor_y must be finite".to_string());
        }

        let g = &self.goalie;
        if !g.max_speed.is_finite() || g.max_speed < 0.0 {
            return Err("goalie.max_speed must be finite and >= 0".to_string());
        }
        if !g.reach.is_finite() || g.reach < 0.0 {
            return Err("goalie.reach must be finite and >= 0".to_string());
        }
        if !g.plane_z.is_finite() || !g.max_height.is_finite() {
            return Err("goalie plane and height must be finite".to_string());
        }
        if !g.reaction_min.is_finite()
            || !g.reaction_max.is_finite()
            || g.reaction_min < 0.0
            || g.reaction_max < g.reaction_min
        {
            return Err("goalie reaction range must satisfy 0 <= min <= max".to_string());
        }
        Ok(())
    }
}
