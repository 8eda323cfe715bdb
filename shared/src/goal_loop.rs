//! Goal-event loop: decides when a ball has scored or timed out and what the
//! host has to do about it.
//!
//! The loop never touches a scene. Each call returns a list of [`GameEffect`]s
//! which the host (Bevy client, headless simulator) executes in order.
//!
//! State machine:
//!
//! ```text
//! NoBall -> BallInFlight -> {Scored | TimedOut} -> (respawn delay) -> NoBall
//!                              Scored -> GameOver (once max_score is reached)
//! ```

use rand::Rng;

use crate::config::{DetectionMode, GameConfig};
use crate::launch::random_launch;
use crate::protocol::{BallWire, GameSnapshot};
use crate::scoreboard::Scoreboard;
use crate::timer::{RespawnReason, RespawnTimer};
use crate::vec3::Vec3;

pub type BallId = u32;
pub type TriggerId = u32;

/// Trigger id of the sensor covering the goal mouth.
pub const GOAL_TRIGGER: TriggerId = 1;

/// The live ball as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Session time (seconds) the ball was launched at
    pub spawned_at: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, ts_rs::TS,
)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoBall,
    BallInFlight,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPhase {
    Enter,
    Exit,
}

/// Overlap report from a trigger volume. `other` is the ball that overlapped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriggerEvent {
    pub trigger: TriggerId,
    pub other: BallId,
    pub phase: TriggerPhase,
}

impl TriggerEvent {
    pub fn goal_enter(ball: BallId) -> Self {
        Self {
            trigger: GOAL_TRIGGER,
            other: ball,
            phase: TriggerPhase::Enter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DespawnReason {
    Scored,
    TimedOut,
    Restart,
}

/// Work the host must carry out, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEffect {
    SpawnBall(Ball),
    DespawnBall { id: BallId, reason: DespawnReason },
    PlayGoalSound,
    RedrawScoreboard(Scoreboard),
    GameOver { score: u32 },
}

/// Running totals for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchStats {
    pub shots: u32,
    pub goals: u32,
    pub timeouts: u32,
}

pub struct GoalLoop {
    config: GameConfig,
    score: u32,
    game_over: bool,
    ball: Option<Ball>,
    respawn: RespawnTimer,
    next_ball_id: BallId,
    stats: MatchStats,
}

impl GoalLoop {
    /// Start a session at `now`. The first ball is due after `initial_spawn_delay`.
    pub fn new(config: GameConfig, now: f64) -> Self {
        let mut respawn = RespawnTimer::default();
        respawn.schedule(now, config.initial_spawn_delay, RespawnReason::SessionStart);
        Self {
            config,
            score: 0,
            game_over: false,
            ball: None,
            respawn,
            next_ball_id: 1,
            stats: MatchStats::default(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn respawn_due_at(&self) -> Option<f64> {
        self.respawn.due_at()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.ball.is_some() {
            Phase::BallInFlight
        } else {
            Phase::NoBall
        }
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::render(self.score, self.game_over)
    }

    pub fn snapshot(&self, now: f64) -> GameSnapshot {
        GameSnapshot {
            score: self.score,
            game_over: self.game_over,
            phase: self.phase(),
            ball: self.ball.map(|b| BallWire::from_ball(&b, now)),
            scoreboard: self.scoreboard(),
            shots: self.stats.shots,
            timeouts: self.stats.timeouts,
        }
    }

    /// Update the live ball's kinematics. Reports for any other ball are ignored.
    pub fn observe(&mut self, id: BallId, position: Vec3, velocity: Vec3) -> bool {
        match self.ball.as_mut() {
            Some(ball) if ball.id == id => {
                ball.position = position;
                ball.velocity = velocity;
                true
            }
            _ => {
                tracing::debug!("Ignoring position report for stale ball {}", id);
                false
            }
        }
    }

    /// Evaluate one tick at session time `now`.
    ///
    /// Timeout is checked before the goal rule. The goal rule only runs in
    /// polling mode; in trigger mode goals arrive through [`GoalLoop::on_trigger`].
    pub fn tick(&mut self, now: f64, rng: &mut impl Rng) -> Vec<GameEffect> {
        let mut effects = Vec::new();
        if self.game_over {
            return effects;
        }

        if let Some(ball) = self.ball {
            if now - ball.spawned_at > self.config.ball_timeout {
                self.time_out(now, ball.id, &mut effects);
            } else if self.config.detection == DetectionMode::Polling
                && self.config.goal.contains(ball.position)
            {
                self.score_goal(now, ball.id, &mut effects);
            }
        }

        if self.ball.is_none() && !self.game_over {
            if let Some(reason) = self.respawn.poll(now) {
                self.spawn_ball(now, reason, rng, &mut effects);
            }
        }

        effects
    }

    /// Handle an overlap report from a trigger volume.
    pub fn on_trigger(&mut self, now: f64, event: TriggerEvent) -> Vec<GameEffect> {
        let mut effects = Vec::new();
        if self.game_over {
            return effects;
        }
        if self.config.detection != DetectionMode::Trigger {
            tracing::debug!("Ignoring trigger event in {} mode", self.config.detection);
            return effects;
        }
        if event.trigger != GOAL_TRIGGER || event.phase != TriggerPhase::Enter {
            return effects;
        }
        match self.ball {
            Some(ball) if ball.id == event.other => {
                if now - ball.spawned_at > self.config.ball_timeout {
                    self.time_out(now, ball.id, &mut effects);
                } else {
                    self.score_goal(now, ball.id, &mut effects);
                }
            }
            _ => tracing::debug!("Ignoring trigger for stale ball {}", event.other),
        }
        effects
    }

    /// Reset score and start over. The first ball is due after `initial_spawn_delay`.
    pub fn restart(&mut self, now: f64) -> Vec<GameEffect> {
        let mut effects = Vec::new();
        if let Some(ball) = self.ball.take() {
            effects.push(GameEffect::DespawnBall {
                id: ball.id,
                reason: DespawnReason::Restart,
            });
        }
        self.score = 0;
        self.game_over = false;
        self.stats = MatchStats::default();
        self.respawn.schedule(
            now,
            self.config.initial_spawn_delay,
            RespawnReason::Restart,
        );
        effects.push(GameEffect::RedrawScoreboard(self.scoreboard()));
        tracing::info!("Session restarted");
        effects
    }

    fn time_out(&mut self, now: f64, id: BallId, effects: &mut Vec<GameEffect>) {
        tracing::info!("Ball {} timed out, respawning", id);
        self.ball = None;
        self.stats.timeouts += 1;
        effects.push(GameEffect::DespawnBall {
            id,
            reason: DespawnReason::TimedOut,
        });
        self.respawn.schedule(
            now,
            self.config.timeout_respawn_delay,
            RespawnReason::TimedOut,
        );
    }

    fn score_goal(&mut self, now: f64, id: BallId, effects: &mut Vec<GameEffect>) {
        self.score += 1;
        self.stats.goals += 1;
        self.ball = None;
        tracing::info!("Ball {} scored, score {}", id, self.score);

        effects.push(GameEffect::PlayGoalSound);
        effects.push(GameEffect::DespawnBall {
            id,
            reason: DespawnReason::Scored,
        });

        if self.score >= self.config.max_score {
            self.game_over = true;
            self.respawn.cancel();
            effects.push(GameEffect::RedrawScoreboard(self.scoreboard()));
            effects.push(GameEffect::GameOver { score: self.score });
            tracing::info!("Game over at score {}", self.score);
        } else {
            effects.push(GameEffect::RedrawScoreboard(self.scoreboard()));
            self.respawn
                .schedule(now, self.config.goal_respawn_delay, RespawnReason::Scored);
        }
    }

    fn spawn_ball(
        &mut self,
        now: f64,
        reason: RespawnReason,
        rng: &mut impl Rng,
        effects: &mut Vec<GameEffect>,
    ) {
        let launch = random_launch(&self.config.launch, rng);
        let ball = Ball {
            id: self.next_ball_id,
            position: launch.position,
            velocity: launch.velocity,
            spawned_at: now,
        };
        self.next_ball_id += 1;
        self.stats.shots += 1;
        self.ball = Some(ball);
        tracing::debug!("Spawned ball {} ({:?})", ball.id, reason);
        effects.push(GameEffect::SpawnBall(ball));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const IN_GOAL: Vec3 = vec3(0.0, 1.2, 1.0);
    const WIDE: Vec3 = vec3(2.0, 1.2, 1.0);

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(2024)
    }

    /// Loop with its first ball already in flight at t=5.
    fn in_flight(config: GameConfig) -> (GoalLoop, ChaCha8Rng, BallId) {
        let mut rng = rng();
        let mut game = GoalLoop::new(config, 0.0);
        let effects = game.tick(5.0, &mut rng);
        let id = match effects.as_slice() {
            [GameEffect::SpawnBall(ball)] => ball.id,
            other => panic!("expected a single spawn, got {:?}", other),
        };
        (game, rng, id)
    }

    fn spawned(effects: &[GameEffect]) -> Option<Ball> {
        effects.iter().find_map(|e| match e {
            GameEffect::SpawnBall(b) => Some(*b),
            _ => None,
        })
    }

    #[test]
    fn first_ball_waits_for_initial_delay() {
        let mut rng = rng();
        let mut game = GoalLoop::new(GameConfig::default(), 0.0);
        assert!(game.tick(4.9, &mut rng).is_empty());
        assert_eq!(game.phase(), Phase::NoBall);
        assert!(spawned(&game.tick(5.0, &mut rng)).is_some());
        assert_eq!(game.phase(), Phase::BallInFlight);
    }

    #[test]
    fn ball_in_goal_scores() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        game.observe(id, IN_GOAL, Vec3::ZERO);
        let effects = game.tick(6.0, &mut rng);

        assert_eq!(game.score(), 1);
        assert_eq!(game.phase(), Phase::NoBall);
        assert_eq!(
            effects,
            vec![
                GameEffect::PlayGoalSound,
                GameEffect::DespawnBall {
                    id,
                    reason: DespawnReason::Scored
                },
                GameEffect::RedrawScoreboard(Scoreboard::render(1, false)),
            ]
        );
    }

    #[test]
    fn wide_ball_does_not_score() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        game.observe(id, WIDE, Vec3::ZERO);
        assert!(game.tick(6.0, &mut rng).is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::BallInFlight);
    }

    #[test]
    fn goal_respawns_after_goal_delay() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        game.observe(id, IN_GOAL, Vec3::ZERO);
        game.tick(6.0, &mut rng);

        assert!(game.tick(8.4, &mut rng).is_empty());
        let next = spawned(&game.tick(8.5, &mut rng)).unwrap();
        assert_ne!(next.id, id);
        assert_eq!(next.spawned_at, 8.5);
    }

    #[test]
    fn timeout_discards_and_respawns_after_delay() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        game.observe(id, WIDE, Vec3::ZERO);

        // Exactly at the timeout the ball is still live
        assert!(game.tick(9.0, &mut rng).is_empty());

        let effects = game.tick(9.1, &mut rng);
        assert_eq!(
            effects,
            vec![GameEffect::DespawnBall {
                id,
                reason: DespawnReason::TimedOut
            }]
        );
        assert_eq!(game.stats().timeouts, 1);
        assert_eq!(game.respawn_due_at(), Some(12.1));

        assert!(game.tick(12.0, &mut rng).is_empty());
        let next = spawned(&game.tick(12.1, &mut rng)).unwrap();
        assert!(next.position.x >= -5.0 && next.position.x < 5.0);
        assert_eq!(next.position.z, -10.0);
    }

    #[test]
    fn timeout_wins_over_goal_in_same_tick() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        game.observe(id, IN_GOAL, Vec3::ZERO);
        let effects = game.tick(9.5, &mut rng);
        assert_eq!(game.score(), 0);
        assert!(matches!(
            effects.as_slice(),
            [GameEffect::DespawnBall {
                reason: DespawnReason::TimedOut,
                ..
            }]
        ));
    }

    #[test]
    fn late_trigger_times_out_instead_of_scoring() {
        let config = GameConfig {
            detection: DetectionMode::Trigger,
            ..Default::default()
        };
        let (mut game, mut rng, id) = in_flight(config);
        assert!(game.tick(9.0, &mut rng).is_empty());

        // Overlap reported after the timeout, before the next tick
        let effects = game.on_trigger(9.5, TriggerEvent::goal_enter(id));
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats().timeouts, 1);
        assert!(!effects.contains(&GameEffect::PlayGoalSound));
        assert!(matches!(
            effects.as_slice(),
            [GameEffect::DespawnBall {
                reason: DespawnReason::TimedOut,
                ..
            }]
        ));
        assert_eq!(game.respawn_due_at(), Some(12.5));
    }

    #[test]
    fn score_is_monotonic_and_steps_by_one() {
        let mut rng = rng();
        let mut game = GoalLoop::new(GameConfig::default(), 0.0);
        let mut now = 0.0;
        let mut last = 0;
        while !game.is_game_over() {
            now += 0.1;
            let effects = game.tick(now, &mut rng);
            if let Some(ball) = spawned(&effects) {
                game.observe(ball.id, IN_GOAL, Vec3::ZERO);
            }
            assert!(game.score() == last || game.score() == last + 1);
            last = game.score();
            assert!(now < 100.0, "game never ended");
        }
        assert_eq!(game.score(), 5);
    }

    #[test]
    fn fifth_goal_ends_game() {
        let mut rng = rng();
        let mut game = GoalLoop::new(GameConfig::default(), 0.0);
        let mut now = 0.0;
        let mut last_effects = Vec::new();
        while !game.is_game_over() {
            now += 0.1;
            last_effects = game.tick(now, &mut rng);
            if let Some(ball) = spawned(&last_effects) {
                game.observe(ball.id, IN_GOAL, Vec3::ZERO);
            }
        }

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(last_effects.contains(&GameEffect::GameOver { score: 5 }));
        assert!(last_effects.contains(&GameEffect::RedrawScoreboard(Scoreboard::render(5, true))));
        assert_eq!(game.scoreboard().headline, "YOU LOSE");
        assert_eq!(game.respawn_due_at(), None);

        // Nothing more happens, ever
        for step in 1..200 {
            assert!(game.tick(now + step as f64 * 0.5, &mut rng).is_empty());
        }
        assert!(game.ball().is_none());
        assert_eq!(game.stats().shots, 5);
    }

    #[test]
    fn stale_observation_ignored() {
        let (mut game, _rng, id) = in_flight(GameConfig::default());
        assert!(!game.observe(id + 1, IN_GOAL, Vec3::ZERO));
        assert_ne!(game.ball().unwrap().position, IN_GOAL);
    }

    #[test]
    fn observe_without_ball_is_noop() {
        let mut game = GoalLoop::new(GameConfig::default(), 0.0);
        assert!(!game.observe(1, IN_GOAL, Vec3::ZERO));
        assert_eq!(game.phase(), Phase::NoBall);
    }

    #[test]
    fn trigger_scores_live_ball() {
        let config = GameConfig {
            detection: DetectionMode::Trigger,
            ..Default::default()
        };
        let (mut game, mut rng, id) = in_flight(config);

        // Positions are not evaluated in trigger mode
        game.observe(id, IN_GOAL, Vec3::ZERO);
        assert!(game.tick(6.0, &mut rng).is_empty());

        let effects = game.on_trigger(6.1, TriggerEvent::goal_enter(id));
        assert_eq!(game.score(), 1);
        assert!(effects.contains(&GameEffect::PlayGoalSound));
    }

    #[test]
    fn trigger_for_other_ball_or_exit_ignored() {
        let config = GameConfig {
            detection: DetectionMode::Trigger,
            ..Default::default()
        };
        let (mut game, _rng, id) = in_flight(config);

        assert!(game.on_trigger(6.0, TriggerEvent::goal_enter(id + 7)).is_empty());
        let exit = TriggerEvent {
            phase: TriggerPhase::Exit,
            ..TriggerEvent::goal_enter(id)
        };
        assert!(game.on_trigger(6.0, exit).is_empty());
        let other_trigger = TriggerEvent {
            trigger: GOAL_TRIGGER + 1,
            ..TriggerEvent::goal_enter(id)
        };
        assert!(game.on_trigger(6.0, other_trigger).is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn duplicate_trigger_scores_once() {
        let config = GameConfig {
            detection: DetectionMode::Trigger,
            ..Default::default()
        };
        let (mut game, _rng, id) = in_flight(config);
        game.on_trigger(6.0, TriggerEvent::goal_enter(id));
        assert!(game.on_trigger(6.0, TriggerEvent::goal_enter(id)).is_empty());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn trigger_ignored_in_polling_mode() {
        let (mut game, _rng, id) = in_flight(GameConfig::default());
        assert!(game.on_trigger(6.0, TriggerEvent::goal_enter(id)).is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn restart_replaces_pending_timeout_respawn() {
        let config = GameConfig {
            timeout_respawn_delay: 10.0,
            ..Default::default()
        };
        let (mut game, mut rng, id) = in_flight(config);
        game.observe(id, WIDE, Vec3::ZERO);
        game.tick(9.5, &mut rng);
        assert_eq!(game.respawn_due_at(), Some(19.5));

        let effects = game.restart(10.0);
        assert_eq!(effects, vec![GameEffect::RedrawScoreboard(Scoreboard::render(0, false))]);
        assert_eq!(game.respawn_due_at(), Some(15.0));
        let next = spawned(&game.tick(15.0, &mut rng));
        assert!(next.is_some());
        assert!(spawned(&game.tick(19.5, &mut rng)).is_none());
    }

    #[test]
    fn restart_after_game_over_resets() {
        let config = GameConfig {
            max_score: 1,
            ..Default::default()
        };
        let (mut game, mut rng, id) = in_flight(config);
        game.observe(id, IN_GOAL, Vec3::ZERO);
        game.tick(6.0, &mut rng);
        assert!(game.is_game_over());

        game.restart(7.0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::NoBall);
        assert_eq!(game.stats(), MatchStats::default());
        assert!(spawned(&game.tick(12.0, &mut rng)).is_some());
    }

    #[test]
    fn restart_despawns_live_ball() {
        let (mut game, _rng, id) = in_flight(GameConfig::default());
        let effects = game.restart(6.0);
        assert_eq!(
            effects[0],
            GameEffect::DespawnBall {
                id,
                reason: DespawnReason::Restart
            }
        );
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut game, mut rng, id) = in_flight(GameConfig::default());
        let snap = game.snapshot(6.0);
        assert_eq!(snap.phase, Phase::BallInFlight);
        assert_eq!(snap.ball.as_ref().map(|b| b.id), Some(id));
        assert!((snap.ball.unwrap().age - 1.0).abs() < 1e-9);

        game.observe(id, IN_GOAL, Vec3::ZERO);
        game.tick(6.0, &mut rng);
        let snap = game.snapshot(6.0);
        assert_eq!(snap.score, 1);
        assert!(snap.ball.is_none());
        assert_eq!(snap.scoreboard.score_line, "Score: 1");
    }
}
