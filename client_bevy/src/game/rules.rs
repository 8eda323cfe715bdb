use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionEvent, Velocity};

use goalie_shared::goal_loop::{
    Ball, BallId, GameEffect, GoalLoop, TriggerEvent, TriggerPhase, GOAL_TRIGGER,
};
use goalie_shared::scoreboard::Scoreboard;

use crate::coord::world_to_field;

use super::ball::BallTag;
use super::core::{GameSettings, SessionRng};
use super::field::GoalSensor;
use super::{FixedSet, UpdateSet};

pub struct RulesPlugin;

/// The goal-event loop for this session.
#[derive(Resource)]
pub(crate) struct GoalLoopRes {
    pub(crate) game: GoalLoop,
}

#[derive(Message, Clone, Copy)]
pub(crate) struct SpawnBallMessage {
    pub(crate) ball: Ball,
}

#[derive(Message, Clone, Copy)]
pub(crate) struct DespawnBallMessage {
    pub(crate) id: BallId,
}

#[derive(Message, Clone, Copy)]
pub(crate) struct GoalScoredMessage {
    pub(crate) score: u32,
}

#[derive(Message, Clone)]
pub(crate) struct ScoreboardMessage(pub(crate) Scoreboard);

#[derive(Message, Clone, Copy, Default)]
pub(crate) struct RestartMessage;

/// Turns goal-loop effects into messages for the systems that own each concern.
#[derive(SystemParam)]
pub(crate) struct EffectWriters<'w> {
    spawn: MessageWriter<'w, SpawnBallMessage>,
    despawn: MessageWriter<'w, DespawnBallMessage>,
    goal: MessageWriter<'w, GoalScoredMessage>,
    scoreboard: MessageWriter<'w, ScoreboardMessage>,
}

impl EffectWriters<'_> {
    fn dispatch(&mut self, effects: Vec<GameEffect>, score: u32) {
        for effect in effects {
            match effect {
                GameEffect::SpawnBall(ball) => {
                    self.spawn.write(SpawnBallMessage { ball });
                }
                GameEffect::DespawnBall { id, .. } => {
                    self.despawn.write(DespawnBallMessage { id });
                }
                GameEffect::PlayGoalSound => {
                    self.goal.write(GoalScoredMessage { score });
                }
                GameEffect::RedrawScoreboard(board) => {
                    self.scoreboard.write(ScoreboardMessage(board));
                }
                GameEffect::GameOver { score } => {
                    info!("Game over, {} goals conceded", score);
                }
            }
        }
    }
}

impl Plugin for RulesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SpawnBallMessage>()
            .add_message::<DespawnBallMessage>()
            .add_message::<GoalScoredMessage>()
            .add_message::<ScoreboardMessage>()
            .add_message::<RestartMessage>()
            .add_systems(PreStartup, init_goal_loop)
            .add_systems(Startup, publish_initial_scoreboard)
            .add_systems(
                FixedUpdate,
                (observe_ball_system, trigger_system, tick_system)
                    .chain()
                    .in_set(FixedSet::PostPhysics),
            )
            .add_systems(Update, restart_system.in_set(UpdateSet::Rules));
    }
}

fn init_goal_loop(mut commands: Commands, settings: Res<GameSettings>) {
    info!("Goal detection: {}", settings.0.detection);
    commands.insert_resource(GoalLoopRes {
        game: GoalLoop::new(settings.0.clone(), 0.0),
    });
}

fn publish_initial_scoreboard(rules: Res<GoalLoopRes>, mut writer: MessageWriter<ScoreboardMessage>) {
    writer.write(ScoreboardMessage(rules.game.scoreboard()));
}

fn observe_ball_system(
    mut rules: ResMut<GoalLoopRes>,
    q_ball: Query<(&BallTag, &Transform, &Velocity)>,
) {
    for (tag, transform, vel) in &q_ball {
        rules.game.observe(
            tag.id,
            world_to_field(transform.translation),
            world_to_field(vel.linvel),
        );
    }
}

fn trigger_system(
    mut rules: ResMut<GoalLoopRes>,
    mut collision_events: MessageReader<CollisionEvent>,
    q_ball: Query<&BallTag>,
    q_sensor: Query<(), With<GoalSensor>>,
    time: Res<Time<Fixed>>,
    mut writers: EffectWriters,
) {
    for event in collision_events.read() {
        let (a, b, phase) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, TriggerPhase::Enter),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, TriggerPhase::Exit),
        };
        let Some((sensor_is_a, ball)) = ball_sensor_pair(
            q_sensor.contains(a),
            q_sensor.contains(b),
            q_ball.get(a).ok().map(|t| t.id),
            q_ball.get(b).ok().map(|t| t.id),
        ) else {
            continue;
        };
        debug!("Goal sensor ({}) {:?} ball {}", sensor_is_a, phase, ball);

        let trigger = TriggerEvent {
            trigger: GOAL_TRIGGER,
            other: ball,
            phase,
        };
        let effects = rules.game.on_trigger(time.elapsed_secs_f64(), trigger);
        let score = rules.game.score();
        writers.dispatch(effects, score);
    }
}

/// Match a collision pair to (sensor is first entity, ball id).
fn ball_sensor_pair(
    a_sensor: bool,
    b_sensor: bool,
    a_ball: Option<BallId>,
    b_ball: Option<BallId>,
) -> Option<(bool, BallId)> {
    match (a_sensor, b_sensor, a_ball, b_ball) {
        (true, false, None, Some(id)) => Some((true, id)),
        (false, true, Some(id), None) => Some((false, id)),
        _ => None,
    }
}

fn tick_system(
    mut rules: ResMut<GoalLoopRes>,
    mut rng: ResMut<SessionRng>,
    time: Res<Time<Fixed>>,
    mut writers: EffectWriters,
) {
    let effects = rules.game.tick(time.elapsed_secs_f64(), &mut rng.0);
    if effects.is_empty() {
        return;
    }
    let score = rules.game.score();
    writers.dispatch(effects, score);
}

fn restart_system(
    mut rules: ResMut<GoalLoopRes>,
    mut restart: MessageReader<RestartMessage>,
    time: Res<Time<Fixed>>,
    mut writers: EffectWriters,
) {
    if restart.read().count() == 0 {
        return;
    }
    if !rules.game.is_game_over() {
        debug!("Restart ignored while the game is running");
        return;
    }
    let effects = rules.game.restart(time.elapsed_secs_f64());
    let score = rules.game.score();
    writers.dispatch(effects, score);
}
