use crate::config::{Pacing, SimConfig};
use crate::state::{MatchSummary, SimState};
use goalie_shared::goal_loop::GameEffect;
use goalie_shared::protocol::GameSnapshot;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Commands from outside (signal handler, tests) to the match loop
#[derive(Debug)]
pub enum SimCommand {
    Restart,
    Stop,
}

/// Broadcasts from the match loop to observers
#[derive(Debug, Clone)]
pub enum SimBroadcast {
    Snapshot(GameSnapshot),
    Goal { score: u32 },
    GameOver { score: u32 },
    Finished(MatchSummary),
}

/// Run a match until game over, the session time limit, or a `Stop` command.
/// Owns all simulation state. Fails without ticking if `config` is invalid.
pub async fn run_match(
    mut cmd_rx: mpsc::Receiver<SimCommand>,
    broadcast_tx: broadcast::Sender<SimBroadcast>,
    config: SimConfig,
) -> Result<MatchSummary, String> {
    config.validate()?;
    let dt = config.tick_dt();
    let broadcast_every_n = (config.tick_rate_hz / config.broadcast_rate_hz).max(1) as u64;
    let pacing = config.pacing;
    let mut state = SimState::new(config);
    let mut tick_count: u64 = 0;

    let mut tick_interval = tokio::time::interval(Duration::from_secs_f64(dt));
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("Match started ({:?} pacing)", pacing);

    'ticks: loop {
        match pacing {
            Pacing::RealTime => {
                tokio::select! {
                    _ = tick_interval.tick() => {}
                    Some(cmd) = cmd_rx.recv() => {
                        if handle_command(cmd, &mut state) {
                            break 'ticks;
                        }
                        continue 'ticks;
                    }
                }
            }
            Pacing::AsFastAsPossible => {
                while let Ok(cmd) = cmd_rx.try_recv() {
                    if handle_command(cmd, &mut state) {
                        break 'ticks;
                    }
                }
                tokio::task::yield_now().await;
            }
        }

        for effect in state.step(dt) {
            match effect {
                GameEffect::PlayGoalSound => {
                    let _ = broadcast_tx.send(SimBroadcast::Goal {
                        score: state.game.score(),
                    });
                }
                GameEffect::GameOver { score } => {
                    let _ = broadcast_tx.send(SimBroadcast::GameOver { score });
                }
                _ => {}
            }
        }

        tick_count += 1;
        if tick_count % broadcast_every_n == 0 {
            let _ = broadcast_tx.send(SimBroadcast::Snapshot(state.snapshot()));
        }

        if state.is_finished() {
            break;
        }
    }

    let summary = state.summary();
    let _ = broadcast_tx.send(SimBroadcast::Finished(summary.clone()));
    tracing::info!("Match ended");
    Ok(summary)
}

/// Returns true if the loop should stop.
fn handle_command(cmd: SimCommand, state: &mut SimState) -> bool {
    match cmd {
        SimCommand::Restart => {
            state.restart();
            false
        }
        SimCommand::Stop => {
            tracing::info!("Stop requested");
            true
        }
    }
}
