use goalie_sim::config::SimConfig;
use goalie_sim::game_loop::{run_match, SimBroadcast, SimCommand};
use tokio::sync::{broadcast, mpsc};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match SimConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid simulator configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Validate configuration before starting
    if let Err(e) = config.validate() {
        eprintln!("Invalid simulator configuration: {}", e);
        std::process::exit(1);
    }

    tracing::info!(
        "Simulating with seed {} ({} detection)",
        config.rng_seed,
        config.game.detection
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<SimCommand>(16);
    let (broadcast_tx, mut broadcast_rx) = broadcast::channel::<SimBroadcast>(64);

    let match_task = tokio::spawn(run_match(cmd_rx, broadcast_tx, config));

    // Ctrl-C ends the match early; the summary is still printed
    let stop_tx = cmd_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop_tx.send(SimCommand::Stop).await;
        }
    });

    loop {
        match broadcast_rx.recv().await {
            Ok(SimBroadcast::Goal { score }) => tracing::info!("GOAL! score {}", score),
            Ok(SimBroadcast::GameOver { score }) => tracing::info!("YOU LOSE ({} goals)", score),
            Ok(SimBroadcast::Snapshot(snap)) => tracing::debug!(
                "ball age {:?} score {} phase {:?}",
                snap.ball.as_ref().map(|b| b.age),
                snap.score,
                snap.phase
            ),
            Ok(SimBroadcast::Finished(_)) => break,
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("Observer lagged, skipped {} broadcasts", n)
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    let summary = match match_task.await {
        Ok(Ok(summary)) => summary,
        Ok(Err(e)) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Match task failed: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Cannot serialize summary: {}", e),
    }
}
