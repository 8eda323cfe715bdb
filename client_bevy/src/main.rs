mod board;
mod constants;
mod coord;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_rapier3d::prelude::*;

use goalie_shared::config::{DetectionMode, GameConfig};

use game::{
    AudioPlugin, BallPlugin, CorePlugin, FieldPlugin, HudPlugin, InputPlugin, RulesPlugin,
    StickPlugin,
};

/// Session settings resolved before the app starts.
struct LaunchOptions {
    config: GameConfig,
    seed: Option<u64>,
    debug_physics: bool,
}

fn main() {
    let options = match launch_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = options.config.validate() {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    }
    let seed = options.seed.unwrap_or_else(rand::random::<u64>);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Goalie XR".to_string(),
            resolution: WindowResolution::new(1280, 720),
            present_mode: PresentMode::AutoVsync,
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());

    if options.debug_physics {
        app.add_plugins(RapierDebugRenderPlugin::default());
    }

    info!(
        "Session seed {}, {} detection",
        seed, options.config.detection
    );

    app.add_plugins(CorePlugin {
        config: options.config,
        seed,
    })
    .add_plugins(FieldPlugin)
    .add_plugins(StickPlugin)
    .add_plugins(BallPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(RulesPlugin)
    .add_plugins(AudioPlugin)
    .add_plugins(HudPlugin)
    .run();
}

#[cfg(not(target_arch = "wasm32"))]
fn launch_options() -> Result<LaunchOptions, String> {
    let mut config = match std::env::var("GOALIE_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            GameConfig::from_json_str(&json)?
        }
        Err(_) => GameConfig::default(),
    };
    if let Ok(mode) = std::env::var("GOALIE_DETECTION") {
        config.detection = mode.parse::<DetectionMode>()?;
    }
    let seed = match std::env::var("GOALIE_SEED") {
        Ok(s) => Some(
            s.trim()
                .parse::<u64>()
                .map_err(|e| format!("GOALIE_SEED: {e}"))?,
        ),
        Err(_) => None,
    };
    Ok(LaunchOptions {
        config,
        seed,
        debug_physics: std::env::var("GOALIE_DEBUG_PHYSICS").is_ok(),
    })
}

#[cfg(target_arch = "wasm32")]
fn launch_options() -> Result<LaunchOptions, String> {
    let mut options = LaunchOptions {
        config: GameConfig::default(),
        seed: None,
        debug_physics: false,
    };
    let Some(window) = web_sys::window() else {
        return Ok(options);
    };
    let search = window.location().search().unwrap_or_default();
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return Ok(options);
    };

    if let Some(mode) = params.get("detection") {
        options.config.detection = mode.parse::<DetectionMode>()?;
    }
    if let Some(seed) = params.get("seed") {
        options.seed = Some(seed.parse::<u64>().map_err(|e| format!("seed: {e}"))?);
    }
    options.debug_physics = params.has("debug");
    Ok(options)
}
