use bevy::prelude::*;

use goalie_shared::goal_loop::Phase;
use goalie_shared::scoreboard::Scoreboard;

pub(super) const HEADLINE_TOP: f32 = 16.0;
pub(super) const SCORE_TOP: f32 = 56.0;
pub(super) const STATUS_BOTTOM: f32 = 16.0;

pub(super) const HEADLINE_SIZE: f32 = 32.0;
pub(super) const SCORE_SIZE: f32 = 22.0;
pub(super) const STATUS_SIZE: f32 = 14.0;

pub(super) const UI_DIM: u32 = 0xdddddd;

/// Resolution of the scoreboard panel texture
pub(super) const BOARD_TEXELS_PER_METER: f32 = 128.0;

/// Render layer seen only by the scoreboard texture camera
pub(super) const BOARD_LAYER: usize = 1;

pub(super) const BOARD_HEADLINE_SIZE: f32 = 72.0;
pub(super) const BOARD_SCORE_SIZE: f32 = 56.0;

/// Last scoreboard published by the goal loop.
#[derive(Resource)]
pub(crate) struct ScoreboardState {
    pub(crate) board: Scoreboard,
}

impl Default for ScoreboardState {
    fn default() -> Self {
        Self {
            board: Scoreboard::render(0, false),
        }
    }
}

#[derive(Component)]
pub(super) struct HudHeadlineText;

#[derive(Component)]
pub(super) struct HudScoreText;

#[derive(Component)]
pub(super) struct HudStatusText;

/// Billboard in the world showing the match state.
#[derive(Component)]
pub(super) struct ScoreboardPanel;

#[derive(Component)]
pub(super) struct BoardHeadlineText;

#[derive(Component)]
pub(super) struct BoardScoreText;

/// Pixel size of the panel texture, same aspect as the panel.
pub(super) fn board_texture_extent(board_size: [f32; 2]) -> (u32, u32) {
    let [w, h] = board_size;
    (
        (w * BOARD_TEXELS_PER_METER).round().max(1.0) as u32,
        (h * BOARD_TEXELS_PER_METER).round().max(1.0) as u32,
    )
}

/// Bottom line of the HUD for the current phase.
pub(super) fn status_line(phase: Phase, respawn_due_at: Option<f64>, now: f64) -> String {
    match phase {
        Phase::GameOver => "Press R to restart".to_string(),
        Phase::BallInFlight => "Ball in flight".to_string(),
        Phase::NoBall => match respawn_due_at {
            Some(due) => format!("Next ball in {:.1}s", (due - now).max(0.0)),
            None => String::new(),
        },
    }
}
