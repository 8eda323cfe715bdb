use bevy::prelude::*;

use crate::constants::color_from_hex;
use crate::game::core::MainCamera;
use crate::game::rules::{GoalLoopRes, ScoreboardMessage};

use super::types::{
    status_line, BoardHeadlineText, BoardScoreText, HudHeadlineText, HudScoreText, HudStatusText,
    ScoreboardPanel, ScoreboardState,
};

type HeadlineQuery<'w, 's> =
    Query<'w, 's, (&'static mut Text, &'static mut TextColor), With<HudHeadlineText>>;
type ScoreQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Text, &'static mut TextColor),
    (With<HudScoreText>, Without<HudHeadlineText>),
>;

type BoardHeadlineQuery<'w, 's> =
    Query<'w, 's, (&'static mut Text2d, &'static mut TextColor), With<BoardHeadlineText>>;
type BoardScoreQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Text2d, &'static mut TextColor),
    (With<BoardScoreText>, Without<BoardHeadlineText>),
>;

pub(super) fn apply_scoreboard_messages(
    mut reader: MessageReader<ScoreboardMessage>,
    mut state: ResMut<ScoreboardState>,
) {
    // Only the newest board matters
    if let Some(msg) = reader.read().last() {
        info!("Scoreboard: {}", msg.0);
        state.board = msg.0.clone();
    }
}

pub(super) fn update_scoreboard_text(
    state: Res<ScoreboardState>,
    mut q_headline: HeadlineQuery,
    mut q_score: ScoreQuery,
) {
    if !state.is_changed() {
        return;
    }
    let board = &state.board;
    for (mut text, mut color) in &mut q_headline {
        text.0.clone_from(&board.headline);
        color.0 = color_from_hex(board.headline_color);
    }
    for (mut text, mut color) in &mut q_score {
        text.0.clone_from(&board.score_line);
        color.0 = color_from_hex(board.score_color);
    }
}

pub(super) fn update_status_text(
    rules: Res<GoalLoopRes>,
    time: Res<Time<Fixed>>,
    mut q_status: Query<&mut Text, With<HudStatusText>>,
) {
    let line = status_line(
        rules.game.phase(),
        rules.game.respawn_due_at(),
        time.elapsed_secs_f64(),
    );
    for mut text in &mut q_status {
        if text.0 != line {
            text.0.clone_from(&line);
        }
    }
}

pub(super) fn update_board_text(
    state: Res<ScoreboardState>,
    mut q_headline: BoardHeadlineQuery,
    mut q_score: BoardScoreQuery,
) {
    if !state.is_changed() {
        return;
    }
    let board = &state.board;
    for (mut text, mut color) in &mut q_headline {
        text.0.clone_from(&board.headline);
        color.0 = color_from_hex(board.headline_color);
    }
    for (mut text, mut color) in &mut q_score {
        text.0.clone_from(&board.score_line);
        color.0 = color_from_hex(board.score_color);
    }
}

/// Keep the panel facing the viewer.
pub(super) fn face_camera(
    q_camera: Query<&GlobalTransform, With<MainCamera>>,
    mut q_panel: Query<&mut Transform, With<ScoreboardPanel>>,
) {
    let Ok(camera) = q_camera.single() else {
        return;
    };
    let eye = camera.translation();
    for mut transform in &mut q_panel {
        let target = Vec3::new(eye.x, transform.translation.y, eye.z);
        if target.distance_squared(transform.translation) > f32::EPSILON {
            // A Rectangle faces +Z, so aim +Z at the camera
            let away = 2.0 * transform.translation - target;
            transform.look_at(away, Vec3::Y);
        }
    }
}
