use bevy::camera::visibility::RenderLayers;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

use crate::constants::{color_from_hex, Colors, BOARD_POSITION, BOARD_SIZE};
use crate::coord::array_to_world;

use super::types::{
    board_texture_extent, BoardHeadlineText, BoardScoreText, HudHeadlineText, HudScoreText,
    HudStatusText, ScoreboardPanel, ScoreboardState, BOARD_HEADLINE_SIZE, BOARD_LAYER,
    BOARD_SCORE_SIZE, HEADLINE_SIZE, HEADLINE_TOP, SCORE_SIZE, SCORE_TOP, STATUS_BOTTOM,
    STATUS_SIZE, UI_DIM,
};

pub(super) fn spawn_hud(mut commands: Commands, state: Res<ScoreboardState>) {
    let board = &state.board;

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HEADLINE_TOP),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Text::new(board.headline.clone()),
        TextFont::from_font_size(HEADLINE_SIZE),
        TextColor(color_from_hex(board.headline_color)),
        HudHeadlineText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(SCORE_TOP),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        Text::new(board.score_line.clone()),
        TextFont::from_font_size(SCORE_SIZE),
        TextColor(color_from_hex(board.score_color)),
        HudScoreText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(STATUS_BOTTOM),
            ..default()
        },
        Text::new(""),
        TextFont::from_font_size(STATUS_SIZE),
        TextColor(color_from_hex(UI_DIM)),
        HudStatusText,
    ));
}

/// World-space board. Its text is drawn by a 2D camera into a texture on the panel.
pub(super) fn spawn_scoreboard_panel(
    mut commands: Commands,
    state: Res<ScoreboardState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let (tw, th) = board_texture_extent(BOARD_SIZE);
    let texture = images.add(Image::new_target_texture(
        tw,
        th,
        TextureFormat::Rgba8UnormSrgb,
    ));
    let layer = RenderLayers::layer(BOARD_LAYER);

    commands.spawn((
        Camera2d,
        Camera {
            order: -1,
            target: RenderTarget::Image(texture.clone().into()),
            clear_color: ClearColorConfig::Custom(color_from_hex(Colors::BOARD)),
            ..default()
        },
        layer.clone(),
    ));

    let board = &state.board;
    let line_offset = th as f32 * 0.22;
    commands.spawn((
        Text2d::new(board.headline.clone()),
        TextFont::from_font_size(BOARD_HEADLINE_SIZE),
        TextColor(color_from_hex(board.headline_color)),
        Transform::from_xyz(0.0, line_offset, 0.0),
        layer.clone(),
        BoardHeadlineText,
    ));
    commands.spawn((
        Text2d::new(board.score_line.clone()),
        TextFont::from_font_size(BOARD_SCORE_SIZE),
        TextColor(color_from_hex(board.score_color)),
        Transform::from_xyz(0.0, -line_offset, 0.0),
        layer,
        BoardScoreText,
    ));

    let [w, h] = BOARD_SIZE;
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(w, h))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            base_color_texture: Some(texture),
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_translation(array_to_world(BOARD_POSITION)),
        ScoreboardPanel,
    ));
}
