mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::UpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<types::ScoreboardState>()
            .add_systems(Startup, (spawn::spawn_hud, spawn::spawn_scoreboard_panel))
            .add_systems(
                Update,
                (
                    systems::apply_scoreboard_messages,
                    systems::update_scoreboard_text,
                    systems::update_board_text,
                    systems::update_status_text,
                    systems::face_camera,
                )
                    .chain()
                    .in_set(UpdateSet::Visuals),
            );
    }
}
