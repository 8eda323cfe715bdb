use bevy::prelude::*;

use crate::board::stick_logic::input_dir;

use super::rules::RestartMessage;
use super::UpdateSet;

pub struct InputPlugin;

#[derive(Resource, Default)]
pub(crate) struct InputState {
    /// Stick direction, unit length or zero.
    pub(crate) dir: Vec2,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_systems(Update, input_system.in_set(UpdateSet::Input));
    }
}

fn input_system(
    mut input: ResMut<InputState>,
    keys: Res<ButtonInput<KeyCode>>,
    mut restart: MessageWriter<RestartMessage>,
) {
    let held = |a: KeyCode, b: KeyCode| keys.pressed(a) || keys.pressed(b);
    input.dir = input_dir(
        held(KeyCode::ArrowLeft, KeyCode::KeyA),
        held(KeyCode::ArrowRight, KeyCode::KeyD),
        held(KeyCode::ArrowUp, KeyCode::KeyW),
        held(KeyCode::ArrowDown, KeyCode::KeyS),
    );

    if keys.just_pressed(KeyCode::KeyR) {
        restart.write(RestartMessage);
    }
}
