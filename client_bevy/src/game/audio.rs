use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::GOAL_SOUND_PATH;

use super::rules::GoalScoredMessage;
use super::UpdateSet;

pub struct AudioPlugin;

#[derive(Resource)]
struct GoalSound {
    handle: Handle<AudioSource>,
    warned: bool,
}

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_goal_sound)
            .add_systems(Update, goal_sound_system.in_set(UpdateSet::Visuals));
    }
}

fn load_goal_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GoalSound {
        handle: asset_server.load(GOAL_SOUND_PATH),
        warned: false,
    });
}

fn goal_sound_system(
    mut commands: Commands,
    mut reader: MessageReader<GoalScoredMessage>,
    mut sound: ResMut<GoalSound>,
    asset_server: Res<AssetServer>,
) {
    for msg in reader.read() {
        if matches!(asset_server.load_state(&sound.handle), LoadState::Failed(_)) {
            // Scoring goes on without the cue
            if !sound.warned {
                warn!("Goal sound {} unavailable, playing silently", GOAL_SOUND_PATH);
                sound.warned = true;
            }
            continue;
        }
        debug!("Goal cue for score {}", msg.score);
        commands.spawn((
            AudioPlayer::new(sound.handle.clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
}
