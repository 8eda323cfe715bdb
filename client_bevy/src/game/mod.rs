mod audio;
mod ball;
mod core;
mod field;
mod hud;
mod input;
mod rules;
mod stick;

pub use audio::AudioPlugin;
pub use ball::BallPlugin;
pub use core::CorePlugin;
pub(crate) use core::{FixedSet, UpdateSet};
pub use field::FieldPlugin;
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use rules::RulesPlugin;
pub use stick::StickPlugin;
