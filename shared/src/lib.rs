//! Game rules shared by the Bevy client and the headless simulator.
//!
//! Nothing in here depends on an engine: positions come in, effects come out.

pub mod config;
pub mod goal_loop;
pub mod launch;
pub mod protocol;
pub mod scoreboard;
pub mod timer;
pub mod vec3;
