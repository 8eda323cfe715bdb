//! Headless goalie simulator.
//!
//! Runs the shared goal-event loop against a simple ballistic model and a
//! goalie bot, without a renderer. Used for soak testing the rules and for
//! tuning timings.

pub mod config;
pub mod game_loop;
pub mod goalie;
pub mod physics;
pub mod state;
