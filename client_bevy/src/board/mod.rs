pub mod geometry;
pub mod stick_logic;
