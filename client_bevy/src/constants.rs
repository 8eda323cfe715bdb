/// Fixed physics step (s)
pub const PHYSICS_DT: f32 = 1.0 / 60.0;
pub const PHYSICS_SUBSTEPS: usize = 2;
pub const PHYSICS_MAX_STEPS_PER_FRAME: u32 = 8;
pub const PHYSICS_MAX_CATCHUP_SECS: f64 = PHYSICS_DT as f64 * PHYSICS_MAX_STEPS_PER_FRAME as f64;

pub const GRAVITY_Y: f32 = -9.81;

/// Field slab: 20 x 0.5 x 40 m, centered at the origin
pub const FIELD_HALF_EXTENTS: [f32; 3] = [10.0, 0.25, 20.0];
pub const FIELD_TOP: f32 = 0.25;

/// Eye point of the goalie, standing in front of the goal looking downfield
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.7, 0.6];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.0, -10.0];

/// World-space scoreboard panel, far downfield
pub const BOARD_POSITION: [f32; 3] = [0.0, 5.0, -20.0];
pub const BOARD_SIZE: [f32; 2] = [12.0, 1.5];

pub const GOAL_SOUND_PATH: &str = "audio/goal.wav";

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const SKY: u32 = 0x87ceeb;
    pub const TURF: u32 = 0x2e8b3a;
    pub const GOAL_FRAME: u32 = 0xff7a00;
    pub const STICK: u32 = 0xf0f0f0;
    pub const BALL: u32 = 0x32cd32;
    pub const BOARD: u32 = 0x101018;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        // Color::srgb returns Srgba, check the components
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn goal_sound_ships_with_client() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("assets")
            .join(GOAL_SOUND_PATH);
        assert!(path.is_file(), "missing {}", path.display());
    }

    #[test]
    fn field_top_matches_half_extents() {
        assert_eq!(FIELD_TOP, FIELD_HALF_EXTENTS[1]);
    }
}
