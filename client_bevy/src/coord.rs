use bevy::prelude::Vec3;

use goalie_shared::vec3::{vec3, Vec3 as FieldVec3};

/// Convert a game-rule vector (f64 meters) to a Bevy world vector.
pub fn field_to_world(v: FieldVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Convert a Bevy world vector to a game-rule vector.
pub fn world_to_field(v: Vec3) -> FieldVec3 {
    vec3(v.x as f64, v.y as f64, v.z as f64)
}

pub fn array_to_world(a: [f32; 3]) -> Vec3 {
    Vec3::from_array(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_world_roundtrip_is_lossless_for_f32_values() {
        let w = Vec3::new(0.5, 1.25, -10.0);
        assert_eq!(field_to_world(world_to_field(w)), w);
    }

    #[test]
    fn axes_are_not_swapped() {
        let w = field_to_world(vec3(1.0, 2.0, 3.0));
        assert_eq!(w, Vec3::new(1.0, 2.0, 3.0));
    }
}
