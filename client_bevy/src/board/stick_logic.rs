use bevy::prelude::Vec2;

use super::geometry::StickDef;

/// Stick speed while a direction is held (m/s)
pub const STICK_SPEED: f32 = 3.0;

/// Move the stick head along its guard plane. `dir` components are in [-1, 1].
pub fn step_stick(current: Vec2, dir: Vec2, dt: f32, def: &StickDef) -> Vec2 {
    let dir = if dir.length_squared() > 1.0 {
        dir.normalize()
    } else {
        dir
    };
    (current + dir * STICK_SPEED * dt).clamp(def.min, def.max)
}

/// Direction from held keys.
pub fn input_dir(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| match (neg, pos) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    };
    Vec2::new(axis(left, right), axis(down, up))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::stick;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn idle_stick_stays_put() {
        let def = stick();
        assert_eq!(step_stick(def.start, Vec2::ZERO, DT, &def), def.start);
    }

    #[test]
    fn moves_at_stick_speed() {
        let def = stick();
        let next = step_stick(def.start, Vec2::X, DT, &def);
        assert!((next.x - def.start.x - STICK_SPEED * DT).abs() < 1e-6);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let def = stick();
        let next = step_stick(def.start, Vec2::new(1.0, 1.0), DT, &def);
        assert!(((next - def.start).length() - STICK_SPEED * DT).abs() < 1e-6);
    }

    #[test]
    fn clamped_to_limits() {
        let def = stick();
        let mut pos = def.start;
        for _ in 0..1000 {
            pos = step_stick(pos, Vec2::new(-1.0, 1.0), DT, &def);
        }
        assert_eq!(pos, Vec2::new(def.min.x, def.max.y));
    }

    #[test]
    fn opposite_keys_cancel() {
        assert_eq!(input_dir(true, true, false, false), Vec2::ZERO);
        assert_eq!(input_dir(true, false, true, false), Vec2::new(-1.0, 1.0));
    }
}
