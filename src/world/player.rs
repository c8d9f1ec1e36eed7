//! Player state and the per-frame movement policy.

use bitflags::bitflags;
use glam::{Vec2, vec2};

bitflags! {
    /// Discrete input flags sampled once per frame by the front-end.
    ///
    /// Flags are independent and combinable: turning and walking in the
    /// same frame is allowed, opposing flags cancel out.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const FORWARD    = 0b0001;
        const BACK       = 0b0010;
        const TURN_LEFT  = 0b0100;
        const TURN_RIGHT = 0b1000;
    }
}

/// Movement tunables, in grid units and degrees **per frame**.
#[derive(Clone, Copy, Debug)]
pub struct MoveTuning {
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for MoveTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            turn_speed: 2.0,
        }
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_deg(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

/// Player view-point in grid-unit space.
///
/// Heading is degrees, `0 = +x`, growing towards `+y` (down on the
/// minimap, matching screen coordinates).  The direction vector is kept in
/// lock-step with the heading; nothing else writes it.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pos: Vec2,
    heading: f32, // degrees, always in [0, 360)
    dir: Vec2,    // unit vector, (cos, sin) of heading
}

impl Player {
    pub fn new(pos: Vec2, heading_deg: f32) -> Self {
        let mut p = Self {
            pos,
            heading: 0.0,
            dir: Vec2::X,
        };
        p.set_heading(heading_deg);
        p
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Unit vector pointing where the player looks.
    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    /// Set the heading (degrees) and recompute the direction vector.
    pub fn set_heading(&mut self, deg: f32) {
        self.heading = wrap_deg(deg);
        let (s, c) = self.heading.to_radians().sin_cos();
        self.dir = vec2(c, s);
    }

    /// Apply one frame of input.
    ///
    /// Rotation runs before translation, so a combined turn+move frame
    /// already travels along the new heading.
    pub fn apply_input(&mut self, buttons: Buttons, tuning: &MoveTuning) {
        if buttons.contains(Buttons::TURN_LEFT) {
            self.set_heading(self.heading - tuning.turn_speed);
        }
        if buttons.contains(Buttons::TURN_RIGHT) {
            self.set_heading(self.heading + tuning.turn_speed);
        }
        if buttons.contains(Buttons::FORWARD) {
            self.pos += self.dir * tuning.move_speed;
        }
        if buttons.contains(Buttons::BACK) {
            self.pos -= self.dir * tuning.move_speed;
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> MoveTuning {
        MoveTuning {
            move_speed: 2.0,
            turn_speed: 2.0,
        }
    }

    #[test]
    fn direction_tracks_heading() {
        let p = Player::new(Vec2::ZERO, 90.0);
        assert!((p.dir() - vec2(0.0, 1.0)).length() < 1e-6);
        assert!((p.dir().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn full_rotation_is_identity() {
        let t = tuning();
        let mut p = Player::new(Vec2::ZERO, 0.0);
        let before = p.dir();
        for _ in 0..(360.0 / t.turn_speed) as usize {
            p.apply_input(Buttons::TURN_LEFT, &t);
        }
        assert!(wrap_deg(p.heading()).min(360.0 - wrap_deg(p.heading())) < 1e-3);
        assert!((p.dir() - before).length() < 1e-4);
    }

    #[test]
    fn turning_left_decrements_heading() {
        let t = tuning();
        let mut p = Player::new(Vec2::ZERO, 0.0);
        for _ in 0..5 {
            p.apply_input(Buttons::TURN_LEFT, &t);
        }
        assert!((p.heading() - 350.0).abs() < 1e-4);
    }

    #[test]
    fn forward_then_back_returns_home() {
        let t = tuning();
        let mut p = Player::new(vec2(100.0, 100.0), 123.0);
        for _ in 0..10 {
            p.apply_input(Buttons::FORWARD, &t);
        }
        for _ in 0..10 {
            p.apply_input(Buttons::BACK, &t);
        }
        assert!((p.pos() - vec2(100.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn opposing_flags_cancel() {
        let t = tuning();
        let mut p = Player::new(vec2(5.0, 5.0), 45.0);
        p.apply_input(Buttons::FORWARD | Buttons::BACK, &t);
        assert!((p.pos() - vec2(5.0, 5.0)).length() < 1e-6);
    }

    #[test]
    fn rotation_applies_before_translation() {
        let t = tuning();
        let mut p = Player::new(Vec2::ZERO, 0.0);
        p.apply_input(Buttons::TURN_RIGHT | Buttons::FORWARD, &t);
        // the step must follow the post-turn heading, not the old one
        let (s, c) = (t.turn_speed).to_radians().sin_cos();
        let expected = vec2(c, s) * t.move_speed;
        assert!((p.pos() - expected).length() < 1e-5);
        assert!(p.pos().y > 0.0);
    }
}
