//! Camera modes exposed to the renderer
//!
//! The camera is presentation state, but its toggles and pans come in through
//! the same input surface as gameplay actions, so the session owns it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::PLAYER_HEIGHT;
use crate::facing_vector;

/// Default vertical field of view (degrees)
pub const DEFAULT_FOV: f32 = 120.0;
/// Free-camera start position
pub const DEFAULT_CAMERA_POS: Vec3 = Vec3::new(0.0, 500.0, 500.0);
/// Third-person follow offsets
const FOLLOW_DISTANCE: f32 = 250.0;
const FOLLOW_HEIGHT: f32 = 200.0;
/// How far ahead the first-person camera looks
const LOOK_AHEAD: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Track the player (third-person) instead of the free position
    pub follow: bool,
    /// Eye at the player's head; takes precedence over follow
    pub first_person: bool,
    /// Free camera position, moved by pans while follow is off
    pub pos: Vec3,
    pub fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            follow: true,
            first_person: false,
            pos: DEFAULT_CAMERA_POS,
            fov: DEFAULT_FOV,
        }
    }
}

/// Resolved eye/target pair for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

impl Camera {
    pub fn toggle_follow(&mut self) {
        self.follow = !self.follow;
    }

    pub fn toggle_first_person(&mut self) {
        self.first_person = !self.first_person;
    }

    /// Move the free camera. Ignored while following the player.
    pub fn pan(&mut self, delta: Vec3) {
        if !self.follow && !self.first_person {
            self.pos += delta;
        }
    }

    pub fn view(&self, player: &Player) -> CameraView {
        let facing = facing_vector(player.facing_deg).extend(0.0);
        let head = player.pos + Vec3::Z * PLAYER_HEIGHT;

        let (eye, target) = if self.first_person {
            (head, head + facing * LOOK_AHEAD)
        } else if self.follow {
            let eye = player.pos - facing * FOLLOW_DISTANCE + Vec3::Z * FOLLOW_HEIGHT;
            (eye, player.pos + Vec3::Z * (PLAYER_HEIGHT / 2.0))
        } else {
            (self.pos, Vec3::ZERO)
        };

        CameraView {
            eye,
            target,
            fov: self.fov,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_pan_only_when_free() {
        let mut camera = Camera::default();
        camera.pan(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(camera.pos, DEFAULT_CAMERA_POS);

        camera.toggle_follow();
        camera.pan(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(camera.pos.x, 10.0);
    }

    #[test]
    fn test_first_person_eye_at_head() {
        let player = Player::new(&Tuning::default());
        let mut camera = Camera::default();
        camera.toggle_first_person();

        let view = camera.view(&player);
        assert_eq!(view.eye, player.pos + Vec3::Z * PLAYER_HEIGHT);
        // Spawn faces -y
        assert!(view.target.y < view.eye.y);
    }

    #[test]
    fn test_follow_sits_behind_player() {
        let player = Player::new(&Tuning::default());
        let view = Camera::default().view(&player);
        // Behind a -y facing player means larger y
        assert!(view.eye.y > player.pos.y);
        assert!(view.eye.z > player.pos.z);
    }
}
