//! Per-frame simulation tick
//!
//! One driver calls [`tick`] each frame with the wall-clock delta. The order
//! is fixed: input, jump, bullets, enemies, hazards, tiles, pickups, goal.

use glam::Vec3;

use super::state::GameSession;
use super::{combat, hazards, player, progression};

/// Input commands gathered for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub jump: bool,
    pub fire: bool,
    pub toggle_cheat: bool,
    pub toggle_camera_follow: bool,
    pub toggle_first_person: bool,
    pub restart: bool,
    /// Free-camera pan (ignored while following)
    pub camera_pan: Option<Vec3>,
}

/// Action entry points for the input layer
impl GameSession {
    pub fn move_forward(&mut self) -> player::MoveOutcome {
        let step = crate::facing_vector(self.player.facing_deg) * self.player.speed;
        player::try_move(self, step.x, step.y)
    }

    pub fn move_backward(&mut self) -> player::MoveOutcome {
        let step = crate::facing_vector(self.player.facing_deg) * -self.player.speed;
        player::try_move(self, step.x, step.y)
    }

    pub fn rotate_left(&mut self) {
        if !self.is_game_over() {
            let delta = self.player.rot_speed;
            player::rotate(&mut self.player, delta);
        }
    }

    pub fn rotate_right(&mut self) {
        if !self.is_game_over() {
            let delta = -self.player.rot_speed;
            player::rotate(&mut self.player, delta);
        }
    }

    pub fn jump(&mut self) -> bool {
        !self.is_game_over() && player::start_jump(&mut self.player, &self.tuning)
    }

    pub fn fire(&mut self) -> bool {
        combat::fire_bullet(self)
    }

    pub fn toggle_cheat(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.cheat_mode = !self.cheat_mode;
        log::info!("Cheat mode: {}", self.cheat_mode);
    }

    pub fn toggle_camera_follow(&mut self) {
        self.camera.toggle_follow();
    }

    pub fn toggle_first_person(&mut self) {
        self.camera.toggle_first_person();
    }

    pub fn pan_camera(&mut self, delta: Vec3) {
        self.camera.pan(delta);
    }

    pub fn restart(&mut self) {
        progression::restart(self);
    }
}

/// Apply queued input actions in a fixed order
fn apply_input(session: &mut GameSession, input: &TickInput) {
    if input.restart {
        session.restart();
    }
    if input.toggle_cheat {
        session.toggle_cheat();
    }
    if input.toggle_camera_follow {
        session.toggle_camera_follow();
    }
    if input.toggle_first_person {
        session.toggle_first_person();
    }
    if let Some(delta) = input.camera_pan {
        session.pan_camera(delta);
    }
    if input.rotate_left {
        session.rotate_left();
    }
    if input.rotate_right {
        session.rotate_right();
    }
    if input.move_forward {
        session.move_forward();
    }
    if input.move_backward {
        session.move_backward();
    }
    if input.jump {
        session.jump();
    }
    if input.fire {
        session.fire();
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    apply_input(session, input);

    if session.is_game_over() {
        return;
    }
    session.time_ticks += 1;

    player::tick_jump(&mut session.player, &session.tuning, dt);
    combat::advance_bullets(session, dt);
    combat::advance_enemies(session, dt);
    combat::tick_edge_spawner(session, dt);
    if session.is_game_over() {
        return;
    }

    hazards::advance_hazards(session, dt);
    if session.is_game_over() {
        return;
    }

    hazards::advance_falling_tiles(session);
    progression::collect_pickups(session);
    progression::check_goal(session);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameOutcome, GamePhase};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_forward_input_moves_player() {
        let mut session = GameSession::new(423);
        session.enemies.clear();
        let input = TickInput {
            move_forward: true,
            ..Default::default()
        };
        tick(&mut session, &input, DT);
        assert!((session.player.pos.y - 552.0).abs() < 1e-3);
        assert_eq!(session.time_ticks, 1);
    }

    #[test]
    fn test_rotate_then_backward() {
        let mut session = GameSession::new(423);
        session.enemies.clear();
        session.rotate_left();
        assert_eq!(session.player.facing_deg, -78.0);
        session.rotate_right();
        session.rotate_right();
        assert_eq!(session.player.facing_deg, -102.0);
        session.player.facing_deg = -90.0;
        session.move_forward();
        session.move_backward();
        assert!((session.player.pos.y - 570.0).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_freezes_until_restart() {
        let mut session = GameSession::new(423);
        session.lives = 1;
        session.health = 20;
        // Walk into the wall
        session.player.pos.y = 420.0;
        let forward = TickInput {
            move_forward: true,
            ..Default::default()
        };
        tick(&mut session, &forward, DT);
        assert!(session.is_game_over());
        assert_eq!(session.outcome, Some(GameOutcome::Defeat));

        let frozen = session.player.pos;
        let ticks = session.time_ticks;
        for _ in 0..10 {
            tick(&mut session, &forward, DT);
        }
        assert_eq!(session.player.pos, frozen);
        assert_eq!(session.time_ticks, ticks);
        assert!(!session.jump());
        assert!(!session.fire());
        session.toggle_cheat();
        assert!(!session.cheat_mode);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.lives, 5);
    }

    #[test]
    fn test_jump_over_tick_sequence() {
        let mut session = GameSession::new(423);
        session.enemies.clear();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &jump, DT);
        assert!(session.player.is_jumping());
        assert!(session.player.pos.z > 0.0);

        let idle = TickInput::default();
        for _ in 0..1000 {
            tick(&mut session, &idle, DT);
            if !session.player.is_jumping() {
                break;
            }
        }
        assert!(!session.player.is_jumping());
        assert!((session.player.pos.y - 470.0).abs() < 0.01);
    }

    #[test]
    fn test_jump_off_north_edge_stays_in_world() {
        let mut session = GameSession::new(423);
        session.enemies.clear();
        session.player.facing_deg = 90.0;
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &jump, DT);
        let idle = TickInput::default();
        for _ in 0..1000 {
            if !session.player.is_jumping() {
                break;
            }
            tick(&mut session, &idle, DT);
        }
        assert!(!session.player.is_jumping());
        let pos = session.player.pos;
        assert!(session.tuning.in_world(pos.x, pos.y), "{:?}", pos);
        assert_eq!(session.health, 100);
    }

    #[test]
    fn test_toggles() {
        let mut session = GameSession::new(423);
        let input = TickInput {
            toggle_cheat: true,
            toggle_camera_follow: true,
            camera_pan: Some(Vec3::new(5.0, 0.0, 0.0)),
            ..Default::default()
        };
        tick(&mut session, &input, DT);
        assert!(session.cheat_mode);
        assert!(!session.camera.follow);
        assert_eq!(session.camera.pos.x, 5.0);

        let fp = TickInput {
            toggle_first_person: true,
            ..Default::default()
        };
        tick(&mut session, &fp, DT);
        assert!(session.camera.first_person);
    }

    #[test]
    fn test_fire_input_shoots_enemy_ahead() {
        let mut session = GameSession::new(423);
        session.enemies = vec![crate::sim::state::Enemy {
            pos: Vec3::new(0.0, 480.0, 0.0),
            speed: 0.0,
            health: 60,
            cooldown: 0.0,
        }];
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut session, &fire, DT);
        let idle = TickInput::default();
        for _ in 0..5 {
            tick(&mut session, &idle, DT);
        }
        assert!(session.enemies.is_empty());
        assert_eq!(session.score, 15);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        let inputs = [
            TickInput {
                move_forward: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                rotate_left: true,
                ..Default::default()
            },
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..600 {
            for input in &inputs {
                tick(&mut a, input, DT);
                tick(&mut b, input, DT);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.score, b.score);
        assert_eq!(a.health, b.health);
    }
}
