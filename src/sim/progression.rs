//! Pickups, goal detection, level advance and restart

use super::state::{CollectibleKind, GameOutcome, GamePhase, GameSession, Player};
use super::{combat, level, player};
use crate::consts::*;
use crate::{clamp_health, distance_2d};

/// Result of a goal check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCheck {
    /// Player is not in the goal (or the run is over)
    NotReached,
    /// Moved on to the given level
    Advanced(u32),
    /// Final goal reached; run ended in victory
    Victory,
}

/// Pick up every active collectible within reach. Returns the number taken.
pub fn collect_pickups(session: &mut GameSession) -> usize {
    if session.is_game_over() {
        return 0;
    }
    let here = session.player.planar();
    let reach = session.player.radius + PICKUP_MARGIN;
    let GameSession {
        level,
        score,
        health,
        tuning,
        ..
    } = session;

    let mut taken = 0;
    for item in level.collectibles.iter_mut().filter(|c| c.active) {
        if distance_2d(item.pos.truncate(), here) >= reach {
            continue;
        }
        item.active = false;
        taken += 1;
        match item.kind {
            CollectibleKind::Coin => *score += COIN_SCORE,
            CollectibleKind::Health => {
                *health = clamp_health(*health + HEALTH_PICKUP, tuning.max_health)
            }
        }
        log::debug!("Picked up {:?} at ({:.0}, {:.0})", item.kind, item.pos.x, item.pos.y);
    }
    taken
}

/// Advance the level (or finish the run) if the player stands in the goal
pub fn check_goal(session: &mut GameSession) -> GoalCheck {
    if session.is_game_over() || !session.level.goal.contains(session.player.planar()) {
        return GoalCheck::NotReached;
    }

    if session.current_level < MAX_LEVELS {
        advance_level(session);
        GoalCheck::Advanced(session.current_level)
    } else {
        session.end_run(GameOutcome::Victory);
        GoalCheck::Victory
    }
}

/// Load the next level. Score, lives and health carry over.
pub fn advance_level(session: &mut GameSession) {
    session.current_level += 1;
    let next = session.current_level;
    log::info!("Level complete! Advancing to level {}", next);

    session.level = level::generate(next, &mut session.rng);
    session.enemies = combat::spawn_wave(next, session.tuning.enemy_base_speed, &mut session.rng);
    session.bullets.clear();
    session.enemy_spawn_timer = 0.0;
    player::reset_to_spawn(&mut session.player);
    session.phase = GamePhase::LevelComplete;
}

/// Start a fresh run on level 1. The only way out of game over.
pub fn restart(session: &mut GameSession) {
    let tuning = session.tuning.clone();

    session.player = Player::new(&tuning);
    session.level = level::generate(1, &mut session.rng);
    session.enemies = combat::spawn_wave(1, tuning.enemy_base_speed, &mut session.rng);
    session.bullets.clear();
    session.lives = tuning.start_lives;
    session.health = tuning.max_health;
    session.score = 0;
    session.current_level = 1;
    session.phase = GamePhase::Playing;
    session.outcome = None;
    session.cheat_mode = false;
    session.enemy_spawn_timer = 0.0;
    session.time_ticks = 0;

    log::info!("Game restarted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::{MoveOutcome, try_move};
    use crate::sim::state::Collectible;
    use glam::{Vec2, Vec3};

    fn place_player(session: &mut GameSession, x: f32, y: f32) {
        session.player.pos = Vec3::new(x, y, 0.0);
    }

    #[test]
    fn test_goal_advances_level_and_keeps_stats() {
        let mut session = GameSession::new(423);
        session.score = 45;
        session.health = 60;
        session.lives = 3;
        let old_walls = session.level.walls.clone();

        place_player(&mut session, 0.0, -550.0);
        assert_eq!(check_goal(&mut session), GoalCheck::Advanced(2));

        assert_eq!(session.current_level, 2);
        assert!(session.is_level_complete());
        assert_ne!(session.level.walls, old_walls);
        assert_eq!(session.level.collectibles.len(), 10);
        assert_eq!(session.enemies.len(), 3);
        assert_eq!(session.score, 45);
        assert_eq!(session.health, 60);
        assert_eq!(session.lives, 3);
        assert_eq!(session.player.pos, Vec3::from_array(SPAWN_POS));
    }

    #[test]
    fn test_level_complete_clears_on_next_move() {
        let mut session = GameSession::new(423);
        place_player(&mut session, 0.0, -550.0);
        check_goal(&mut session);
        assert!(session.is_level_complete());
        assert_eq!(try_move(&mut session, 0.0, -18.0), MoveOutcome::Moved);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_outside_goal_is_noop() {
        let mut session = GameSession::new(423);
        assert_eq!(check_goal(&mut session), GoalCheck::NotReached);
        assert_eq!(session.current_level, 1);
    }

    #[test]
    fn test_final_goal_is_victory() {
        let mut session = GameSession::new(423);
        session.current_level = 3;
        session.level = level::generate(3, &mut session.rng);
        place_player(&mut session, 0.0, -350.0);

        assert_eq!(check_goal(&mut session), GoalCheck::Victory);
        assert!(session.is_game_over());
        assert_eq!(session.outcome, Some(GameOutcome::Victory));
        // Terminal: further checks do nothing
        assert_eq!(check_goal(&mut session), GoalCheck::NotReached);
    }

    #[test]
    fn test_pickup_is_single_use() {
        let mut session = GameSession::new(423);
        session.level.collectibles = vec![Collectible {
            pos: Vec2::new(0.0, 560.0).extend(20.0),
            kind: CollectibleKind::Coin,
            active: true,
        }];

        assert_eq!(collect_pickups(&mut session), 1);
        assert_eq!(session.score, 10);
        assert!(!session.level.collectibles[0].active);

        assert_eq!(collect_pickups(&mut session), 0);
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_health_pickup_caps_at_max() {
        let mut session = GameSession::new(423);
        session.health = 90;
        session.level.collectibles = vec![Collectible {
            pos: Vec2::new(10.0, 570.0).extend(20.0),
            kind: CollectibleKind::Health,
            active: true,
        }];
        collect_pickups(&mut session);
        assert_eq!(session.health, 100);
    }

    #[test]
    fn test_far_pickup_stays() {
        let mut session = GameSession::new(423);
        session.level.collectibles = vec![Collectible {
            pos: Vec2::new(0.0, 535.0).extend(20.0),
            kind: CollectibleKind::Coin,
            active: true,
        }];
        assert_eq!(collect_pickups(&mut session), 0);
        assert!(session.level.collectibles[0].active);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = GameSession::new(423);
        session.score = 300;
        session.lives = 1;
        session.health = 20;
        session.cheat_mode = true;
        session.current_level = 3;
        session.level = level::generate(3, &mut session.rng);
        session.end_run(GameOutcome::Defeat);

        restart(&mut session);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.outcome, None);
        assert_eq!(session.lives, 5);
        assert_eq!(session.health, 100);
        assert_eq!(session.score, 0);
        assert_eq!(session.current_level, 1);
        assert!(!session.cheat_mode);
        assert!(session.level.tiles.is_none());
        assert_eq!(session.level.index, 1);
        assert_eq!(session.enemies.len(), 2);
        assert_eq!(try_move(&mut session, 0.0, -18.0), MoveOutcome::Moved);
    }
}
