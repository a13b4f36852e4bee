//! Level generation
//!
//! Each level has a hand-authored wall layout and hazard set. Collectible
//! placement draws from the session RNG, so a level is reproducible from the
//! RNG state it was generated with.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Collectible, CollectibleKind, GoalZone, LevelState, MovingHazard, TileGrid, Wall,
};
use crate::consts::FALLING_TILE_LEVEL;

/// Goal half extents (same every level)
pub const GOAL_HALF_EXTENT: f32 = 150.0;
/// Collectibles float above the floor
const COLLECTIBLE_Z: f32 = 20.0;
/// Collectibles are scattered within this square
const COLLECTIBLE_SPREAD: i32 = 500;

/// Build the level with the given 1-based index. Levels past 3 reuse the
/// level-3 layout.
pub fn generate(level: u32, rng: &mut impl Rng) -> LevelState {
    let (walls, collectible_count, coin_ratio, hazards) = match level {
        0 | 1 => (level_one_walls(), 8, 1.0, Vec::new()),
        2 => (level_two_walls(), 10, 0.7, level_two_hazards()),
        _ => (level_three_walls(), 12, 0.6, level_three_hazards()),
    };

    let collectibles = (0..collectible_count)
        .map(|_| {
            let x = rng.random_range(-COLLECTIBLE_SPREAD..=COLLECTIBLE_SPREAD) as f32;
            let y = rng.random_range(-COLLECTIBLE_SPREAD..=COLLECTIBLE_SPREAD) as f32;
            let kind = if coin_ratio >= 1.0 || rng.random::<f32>() < coin_ratio {
                CollectibleKind::Coin
            } else {
                CollectibleKind::Health
            };
            Collectible {
                pos: Vec2::new(x, y).extend(COLLECTIBLE_Z),
                kind,
                active: true,
            }
        })
        .collect();

    let tiles = (level >= FALLING_TILE_LEVEL).then(TileGrid::default);

    let goal = GoalZone {
        center: goal_center(level),
        half_extents: Vec2::splat(GOAL_HALF_EXTENT),
    };

    log::info!(
        "Level {}: {} walls, {} collectibles, {} hazards, falling tiles: {}",
        level,
        walls.len(),
        collectible_count,
        hazards.len(),
        tiles.is_some()
    );

    LevelState {
        index: level,
        walls,
        collectibles,
        hazards,
        tiles,
        goal,
    }
}

/// Goal center recedes toward the spawn side as levels advance
pub fn goal_center(level: u32) -> Vec2 {
    match level {
        0 | 1 => Vec2::new(0.0, -550.0),
        2 => Vec2::new(0.0, -450.0),
        _ => Vec2::new(0.0, -350.0),
    }
}

fn level_one_walls() -> Vec<Wall> {
    // Simple corridors
    vec![
        Wall::new(-600.0, 400.0, -250.0, 400.0),
        Wall::new(0.0, 400.0, 600.0, 400.0),
        Wall::new(-400.0, 400.0, -400.0, 150.0),
        Wall::new(-400.0, 0.0, -400.0, -300.0),
        Wall::new(-600.0, 0.0, 0.0, 0.0),
        Wall::new(200.0, 0.0, 600.0, 0.0),
        Wall::new(200.0, 0.0, 200.0, -150.0),
        Wall::new(200.0, -100.0, 200.0, -400.0),
        Wall::new(-600.0, -300.0, -200.0, -300.0),
        Wall::new(0.0, -300.0, 600.0, -300.0),
    ]
}

fn level_two_walls() -> Vec<Wall> {
    vec![
        Wall::new(-600.0, 400.0, -200.0, 400.0),
        Wall::new(-100.0, 400.0, 600.0, 400.0),
        Wall::new(-100.0, 400.0, -100.0, 300.0),
        Wall::new(-100.0, 200.0, -100.0, -300.0),
        Wall::new(-600.0, 200.0, -50.0, 200.0),
        Wall::new(100.0, 200.0, 600.0, 200.0),
        Wall::new(200.0, 200.0, 200.0, 0.0),
        Wall::new(200.0, -100.0, 200.0, -300.0),
        Wall::new(-400.0, 0.0, -100.0, 0.0),
        Wall::new(0.0, 0.0, 200.0, 0.0),
        Wall::new(-400.0, 0.0, -400.0, -200.0),
        Wall::new(-400.0, -300.0, -400.0, -600.0),
        Wall::new(-400.0, -300.0, 0.0, -300.0),
        Wall::new(100.0, -300.0, 600.0, -300.0),
    ]
}

fn level_three_walls() -> Vec<Wall> {
    vec![
        // Enclosure: the way to the goal is over the top
        Wall::new(-600.0, 400.0, 600.0, 400.0),
        Wall::new(-600.0, -400.0, 600.0, -400.0),
        Wall::new(-600.0, -400.0, -600.0, 400.0),
        Wall::new(600.0, -400.0, 600.0, 400.0),
        // Inner walls
        Wall::new(-200.0, 200.0, 200.0, 200.0),
        Wall::new(-200.0, -200.0, 200.0, -200.0),
    ]
}

fn level_two_hazards() -> Vec<MovingHazard> {
    vec![
        MovingHazard::new(Vec2::new(-300.0, 100.0), Vec2::new(-100.0, 100.0), 25.0, 30.0, 1.6),
        MovingHazard::new(Vec2::new(200.0, -100.0), Vec2::new(200.0, -300.0), 25.0, 30.0, 1.0),
    ]
}

fn level_three_hazards() -> Vec<MovingHazard> {
    vec![MovingHazard::new(Vec2::new(-200.0, 0.0), Vec2::new(200.0, 0.0), 40.0, 40.0, 2.4)]
}
