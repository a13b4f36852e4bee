//! Game state and entity records
//!
//! Everything the frame driver mutates lives in [`GameSession`]. The renderer
//! only ever sees it through [`GameSession::snapshot`].

use glam::{IVec2, Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{Camera, CameraView};
use super::{combat, level};
use crate::Tuning;
use crate::consts::*;

/// Session-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A goal was just reached and the next level is loaded.
    /// Play continues; cleared by the next player action.
    LevelComplete,
    /// Run ended (terminal until restart)
    GameOver,
}

/// How a run ended, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Defeat,
    Victory,
}

/// Player vertical state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpState {
    Grounded,
    /// Airborne, easing horizontally toward `target`
    Jumping { target: Vec2 },
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Facing angle in degrees (XY plane, unwrapped)
    pub facing_deg: f32,
    pub speed: f32,
    pub rot_speed: f32,
    pub radius: f32,
    pub vertical_velocity: f32,
    pub jump: JumpState,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::from_array(SPAWN_POS),
            facing_deg: SPAWN_FACING_DEG,
            speed: tuning.player_speed,
            rot_speed: tuning.player_rot_speed,
            radius: tuning.player_radius,
            vertical_velocity: 0.0,
            jump: JumpState::Grounded,
        }
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.jump, JumpState::Jumping { .. })
    }

    /// Recorded landing point of the current jump
    pub fn target_tile(&self) -> Option<Vec2> {
        match self.jump {
            JumpState::Jumping { target } => Some(target),
            JumpState::Grounded => None,
        }
    }

    #[inline]
    pub fn planar(&self) -> Vec2 {
        self.pos.truncate()
    }
}

/// Wall height, for rendering
pub const WALL_HEIGHT: f32 = 50.0;

/// An axis-aligned wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub a: Vec2,
    pub b: Vec2,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            a: Vec2::new(x1, y1),
            b: Vec2::new(x2, y2),
        }
    }

    /// Bounding rectangle grown by `pad` on every side, as (min, max)
    pub fn padded_bounds(&self, pad: f32) -> (Vec2, Vec2) {
        (self.a.min(self.b) - Vec2::splat(pad), self.a.max(self.b) + Vec2::splat(pad))
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Health,
}

/// A pickup placed at level generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec3,
    pub kind: CollectibleKind,
    /// Goes false exactly once, on pickup
    pub active: bool,
}

/// A chasing enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec3,
    pub speed: f32,
    /// Populated at spawn; enemies still die to any single hit
    pub health: i32,
    /// Populated at spawn; enemies never fire
    pub cooldown: f32,
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec3,
    pub vel: Vec3,
    pub ticks_left: u32,
}

/// A block sliding back and forth along a two-point path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingHazard {
    pub pos: Vec3,
    pub size: f32,
    pub path: [Vec2; 2],
    pub speed: f32,
    /// Monotonic path parameter, mapped through a period-2 triangle wave
    pub t: f32,
}

impl MovingHazard {
    pub fn new(from: Vec2, to: Vec2, z: f32, size: f32, speed: f32) -> Self {
        Self {
            pos: from.extend(z),
            size,
            path: [from, to],
            speed,
            t: 0.0,
        }
    }
}

/// One cell of the falling floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallingTile {
    pub active: bool,
    /// Ticks the player has stood on this tile
    pub stand_ticks: u32,
}

impl Default for FallingTile {
    fn default() -> Self {
        Self {
            active: true,
            stand_ticks: 0,
        }
    }
}

/// Cells per side of the tile grid (world width / tile size)
pub const TILE_GRID_CELLS: usize = 12;
/// Offset from cell coordinate to array index (-6..=5 maps to 0..=11)
const TILE_GRID_OFFSET: i32 = (TILE_GRID_CELLS / 2) as i32;

/// Dense grid of falling tiles covering the play area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: [[FallingTile; TILE_GRID_CELLS]; TILE_GRID_CELLS],
}

impl Default for TileGrid {
    fn default() -> Self {
        Self {
            tiles: [[FallingTile::default(); TILE_GRID_CELLS]; TILE_GRID_CELLS],
        }
    }
}

impl TileGrid {
    fn index(cell: IVec2) -> Option<(usize, usize)> {
        let i = cell.x + TILE_GRID_OFFSET;
        let j = cell.y + TILE_GRID_OFFSET;
        let range = 0..TILE_GRID_CELLS as i32;
        (range.contains(&i) && range.contains(&j)).then_some((i as usize, j as usize))
    }

    /// Tile at a cell coordinate, `None` outside the grid
    pub fn get(&self, cell: IVec2) -> Option<&FallingTile> {
        Self::index(cell).map(|(i, j)| &self.tiles[i][j])
    }

    pub fn get_mut(&mut self, cell: IVec2) -> Option<&mut FallingTile> {
        Self::index(cell).map(|(i, j)| &mut self.tiles[i][j])
    }

    /// True if the cell exists and has fallen away
    pub fn is_hole(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(|t| !t.active)
    }

    /// All tiles with their cell coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &FallingTile)> {
        self.tiles.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, tile)| {
                (
                    IVec2::new(i as i32 - TILE_GRID_OFFSET, j as i32 - TILE_GRID_OFFSET),
                    tile,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut FallingTile> {
        self.tiles.iter_mut().flatten()
    }
}

/// Rectangular goal region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalZone {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl GoalZone {
    pub fn contains(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}

/// Per-level entity collections, replaced wholesale on (re)generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelState {
    pub index: u32,
    pub walls: Vec<Wall>,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<MovingHazard>,
    /// Present from level 3 onward
    pub tiles: Option<TileGrid>,
    pub goal: GoalZone,
}

/// Why the player took damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageReason {
    OutOfBounds,
    Wall,
    Hole,
    Enemy,
    Hazard,
}

/// The whole run: player, level, enemies, bullets and bookkeeping
#[derive(Debug, Clone)]
pub struct GameSession {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub level: LevelState,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub lives: u32,
    pub health: i32,
    pub score: u64,
    /// 1-based level number
    pub current_level: u32,
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
    /// Invulnerability toggle
    pub cheat_mode: bool,
    pub camera: Camera,
    /// Seconds since the last edge spawn
    pub enemy_spawn_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameSession {
    /// Create a session on level 1 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = level::generate(1, &mut rng);
        let enemies = combat::spawn_wave(1, tuning.enemy_base_speed, &mut rng);
        log::info!("Session started with seed {}", seed);

        Self {
            player: Player::new(&tuning),
            lives: tuning.start_lives,
            health: tuning.max_health,
            tuning,
            seed,
            rng,
            level,
            enemies,
            bullets: Vec::new(),
            score: 0,
            current_level: 1,
            phase: GamePhase::Playing,
            outcome: None,
            cheat_mode: false,
            camera: Camera::default(),
            enemy_spawn_timer: 0.0,
            time_ticks: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_level_complete(&self) -> bool {
        self.phase == GamePhase::LevelComplete
    }

    /// Enter the terminal state
    pub fn end_run(&mut self, outcome: GameOutcome) {
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        log::info!(
            "Game over ({:?}) on level {} with score {}",
            outcome,
            self.current_level,
            self.score
        );
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player,
            camera: self.camera.view(&self.player),
            walls: &self.level.walls,
            collectibles: &self.level.collectibles,
            hazards: &self.level.hazards,
            tiles: self.level.tiles.as_ref(),
            goal: &self.level.goal,
            enemies: &self.enemies,
            bullets: &self.bullets,
            hud: Hud {
                lives: self.lives,
                health: self.health,
                score: self.score,
                level: self.current_level,
                cheat_mode: self.cheat_mode,
            },
            phase: self.phase,
            outcome: self.outcome,
        }
    }
}

/// HUD numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub lives: u32,
    pub health: i32,
    pub score: u64,
    pub level: u32,
    pub cheat_mode: bool,
}

/// Borrowed per-frame view of everything a renderer draws
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub player: &'a Player,
    pub camera: CameraView,
    pub walls: &'a [Wall],
    pub collectibles: &'a [Collectible],
    pub hazards: &'a [MovingHazard],
    pub tiles: Option<&'a TileGrid>,
    pub goal: &'a GoalZone,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub hud: Hud,
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
}
