//! Simulation core
//!
//! All gameplay logic lives here:
//! - Delta-time driven, single-threaded
//! - Seeded RNG only (one stream owned by the session)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod combat;
pub mod hazards;
pub mod level;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;

pub use camera::{Camera, CameraView};
pub use collision::{bullet_hits_enemy, point_hits_wall, within_radius_2d, within_radius_3d};
pub use combat::{advance_bullets, advance_enemies, fire_bullet, spawn_at_edge, spawn_wave};
pub use hazards::{TileUpdate, advance_falling_tiles, advance_hazards, ping_pong};
pub use level::generate;
pub use player::{MoveOutcome, apply_damage, reset_to_spawn, rotate, start_jump, tick_jump, try_move};
pub use progression::{GoalCheck, advance_level, check_goal, collect_pickups, restart};
pub use state::{
    Bullet, Collectible, CollectibleKind, DamageReason, Enemy, FallingTile, GameOutcome,
    GamePhase, GameSession, GoalZone, Hud, JumpState, LevelState, MovingHazard, Player, Snapshot,
    TileGrid, Wall,
};
pub use tick::{TickInput, tick};
