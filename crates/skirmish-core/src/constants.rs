//! Default tuning values. `GameConfig::default()` is built from these.

// --- World ---

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Countdown at scene start (ms).
pub const ROUND_DURATION_MS: u64 = 60_000;

// --- Player ---

pub const PLAYER_SIZE: f32 = 50.0;
/// Base player speed (units/second).
pub const PLAYER_SPEED: f32 = 300.0;

// --- Enemies ---

pub const ENEMY_SIZE: f32 = 40.0;
pub const ENEMY_SPEED: f32 = 120.0;
pub const ENEMY_LIFESPAN_MS: u64 = 10_000;
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 2_500;

// --- Pickups ---

pub const PICKUP_SIZE: f32 = 30.0;
pub const PICKUP_SPEED: f32 = 80.0;
pub const PICKUP_LIFESPAN_MS: u64 = 8_000;

pub const SPEED_BOOST_MULTIPLIER: f32 = 2.0;
pub const SPEED_BOOST_DURATION_MIN_MS: u64 = 9_000;
pub const SPEED_BOOST_DURATION_MAX_MS: u64 = 15_000;
/// Percent chance (out of 100) rolled on each enemy spawn.
pub const SPEED_BOOST_SPAWN_CHANCE: u32 = 15;

pub const SLOWNESS_MULTIPLIER: f32 = 0.5;
pub const SLOWNESS_DURATION_MIN_MS: u64 = 5_000;
pub const SLOWNESS_DURATION_MAX_MS: u64 = 10_000;
pub const SLOWNESS_SPAWN_CHANCE: u32 = 30;

// --- Bullets ---

pub const BULLET_SIZE: f32 = 20.0;
pub const BULLET_SPEED: f32 = 600.0;
pub const BULLET_LIFESPAN_MS: u64 = 2_000;
/// Extra distance between the player's edge and a fresh bullet.
pub const BULLET_SPAWN_GAP: f32 = 5.0;

// --- Walls ---

/// Wall width as a fraction of window width.
pub const WALL_WIDTH_FRACTION: f32 = 0.02;
/// Wall height as a fraction of window height.
pub const WALL_HEIGHT_FRACTION: f32 = 0.6;

// --- Spawning ---

/// Placement attempts before a randomized spawn is abandoned.
pub const MAX_SPAWN_ATTEMPTS: u32 = 10;

// --- Scoring ---

pub const SCORE_BULLET_HITS_ENEMY: i32 = 5;
pub const SCORE_PLAYER_HITS_ENEMY: i32 = -3;
pub const SCORE_ENEMY_EXPIRED: i32 = -1;
