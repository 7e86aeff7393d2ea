//! Immutable scene configuration.
//!
//! A `GameConfig` is handed to the simulation at scene construction and never
//! changes afterwards. It can be built in code (`Default` plus struct update
//! syntax) or parsed from JSON, where any missing field falls back to its
//! default.

use serde::{Deserialize, Serialize};

use crate::components::{Color, Shape};
use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Vec2;

/// Half-open millisecond range `[min_ms, max_ms)` for randomized durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DurationRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub shape: Shape,
    /// Base speed in units/second before effect multipliers.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            shape: Shape::new(PLAYER_SIZE, PLAYER_SIZE, Color::BLUE),
            speed: PLAYER_SPEED,
        }
    }
}

/// Enemies: randomized spawns that wander in straight lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub shape: Shape,
    pub lifespan_ms: u64,
    /// Speed per velocity axis in units/second.
    pub speed: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            shape: Shape::new(ENEMY_SIZE, ENEMY_SIZE, Color::RED),
            lifespan_ms: ENEMY_LIFESPAN_MS,
            speed: ENEMY_SPEED,
        }
    }
}

/// Pickups: wandering entities that grant a timed effect to the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupConfig {
    pub shape: Shape,
    pub lifespan_ms: u64,
    pub speed: f32,
    /// Player speed multiplier while the effect is active.
    pub multiplier: f32,
    pub duration: DurationRange,
    /// Percent chance (out of 100) rolled on each enemy spawn.
    pub spawn_chance: u32,
}

impl PickupConfig {
    pub fn speed_boost() -> Self {
        Self {
            shape: Shape::new(PICKUP_SIZE, PICKUP_SIZE, Color::GREEN),
            lifespan_ms: PICKUP_LIFESPAN_MS,
            speed: PICKUP_SPEED,
            multiplier: SPEED_BOOST_MULTIPLIER,
            duration: DurationRange::new(SPEED_BOOST_DURATION_MIN_MS, SPEED_BOOST_DURATION_MAX_MS),
            spawn_chance: SPEED_BOOST_SPAWN_CHANCE,
        }
    }

    pub fn slowness() -> Self {
        Self {
            shape: Shape::new(PICKUP_SIZE, PICKUP_SIZE, Color::PURPLE),
            lifespan_ms: PICKUP_LIFESPAN_MS,
            speed: PICKUP_SPEED,
            multiplier: SLOWNESS_MULTIPLIER,
            duration: DurationRange::new(SLOWNESS_DURATION_MIN_MS, SLOWNESS_DURATION_MAX_MS),
            spawn_chance: SLOWNESS_SPAWN_CHANCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub shape: Shape,
    pub lifespan_ms: u64,
    pub speed: f32,
    /// Gap between the player's edge and a freshly fired bullet.
    pub spawn_gap: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            shape: Shape::new(BULLET_SIZE, BULLET_SIZE, Color::WHITE),
            lifespan_ms: BULLET_LIFESPAN_MS,
            speed: BULLET_SPEED,
            spawn_gap: BULLET_SPAWN_GAP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    pub enabled: bool,
    pub width_fraction: f32,
    pub height_fraction: f32,
    pub color: Color,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width_fraction: WALL_WIDTH_FRACTION,
            height_fraction: WALL_HEIGHT_FRACTION,
            color: Color::WHITE,
        }
    }
}

/// Score deltas for each scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub bullet_hits_enemy: i32,
    pub player_hits_enemy: i32,
    pub enemy_expired: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bullet_hits_enemy: SCORE_BULLET_HITS_ENEMY,
            player_hits_enemy: SCORE_PLAYER_HITS_ENEMY,
            enemy_expired: SCORE_ENEMY_EXPIRED,
        }
    }
}

/// Complete configuration snapshot for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_size: Vec2,
    pub round_duration_ms: u64,
    pub enemy_spawn_interval_ms: u64,
    pub max_spawn_attempts: u32,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub speed_boost: PickupConfig,
    pub slowness: PickupConfig,
    pub bullet: BulletConfig,
    pub walls: WallConfig,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_size: Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            round_duration_ms: ROUND_DURATION_MS,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            speed_boost: PickupConfig::speed_boost(),
            slowness: PickupConfig::slowness(),
            bullet: BulletConfig::default(),
            walls: WallConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.window_size.x) || !is_positive(self.window_size.y) {
            return Err(invalid(format!(
                "window size must be positive and finite, got {}x{}",
                self.window_size.x, self.window_size.y
            )));
        }
        if self.round_duration_ms == 0 {
            return Err(invalid("round_duration_ms must be positive".into()));
        }
        if self.max_spawn_attempts == 0 {
            return Err(invalid("max_spawn_attempts must be at least 1".into()));
        }

        check_shape("player", &self.player.shape)?;
        check_speed("player", self.player.speed)?;
        check_shape("enemy", &self.enemy.shape)?;
        check_speed("enemy", self.enemy.speed)?;
        check_lifespan("enemy", self.enemy.lifespan_ms)?;
        check_shape("bullet", &self.bullet.shape)?;
        check_speed("bullet", self.bullet.speed)?;
        check_lifespan("bullet", self.bullet.lifespan_ms)?;
        if !(self.bullet.spawn_gap.is_finite() && self.bullet.spawn_gap >= 0.0) {
            return Err(invalid(format!(
                "bullet spawn gap must be finite and non-negative, got {}",
                self.bullet.spawn_gap
            )));
        }

        let walls = &self.walls;
        for fraction in [walls.width_fraction, walls.height_fraction] {
            if !(is_positive(fraction) && fraction <= 1.0) {
                return Err(invalid(format!("wall fraction {fraction} must be in (0, 1]")));
            }
        }

        for (name, pickup) in [("speed_boost", &self.speed_boost), ("slowness", &self.slowness)] {
            check_shape(name, &pickup.shape)?;
            check_speed(name, pickup.speed)?;
            check_lifespan(name, pickup.lifespan_ms)?;
            if !is_positive(pickup.multiplier) {
                return Err(invalid(format!(
                    "{name} multiplier must be positive and finite, got {}",
                    pickup.multiplier
                )));
            }
            if pickup.duration.min_ms == 0 || pickup.duration.min_ms >= pickup.duration.max_ms {
                return Err(invalid(format!(
                    "{name} duration range [{}, {}) is empty or starts at zero",
                    pickup.duration.min_ms, pickup.duration.max_ms
                )));
            }
            if pickup.spawn_chance > 100 {
                return Err(invalid(format!(
                    "{name} spawn chance {} exceeds 100",
                    pickup.spawn_chance
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Finite and strictly greater than zero. NaN fails.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn check_shape(name: &str, shape: &Shape) -> Result<(), ConfigError> {
    if !is_positive(shape.size.x) || !is_positive(shape.size.y) {
        return Err(invalid(format!(
            "{name} shape must have a positive finite size"
        )));
    }
    Ok(())
}

fn check_speed(name: &str, speed: f32) -> Result<(), ConfigError> {
    if !is_positive(speed) {
        return Err(invalid(format!(
            "{name} speed must be positive and finite, got {speed}"
        )));
    }
    Ok(())
}

fn check_lifespan(name: &str, lifespan_ms: u64) -> Result<(), ConfigError> {
    if lifespan_ms == 0 {
        return Err(invalid(format!("{name} lifespan must be positive")));
    }
    Ok(())
}
