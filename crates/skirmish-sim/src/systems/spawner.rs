//! Spawn system: enemies on a fixed wall-clock interval, pickups by chance.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::config::GameConfig;
use skirmish_core::enums::{EffectKind, EntityTag};
use skirmish_core::events::SceneEvent;

use crate::context::FrameClock;
use crate::store::{EntityId, EntityStore};
use crate::world_setup;

/// Tracks when the last enemy spawn was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSchedule {
    pub last_enemy_spawn_ms: u64,
}

impl SpawnSchedule {
    pub fn new(start_ms: u64) -> Self {
        Self {
            last_enemy_spawn_ms: start_ms,
        }
    }

    pub fn is_due(&self, now_ms: u64, interval_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_enemy_spawn_ms) >= interval_ms
    }
}

/// Spawn an enemy when the interval has elapsed, then roll for a speed boost
/// and a slowness pickup. Pickups only appear while the player carries
/// neither effect.
pub fn run(
    store: &mut EntityStore,
    config: &GameConfig,
    clock: &FrameClock,
    rng: &mut ChaCha8Rng,
    schedule: &mut SpawnSchedule,
    player: EntityId,
    events: &mut Vec<SceneEvent>,
) {
    if !schedule.is_due(clock.now_ms, config.enemy_spawn_interval_ms) {
        return;
    }
    schedule.last_enemy_spawn_ms = clock.now_ms;

    world_setup::spawn_wanderer(store, config, rng, EntityTag::Enemy, clock.now_ms, events);

    let pickups = [
        (EntityTag::SpeedBoost, config.speed_boost.spawn_chance),
        (EntityTag::SlownessDebuff, config.slowness.spawn_chance),
    ];
    for (tag, chance) in pickups {
        let rolled = rng.gen_range(0..100) < chance;
        if rolled && !player_has_effect(store, player) {
            world_setup::spawn_wanderer(store, config, rng, tag, clock.now_ms, events);
        }
    }
}

fn player_has_effect(store: &EntityStore, player: EntityId) -> bool {
    store
        .get(player)
        .and_then(|p| p.effects.as_ref())
        .is_some_and(|effects| effects.has(EffectKind::Speed) || effects.has(EffectKind::Slowness))
}
