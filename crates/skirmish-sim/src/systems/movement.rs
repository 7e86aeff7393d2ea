//! Kinematic integration system.
//!
//! Derives the player's velocity from its input intents and active effects,
//! then integrates every moving entity: position += velocity * dt.

use skirmish_core::components::EffectSet;
use skirmish_core::config::GameConfig;
use skirmish_core::enums::{EffectKind, EntityTag};

use crate::context::FrameClock;
use crate::store::{Entity, EntityStore};

/// Player speed after effect multipliers. Speed wins if both are present.
pub fn player_speed(config: &GameConfig, effects: Option<&EffectSet>) -> f32 {
    let base = config.player.speed;
    match effects {
        Some(set) if set.has(EffectKind::Speed) => base * config.speed_boost.multiplier,
        Some(set) if set.has(EffectKind::Slowness) => base * config.slowness.multiplier,
        _ => base,
    }
}

/// Run kinematic integration for all active entities.
pub fn run(store: &mut EntityStore, config: &GameConfig, clock: &FrameClock) {
    let dt = clock.delta_secs();

    for entity in store.iter_mut().filter(|e| e.is_active()) {
        match entity.tag() {
            EntityTag::Wall => continue,
            EntityTag::Player => steer_player(entity, config),
            EntityTag::Enemy
            | EntityTag::Bullet
            | EntityTag::SpeedBoost
            | EntityTag::SlownessDebuff => {}
        }

        if let Some(transform) = entity.transform.as_mut() {
            transform.position += transform.velocity * dt;
        }
    }
}

fn steer_player(player: &mut Entity, config: &GameConfig) {
    let Some(input) = player.input else {
        log::warn!("{} ({}) has no Input; not steering", player.id(), player.tag());
        return;
    };

    let speed = player_speed(config, player.effects.as_ref());
    if let Some(transform) = player.transform.as_mut() {
        transform.velocity = input.direction() * speed;
    }
}
