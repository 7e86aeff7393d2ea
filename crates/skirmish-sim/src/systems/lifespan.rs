//! Lifespan system: fade entities out with age and destroy them on expiry.

use skirmish_core::config::GameConfig;
use skirmish_core::enums::EntityTag;
use skirmish_core::events::SceneEvent;

use crate::context::FrameClock;
use crate::score::ScoreState;
use crate::store::EntityStore;

/// Alpha for an entity at `age_fraction` of its lifespan: opaque at birth,
/// fully transparent at the limit.
pub fn fade_alpha(age_fraction: f32) -> u8 {
    (255.0 * (1.0 - age_fraction.clamp(0.0, 1.0))) as u8
}

pub fn run(
    store: &mut EntityStore,
    config: &GameConfig,
    clock: &FrameClock,
    score: &mut ScoreState,
    events: &mut Vec<SceneEvent>,
) {
    for entity in store.iter_mut().filter(|e| e.is_active()) {
        let tag = entity.tag();
        if !tag.requires_lifespan() {
            continue;
        }
        let Some(lifespan) = entity.lifespan else {
            log::warn!("{} ({tag}) has no Lifespan; skipping decay", entity.id());
            continue;
        };

        if lifespan.is_expired(clock.now_ms) {
            if tag == EntityTag::Enemy {
                score.apply(config.scoring.enemy_expired);
                events.push(SceneEvent::EnemyExpired {
                    enemy: entity.id().raw(),
                });
            }
            entity.destroy();
            continue;
        }

        if let Some(shape) = entity.shape.as_mut() {
            shape.color.a = fade_alpha(lifespan.age_fraction(clock.now_ms));
        }
    }
}
