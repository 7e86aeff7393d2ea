//! Effect expiry system.

use skirmish_core::events::SceneEvent;

use crate::context::FrameClock;
use crate::store::EntityStore;

/// Remove every expired effect on every active entity. Each kind expires
/// independently; several can expire in the same tick.
pub fn run(store: &mut EntityStore, clock: &FrameClock, events: &mut Vec<SceneEvent>) {
    for entity in store.iter_mut().filter(|e| e.is_active()) {
        let id = entity.id();
        let Some(effects) = entity.effects.as_mut() else {
            continue;
        };

        for kind in effects.remove_expired(clock.now_ms) {
            log::debug!("{kind:?} expired on {id}");
            events.push(SceneEvent::EffectExpired {
                entity: id.raw(),
                kind,
            });
        }
    }
}
