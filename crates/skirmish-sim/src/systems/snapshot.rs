//! Snapshot system: reads the store and builds a complete SceneSnapshot.
//!
//! This system is read-only. It never modifies the store.

use skirmish_core::enums::{EffectKind, ScenePhase};
use skirmish_core::events::SceneEvent;
use skirmish_core::state::{EntityView, HudView, SceneSnapshot};

use crate::score::ScoreState;
use crate::store::{EntityId, EntityStore};
use crate::systems::timer::Countdown;

/// Build a SceneSnapshot from the current store and scene state.
pub fn build_snapshot(
    store: &EntityStore,
    tick: u64,
    phase: ScenePhase,
    score: &ScoreState,
    countdown: &Countdown,
    player: EntityId,
    events: Vec<SceneEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        tick,
        phase,
        hud: build_hud(store, phase, score, countdown, player),
        entities: build_entities(store),
        events,
    }
}

/// Drawable view of every active entity that has a Transform and Shape.
fn build_entities(store: &EntityStore) -> Vec<EntityView> {
    store
        .iter()
        .filter(|e| e.is_active())
        .filter_map(|e| {
            let transform = e.transform.as_ref()?;
            let shape = e.shape.as_ref()?;
            Some(EntityView {
                id: e.id().raw(),
                tag: e.tag(),
                position: transform.position,
                size: shape.size,
                color: shape.color,
                rotation_degrees: transform.rotation_degrees,
            })
        })
        .collect()
}

fn build_hud(
    store: &EntityStore,
    phase: ScenePhase,
    score: &ScoreState,
    countdown: &Countdown,
    player: EntityId,
) -> HudView {
    let effects = store.get(player).and_then(|p| p.effects.as_ref());
    let has = |kind| effects.is_some_and(|set| set.has(kind));

    HudView {
        score: score.value(),
        time_remaining_ms: countdown.remaining_ms(),
        speed_boost_active: has(EffectKind::Speed),
        slowness_active: has(EffectKind::Slowness),
        paused: phase == ScenePhase::Paused,
        game_over: phase == ScenePhase::GameOver,
    }
}
