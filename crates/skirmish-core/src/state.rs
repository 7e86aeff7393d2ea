//! Scene snapshot: the read-only view handed to the presentation layer
//! once per frame, after the tick completes.

use serde::{Deserialize, Serialize};

use crate::components::Color;
use crate::enums::{EntityTag, ScenePhase};
use crate::events::SceneEvent;
use crate::types::Vec2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Number of ticks processed while running.
    pub tick: u64,
    pub phase: ScenePhase,
    pub hud: HudView,
    /// Drawable entities in store order.
    pub entities: Vec<EntityView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<SceneEvent>,
}

/// One drawable rectangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub tag: EntityTag,
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub rotation_degrees: f32,
}

/// Scalar values for text rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub score: i32,
    pub time_remaining_ms: u64,
    pub speed_boost_active: bool,
    pub slowness_active: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl HudView {
    /// Remaining time as `m:ss`.
    pub fn clock_label(&self) -> String {
        let minutes = self.time_remaining_ms / 60_000;
        let seconds = (self.time_remaining_ms % 60_000) / 1_000;
        format!("{minutes}:{seconds:02}")
    }
}
