//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{EffectKind, EntityTag, GameOverReason};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    /// A bullet destroyed an enemy.
    EnemyShot { bullet: u64, enemy: u64 },
    /// The player touched an enemy.
    PlayerHit { enemy: u64 },
    /// The player collected a pickup.
    EffectApplied { kind: EffectKind, duration_ms: u64 },
    /// A timed effect ran out.
    EffectExpired { entity: u64, kind: EffectKind },
    /// An enemy decayed before being shot.
    EnemyExpired { enemy: u64 },
    /// No valid placement was found for a randomized spawn.
    SpawnSkipped { tag: EntityTag },
    GameOver { reason: GameOverReason },
}
