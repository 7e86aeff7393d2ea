//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Fixed category assigned to an entity at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    Enemy,
    Bullet,
    Wall,
    SpeedBoost,
    SlownessDebuff,
}

impl EntityTag {
    pub const ALL: [EntityTag; 6] = [
        EntityTag::Player,
        EntityTag::Enemy,
        EntityTag::Bullet,
        EntityTag::Wall,
        EntityTag::SpeedBoost,
        EntityTag::SlownessDebuff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityTag::Player => "Player",
            EntityTag::Enemy => "Enemy",
            EntityTag::Bullet => "Bullet",
            EntityTag::Wall => "Wall",
            EntityTag::SpeedBoost => "SpeedBoost",
            EntityTag::SlownessDebuff => "SlownessDebuff",
        }
    }

    /// Every tag except Player and Wall must carry a Lifespan.
    pub fn requires_lifespan(&self) -> bool {
        !matches!(self, EntityTag::Player | EntityTag::Wall)
    }

    /// Pickups grant a timed effect to the player on contact.
    pub fn is_pickup(&self) -> bool {
        matches!(self, EntityTag::SpeedBoost | EntityTag::SlownessDebuff)
    }
}

impl std::fmt::Display for EntityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of timed modifier carried in an EffectSet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Speed,
    Slowness,
}

impl EffectKind {
    /// The effect that cancels this one when applied.
    pub fn opposite(&self) -> EffectKind {
        match self {
            EffectKind::Speed => EffectKind::Slowness,
            EffectKind::Slowness => EffectKind::Speed,
        }
    }
}

/// Scene state machine. GameOver is terminal for a scene instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    #[default]
    Running,
    Paused,
    GameOver,
}

/// Why a scene ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Countdown timer reached zero.
    TimeUp,
    /// Score would have gone negative.
    ScoreDepleted,
}

/// Edge of an input action: key pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionState {
    Start,
    End,
}

/// Named actions understood by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Forward,
    Backward,
    Left,
    Right,
    Pause,
    Shoot,
}

impl ActionKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "FORWARD" => Some(ActionKind::Forward),
            "BACKWARD" => Some(ActionKind::Backward),
            "LEFT" => Some(ActionKind::Left),
            "RIGHT" => Some(ActionKind::Right),
            "PAUSE" => Some(ActionKind::Pause),
            "SHOOT" => Some(ActionKind::Shoot),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Forward => "FORWARD",
            ActionKind::Backward => "BACKWARD",
            ActionKind::Left => "LEFT",
            ActionKind::Right => "RIGHT",
            ActionKind::Pause => "PAUSE",
            ActionKind::Shoot => "SHOOT",
        }
    }
}
