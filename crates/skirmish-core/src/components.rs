//! Components attached to entities.
//!
//! Components are mostly plain data. Game rules live in the simulation
//! systems; the few methods here only answer questions about their own
//! fields.

use serde::{Deserialize, Serialize};

use crate::enums::EffectKind;
use crate::types::{Rect, Vec2};

/// Position, velocity and heading of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Top-left corner in window space.
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    pub rotation_degrees: f32,
}

impl Transform {
    pub fn new(position: Vec2, velocity: Vec2, rotation_degrees: f32) -> Self {
        Self {
            position,
            velocity,
            rotation_degrees,
        }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(160, 32, 240);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Axis-aligned rectangle size plus fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub size: Vec2,
    pub color: Color,
}

impl Shape {
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            size: Vec2::new(width, height),
            color,
        }
    }

    /// Rectangle occupied by this shape when placed at `transform`.
    pub fn rect_at(&self, transform: &Transform) -> Rect {
        Rect::new(transform.position, self.size)
    }
}

/// Movement intents, toggled by input actions and read by movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl Input {
    /// Combined intent direction, normalized so diagonals are not faster.
    /// Opposing intents cancel out.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.forward {
            dir.y -= 1.0;
        }
        if self.backward {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Decay timer: the entity fades out and is destroyed after `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifespan {
    pub birth_ms: u64,
    pub duration_ms: u64,
}

impl Lifespan {
    pub fn new(birth_ms: u64, duration_ms: u64) -> Self {
        debug_assert!(duration_ms > 0, "lifespan duration must be positive");
        Self {
            birth_ms,
            duration_ms,
        }
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.birth_ms)
    }

    /// Age as a fraction of the duration, clamped to [0, 1].
    pub fn age_fraction(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms(now_ms) as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) > self.duration_ms
    }
}

/// A single timed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Effect {
    pub fn new(kind: EffectKind, start_ms: u64, duration_ms: u64) -> Self {
        debug_assert!(duration_ms > 0, "effect duration must be positive");
        Self {
            kind,
            start_ms,
            duration_ms,
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) > self.duration_ms
    }
}

/// Active timed effects, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSet {
    effects: Vec<Effect>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect, replacing any existing effect of the same kind.
    pub fn add(&mut self, effect: Effect) {
        match self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            Some(existing) => *existing = effect,
            None => self.effects.push(effect),
        }
    }

    /// Remove the effect of `kind`. Returns whether one was present.
    pub fn remove(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Drop every expired effect and return the kinds that were removed.
    pub fn remove_expired(&mut self, now_ms: u64) -> Vec<EffectKind> {
        let expired: Vec<EffectKind> = self
            .effects
            .iter()
            .filter(|e| e.is_expired(now_ms))
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !e.is_expired(now_ms));
        expired
    }
}
