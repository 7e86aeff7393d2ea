//! Input actions delivered by the presentation layer.
//!
//! Raw key and mouse events are translated into named actions outside the
//! core; the scene validates and applies them between ticks.

use serde::{Deserialize, Serialize};

use crate::enums::ActionState;
use crate::types::Vec2;

/// A named action edge, optionally carrying a pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub state: ActionState,
    pub pointer: Option<Vec2>,
}

impl Action {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ActionState::Start,
            pointer: None,
        }
    }

    pub fn end(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ActionState::End,
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = Some(pointer);
        self
    }
}
