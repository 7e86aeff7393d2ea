//! Per-tick systems operating on the entity store.
//!
//! Systems are free functions that borrow the store plus whatever scene state
//! they touch. They never own state and never change the store's structure
//! directly: creation and destruction are deferred until the engine syncs.

pub mod collision;
pub mod effects;
pub mod lifespan;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod timer;
