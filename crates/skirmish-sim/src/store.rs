//! Entity store with deferred structural mutation.
//!
//! Entities are records with optional component slots, owned by the store and
//! addressed by a monotonically increasing `EntityId`. Creation and
//! destruction are deferred: new entities wait in a pending buffer and
//! destroyed entities stay enumerable (with `active == false`) until the next
//! `sync()`, which commits both and rebuilds the tag index.

use std::collections::HashMap;

use skirmish_core::components::{EffectSet, Input, Lifespan, Shape, Transform};
use skirmish_core::enums::EntityTag;
use skirmish_core::types::Rect;

/// Stable entity identity. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// An entity record: identity, liveness flag and component slots.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    active: bool,
    pub transform: Option<Transform>,
    pub shape: Option<Shape>,
    pub input: Option<Input>,
    pub lifespan: Option<Lifespan>,
    pub effects: Option<EffectSet>,
}

impl Entity {
    fn new(id: EntityId, tag: EntityTag) -> Self {
        Self {
            id,
            tag,
            active: true,
            transform: None,
            shape: None,
            input: None,
            lifespan: None,
            effects: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn tag(&self) -> EntityTag {
        self.tag
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark for removal at the next sync. Idempotent.
    pub fn destroy(&mut self) {
        self.active = false;
    }

    /// World-space rectangle, if the entity has both a Transform and a Shape.
    pub fn rect(&self) -> Option<Rect> {
        let transform = self.transform.as_ref()?;
        let shape = self.shape.as_ref()?;
        Some(shape.rect_at(transform))
    }
}

/// Counts reported by a sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub added: usize,
    pub removed: usize,
}

#[derive(Debug, Default)]
pub struct EntityStore {
    next_id: u64,
    live: Vec<Entity>,
    pending: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    by_tag: HashMap<EntityTag, Vec<EntityId>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity. It is returned for component setup but stays
    /// invisible to `all`/`query_by_tag` until the next sync.
    pub fn create(&mut self, tag: EntityTag) -> &mut Entity {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        debug_assert!(!self.index.contains_key(&id), "entity id {id} reused");

        self.pending.push(Entity::new(id, tag));
        let last = self.pending.len() - 1;
        &mut self.pending[last]
    }

    /// Ids of every live entity in insertion order, including ones marked
    /// destroyed since the last sync.
    pub fn all(&self) -> Vec<EntityId> {
        self.live.iter().map(|e| e.id).collect()
    }

    /// Live entities with `tag`, as of the last sync.
    pub fn query_by_tag(&self, tag: EntityTag) -> &[EntityId] {
        self.by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a live or pending entity.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        match self.index.get(&id) {
            Some(&idx) => self.live.get(idx),
            None => self.pending.iter().find(|e| e.id == id),
        }
    }

    /// Mutable lookup of a live or pending entity.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.index.get(&id) {
            Some(&idx) => self.live.get_mut(idx),
            None => self.pending.iter_mut().find(|e| e.id == id),
        }
    }

    /// Borrow two distinct live entities mutably at once.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (left, right) = self.live.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.live.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    /// Flag an entity for removal. Returns false if the id is unknown.
    pub fn mark_destroyed(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) => {
                entity.destroy();
                true
            }
            None => false,
        }
    }

    /// Whether `id` survived the last sync and is not marked destroyed.
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.index
            .get(&id)
            .and_then(|&idx| self.live.get(idx))
            .is_some_and(|e| e.active)
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.live.iter()
    }

    /// Mutable access to live entities. Component data only; structural
    /// changes still go through `create`/`mark_destroyed`.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.live.iter_mut()
    }

    /// Entities created since the last sync.
    pub fn pending(&self) -> impl Iterator<Item = &Entity> {
        self.pending.iter()
    }

    /// Number of live entities, including ones awaiting removal.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Commit pending creations, drop destroyed entities, rebuild indices.
    pub fn sync(&mut self) -> SyncStats {
        let added = self.pending.len();
        self.live.append(&mut self.pending);

        let before = self.live.len();
        self.live.retain(|e| e.active);
        let removed = before - self.live.len();

        self.index.clear();
        self.by_tag.clear();
        for (idx, entity) in self.live.iter().enumerate() {
            let previous = self.index.insert(entity.id, idx);
            debug_assert!(previous.is_none(), "duplicate entity id {}", entity.id);
            self.by_tag.entry(entity.tag).or_default().push(entity.id);
        }

        if added > 0 || removed > 0 {
            log::debug!(
                "store sync: +{added} -{removed}, {} live",
                self.live.len()
            );
        }

        SyncStats { added, removed }
    }
}
