//! Collision system: world-bounds enforcement plus pairwise game rules.
//!
//! Every live entity is checked against the world edges, then against every
//! other live entity. Rules are keyed on the ordered tag pair so each one
//! fires from exactly one scan order, and every ordered pair re-tests overlap
//! so a separation applied from one side is not applied again from the other.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::Effect;
use skirmish_core::config::GameConfig;
use skirmish_core::enums::{EffectKind, EntityTag};
use skirmish_core::events::SceneEvent;
use skirmish_core::types::{BoundsMask, Rect, Vec2};

use crate::context::FrameClock;
use crate::score::ScoreState;
use crate::store::{Entity, EntityId, EntityStore};

/// Outcome of an overlapping ordered pair `(a, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRule {
    /// Bullet `a` hits enemy `b`: both destroyed, score bonus.
    BulletHitsEnemy,
    /// Player `a` touches enemy `b`: enemy destroyed, score penalty.
    PlayerHitsEnemy,
    /// Player `a` collects a pickup granting `EffectKind`.
    Collect(EffectKind),
    /// Push `a` out of wall `b`.
    PushOutOfWall,
    /// Push `a` and `b` apart symmetrically.
    Separate,
    Ignore,
}

/// Rule table over ordered tag pairs.
pub fn pair_rule(a: EntityTag, b: EntityTag) -> PairRule {
    use EntityTag::*;

    match (a, b) {
        (Bullet, Enemy) => PairRule::BulletHitsEnemy,
        (Player, Enemy) => PairRule::PlayerHitsEnemy,
        (Player, SpeedBoost) => PairRule::Collect(EffectKind::Speed),
        (Player, SlownessDebuff) => PairRule::Collect(EffectKind::Slowness),
        (Enemy, Enemy | SpeedBoost | SlownessDebuff) => PairRule::Separate,
        (Wall, _) => PairRule::Ignore,
        (_, Wall) => PairRule::PushOutOfWall,
        _ => PairRule::Ignore,
    }
}

/// Which world edges `rect` crosses.
pub fn out_of_bounds_mask(rect: &Rect, world_size: Vec2) -> BoundsMask {
    let mut mask = BoundsMask::NONE;
    if rect.left() < 0.0 {
        mask.insert(BoundsMask::LEFT);
    }
    if rect.right() > world_size.x {
        mask.insert(BoundsMask::RIGHT);
    }
    if rect.top() < 0.0 {
        mask.insert(BoundsMask::TOP);
    }
    if rect.bottom() > world_size.y {
        mask.insert(BoundsMask::BOTTOM);
    }
    mask
}

/// Which world edges the entity crosses. Entities without a Transform or
/// Shape never cross anything.
pub fn detect_out_of_bounds(entity: &Entity, world_size: Vec2) -> BoundsMask {
    entity
        .rect()
        .map(|rect| out_of_bounds_mask(&rect, world_size))
        .unwrap_or(BoundsMask::NONE)
}

/// Clamp the player back inside the world.
pub fn enforce_player_bounds(entity: &mut Entity, mask: BoundsMask, world_size: Vec2) {
    let Some(size) = entity.shape.map(|s| s.size) else {
        return;
    };
    let Some(transform) = entity.transform.as_mut() else {
        return;
    };

    if mask.contains(BoundsMask::LEFT) {
        transform.position.x = 0.0;
    }
    if mask.contains(BoundsMask::RIGHT) {
        transform.position.x = world_size.x - size.x;
    }
    if mask.contains(BoundsMask::TOP) {
        transform.position.y = 0.0;
    }
    if mask.contains(BoundsMask::BOTTOM) {
        transform.position.y = world_size.y - size.y;
    }
}

/// Bounce off crossed edges: clamp inside and point the velocity component
/// for that axis back into the world.
pub fn enforce_non_player_bounds(entity: &mut Entity, mask: BoundsMask, world_size: Vec2) {
    let Some(size) = entity.shape.map(|s| s.size) else {
        return;
    };
    let Some(transform) = entity.transform.as_mut() else {
        return;
    };

    if mask.contains(BoundsMask::LEFT) {
        transform.position.x = 0.0;
        transform.velocity.x = transform.velocity.x.abs();
    }
    if mask.contains(BoundsMask::RIGHT) {
        transform.position.x = world_size.x - size.x;
        transform.velocity.x = -transform.velocity.x.abs();
    }
    if mask.contains(BoundsMask::TOP) {
        transform.position.y = 0.0;
        transform.velocity.y = transform.velocity.y.abs();
    }
    if mask.contains(BoundsMask::BOTTOM) {
        transform.position.y = world_size.y - size.y;
        transform.velocity.y = -transform.velocity.y.abs();
    }
}

/// Bullets do not bounce: any boundary contact destroys them.
pub fn enforce_bullet_collision(bullet: &mut Entity, any_boundary_hit: bool) {
    if any_boundary_hit {
        bullet.destroy();
    }
}

pub fn calculate_collision_between_entities(a: &Entity, b: &Entity) -> bool {
    match (a.rect(), b.rect()) {
        (Some(ra), Some(rb)) => ra.overlaps(&rb),
        _ => false,
    }
}

/// Signed penetration of `a` into `b`; see `Rect::penetration`.
pub fn calculate_overlap(a: &Entity, b: &Entity) -> Vec2 {
    match (a.rect(), b.rect()) {
        (Some(ra), Some(rb)) => ra.penetration(&rb),
        _ => Vec2::ZERO,
    }
}

/// Move `entity` out of `wall` along the axis of least penetration.
pub fn enforce_collision_with_wall(entity: &mut Entity, wall: &Entity) {
    let push = minimum_axis(calculate_overlap(entity, wall));
    if let Some(transform) = entity.transform.as_mut() {
        transform.position += push;
    }
}

/// Split the separation evenly between two entities. Velocities are kept.
pub fn enforce_entity_entity_collision(a: &mut Entity, b: &mut Entity) {
    let push = minimum_axis(calculate_overlap(a, b)) * 0.5;
    if let Some(transform) = a.transform.as_mut() {
        transform.position += push;
    }
    if let Some(transform) = b.transform.as_mut() {
        transform.position -= push;
    }
}

fn minimum_axis(penetration: Vec2) -> Vec2 {
    if penetration == Vec2::ZERO {
        return Vec2::ZERO;
    }
    if penetration.x.abs() < penetration.y.abs() {
        Vec2::new(penetration.x, 0.0)
    } else {
        Vec2::new(0.0, penetration.y)
    }
}

/// Run bounds enforcement and pairwise rules for every live entity.
pub fn run(
    store: &mut EntityStore,
    config: &GameConfig,
    clock: &FrameClock,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    events: &mut Vec<SceneEvent>,
) {
    let world_size = config.window_size;
    let ids = store.all();

    for &id in &ids {
        if let Some(entity) = store.get_mut(id) {
            enforce_bounds(entity, world_size);
        }

        for &other in &ids {
            if id == other {
                continue;
            }
            resolve_pair(store, id, other, config, clock, rng, score, events);
        }
    }
}

fn enforce_bounds(entity: &mut Entity, world_size: Vec2) {
    if !entity.is_active() {
        return;
    }

    let mask = detect_out_of_bounds(entity, world_size);
    match entity.tag() {
        EntityTag::Player => enforce_player_bounds(entity, mask, world_size),
        EntityTag::Enemy | EntityTag::SpeedBoost | EntityTag::SlownessDebuff => {
            enforce_non_player_bounds(entity, mask, world_size)
        }
        EntityTag::Bullet => enforce_bullet_collision(entity, mask.any()),
        EntityTag::Wall => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_pair(
    store: &mut EntityStore,
    a_id: EntityId,
    b_id: EntityId,
    config: &GameConfig,
    clock: &FrameClock,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    events: &mut Vec<SceneEvent>,
) {
    let Some((a, b)) = store.pair_mut(a_id, b_id) else {
        return;
    };
    if !a.is_active() || !b.is_active() {
        return;
    }

    let rule = pair_rule(a.tag(), b.tag());
    if rule == PairRule::Ignore || !calculate_collision_between_entities(a, b) {
        return;
    }

    let mut collected = false;
    match rule {
        PairRule::BulletHitsEnemy => {
            a.destroy();
            b.destroy();
            score.apply(config.scoring.bullet_hits_enemy);
            events.push(SceneEvent::EnemyShot {
                bullet: a_id.raw(),
                enemy: b_id.raw(),
            });
        }
        PairRule::PlayerHitsEnemy => {
            b.destroy();
            score.apply(config.scoring.player_hits_enemy);
            events.push(SceneEvent::PlayerHit { enemy: b_id.raw() });
        }
        PairRule::Collect(kind) => {
            collected = apply_pickup(a, kind, config, clock, rng, events);
        }
        PairRule::PushOutOfWall => enforce_collision_with_wall(a, b),
        PairRule::Separate => enforce_entity_entity_collision(a, b),
        PairRule::Ignore => {}
    }

    if collected {
        clear_pickups(store);
    }
}

/// Grant a timed effect with a random duration. The opposite effect is
/// cancelled; the same kind is replaced. Returns false, leaving the world
/// untouched, if the collector has no effect set.
fn apply_pickup(
    player: &mut Entity,
    kind: EffectKind,
    config: &GameConfig,
    clock: &FrameClock,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SceneEvent>,
) -> bool {
    let range = match kind {
        EffectKind::Speed => config.speed_boost.duration,
        EffectKind::Slowness => config.slowness.duration,
    };

    let Some(effects) = player.effects.as_mut() else {
        log::warn!(
            "{} ({}) collected {kind:?} but has no effect set",
            player.id(),
            player.tag()
        );
        return false;
    };

    let duration_ms = rng.gen_range(range.min_ms..range.max_ms);
    effects.remove(kind.opposite());
    effects.add(Effect::new(kind, clock.now_ms, duration_ms));
    log::debug!("{kind:?} applied to {} for {duration_ms}ms", player.id());
    events.push(SceneEvent::EffectApplied { kind, duration_ms });
    true
}

/// Collecting any pickup clears every pickup of both kinds from the world.
fn clear_pickups(store: &mut EntityStore) {
    let pickups: Vec<EntityId> = EntityTag::ALL
        .into_iter()
        .filter(EntityTag::is_pickup)
        .flat_map(|tag| store.query_by_tag(tag).to_vec())
        .collect();

    for id in pickups {
        store.mark_destroyed(id);
    }
}
