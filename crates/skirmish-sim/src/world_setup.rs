//! Entity spawn factories.
//!
//! Creates the player, walls, wandering enemies and pickups, and bullets with
//! the component set each tag requires. Every entity goes through
//! `EntityStore::create` and stays pending until the engine syncs.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{EffectSet, Input, Lifespan, Shape, Transform};
use skirmish_core::config::GameConfig;
use skirmish_core::enums::EntityTag;
use skirmish_core::events::SceneEvent;
use skirmish_core::types::{Rect, Vec2};

use crate::store::{EntityId, EntityStore};
use crate::systems::collision::out_of_bounds_mask;

/// Set up a fresh scene: the player and, if enabled, the two walls.
pub fn setup_scene(store: &mut EntityStore, config: &GameConfig) -> EntityId {
    let player = spawn_player(store, config);
    if config.walls.enabled {
        spawn_walls(store, config);
    }
    player
}

/// Spawn the player centered in the world. No placement validation.
pub fn spawn_player(store: &mut EntityStore, config: &GameConfig) -> EntityId {
    let shape = config.player.shape;
    let position = (config.window_size - shape.size) * 0.5;

    let player = store.create(EntityTag::Player);
    player.transform = Some(Transform::new(position, Vec2::ZERO, 0.0));
    player.shape = Some(shape);
    player.input = Some(Input::default());
    player.effects = Some(EffectSet::new());
    player.id()
}

/// Spawn the two fixed walls: one hanging from the top edge on the left, one
/// standing on the bottom edge on the right. Both stay clear of the centered
/// player spawn unless the window is barely larger than the player.
pub fn spawn_walls(store: &mut EntityStore, config: &GameConfig) -> [EntityId; 2] {
    let world = config.window_size;
    let walls = &config.walls;
    let size = Vec2::new(world.x * walls.width_fraction, world.y * walls.height_fraction);

    let positions = [
        Vec2::new(world.x * 0.2, 0.0),
        Vec2::new(world.x * 0.7, world.y - size.y),
    ];

    positions.map(|position| {
        let wall = store.create(EntityTag::Wall);
        wall.transform = Some(Transform::new(position, Vec2::ZERO, 0.0));
        wall.shape = Some(Shape::new(size.x, size.y, walls.color));
        wall.id()
    })
}

/// Shape, lifespan and axis speed for tags placed by rejection sampling.
fn wanderer_params(config: &GameConfig, tag: EntityTag) -> Option<(Shape, u64, f32)> {
    match tag {
        EntityTag::Enemy => Some((
            config.enemy.shape,
            config.enemy.lifespan_ms,
            config.enemy.speed,
        )),
        EntityTag::SpeedBoost => Some((
            config.speed_boost.shape,
            config.speed_boost.lifespan_ms,
            config.speed_boost.speed,
        )),
        EntityTag::SlownessDebuff => Some((
            config.slowness.shape,
            config.slowness.lifespan_ms,
            config.slowness.speed,
        )),
        EntityTag::Player | EntityTag::Bullet | EntityTag::Wall => None,
    }
}

/// Spawn an enemy or pickup at a random valid position.
///
/// Velocity components are drawn from {-1, 0, 1} (never both zero) and scaled
/// by the tag's speed. The position is resampled up to
/// `config.max_spawn_attempts` times until the entity is fully in bounds and
/// overlaps no other active entity. If no placement is found the candidate is
/// destroyed, so it never becomes live, and `None` is returned.
pub fn spawn_wanderer(
    store: &mut EntityStore,
    config: &GameConfig,
    rng: &mut ChaCha8Rng,
    tag: EntityTag,
    now_ms: u64,
    events: &mut Vec<SceneEvent>,
) -> Option<EntityId> {
    let Some((shape, lifespan_ms, speed)) = wanderer_params(config, tag) else {
        log::warn!("{tag} cannot be spawned by random placement");
        return None;
    };

    let velocity = random_direction(rng) * speed;
    let mut position = random_position(rng, config.window_size);

    let candidate = store.create(tag);
    candidate.transform = Some(Transform::new(position, velocity, 0.0));
    candidate.shape = Some(shape);
    candidate.lifespan = Some(Lifespan::new(now_ms, lifespan_ms));
    let id = candidate.id();

    let mut attempts = 1;
    while !is_valid_placement(store, id, Rect::new(position, shape.size), config.window_size) {
        if attempts >= config.max_spawn_attempts {
            store.mark_destroyed(id);
            log::debug!("{tag} spawn skipped after {attempts} placement attempts");
            events.push(SceneEvent::SpawnSkipped { tag });
            return None;
        }

        position = random_position(rng, config.window_size);
        if let Some(transform) = store.get_mut(id).and_then(|e| e.transform.as_mut()) {
            transform.position = position;
        }
        attempts += 1;
    }

    Some(id)
}

/// Uniform position anywhere in the world. May leave the shape hanging over
/// an edge; placement validation rejects that.
fn random_position(rng: &mut ChaCha8Rng, world_size: Vec2) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..=world_size.x),
        rng.gen_range(0.0..=world_size.y),
    )
}

/// Integer direction in {-1, 0, 1}², resampled until non-zero.
fn random_direction(rng: &mut ChaCha8Rng) -> Vec2 {
    loop {
        let x: i32 = rng.gen_range(-1..=1);
        let y: i32 = rng.gen_range(-1..=1);
        if x != 0 || y != 0 {
            return Vec2::new(x as f32, y as f32);
        }
    }
}

/// Fully in bounds and clear of every active entity, live or pending,
/// other than the candidate itself.
fn is_valid_placement(
    store: &EntityStore,
    candidate: EntityId,
    rect: Rect,
    world_size: Vec2,
) -> bool {
    if out_of_bounds_mask(&rect, world_size).any() {
        return false;
    }

    store
        .iter()
        .chain(store.pending())
        .filter(|e| e.id() != candidate && e.is_active())
        .filter_map(|e| e.rect())
        .all(|other| !rect.overlaps(&other))
}

/// Fire a bullet from the player toward `target`.
///
/// The bullet starts just outside the player along the firing direction,
/// moves at the configured bullet speed and is rotated to face its heading.
/// A target at the player's center gives a stationary bullet that simply
/// decays.
pub fn spawn_bullet(
    store: &mut EntityStore,
    config: &GameConfig,
    player: EntityId,
    target: Vec2,
    now_ms: u64,
) -> Option<EntityId> {
    let Some(player_rect) = store.get(player).and_then(|p| p.rect()) else {
        log::warn!("{player} has no Transform/Shape; cannot fire");
        return None;
    };

    let bullet_cfg = &config.bullet;
    let origin = player_rect.center();
    let direction = (target - origin).normalize_or_zero();
    let offset = bullet_cfg.shape.size.x * 0.5 + player_rect.size.x * 0.5 + bullet_cfg.spawn_gap;
    let center = origin + direction * offset;
    let rotation = direction.y.atan2(direction.x).to_degrees();

    let bullet = store.create(EntityTag::Bullet);
    bullet.transform = Some(Transform::new(
        center - bullet_cfg.shape.size * 0.5,
        direction * bullet_cfg.speed,
        rotation,
    ));
    bullet.shape = Some(bullet_cfg.shape);
    bullet.lifespan = Some(Lifespan::new(now_ms, bullet_cfg.lifespan_ms));
    Some(bullet.id())
}
