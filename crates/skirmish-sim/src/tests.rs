//! Scene-level tests for the engine, the system order and the collision rules.

use std::collections::HashSet;

use skirmish_core::commands::Action;
use skirmish_core::components::{Color, Effect, Lifespan, Shape, Transform};
use skirmish_core::config::{GameConfig, WallConfig};
use skirmish_core::enums::*;
use skirmish_core::error::ActionError;
use skirmish_core::events::SceneEvent;
use skirmish_core::types::{Rect, Vec2};

use crate::engine::{SimConfig, SimulationEngine};
use crate::store::EntityId;

/// No walls and no scheduled spawns: only what a test injects.
fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_spawn_interval_ms: 1_000_000_000,
        walls: WallConfig {
            enabled: false,
            ..Default::default()
        },
        ..GameConfig::default()
    }
}

fn engine_with(config: GameConfig, seed: u64) -> SimulationEngine {
    SimulationEngine::new(config, SimConfig { seed, start_ms: 0 }).unwrap()
}

fn quiet_engine() -> SimulationEngine {
    engine_with(quiet_config(), 7)
}

/// Create a live entity at `position` with a long lifespan.
fn inject(
    engine: &mut SimulationEngine,
    tag: EntityTag,
    position: Vec2,
    velocity: Vec2,
    size: f32,
) -> EntityId {
    let store = engine.store_mut();
    let entity = store.create(tag);
    entity.transform = Some(Transform::new(position, velocity, 0.0));
    entity.shape = Some(Shape::new(size, size, Color::WHITE));
    if tag.requires_lifespan() {
        entity.lifespan = Some(Lifespan::new(0, 50_000));
    }
    let id = entity.id();
    store.sync();
    id
}

fn player_effects(engine: &SimulationEngine) -> Vec<EffectKind> {
    engine
        .store()
        .get(engine.player_id())
        .and_then(|p| p.effects.as_ref())
        .map(|set| set.iter().map(|e| e.kind).collect())
        .unwrap_or_default()
}

fn count_events(events: &[SceneEvent], pred: impl Fn(&SceneEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(*e)).count()
}

// ---- Scene setup ----

#[test]
fn test_new_scene_has_player_and_walls() {
    let engine = engine_with(GameConfig::default(), 1);
    let store = engine.store();

    assert_eq!(store.query_by_tag(EntityTag::Player), &[engine.player_id()]);
    assert_eq!(store.query_by_tag(EntityTag::Wall).len(), 2);
    assert_eq!(engine.phase(), ScenePhase::Running);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.time_remaining_ms(), 60_000);
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = GameConfig {
        max_spawn_attempts: 0,
        ..GameConfig::default()
    };
    assert!(SimulationEngine::new(config, SimConfig::default()).is_err());
}

// ---- Collision rules ----

#[test]
fn test_player_enemy_collision_fires_once() {
    let mut engine = quiet_engine();
    engine.score_mut().set(10);
    let enemy = inject(&mut engine, EntityTag::Enemy, Vec2::new(380.0, 280.0), Vec2::ZERO, 40.0);

    let snap = engine.tick(16);

    assert_eq!(engine.score(), 7);
    assert!(!engine.store().is_alive(enemy));
    assert!(engine.store().get(enemy).is_none());
    assert_eq!(
        count_events(&snap.events, |e| matches!(e, SceneEvent::PlayerHit { .. })),
        1
    );
    assert_eq!(engine.phase(), ScenePhase::Running);
}

#[test]
fn test_player_hit_on_two_enemies_in_one_tick() {
    let mut engine = quiet_engine();
    engine.score_mut().set(10);
    inject(&mut engine, EntityTag::Enemy, Vec2::new(370.0, 270.0), Vec2::ZERO, 40.0);
    inject(&mut engine, EntityTag::Enemy, Vec2::new(390.0, 290.0), Vec2::ZERO, 40.0);

    engine.tick(16);

    assert_eq!(engine.score(), 4);
    assert!(engine.store().query_by_tag(EntityTag::Enemy).is_empty());
}

#[test]
fn test_score_depletion_ends_scene() {
    let mut engine = quiet_engine();
    inject(&mut engine, EntityTag::Enemy, Vec2::new(380.0, 280.0), Vec2::ZERO, 40.0);

    let snap = engine.tick(16);

    assert_eq!(engine.phase(), ScenePhase::GameOver);
    assert_eq!(engine.score(), 0);
    assert!(snap.hud.game_over);
    assert!(snap.events.contains(&SceneEvent::GameOver {
        reason: GameOverReason::ScoreDepleted
    }));

    // Frozen afterwards.
    let next = engine.tick(32);
    assert_eq!(next.tick, snap.tick);
    assert!(next.events.is_empty());
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_bullet_hits_enemy() {
    let mut engine = quiet_engine();
    let enemy = inject(&mut engine, EntityTag::Enemy, Vec2::new(100.0, 100.0), Vec2::ZERO, 40.0);
    let bullet = inject(&mut engine, EntityTag::Bullet, Vec2::new(110.0, 110.0), Vec2::ZERO, 20.0);

    let snap = engine.tick(16);

    assert_eq!(engine.score(), 5);
    assert!(engine.store().get(enemy).is_none());
    assert!(engine.store().get(bullet).is_none());
    assert_eq!(
        snap.events,
        vec![SceneEvent::EnemyShot {
            bullet: bullet.raw(),
            enemy: enemy.raw()
        }]
    );
}

#[test]
fn test_pickup_sequence_replaces_effect_and_clears_pickups() {
    let mut engine = quiet_engine();
    inject(&mut engine, EntityTag::SpeedBoost, Vec2::new(380.0, 280.0), Vec2::ZERO, 30.0);
    inject(&mut engine, EntityTag::SlownessDebuff, Vec2::new(10.0, 10.0), Vec2::ZERO, 30.0);
    inject(&mut engine, EntityTag::SpeedBoost, Vec2::new(700.0, 500.0), Vec2::ZERO, 30.0);

    let snap = engine.tick(16);
    assert_eq!(player_effects(&engine), vec![EffectKind::Speed]);
    assert!(snap.hud.speed_boost_active);
    let applied: Vec<u64> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            SceneEvent::EffectApplied {
                kind: EffectKind::Speed,
                duration_ms,
            } => Some(*duration_ms),
            _ => None,
        })
        .collect();
    assert_eq!(applied.len(), 1);
    assert!((9_000..15_000).contains(&applied[0]));
    assert!(engine.store().query_by_tag(EntityTag::SpeedBoost).is_empty());
    assert!(engine.store().query_by_tag(EntityTag::SlownessDebuff).is_empty());

    inject(&mut engine, EntityTag::SlownessDebuff, Vec2::new(385.0, 285.0), Vec2::ZERO, 30.0);
    inject(&mut engine, EntityTag::SpeedBoost, Vec2::new(20.0, 500.0), Vec2::ZERO, 30.0);
    inject(&mut engine, EntityTag::SlownessDebuff, Vec2::new(700.0, 20.0), Vec2::ZERO, 30.0);

    let snap = engine.tick(32);
    assert_eq!(player_effects(&engine), vec![EffectKind::Slowness]);
    assert!(snap.hud.slowness_active);
    assert!(!snap.hud.speed_boost_active);
    assert!(engine.store().query_by_tag(EntityTag::SpeedBoost).is_empty());
    assert!(engine.store().query_by_tag(EntityTag::SlownessDebuff).is_empty());
}

#[test]
fn test_enemies_separate_without_changing_velocity() {
    let mut engine = quiet_engine();
    let a = inject(&mut engine, EntityTag::Enemy, Vec2::new(100.0, 100.0), Vec2::ZERO, 40.0);
    let b = inject(&mut engine, EntityTag::Enemy, Vec2::new(110.0, 100.0), Vec2::ZERO, 40.0);

    engine.tick(16);

    let ra = engine.store().get(a).unwrap().rect().unwrap();
    let rb = engine.store().get(b).unwrap().rect().unwrap();
    assert!(!ra.overlaps(&rb));
    assert_eq!(engine.store().get(a).unwrap().transform.unwrap().velocity, Vec2::ZERO);
}

#[test]
fn test_enemy_pushed_out_of_wall() {
    let mut engine = engine_with(
        GameConfig {
            enemy_spawn_interval_ms: 1_000_000_000,
            ..GameConfig::default()
        },
        7,
    );
    // Left wall spans x 160..176, y 0..360.
    let enemy = inject(&mut engine, EntityTag::Enemy, Vec2::new(130.0, 100.0), Vec2::ZERO, 40.0);

    engine.tick(16);

    let rect = engine.store().get(enemy).unwrap().rect().unwrap();
    assert_eq!(rect.right(), 160.0);
}

// ---- Bounds ----

#[test]
fn test_enemy_bounces_off_edge() {
    let mut engine = quiet_engine();
    let enemy = inject(
        &mut engine,
        EntityTag::Enemy,
        Vec2::new(2.0, 100.0),
        Vec2::new(-120.0, 0.0),
        40.0,
    );

    engine.tick(100);

    let transform = engine.store().get(enemy).unwrap().transform.unwrap();
    assert_eq!(transform.position.x, 0.0);
    assert_eq!(transform.velocity, Vec2::new(120.0, 0.0));
}

#[test]
fn test_player_cannot_leave_world() {
    let mut engine = quiet_engine();
    engine.handle_action(&Action::start("LEFT")).unwrap();
    engine.handle_action(&Action::start("FORWARD")).unwrap();

    engine.tick(10_000);

    let position = engine.store().get(engine.player_id()).unwrap().transform.unwrap().position;
    assert_eq!(position, Vec2::ZERO);
}

#[test]
fn test_bullet_destroyed_at_boundary() {
    let mut engine = quiet_engine();
    engine
        .handle_action(&Action::start("SHOOT").with_pointer(Vec2::new(400.0, 0.0)))
        .unwrap();
    assert_eq!(engine.store().pending().count(), 1);

    engine.tick(16);
    assert_eq!(engine.store().query_by_tag(EntityTag::Bullet).len(), 1);

    engine.tick(1_000);
    assert!(engine.store().query_by_tag(EntityTag::Bullet).is_empty());
}

// ---- Movement ----

#[test]
fn test_speed_effect_doubles_player_speed() {
    let mut engine = quiet_engine();
    let player = engine.player_id();
    engine
        .store_mut()
        .get_mut(player)
        .and_then(|p| p.effects.as_mut())
        .unwrap()
        .add(Effect::new(EffectKind::Speed, 0, 9_000));
    engine.handle_action(&Action::start("RIGHT")).unwrap();

    engine.tick(100);
    let x = engine.store().get(player).unwrap().transform.unwrap().position.x;
    assert!((x - 435.0).abs() < 1e-3, "x = {x}");

    engine.handle_action(&Action::end("RIGHT")).unwrap();
    engine.tick(200);
    let after = engine.store().get(player).unwrap().transform.unwrap().position.x;
    assert_eq!(after, x);
}

// ---- Lifespan & effects ----

#[test]
fn test_enemy_expiry_fades_then_penalizes() {
    let mut engine = quiet_engine();
    engine.score_mut().set(5);
    let enemy = engine.store_mut().create(EntityTag::Enemy);
    enemy.transform = Some(Transform::new(Vec2::new(50.0, 50.0), Vec2::ZERO, 0.0));
    enemy.shape = Some(Shape::new(40.0, 40.0, Color::RED));
    enemy.lifespan = Some(Lifespan::new(0, 1_000));
    let enemy = enemy.id();
    engine.store_mut().sync();

    let mut previous = u8::MAX;
    for now in [100, 400, 700, 1_000] {
        engine.tick(now);
        let alpha = engine.store().get(enemy).unwrap().shape.unwrap().color.a;
        assert!(alpha <= previous);
        previous = alpha;
    }
    assert_eq!(previous, 0);
    assert!(engine.store().is_alive(enemy));

    let snap = engine.tick(1_001);
    assert!(engine.store().get(enemy).is_none());
    assert_eq!(engine.score(), 4);
    assert!(snap.events.contains(&SceneEvent::EnemyExpired { enemy: enemy.raw() }));
}

#[test]
fn test_effect_expires_during_tick() {
    let mut engine = quiet_engine();
    let player = engine.player_id();
    engine
        .store_mut()
        .get_mut(player)
        .and_then(|p| p.effects.as_mut())
        .unwrap()
        .add(Effect::new(EffectKind::Slowness, 0, 5_000));

    let snap = engine.tick(5_000);
    assert!(snap.hud.slowness_active);

    let snap = engine.tick(5_001);
    assert!(!snap.hud.slowness_active);
    assert!(player_effects(&engine).is_empty());
}

// ---- Timer & phases ----

#[test]
fn test_timer_game_over_exactly_once() {
    let mut engine = engine_with(
        GameConfig {
            round_duration_ms: 1_000,
            ..quiet_config()
        },
        7,
    );

    assert!(engine.tick(400).events.is_empty());
    assert_eq!(engine.time_remaining_ms(), 600);
    assert_eq!(engine.phase(), ScenePhase::Running);

    let snap = engine.tick(1_000);
    assert_eq!(engine.phase(), ScenePhase::GameOver);
    assert_eq!(engine.time_remaining_ms(), 0);
    assert_eq!(
        snap.events,
        vec![SceneEvent::GameOver {
            reason: GameOverReason::TimeUp
        }]
    );

    engine.set_game_over(GameOverReason::TimeUp);
    assert!(engine.tick(1_500).events.is_empty());
    assert_eq!(engine.phase(), ScenePhase::GameOver);
}

#[test]
fn test_game_over_clears_player_effects() {
    let mut engine = quiet_engine();
    let player = engine.player_id();
    engine
        .store_mut()
        .get_mut(player)
        .and_then(|p| p.effects.as_mut())
        .unwrap()
        .add(Effect::new(EffectKind::Speed, 0, 9_000));

    engine.set_game_over(GameOverReason::ScoreDepleted);
    engine.set_game_over(GameOverReason::TimeUp);

    assert!(player_effects(&engine).is_empty());
    let snap = engine.tick(16);
    assert_eq!(
        snap.events,
        vec![SceneEvent::GameOver {
            reason: GameOverReason::ScoreDepleted
        }]
    );
}

#[test]
fn test_pause_freezes_scene() {
    let mut engine = quiet_engine();
    engine.tick(100);
    assert_eq!(engine.time_remaining_ms(), 59_900);

    engine.handle_action(&Action::start("PAUSE")).unwrap();
    let snap = engine.tick(5_000);
    assert!(snap.hud.paused);
    assert_eq!(snap.hud.clock_label(), "0:59");
    assert_eq!(engine.time_remaining_ms(), 59_900);

    engine.handle_action(&Action::end("PAUSE")).unwrap();
    assert_eq!(engine.phase(), ScenePhase::Paused);

    engine.handle_action(&Action::start("PAUSE")).unwrap();
    engine.tick(5_100);
    assert_eq!(engine.phase(), ScenePhase::Running);
    assert_eq!(engine.time_remaining_ms(), 59_800);
}

// ---- Actions ----

#[test]
fn test_action_errors() {
    let mut engine = quiet_engine();

    assert_eq!(
        engine.handle_action(&Action::start("JUMP")),
        Err(ActionError::UnknownAction("JUMP".into()))
    );
    assert_eq!(
        engine.handle_action(&Action::start("SHOOT")),
        Err(ActionError::MissingPointer { action: "SHOOT" })
    );
    assert_eq!(engine.handle_action(&Action::end("SHOOT")), Ok(()));
    assert_eq!(engine.store().pending().count(), 0);
}

#[test]
fn test_no_shooting_while_paused() {
    let mut engine = quiet_engine();
    engine.handle_action(&Action::start("PAUSE")).unwrap();
    engine
        .handle_action(&Action::start("SHOOT").with_pointer(Vec2::new(0.0, 0.0)))
        .unwrap();
    assert_eq!(engine.store().pending().count(), 0);
}

// ---- Spawning ----

#[test]
fn test_spawn_exhaustion_leaves_no_candidate() {
    // The 50x50 player fills the 60x60 world: nothing else fits.
    let mut engine = engine_with(
        GameConfig {
            window_size: Vec2::new(60.0, 60.0),
            enemy_spawn_interval_ms: 100,
            ..quiet_config()
        },
        11,
    );

    let snap = engine.tick(100);

    assert!(snap.events.contains(&SceneEvent::SpawnSkipped {
        tag: EntityTag::Enemy
    }));
    assert_eq!(engine.store().all(), vec![engine.player_id()]);
    assert_eq!(snap.entities.len(), 1);
}

#[test]
fn test_spawned_entities_are_valid_on_arrival() {
    let config = GameConfig {
        enemy_spawn_interval_ms: 100,
        ..GameConfig::default()
    };
    let world = config.window_size;
    let mut engine = engine_with(config, 21);
    let mut seen: HashSet<u64> = engine.store().all().iter().map(|id| id.raw()).collect();
    let mut spawned = 0;

    for step in 1..=40 {
        let snap = engine.tick(step * 100);
        let rects: Vec<(u64, Rect)> = snap
            .entities
            .iter()
            .map(|e| (e.id, Rect::new(e.position, e.size)))
            .collect();

        for (id, rect) in rects.iter().filter(|(id, _)| !seen.contains(id)) {
            spawned += 1;
            assert!(rect.left() >= 0.0 && rect.top() >= 0.0);
            assert!(rect.right() <= world.x && rect.bottom() <= world.y);
            for (other_id, other) in &rects {
                assert!(other_id == id || !rect.overlaps(other), "E{id} spawned on E{other_id}");
            }
        }
        seen.extend(rects.iter().map(|(id, _)| *id));
    }

    assert!(spawned > 0);
}

// ---- Determinism ----

fn scripted_run(seed: u64) -> Vec<String> {
    let config = GameConfig {
        enemy_spawn_interval_ms: 500,
        ..GameConfig::default()
    };
    let mut engine = engine_with(config, seed);
    let mut frames = Vec::new();

    for step in 1..=300u64 {
        match step {
            10 => engine.handle_action(&Action::start("RIGHT")).unwrap(),
            60 => engine.handle_action(&Action::end("RIGHT")).unwrap(),
            80 => engine
                .handle_action(&Action::start("SHOOT").with_pointer(Vec2::new(100.0, 100.0)))
                .unwrap(),
            _ => {}
        }
        let snap = engine.tick(step * 16);
        frames.push(serde_json::to_string(&snap).unwrap());
    }
    frames
}

#[test]
fn test_determinism_same_seed() {
    assert_eq!(scripted_run(12_345), scripted_run(12_345), "snapshots diverged with same seed");
}

#[test]
fn test_determinism_different_seeds() {
    assert_ne!(scripted_run(111), scripted_run(222));
}
