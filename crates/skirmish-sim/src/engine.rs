//! Simulation engine: the scene orchestrator.
//!
//! `SimulationEngine` owns the entity store, applies input actions, runs all
//! systems in a fixed order and produces `SceneSnapshot`s. Completely headless:
//! time comes in as host millisecond timestamps, randomness from a seeded
//! ChaCha8 stream.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::Action;
use skirmish_core::config::GameConfig;
use skirmish_core::enums::{ActionKind, ActionState, GameOverReason, ScenePhase};
use skirmish_core::error::{ActionError, ConfigError};
use skirmish_core::events::SceneEvent;
use skirmish_core::state::SceneSnapshot;

use crate::context::FrameClock;
use crate::score::ScoreState;
use crate::store::{EntityId, EntityStore};
use crate::systems;
use crate::systems::spawner::SpawnSchedule;
use crate::systems::timer::Countdown;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed. Same seed and same inputs give the same scene.
    pub seed: u64,
    /// Host timestamp at scene start (ms).
    pub start_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_ms: 0,
        }
    }
}

/// The simulation engine. Owns the store and all scene state.
pub struct SimulationEngine {
    config: GameConfig,
    store: EntityStore,
    rng: ChaCha8Rng,
    phase: ScenePhase,
    score: ScoreState,
    countdown: Countdown,
    schedule: SpawnSchedule,
    player: EntityId,
    last_frame_ms: u64,
    tick: u64,
    events: Vec<SceneEvent>,
}

impl SimulationEngine {
    /// Validate `config` and build a new scene with the player and walls live.
    pub fn new(config: GameConfig, sim: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut store = EntityStore::new();
        let player = world_setup::setup_scene(&mut store, &config);
        store.sync();

        Ok(Self {
            countdown: Countdown::new(config.round_duration_ms),
            config,
            store,
            rng: ChaCha8Rng::seed_from_u64(sim.seed),
            phase: ScenePhase::Running,
            score: ScoreState::default(),
            schedule: SpawnSchedule::new(sim.start_ms),
            player,
            last_frame_ms: sim.start_ms,
            tick: 0,
            events: Vec::new(),
        })
    }

    /// Apply one input action between ticks.
    pub fn handle_action(&mut self, action: &Action) -> Result<(), ActionError> {
        let Some(kind) = ActionKind::parse(&action.name) else {
            log::warn!("rejected unknown action {:?}", action.name);
            return Err(ActionError::UnknownAction(action.name.clone()));
        };
        let pressed = action.state == ActionState::Start;

        match kind {
            ActionKind::Forward | ActionKind::Backward | ActionKind::Left | ActionKind::Right => {
                self.set_intent(kind, pressed);
            }
            ActionKind::Pause => {
                if pressed {
                    self.toggle_pause();
                }
            }
            ActionKind::Shoot => {
                if !pressed {
                    return Ok(());
                }
                let Some(target) = action.pointer else {
                    log::warn!("rejected {} without pointer position", kind.as_str());
                    return Err(ActionError::MissingPointer {
                        action: kind.as_str(),
                    });
                };
                if self.phase == ScenePhase::Running {
                    world_setup::spawn_bullet(
                        &mut self.store,
                        &self.config,
                        self.player,
                        target,
                        self.last_frame_ms,
                    );
                }
            }
        }

        Ok(())
    }

    /// Advance the scene to `now_ms` and return the resulting snapshot.
    pub fn tick(&mut self, now_ms: u64) -> SceneSnapshot {
        let clock = FrameClock::new(now_ms, now_ms.saturating_sub(self.last_frame_ms));

        if self.phase == ScenePhase::Running {
            let time_up = self.run_systems(&clock);
            self.store.sync();

            if self.score.is_depleted() {
                self.set_game_over(GameOverReason::ScoreDepleted);
            }
            if time_up {
                self.set_game_over(GameOverReason::TimeUp);
            }
            self.tick += 1;
        }
        self.last_frame_ms = now_ms;

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.store,
            self.tick,
            self.phase,
            &self.score,
            &self.countdown,
            self.player,
            events,
        )
    }

    /// End the scene. Clears the player's effects. Idempotent.
    pub fn set_game_over(&mut self, reason: GameOverReason) {
        if self.phase == ScenePhase::GameOver {
            return;
        }

        self.phase = ScenePhase::GameOver;
        if let Some(effects) = self.store.get_mut(self.player).and_then(|p| p.effects.as_mut()) {
            effects.clear();
        }
        log::info!("game over ({reason:?}) with score {}", self.score.value());
        self.events.push(SceneEvent::GameOver { reason });
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn score(&self) -> i32 {
        self.score.value()
    }

    pub fn time_remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Mutable store access for hosts and tests that inject entities. Call
    /// `EntityStore::sync` before ticking if the injected entities must take
    /// part in this tick.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }

    fn set_intent(&mut self, kind: ActionKind, pressed: bool) {
        let Some(input) = self.store.get_mut(self.player).and_then(|p| p.input.as_mut()) else {
            log::warn!("{} has no Input; ignoring {}", self.player, kind.as_str());
            return;
        };

        match kind {
            ActionKind::Forward => input.forward = pressed,
            ActionKind::Backward => input.backward = pressed,
            ActionKind::Left => input.left = pressed,
            ActionKind::Right => input.right = pressed,
            ActionKind::Pause | ActionKind::Shoot => {}
        }
    }

    fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            ScenePhase::Running => ScenePhase::Paused,
            ScenePhase::Paused => ScenePhase::Running,
            ScenePhase::GameOver => return,
        };
        log::info!("scene {:?} at tick {}", self.phase, self.tick);
    }

    /// Run all systems in order. Returns true if the countdown ran out.
    fn run_systems(&mut self, clock: &FrameClock) -> bool {
        // 1. Movement integration
        systems::movement::run(&mut self.store, &self.config, clock);
        // 2. Bounds and pairwise collision rules
        systems::collision::run(
            &mut self.store,
            &self.config,
            clock,
            &mut self.rng,
            &mut self.score,
            &mut self.events,
        );
        // 3. Enemy and pickup spawning
        systems::spawner::run(
            &mut self.store,
            &self.config,
            clock,
            &mut self.rng,
            &mut self.schedule,
            self.player,
            &mut self.events,
        );
        // 4. Lifespan fade and expiry
        systems::lifespan::run(
            &mut self.store,
            &self.config,
            clock,
            &mut self.score,
            &mut self.events,
        );
        // 5. Effect expiry
        systems::effects::run(&mut self.store, clock, &mut self.events);
        // 6. Round countdown
        systems::timer::run(&mut self.countdown, clock)
    }
}
