//! Game session: the phase state machine and the host-facing surface
//!
//! A session owns every piece of mutable game state for one player. The host
//! calls `request_start`/`request_restart`, toggles input intent between
//! ticks, and calls `on_tick` once per frame. Every call returns the events
//! it produced, in order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::motion::{ActorState, JumpCycle};
use super::spawner::{Collectible, SpawnParams, Spawner};
use super::state::{Entity, EntityKind, GameEvent, GamePhase, InputIntent, Variant};
use super::track::TrackLayout;
use crate::error::{Result, SimError};
use crate::settings::Settings;

/// One player's run of either game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) variant: Variant,
    pub(super) settings: Settings,
    /// Seed the RNG stream was created from
    seed: u64,
    pub(super) rng: Pcg32,
    pub(super) phase: GamePhase,
    pub(super) score: u32,
    pub(super) actor: ActorState,
    /// Current track (jumper); empty outside a run
    pub(super) track: TrackLayout,
    /// Entity ids of the solid tiles announced for the current track
    pub(super) tile_ids: Vec<u32>,
    /// Live star and its lifetime (star catcher)
    pub(super) spawner: Spawner,
    next_id: u32,
}

impl GameSession {
    /// Create a session in the INIT phase with a fixed seed
    pub fn new(variant: Variant, settings: Settings, seed: u64) -> Result<Self> {
        settings.validate()?;

        let jump = JumpCycle::new(settings.jump_height, settings.jump_duration);
        let actor = ActorState::new(jump, settings.ground_y);
        let spawner = Spawner::new(SpawnParams {
            duration: settings.star_duration,
            ground_y: settings.ground_y,
            jump_height: settings.jump_height,
            clearance: settings.spawn_clearance,
        });

        log::info!("{} session created with seed: {}", variant.as_str(), seed);

        Ok(Self {
            variant,
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Init,
            score: 0,
            actor,
            track: TrackLayout::default(),
            tile_ids: Vec::new(),
            spawner,
            next_id: 1,
        })
    }

    /// Create a session seeded from the thread RNG
    pub fn with_random_seed(variant: Variant, settings: Settings) -> Result<Self> {
        Self::new(variant, settings, rand::random())
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn actor(&self) -> &ActorState {
        &self.actor
    }

    pub fn track(&self) -> &TrackLayout {
        &self.track
    }

    pub fn collectible(&self) -> Option<&Collectible> {
        self.spawner.current()
    }

    /// Step count for display, capped at the track length
    pub fn displayed_step(&self) -> usize {
        self.actor.step_index.min(self.settings.track_length)
    }

    /// INIT -> PLAYING. Ignored in any other phase.
    pub fn request_start(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Init {
            log::debug!("Start ignored in phase {}", self.phase);
            return events;
        }
        self.begin_run(&mut events);
        events
    }

    /// END -> PLAYING. Ignored in any other phase.
    pub fn request_restart(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::End {
            log::debug!("Restart ignored in phase {}", self.phase);
            return events;
        }
        self.begin_run(&mut events);
        events
    }

    /// Set or clear one steering flag. Takes effect on the next tick.
    ///
    /// The jumper has no steering, so any intent is rejected there. Outside
    /// PLAYING, input is disabled and the call is ignored.
    pub fn set_input_intent(&mut self, intent: InputIntent, active: bool) -> Result<()> {
        if self.variant == Variant::Jumper {
            return Err(SimError::InvalidArgument(format!(
                "{} has no effect in the jumper",
                intent.as_str()
            )));
        }
        if self.phase != GamePhase::Playing {
            log::debug!("Input {} ignored in phase {}", intent.as_str(), self.phase);
            return Ok(());
        }

        match intent {
            InputIntent::AccelNegative => self.actor.accel_negative = active,
            InputIntent::AccelPositive => self.actor.accel_positive = active,
        }
        Ok(())
    }

    /// Same as [`Self::set_input_intent`], addressed by flag name
    pub fn set_input_intent_by_name(&mut self, name: &str, active: bool) -> Result<()> {
        let intent: InputIntent = name.parse()?;
        self.set_input_intent(intent, active)
    }

    /// Allocate a new entity ID
    pub(super) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Shared side effects of start and restart
    fn begin_run(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::Playing;
        events.push(GameEvent::PhaseChanged(GamePhase::Playing));

        self.score = 0;
        events.push(GameEvent::ScoreChanged(0));

        self.actor.reset();

        match self.variant {
            Variant::Jumper => self.generate_track(events),
            Variant::StarCatcher => {
                self.spawner.reset();
                self.spawn_collectible(events);
            }
        }

        log::info!("Run started ({})", self.variant.as_str());
    }

    /// Replace the track with a fresh layout and announce its solid tiles
    fn generate_track(&mut self, events: &mut Vec<GameEvent>) {
        self.track = TrackLayout::generate(self.settings.track_length, &mut self.rng);
        self.tile_ids.clear();

        let solid: Vec<usize> = self.track.solid_indices().collect();
        for index in solid {
            let id = self.next_entity_id();
            self.tile_ids.push(id);
            events.push(GameEvent::EntitySpawned(Entity {
                id,
                kind: EntityKind::Tile { index },
                pos: Vec2::new(index as f32 * self.settings.tile_width, 0.0),
            }));
        }

        log::debug!(
            "Generated track of {} tiles ({} solid)",
            self.track.len(),
            self.tile_ids.len()
        );
    }

    /// Place a new star and announce it
    pub(super) fn spawn_collectible(&mut self, events: &mut Vec<GameEvent>) {
        let id = self.next_entity_id();
        let star = self
            .spawner
            .spawn_next(id, self.settings.half_width, &mut self.rng);
        log::debug!("Star {} spawned at ({:.1}, {:.1})", id, star.pos.x, star.pos.y);
        events.push(GameEvent::EntitySpawned(Entity {
            id,
            kind: EntityKind::Collectible,
            pos: star.pos,
        }));
    }

    /// PLAYING -> INIT (jumper failure or completion)
    pub(super) fn enter_init(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::Init;
        events.push(GameEvent::PhaseChanged(GamePhase::Init));
        self.discard_entities(events);

        self.actor.halt();

        log::info!(
            "Run over at step {} (score {})",
            self.actor.step_index,
            self.score
        );
    }

    /// PLAYING -> END (star expired)
    pub(super) fn enter_end(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::End;
        events.push(GameEvent::PhaseChanged(GamePhase::End));
        self.discard_entities(events);

        self.actor.halt();

        log::info!("Game over (score {})", self.score);
    }

    /// Drop the track or star left over from the run
    fn discard_entities(&mut self, events: &mut Vec<GameEvent>) {
        self.track.clear();
        for id in self.tile_ids.drain(..) {
            events.push(GameEvent::EntityRemoved(id));
        }
        if let Some(star) = self.spawner.reset() {
            events.push(GameEvent::EntityRemoved(star.id));
        }
    }
}
