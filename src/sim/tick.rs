//! Per-frame simulation step
//!
//! Advances the actor, the track or spawner, and proximity checks for one
//! host frame. Nothing happens outside PLAYING.

use super::proximity;
use super::session::GameSession;
use super::spawner::Collectible;
use super::state::{GameEvent, GamePhase, Variant};
use super::track::Tile;
use crate::error::{Result, SimError};
use crate::sim::motion::LateralLimits;

impl GameSession {
    /// Advance the simulation by `dt` seconds and return what happened
    pub fn on_tick(&mut self, dt: f32) -> Result<Vec<GameEvent>> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "elapsed time must be a non-negative finite number, got {dt}"
            )));
        }

        let mut events = Vec::new();
        if self.phase != GamePhase::Playing {
            return Ok(events);
        }

        match self.variant {
            Variant::Jumper => self.tick_jumper(dt, &mut events),
            Variant::StarCatcher => self.tick_star_catcher(dt, &mut events),
        }
        Ok(events)
    }

    /// Hop one tile per finished jump and check where the actor landed
    fn tick_jumper(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let completed = self.actor.advance_jump(dt);

        // Every hop either ends the run or lands short of the end, so at most
        // `track_length` hops can matter no matter how large `dt` is
        let remaining = self
            .settings
            .track_length
            .saturating_sub(self.actor.step_index);
        let hops = completed.min(remaining as u64);

        for _ in 0..hops {
            events.push(GameEvent::JumpCompleted);

            self.actor.step_index += 1;
            let step = self.actor.step_index;
            self.actor.pos.x = step as f32 * self.settings.tile_width;
            events.push(GameEvent::StepReached(step));

            let length = self.settings.track_length;
            if step >= length {
                // Finished the track; same destination as a fall
                self.set_score(length as u32, events);
                self.enter_init(events);
                return;
            }

            if self.track.get(step) == Some(Tile::Empty) {
                log::debug!("Fell into gap at tile {}", step);
                self.enter_init(events);
                return;
            }

            self.set_score(step as u32, events);
        }
    }

    /// Steer, check for a catch, then age the live star
    fn tick_star_catcher(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        let limits = LateralLimits {
            acceleration: self.settings.acceleration,
            max_speed: self.settings.max_move_speed,
            edge: self.settings.half_width,
        };
        self.actor.steer(dt, &limits);

        // One notification per tick, however many cycles a long frame covered
        if self.actor.advance_jump(dt) > 0 {
            events.push(GameEvent::JumpCompleted);
        }

        let caught = self.spawner.current().and_then(|star| {
            let result =
                proximity::evaluate(self.actor.pos, star.pos, self.settings.capture_radius);
            result.within_range.then_some((star.id, result.distance))
        });

        if let Some((id, distance)) = caught {
            self.spawner.take();
            events.push(GameEvent::EntityRemoved(id));
            log::debug!("Star {} caught at distance {:.1}", id, distance);

            self.spawn_collectible(events);
            self.set_score(self.score + 1, events);
        }

        self.spawner.tick(dt);
        if self.spawner.current().is_some_and(Collectible::is_expired) {
            self.enter_end(events);
        }
    }

    fn set_score(&mut self, score: u32, events: &mut Vec<GameEvent>) {
        if score != self.score {
            self.score = score;
            events.push(GameEvent::ScoreChanged(score));
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use crate::settings::Settings;
    use crate::sim::state::{GameEvent, GamePhase, InputIntent, Variant};
    use crate::sim::track::{Tile, TrackLayout};
    use crate::sim::GameSession;
    use std::collections::BTreeSet;

    fn jumper(track_length: usize) -> GameSession {
        let settings = Settings {
            track_length,
            ..Default::default()
        };
        GameSession::new(Variant::Jumper, settings, 12345).unwrap()
    }

    fn stars() -> GameSession {
        GameSession::new(Variant::StarCatcher, Settings::default(), 12345).unwrap()
    }

    /// Move the live star somewhere the actor cannot reach
    fn park_star(session: &mut GameSession) {
        if let Some(star) = session.spawner.current_mut() {
            star.pos = Vec2::new(480.0, 10_000.0);
        }
    }

    fn spawned_ids(events: &[GameEvent]) -> BTreeSet<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EntitySpawned(entity) => Some(entity.id),
                _ => None,
            })
            .collect()
    }

    fn removed_ids(events: &[GameEvent]) -> BTreeSet<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EntityRemoved(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn jump_period(session: &GameSession) -> f32 {
        session.settings().jump_duration * 2.0
    }

    #[test]
    fn test_tick_outside_playing_is_noop() {
        let mut session = stars();
        assert!(session.on_tick(1.0).unwrap().is_empty());
        assert_eq!(session.actor().jump.elapsed(), 0.0);
    }

    #[test]
    fn test_tick_rejects_bad_elapsed() {
        let mut session = stars();
        assert!(session.on_tick(-0.1).is_err());
        assert!(session.on_tick(f32::NAN).is_err());
        assert!(session.on_tick(f32::INFINITY).is_err());
    }

    #[test]
    fn test_jumper_falls_into_gap() {
        use Tile::*;
        let mut session = jumper(10);
        session.request_start();
        session.track = TrackLayout::from_tiles(vec![
            Solid, Empty, Solid, Solid, Empty, Solid, Solid, Solid, Solid, Empty,
        ])
        .unwrap();
        session.actor.step_index = 8;

        let period = jump_period(&session);
        let events = session.on_tick(period + 0.01).unwrap();

        let step = events
            .iter()
            .position(|e| *e == GameEvent::StepReached(9))
            .expect("step reached");
        let init = events
            .iter()
            .position(|e| *e == GameEvent::PhaseChanged(GamePhase::Init))
            .expect("back to init");
        assert!(step < init);
        assert_eq!(session.phase(), GamePhase::Init);
        assert!(session.track().is_empty());
    }

    #[test]
    fn test_jumper_completes_track() {
        let mut session = jumper(3);
        session.request_start();
        session.track = TrackLayout::from_tiles(vec![Tile::Solid; 3]).unwrap();

        let period = jump_period(&session);
        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend(session.on_tick(period + 0.001).unwrap());
        }

        assert!(events.contains(&GameEvent::StepReached(3)));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GameEvent::PhaseChanged(GamePhase::Init))
                .count(),
            1
        );
        assert_eq!(session.phase(), GamePhase::Init);
        assert_eq!(session.score(), 3);
        assert_eq!(session.displayed_step(), 3);
    }

    #[test]
    fn test_jumper_scores_each_solid_landing() {
        let mut session = jumper(10);
        session.request_start();
        session.track = TrackLayout::from_tiles(vec![Tile::Solid; 10]).unwrap();

        let period = jump_period(&session);
        let events = session.on_tick(period + 0.001).unwrap();
        assert_eq!(
            events,
            vec![
                GameEvent::JumpCompleted,
                GameEvent::StepReached(1),
                GameEvent::ScoreChanged(1),
            ]
        );
        assert_eq!(session.actor().pos.x, session.settings().tile_width);
    }

    #[test]
    fn test_jumper_restarts_from_init() {
        let mut session = jumper(2);
        session.request_start();
        let period = jump_period(&session);
        session.on_tick(period * 2.0 + 0.01).unwrap();
        assert_eq!(session.phase(), GamePhase::Init);

        let events = session.request_start();
        assert_eq!(events[0], GameEvent::PhaseChanged(GamePhase::Playing));
        assert_eq!(session.score(), 0);
        assert_eq!(session.actor().step_index, 0);
        assert_eq!(session.track().len(), 2);
    }

    #[test]
    fn test_star_expires_once() {
        let mut session = stars();
        session.request_start();
        park_star(&mut session);

        let mut events = Vec::new();
        for _ in 0..81 {
            events.extend(session.on_tick(0.1).unwrap());
        }

        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GameEvent::PhaseChanged(GamePhase::End))
                .count(),
            1
        );
        assert_eq!(session.phase(), GamePhase::End);
        assert!(session.collectible().is_none());
    }

    #[test]
    fn test_star_not_expired_before_duration() {
        let mut session = stars();
        session.request_start();
        park_star(&mut session);

        for _ in 0..70 {
            session.on_tick(0.1).unwrap();
        }
        assert_eq!(session.phase(), GamePhase::Playing);
        let ratio = session.collectible().unwrap().lifetime_ratio;
        assert!(ratio > 0.8 && ratio < 0.9);
    }

    #[test]
    fn test_catching_star_scores_and_respawns() {
        let mut session = stars();
        session.request_start();
        let old_id = session.collectible().unwrap().id;
        if let Some(star) = session.spawner.current_mut() {
            star.pos = Vec2::new(10.0, 0.0);
        }

        let events = session.on_tick(0.001).unwrap();
        assert!(events.contains(&GameEvent::EntityRemoved(old_id)));
        assert!(events.contains(&GameEvent::ScoreChanged(1)));
        assert_eq!(session.score(), 1);

        let new_star = session.collectible().unwrap();
        assert_ne!(new_star.id, old_id);
        assert!(new_star.lifetime_ratio < 0.001);
        // Exactly one catch per tick
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EntityRemoved(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_end_freezes_and_restart_resets() {
        let mut session = stars();
        session.request_start();
        session
            .set_input_intent(InputIntent::AccelPositive, true)
            .unwrap();
        park_star(&mut session);
        for _ in 0..90 {
            session.on_tick(0.1).unwrap();
        }
        assert_eq!(session.phase(), GamePhase::End);
        assert_eq!(session.actor().pos.x, 0.0);
        assert_eq!(session.actor().vel_x, 0.0);
        assert!(!session.actor().accel_positive);

        // Timers hold outside PLAYING
        let held = session.actor().jump.elapsed();
        assert!(session.on_tick(0.5).unwrap().is_empty());
        assert_eq!(session.actor().jump.elapsed(), held);

        // Start is only valid from INIT
        assert!(session.request_start().is_empty());

        let events = session.request_restart();
        assert_eq!(events[0], GameEvent::PhaseChanged(GamePhase::Playing));
        assert_eq!(events[1], GameEvent::ScoreChanged(0));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.actor().jump.elapsed(), 0.0);
        assert!(session.collectible().is_some());
    }

    #[test]
    fn test_jump_completions_reported_in_star_catcher() {
        let mut session = stars();
        session.request_start();
        park_star(&mut session);
        let period = jump_period(&session);
        let events = session.on_tick(period + 0.001).unwrap();
        assert!(events.contains(&GameEvent::JumpCompleted));
    }

    #[test]
    fn test_jumper_fall_removes_every_tile() {
        let mut session = jumper(10);
        let started = session.request_start();
        let tiles = spawned_ids(&started);
        assert!(!tiles.is_empty());

        session.track = TrackLayout::from_tiles(vec![Tile::Solid, Tile::Empty]).unwrap();
        let period = jump_period(&session);
        let events = session.on_tick(period + 0.01).unwrap();

        assert_eq!(session.phase(), GamePhase::Init);
        assert_eq!(removed_ids(&events), tiles);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EntityRemoved(_)))
                .count(),
            tiles.len()
        );
    }

    #[test]
    fn test_jumper_completion_removes_every_tile() {
        let mut session = jumper(3);
        let tiles = spawned_ids(&session.request_start());
        session.track = TrackLayout::from_tiles(vec![Tile::Solid; 3]).unwrap();

        let period = jump_period(&session);
        let mut events = Vec::new();
        for _ in 0..3 {
            events.extend(session.on_tick(period + 0.001).unwrap());
        }

        assert_eq!(session.phase(), GamePhase::Init);
        assert_eq!(removed_ids(&events), tiles);
    }

    #[test]
    fn test_star_expiry_removes_live_star() {
        let mut session = stars();
        let stars_spawned = spawned_ids(&session.request_start());
        assert_eq!(stars_spawned.len(), 1);
        park_star(&mut session);

        let mut events = Vec::new();
        for _ in 0..81 {
            events.extend(session.on_tick(0.1).unwrap());
        }

        assert_eq!(session.phase(), GamePhase::End);
        assert_eq!(removed_ids(&events), stars_spawned);
        let end = events
            .iter()
            .position(|e| *e == GameEvent::PhaseChanged(GamePhase::End))
            .expect("ended");
        assert!(matches!(events[end + 1], GameEvent::EntityRemoved(_)));
    }

    #[test]
    fn test_tiny_jump_duration_returns() {
        let settings = Settings {
            jump_duration: 1e-12,
            ..Default::default()
        };
        let mut session = GameSession::new(Variant::StarCatcher, settings, 7).unwrap();
        session.request_start();
        park_star(&mut session);

        let events = session.on_tick(1.0 / 60.0).unwrap();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GameEvent::JumpCompleted)
                .count(),
            1
        );
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_huge_elapsed_ends_star_run() {
        let mut session = stars();
        session.request_start();
        park_star(&mut session);

        let events = session.on_tick(1e9).unwrap();
        assert!(events.len() < 10);
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::End)));
        let edge = session.settings().half_width;
        assert!(session.actor().pos.x.abs() <= edge);
    }

    #[test]
    fn test_huge_elapsed_ends_jumper_run() {
        let mut session = jumper(50);
        session.request_start();

        let events = session.on_tick(1e9).unwrap();
        assert_eq!(session.phase(), GamePhase::Init);
        let steps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::StepReached(_)))
            .count();
        assert!((1..=50).contains(&steps));
    }

    #[test]
    fn test_init_keeps_height_in_step_with_held_jump() {
        let mut session = jumper(10);
        session.request_start();
        session.track = TrackLayout::from_tiles(vec![Tile::Solid, Tile::Empty]).unwrap();

        let period = jump_period(&session);
        session.on_tick(period + 0.05).unwrap();
        assert_eq!(session.phase(), GamePhase::Init);

        let actor = session.actor();
        assert!(actor.jump.elapsed() > 0.0);
        assert_eq!(actor.pos.x, 0.0);
        assert!((actor.pos.y - (actor.ground_y + actor.jump.offset())).abs() < 1e-6);
        assert!(actor.pos.y > actor.ground_y);
    }

    proptest! {
        #[test]
        fn prop_actor_stays_on_playfield(
            inputs in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.1), 1..300)
        ) {
            let mut session = stars();
            session.request_start();
            let edge = session.settings().half_width;
            let max_speed = session.settings().max_move_speed;
            for (neg, pos, dt) in inputs {
                session.set_input_intent(InputIntent::AccelNegative, neg).unwrap();
                session.set_input_intent(InputIntent::AccelPositive, pos).unwrap();
                session.on_tick(dt).unwrap();
                let actor = session.actor();
                prop_assert!(actor.pos.x >= -edge && actor.pos.x <= edge);
                prop_assert!(actor.vel_x.abs() <= max_speed);
            }
        }
    }
}
