//! Session settings
//!
//! Supplied once at session construction and immutable for the run.
//! Missing JSON fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Tunable parameters for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Track (jumper) ===
    /// Number of tiles in a generated track
    pub track_length: usize,
    /// Lateral distance covered by one completed jump
    pub tile_width: f32,

    // === Jump cycle ===
    /// Height gained during the rise half of a jump
    pub jump_height: f32,
    /// Duration of one half (rise or fall) of a jump, in seconds
    pub jump_duration: f32,

    // === Lateral motion (star catcher) ===
    /// Maximum lateral speed magnitude
    pub max_move_speed: f32,
    /// Lateral acceleration while an input flag is held
    pub acceleration: f32,

    // === Collectibles ===
    /// Seconds a star survives before the run ends
    pub star_duration: f32,
    /// Pickup distance threshold
    pub capture_radius: f32,
    /// Margin added above the jump range when placing a star
    pub spawn_clearance: f32,

    // === Playfield ===
    /// Wrap edge for the actor and horizontal spawn bound
    pub half_width: f32,
    /// Baseline height of the actor and of star placement
    pub ground_y: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_length: DEFAULT_TRACK_LENGTH,
            tile_width: DEFAULT_TILE_WIDTH,

            jump_height: DEFAULT_JUMP_HEIGHT,
            jump_duration: DEFAULT_JUMP_DURATION,

            max_move_speed: DEFAULT_MAX_MOVE_SPEED,
            acceleration: DEFAULT_ACCELERATION,

            star_duration: DEFAULT_STAR_DURATION,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
            spawn_clearance: DEFAULT_SPAWN_CLEARANCE,

            half_width: DEFAULT_HALF_WIDTH,
            ground_y: DEFAULT_GROUND_Y,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the simulation undefined
    pub fn validate(&self) -> Result<()> {
        if self.track_length == 0 {
            return Err(SimError::InvalidConfiguration {
                field: "track_length",
                reason: "must be at least 1",
            });
        }

        let positive = [
            ("tile_width", self.tile_width),
            ("jump_height", self.jump_height),
            ("jump_duration", self.jump_duration),
            ("max_move_speed", self.max_move_speed),
            ("acceleration", self.acceleration),
            ("star_duration", self.star_duration),
            ("capture_radius", self.capture_radius),
            ("half_width", self.half_width),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidConfiguration {
                    field,
                    reason: "must be a positive finite number",
                });
            }
        }

        let finite = [
            ("spawn_clearance", self.spawn_clearance),
            ("ground_y", self.ground_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimError::InvalidConfiguration {
                    field,
                    reason: "must be a finite number",
                });
            }
        }

        Ok(())
    }
}
