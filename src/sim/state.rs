//! Game phases, events, and shared simulation types

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Which of the two games a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Tile-hopping jumper: fixed jump cycle over a generated track
    Jumper,
    /// Star catcher: steer left/right and catch stars before they fade
    StarCatcher,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Jumper => "jumper",
            Variant::StarCatcher => "star-catcher",
        }
    }
}

impl FromStr for Variant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jumper" | "jump" => Ok(Variant::Jumper),
            "star-catcher" | "stars" | "star" => Ok(Variant::StarCatcher),
            other => Err(SimError::InvalidArgument(format!(
                "unknown game variant: {other}"
            ))),
        }
    }
}

/// Top-level lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu visible, actor frozen at x = 0, input ignored
    Init,
    /// Active gameplay
    Playing,
    /// Run ended; waits for an explicit restart
    End,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Init => write!(f, "INIT"),
            GamePhase::Playing => write!(f, "PLAYING"),
            GamePhase::End => write!(f, "END"),
        }
    }
}

/// Control flags the host may toggle between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputIntent {
    AccelNegative,
    AccelPositive,
}

impl InputIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputIntent::AccelNegative => "accel-negative",
            InputIntent::AccelPositive => "accel-positive",
        }
    }
}

impl FromStr for InputIntent {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accel-negative" => Ok(InputIntent::AccelNegative),
            "accel-positive" => Ok(InputIntent::AccelPositive),
            other => Err(SimError::InvalidArgument(format!(
                "unrecognized input flag: {other}"
            ))),
        }
    }
}

/// Kind of entity announced to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A solid track tile
    Tile { index: usize },
    /// A star to catch
    Collectible,
}

/// Entity snapshot carried by spawn events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
}

/// Events emitted for the rendering/audio layer, in order of occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    ScoreChanged(u32),
    EntitySpawned(Entity),
    EntityRemoved(u32),
    /// Jumper landed on the given step index
    StepReached(usize),
    /// A full rise+fall jump cycle finished. The jumper reports one per hop;
    /// the star catcher reports at most one per tick.
    JumpCompleted,
}
