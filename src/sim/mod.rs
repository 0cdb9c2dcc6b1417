//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Elapsed time and input intent in, events out
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies

pub mod motion;
pub mod proximity;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod track;

pub use motion::{ActorState, JumpCycle, LateralLimits, sine_in, sine_out};
pub use proximity::{Proximity, evaluate};
pub use session::GameSession;
pub use spawner::{Collectible, SpawnParams, Spawner};
pub use state::{Entity, EntityKind, GameEvent, GamePhase, InputIntent, Variant};
pub use track::{Tile, TrackLayout};
