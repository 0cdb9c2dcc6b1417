//! Twin Arcade - simulation core for two endless arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, spawning, motion, game state)
//! - `settings`: Session configuration (JSON loadable)
//! - `error`: Configuration and call errors
//!
//! The core never touches rendering, audio, or input devices. Hosts feed it
//! elapsed time and input intent and render the events it returns.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameSession, InputIntent, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Track defaults
    pub const DEFAULT_TRACK_LENGTH: usize = 50;
    pub const DEFAULT_TILE_WIDTH: f32 = 40.0;

    /// Jump cycle defaults
    pub const DEFAULT_JUMP_HEIGHT: f32 = 120.0;
    pub const DEFAULT_JUMP_DURATION: f32 = 0.3;

    /// Lateral motion defaults
    pub const DEFAULT_MAX_MOVE_SPEED: f32 = 400.0;
    pub const DEFAULT_ACCELERATION: f32 = 600.0;

    /// Collectible defaults
    pub const DEFAULT_STAR_DURATION: f32 = 8.0;
    pub const DEFAULT_CAPTURE_RADIUS: f32 = 60.0;
    /// Extra height above the jump range so stars sit near the apex
    pub const DEFAULT_SPAWN_CLEARANCE: f32 = 33.0;

    /// Playfield half-width (wrap edge and spawn bounds)
    pub const DEFAULT_HALF_WIDTH: f32 = 480.0;
    pub const DEFAULT_GROUND_Y: f32 = 0.0;
}

/// Teleport a coordinate to the opposite edge once it leaves [-edge, edge]
#[inline]
pub fn wrap_coordinate(x: f32, edge: f32) -> f32 {
    if x < -edge {
        edge
    } else if x > edge {
        -edge
    } else {
        x
    }
}
