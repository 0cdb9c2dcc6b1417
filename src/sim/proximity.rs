//! Proximity checks between the actor and collectibles
//!
//! No collision response: an entity is either within the capture radius or
//! it is not.

use glam::Vec2;

/// Result of a proximity check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Whether the entity is close enough to capture
    pub within_range: bool,
    /// Euclidean distance between the two points
    pub distance: f32,
}

/// Measure the distance from the actor to an entity and compare it with the
/// capture radius. The comparison is strict.
pub fn evaluate(actor_pos: Vec2, entity_pos: Vec2, capture_radius: f32) -> Proximity {
    let distance = actor_pos.distance(entity_pos);
    Proximity {
        within_range: distance < capture_radius,
        distance,
    }
}
