//! Actor kinematics: lateral steering and the repeating jump cycle
//!
//! Lateral motion integrates acceleration from two independent input flags,
//! saturates the speed, and teleports across the playfield edges. Vertical
//! motion is a fixed rise/fall tween that loops forever while playing.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap_coordinate;

/// Sine ease-out: fast start, slow finish
#[inline]
pub fn sine_out(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * FRAC_PI_2).sin()
}

/// Sine ease-in: slow start, fast finish
#[inline]
pub fn sine_in(t: f32) -> f32 {
    1.0 - (t.clamp(0.0, 1.0) * FRAC_PI_2).cos()
}

/// Looping two-phase jump: rise with ease-out, fall with ease-in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpCycle {
    pub height: f32,
    /// Duration of each half
    pub duration: f32,
    /// Time into the current cycle, in [0, 2 * duration)
    elapsed: f32,
}

impl JumpCycle {
    pub fn new(height: f32, duration: f32) -> Self {
        Self {
            height,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning how many full cycles finished
    pub fn advance(&mut self, dt: f32) -> u64 {
        let period = self.duration * 2.0;
        let total = self.elapsed + dt;
        if total < period {
            self.elapsed = total;
            return 0;
        }

        // Closed form: a loop of subtractions never ends once period < ulp(total)
        let mut remainder = total.rem_euclid(period);
        if remainder >= period {
            remainder = 0.0;
        }
        self.elapsed = remainder;
        (((total - remainder) / period).round() as u64).max(1)
    }

    /// Height above the baseline at the current point in the cycle
    pub fn offset(&self) -> f32 {
        if self.elapsed < self.duration {
            self.height * sine_out(self.elapsed / self.duration)
        } else {
            let t = (self.elapsed - self.duration) / self.duration;
            self.height - self.height * sine_in(t)
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Limits applied to lateral steering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralLimits {
    pub acceleration: f32,
    pub max_speed: f32,
    /// Half-width of the playfield
    pub edge: f32,
}

/// The controllable actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    pub pos: Vec2,
    /// Signed lateral speed
    pub vel_x: f32,
    pub accel_negative: bool,
    pub accel_positive: bool,
    pub jump: JumpCycle,
    /// Baseline height the jump is measured from
    pub ground_y: f32,
    /// Tiles advanced so far (jumper only)
    pub step_index: usize,
}

impl ActorState {
    pub fn new(jump: JumpCycle, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(0.0, ground_y),
            vel_x: 0.0,
            accel_negative: false,
            accel_positive: false,
            jump,
            ground_y,
            step_index: 0,
        }
    }

    /// Integrate lateral velocity and position for one tick
    pub fn steer(&mut self, dt: f32, limits: &LateralLimits) {
        let mut accel = 0.0;
        if self.accel_positive {
            accel += limits.acceleration;
        }
        if self.accel_negative {
            accel -= limits.acceleration;
        }
        self.vel_x += accel * dt;

        // Saturate magnitude, keep direction
        if self.vel_x.abs() > limits.max_speed {
            self.vel_x = limits.max_speed * self.vel_x.signum();
        }

        self.pos.x = wrap_coordinate(self.pos.x + self.vel_x * dt, limits.edge);
    }

    /// Advance the jump cycle and update height. Returns completed cycles.
    pub fn advance_jump(&mut self, dt: f32) -> u64 {
        let completed = self.jump.advance(dt);
        self.pos.y = self.ground_y + self.jump.offset();
        completed
    }

    /// Move to the origin, drop input, and restart the jump cycle
    pub fn reset(&mut self) {
        self.halt();
        self.jump.reset();
        self.pos = Vec2::new(0.0, self.ground_y);
        self.step_index = 0;
    }

    /// Stop lateral motion at x = 0 and clear input. The jump cycle is held.
    pub fn halt(&mut self) {
        self.accel_negative = false;
        self.accel_positive = false;
        self.vel_x = 0.0;
        self.pos.x = 0.0;
    }
}
