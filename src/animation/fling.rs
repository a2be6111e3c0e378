//! Turning a gesture's release velocity into a momentum animation.

use glam::{DVec2, DVec3};

use super::MomentumAnimation;
use crate::error::AnimationError;
use crate::geometry::Bounds;
use crate::view::View;

/// Release velocity of a pan gesture, split into speed and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    /// Model units per second, always > 0.
    pub speed: f64,
    /// Unit direction in the xy-plane.
    pub direction: DVec3,
}

impl Fling {
    /// Split a planar velocity. Returns `None` for a zero or non-finite
    /// velocity, which has no direction to fling in.
    #[must_use]
    pub fn from_velocity(velocity: DVec2) -> Option<Self> {
        let speed = velocity.length();
        if !speed.is_finite() || speed == 0.0 {
            return None;
        }
        Some(Self {
            speed,
            direction: (velocity / speed).extend(0.0),
        })
    }

    /// Cap the speed, keeping the direction.
    #[must_use]
    pub fn clamped(self, max_speed: f64) -> Self {
        Self {
            speed: self.speed.min(max_speed),
            ..self
        }
    }

    /// Momentum animation that slows this fling by `deceleration` units/s².
    ///
    /// The sign of `deceleration` is ignored; it always opposes motion.
    pub fn into_animation(
        self,
        view: &impl View,
        deceleration: f64,
        bounds: Option<Bounds>,
    ) -> Result<MomentumAnimation, AnimationError> {
        MomentumAnimation::new(
            view,
            self.speed,
            -deceleration.abs(),
            self.direction,
            bounds,
        )
    }
}
