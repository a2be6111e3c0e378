//! Decelerating fling.

use web_time::Instant;

use super::{elapsed_secs, AnimationDelegate, AnimationState};
use crate::error::AnimationError;
use crate::geometry::{Bounds, Position};
use crate::view::View;

/// What a momentum animation does with its bounds region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Commit every frame; bounds are carried but not tested.
    #[default]
    Unchecked,
    /// Hold the view in place on frames that leave the bounds, as
    /// [`TranslateAnimation`](super::TranslateAnimation) does.
    Freeze,
}

/// Fling along a fixed direction under constant acceleration.
///
/// Distance after `t` seconds is `(v + a·t/2)·t`. With `a` opposing `v`
/// the fling stops after `-v/a` seconds; with `a == 0` it never stops on
/// its own and runs until something cancels it.
///
/// Bounds are not tested unless [`BoundsPolicy::Freeze`] is selected.
#[derive(Debug, Clone)]
pub struct MomentumAnimation {
    origin: Position,
    /// Unit length.
    direction: Position,
    velocity: f64,
    acceleration: f64,
    /// `None` when the fling has no natural stopping time.
    max_duration: Option<f64>,
    start_time: Instant,
    bounds: Option<Bounds>,
    bounds_policy: BoundsPolicy,
    state: AnimationState,
}

impl MomentumAnimation {
    /// Start a fling from the view's current position now.
    ///
    /// `acceleration` is signed: a negative value slows a positive
    /// `velocity`. `direction` is normalized and must have non-zero length.
    pub fn new(
        view: &impl View,
        velocity: f64,
        acceleration: f64,
        direction: Position,
        bounds: Option<Bounds>,
    ) -> Result<Self, AnimationError> {
        Self::with_start_time(
            view,
            velocity,
            acceleration,
            direction,
            bounds,
            Instant::now(),
        )
    }

    /// Start a fling from the view's current position at `start_time`.
    pub fn with_start_time(
        view: &impl View,
        velocity: f64,
        acceleration: f64,
        direction: Position,
        bounds: Option<Bounds>,
        start_time: Instant,
    ) -> Result<Self, AnimationError> {
        if !velocity.is_finite() || !acceleration.is_finite() {
            return Err(AnimationError::invalid(format!(
                "momentum needs finite velocity and acceleration, got \
                 v={velocity}, a={acceleration}"
            )));
        }
        let direction = direction.try_normalize().ok_or_else(|| {
            AnimationError::invalid(format!(
                "momentum direction must be non-zero and finite, got \
                 {direction}"
            ))
        })?;

        let max_duration = if acceleration == 0.0 {
            None
        } else {
            Some((-velocity / acceleration).max(0.0))
        };
        let state = if max_duration == Some(0.0) {
            AnimationState::Completed
        } else {
            AnimationState::Running
        };

        let origin = view.position();
        match max_duration {
            Some(secs) => log::debug!(
                "momentum from {origin} along {direction}: v={velocity}, \
                 a={acceleration}, stops after {secs:.3}s"
            ),
            None => log::debug!(
                "momentum from {origin} along {direction}: v={velocity}, \
                 unbounded"
            ),
        }

        Ok(Self {
            origin,
            direction,
            velocity,
            acceleration,
            max_duration,
            start_time,
            bounds,
            bounds_policy: BoundsPolicy::Unchecked,
            state,
        })
    }

    /// Set how the bounds region is applied.
    #[must_use]
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Seconds until the fling stops, or `None` if it never does.
    #[must_use]
    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Position captured when the fling started.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Unit direction of travel.
    #[must_use]
    pub fn direction(&self) -> Position {
        self.direction
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Distance traveled after `elapsed` seconds.
    #[must_use]
    pub fn distance_at(&self, elapsed: f64) -> f64 {
        (self.velocity + 0.5 * self.acceleration * elapsed) * elapsed
    }

    /// Position after `elapsed` seconds.
    #[must_use]
    pub fn position_at(&self, elapsed: f64) -> Position {
        self.origin + self.direction * self.distance_at(elapsed)
    }
}

impl AnimationDelegate for MomentumAnimation {
    fn update_view(&mut self, view: &mut dyn View, now: Instant) {
        if self.state == AnimationState::Completed {
            return;
        }

        let mut elapsed = elapsed_secs(self.start_time, now);
        if let Some(max) = self.max_duration {
            if elapsed >= max {
                elapsed = max;
                self.state = AnimationState::Completed;
                view.cancel_animation();
                log::debug!("momentum complete after {max:.3}s");
            }
        }

        let pos = self.position_at(elapsed);

        if self.bounds_policy == BoundsPolicy::Freeze {
            if let Some(bounds) = &self.bounds {
                if !bounds.contains_frame(pos.truncate(), view.frame_size()) {
                    log::trace!("momentum frame at {pos} out of bounds, holding");
                    return;
                }
            }
        }

        view.set_position(pos);
    }

    fn is_active(&self) -> bool {
        self.state == AnimationState::Running
    }

    fn name(&self) -> &'static str {
        "momentum"
    }
}
