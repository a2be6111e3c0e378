//! Frame driver: runs the view's attached animation once per frame.
//!
//! The render loop calls [`AnimationController::tick`] before drawing. There
//! is no timer thread; an animation only advances when a frame is drawn.
//! Gesture handlers start animations through the same controller so they
//! pick up the configured [`AnimationOptions`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use glam::DVec2;
use web_time::Instant;

use crate::animation::{BoundsPolicy, Fling, TranslateAnimation};
use crate::error::AnimationError;
use crate::geometry::{Bounds, Position};
use crate::options::AnimationOptions;
use crate::view::{MapView, View};

/// Drives view animations and starts new ones from gestures.
#[derive(Debug, Clone, Default)]
pub struct AnimationController {
    options: AnimationOptions,
    frames_driven: u64,
}

impl AnimationController {
    /// Create with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options.
    #[must_use]
    pub fn with_options(options: AnimationOptions) -> Self {
        Self {
            options,
            frames_driven: 0,
        }
    }

    /// Get options.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Get mutable access to options.
    pub fn options_mut(&mut self) -> &mut AnimationOptions {
        &mut self.options
    }

    /// Enable or disable animations.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
    }

    /// Check if animations are enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    /// Number of frames in which an animation was updated.
    #[must_use]
    pub fn frames_driven(&self) -> u64 {
        self.frames_driven
    }

    /// Run one frame of the view's animation with the clock sample `now`.
    ///
    /// The animation stays attached only while it is running and has
    /// neither cancelled itself nor been replaced during the update. A
    /// panic inside the update is logged and the animation dropped; the
    /// frame carries on.
    ///
    /// Returns `true` if an animation was updated.
    pub fn tick(&mut self, view: &mut MapView, now: Instant) -> bool {
        let Some(mut animation) = view.take_animation() else {
            return false;
        };
        let name = animation.name();
        self.frames_driven += 1;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            animation.update_view(view, now);
        }));

        match outcome {
            Ok(()) => {
                if !view.restore_animation(animation) {
                    log::debug!("animation '{name}' detached");
                }
            }
            Err(payload) => {
                log::error!(
                    "animation '{name}' failed during update: {}; dropping it",
                    panic_message(payload.as_ref())
                );
            }
        }
        true
    }

    /// Start a move of `view` to `target` over the configured duration.
    ///
    /// With animations disabled the view jumps straight to `target`, as
    /// long as that lies within `bounds`.
    pub fn translate_to(
        &self,
        view: &mut MapView,
        target: Position,
        bounds: Option<Bounds>,
    ) -> Result<(), AnimationError> {
        let animation = TranslateAnimation::new(
            &*view,
            target,
            self.options.translate_duration_secs,
            bounds.clone(),
        )?;

        if !self.options.enabled {
            view.clear_animation();
            let allowed = bounds.as_ref().is_none_or(|b| {
                b.contains_frame(target.truncate(), view.frame_size())
            });
            if allowed {
                view.set_position(target);
            }
            return Ok(());
        }

        view.attach_animation(Box::new(animation));
        Ok(())
    }

    /// Start a fling of `view` from a gesture release velocity.
    ///
    /// Returns `Ok(false)` when no animation was started: animations are
    /// disabled or the fling is slower than the configured minimum. Speeds
    /// above the configured maximum are capped.
    pub fn fling(
        &self,
        view: &mut MapView,
        velocity: DVec2,
        bounds: Option<Bounds>,
    ) -> Result<bool, AnimationError> {
        if !self.options.enabled {
            return Ok(false);
        }
        let Some(fling) = Fling::from_velocity(velocity) else {
            return Ok(false);
        };
        if fling.speed < self.options.min_fling_speed {
            log::debug!(
                "fling at {:.1} units/s below minimum {:.1}, ignored",
                fling.speed,
                self.options.min_fling_speed
            );
            return Ok(false);
        }

        let policy = if self.options.bound_momentum {
            BoundsPolicy::Freeze
        } else {
            BoundsPolicy::Unchecked
        };
        let animation = fling
            .clamped(self.options.max_fling_speed)
            .into_animation(&*view, self.options.fling_deceleration, bounds)?
            .with_bounds_policy(policy);

        view.attach_animation(Box::new(animation));
        Ok(true)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::DVec3;

    use super::*;
    use crate::animation::{AnimationDelegate, MomentumAnimation};

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    struct Exploding;

    impl AnimationDelegate for Exploding {
        fn update_view(&mut self, _view: &mut dyn View, _now: Instant) {
            panic!("boom");
        }

        fn is_active(&self) -> bool {
            true
        }

        fn name(&self) -> &'static str {
            "exploding"
        }
    }

    /// Nudges the view on every update and never finishes.
    struct Nudge;

    impl AnimationDelegate for Nudge {
        fn update_view(&mut self, view: &mut dyn View, _now: Instant) {
            view.set_position(DVec3::new(1.0, 1.0, 0.0));
        }

        fn is_active(&self) -> bool {
            true
        }
    }

    #[test]
    fn tick_without_animation_is_noop() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        assert!(!controller.tick(&mut view, Instant::now()));
        assert_eq!(controller.frames_driven(), 0);
    }

    #[test]
    fn translate_scenario_through_driver() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        let start = Instant::now();
        let anim = TranslateAnimation::with_start_time(
            &view,
            DVec3::new(10.0, 0.0, 0.0),
            2.0,
            None,
            start,
        )
        .unwrap();
        view.attach_animation(Box::new(anim));

        assert!(controller.tick(&mut view, start + secs(1.0)));
        assert!((view.position() - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
        assert!(view.is_animating());

        assert!(controller.tick(&mut view, start + secs(2.5)));
        assert_eq!(view.position(), DVec3::new(10.0, 0.0, 0.0));
        assert!(!view.has_animation());

        assert!(!controller.tick(&mut view, start + secs(3.0)));
        assert_eq!(controller.frames_driven(), 2);
    }

    #[test]
    fn panicking_animation_is_dropped_and_frame_continues() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::new(2.0, 3.0, 0.0));
        view.attach_animation(Box::new(Exploding));

        assert!(controller.tick(&mut view, Instant::now()));
        assert!(!view.has_animation());
        assert_eq!(view.position(), DVec3::new(2.0, 3.0, 0.0));

        // The next frame is unaffected.
        assert!(!controller.tick(&mut view, Instant::now()));
    }

    #[test]
    fn already_completed_animation_is_dropped() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        let anim =
            MomentumAnimation::new(&view, 0.0, -1.0, DVec3::X, None).unwrap();
        view.attach_animation(Box::new(anim));

        assert!(controller.tick(&mut view, Instant::now()));
        assert!(!view.has_animation());
        assert_eq!(view.position(), DVec3::ZERO);
    }

    #[test]
    fn running_animation_stays_attached() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        view.attach_animation(Box::new(Nudge));
        assert!(controller.tick(&mut view, Instant::now()));
        assert!(view.has_animation());
        assert_eq!(view.position(), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn translate_to_uses_configured_duration() {
        let controller = AnimationController::with_options(AnimationOptions {
            translate_duration_secs: 0.25,
            ..Default::default()
        });
        let mut view = MapView::new(DVec3::ZERO);
        controller
            .translate_to(&mut view, DVec3::new(4.0, 0.0, 0.0), None)
            .unwrap();
        assert_eq!(view.animation_name(), Some("translate"));
        assert_eq!(view.position(), DVec3::ZERO);
    }

    #[test]
    fn translate_to_snaps_when_disabled() {
        let mut controller = AnimationController::new();
        controller.set_enabled(false);
        let mut view = MapView::new(DVec3::ZERO);
        controller
            .translate_to(&mut view, DVec3::new(4.0, 0.0, 0.0), None)
            .unwrap();
        assert!(!view.has_animation());
        assert_eq!(view.position(), DVec3::new(4.0, 0.0, 0.0));

        let bounds = Bounds::mbr(DVec2::splat(-1.0), DVec2::splat(1.0)).unwrap();
        controller
            .translate_to(&mut view, DVec3::new(9.0, 0.0, 0.0), Some(bounds))
            .unwrap();
        assert_eq!(view.position(), DVec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn empty_polygon_bounds_hold_the_view_without_failing() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        let start = Instant::now();
        let anim = TranslateAnimation::with_start_time(
            &view,
            DVec3::new(4.0, 0.0, 0.0),
            2.0,
            Some(Bounds::Polygon(Vec::new())),
            start,
        )
        .unwrap();
        view.attach_animation(Box::new(anim));

        assert!(controller.tick(&mut view, start + secs(1.0)));
        assert!(view.is_animating());
        assert_eq!(view.position(), DVec3::ZERO);

        controller.set_enabled(false);
        controller
            .translate_to(
                &mut view,
                DVec3::new(4.0, 0.0, 0.0),
                Some(Bounds::Polygon(Vec::new())),
            )
            .unwrap();
        assert!(!view.has_animation());
        assert_eq!(view.position(), DVec3::ZERO);
    }

    #[test]
    fn translate_to_rejects_bad_duration() {
        let controller = AnimationController::with_options(AnimationOptions {
            translate_duration_secs: 0.0,
            ..Default::default()
        });
        let mut view = MapView::new(DVec3::ZERO);
        let err = controller
            .translate_to(&mut view, DVec3::X, None)
            .unwrap_err();
        assert!(matches!(err, AnimationError::InvalidParameter(_)));
        assert!(!view.has_animation());
    }

    #[test]
    fn fling_respects_minimum_speed_and_enabled() {
        let mut controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);

        assert!(!controller
            .fling(&mut view, DVec2::new(10.0, 0.0), None)
            .unwrap());
        assert!(!view.has_animation());

        assert!(controller
            .fling(&mut view, DVec2::new(0.0, 600.0), None)
            .unwrap());
        assert_eq!(view.animation_name(), Some("momentum"));

        view.clear_animation();
        controller.set_enabled(false);
        assert!(!controller
            .fling(&mut view, DVec2::new(0.0, 600.0), None)
            .unwrap());
        assert!(!view.has_animation());
    }

    #[test]
    fn fling_replaces_running_translate() {
        let controller = AnimationController::new();
        let mut view = MapView::new(DVec3::ZERO);
        controller
            .translate_to(&mut view, DVec3::new(100.0, 0.0, 0.0), None)
            .unwrap();
        assert!(controller
            .fling(&mut view, DVec2::new(-500.0, 0.0), None)
            .unwrap());
        assert_eq!(view.animation_name(), Some("momentum"));
    }

    #[test]
    fn bounded_fling_holds_inside_box() {
        let mut controller = AnimationController::with_options(AnimationOptions {
            bound_momentum: true,
            fling_deceleration: 100.0,
            ..Default::default()
        });
        let bounds =
            Bounds::mbr(DVec2::splat(-50.0), DVec2::splat(50.0)).unwrap();
        let mut view = MapView::new(DVec3::ZERO);
        let start = Instant::now();
        assert!(controller
            .fling(&mut view, DVec2::new(200.0, 0.0), Some(bounds))
            .unwrap());

        let mut t = 0.0;
        while view.has_animation() {
            t += 1.0 / 60.0;
            let _ = controller.tick(&mut view, start + secs(t));
            assert!(view.position().x <= 50.0);
            assert!(t < 10.0, "fling never finished");
        }
    }
}
