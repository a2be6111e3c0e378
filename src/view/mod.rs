//! The camera view that animations move.
//!
//! [`View`] is the contract an animation sees while it updates: read and
//! write the position, detach itself, and query the visible frame size for
//! bounds checks. [`MapView`] is the concrete view a render surface owns;
//! it also holds the (single) attached animation.

#[cfg(test)]
pub(crate) mod testing;

use glam::DVec2;

use crate::animation::AnimationDelegate;
use crate::geometry::Position;

/// Operations an animation may perform on the view it drives.
pub trait View {
    /// Current camera position.
    fn position(&self) -> Position;

    /// Move the camera.
    fn set_position(&mut self, position: Position);

    /// Detach the animation currently driving this view.
    fn cancel_animation(&mut self);

    /// Size of the visible frame in model units, used by bounds checks.
    fn frame_size(&self) -> DVec2 {
        DVec2::ZERO
    }
}

/// A render surface's camera: position, frame size, and at most one
/// attached animation.
pub struct MapView {
    position: Position,
    frame_size: DVec2,
    animation: Option<Box<dyn AnimationDelegate>>,
    /// Set when `cancel_animation` is called while the delegate is out of
    /// the slot being updated.
    cancel_requested: bool,
}

impl MapView {
    /// View at `position` with a zero-sized frame.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            frame_size: DVec2::ZERO,
            animation: None,
            cancel_requested: false,
        }
    }

    /// Builder-style frame size.
    #[must_use]
    pub fn with_frame_size(mut self, frame_size: DVec2) -> Self {
        self.frame_size = frame_size;
        self
    }

    /// Update the visible frame size (viewport resize or zoom).
    pub fn set_frame_size(&mut self, frame_size: DVec2) {
        self.frame_size = frame_size;
    }

    /// Attach an animation, dropping whichever one was attached before.
    ///
    /// The replaced animation is not notified.
    pub fn attach_animation(&mut self, animation: Box<dyn AnimationDelegate>) {
        if let Some(old) = self.animation.replace(animation) {
            log::debug!("view animation '{}' replaced", old.name());
        }
    }

    /// Drop the attached animation, if any.
    pub fn clear_animation(&mut self) {
        self.animation = None;
    }

    /// Whether an animation is attached.
    #[must_use]
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Whether an attached animation is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(|a| a.is_active())
    }

    /// Name of the attached animation, for diagnostics.
    #[must_use]
    pub fn animation_name(&self) -> Option<&'static str> {
        self.animation.as_ref().map(|a| a.name())
    }

    /// Move the attached animation out for an update.
    pub(crate) fn take_animation(
        &mut self,
    ) -> Option<Box<dyn AnimationDelegate>> {
        self.cancel_requested = false;
        self.animation.take()
    }

    /// Put an updated animation back, unless it cancelled itself or was
    /// replaced while it ran. Returns whether it was re-attached.
    pub(crate) fn restore_animation(
        &mut self,
        animation: Box<dyn AnimationDelegate>,
    ) -> bool {
        let cancelled = std::mem::take(&mut self.cancel_requested);
        if cancelled || self.animation.is_some() || !animation.is_active() {
            return false;
        }
        self.animation = Some(animation);
        true
    }
}

impl View for MapView {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn cancel_animation(&mut self) {
        self.animation = None;
        self.cancel_requested = true;
    }

    fn frame_size(&self) -> DVec2 {
        self.frame_size
    }
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("position", &self.position)
            .field("frame_size", &self.frame_size)
            .field("animation", &self.animation_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use web_time::Instant;

    use super::*;
    use crate::animation::TranslateAnimation;

    fn translate(view: &MapView, x: f64) -> Box<TranslateAnimation> {
        Box::new(
            TranslateAnimation::new(view, DVec3::new(x, 0.0, 0.0), 1.0, None)
                .unwrap(),
        )
    }

    #[test]
    fn attaching_replaces_previous_animation() {
        let mut view = MapView::new(DVec3::ZERO);
        view.attach_animation(translate(&view, 1.0));
        view.attach_animation(translate(&view, 2.0));
        assert!(view.has_animation());
        assert_eq!(view.animation_name(), Some("translate"));
        view.clear_animation();
        assert!(!view.has_animation());
    }

    #[test]
    fn cancel_during_update_blocks_restore() {
        let mut view = MapView::new(DVec3::ZERO);
        view.attach_animation(translate(&view, 1.0));
        let anim = view.take_animation().unwrap();
        view.cancel_animation();
        assert!(!view.restore_animation(anim));
        assert!(!view.has_animation());
    }

    #[test]
    fn replacement_during_update_wins() {
        let mut view = MapView::new(DVec3::ZERO);
        view.attach_animation(translate(&view, 1.0));
        let anim = view.take_animation().unwrap();
        view.attach_animation(translate(&view, 5.0));
        assert!(!view.restore_animation(anim));
        assert!(view.has_animation());
    }

    #[test]
    fn running_animation_is_restored() {
        let mut view = MapView::new(DVec3::ZERO);
        view.attach_animation(translate(&view, 1.0));
        let mut anim = view.take_animation().unwrap();
        anim.update_view(&mut view, Instant::now());
        assert!(view.restore_animation(anim));
        assert!(view.is_animating());
    }
}
