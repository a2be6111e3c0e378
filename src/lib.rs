//! Per-frame camera animation for interactive map and globe views.
//!
//! The render loop hands each frame's clock sample to an
//! [`controller::AnimationController`], which advances whatever animation is
//! attached to the [`view::MapView`] before the frame is drawn. Gesture
//! handlers start animations: a linear move to a target
//! ([`animation::TranslateAnimation`]) or a decelerating fling
//! ([`animation::MomentumAnimation`]).
//!
//! # Key entry points
//!
//! - [`controller::AnimationController`] - per-frame driver and gesture entry
//!   points
//! - [`view::View`] - what an animation may do to the view it drives
//! - [`animation::AnimationDelegate`] - the contract new animation kinds
//!   implement
//! - [`geometry::Bounds`] - polygon or box regions constraining movement
//! - [`options::AnimationOptions`] - TOML-backed tuning
//!
//! # Model
//!
//! Everything runs on the render thread. A view holds at most one
//! animation; attaching another drops the first. Animations never return
//! errors while running: expiry and bounds rejection are state changes, and
//! a panicking animation is dropped by the driver without stalling the
//! frame. Only construction with bad parameters fails, with
//! [`error::AnimationError::InvalidParameter`].

pub mod animation;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod options;
pub mod view;
