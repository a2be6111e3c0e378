//! Positions and bounds regions in display/model space.
//!
//! Positions are `DVec3` so the same animations drive a planar map
//! (`z = 0`) and a 3-D globe. Bounds are always tested in the xy-plane.

mod bounds;

pub use bounds::Bounds;
use glam::DVec3;

/// A point in display/model space.
pub type Position = DVec3;

/// Linear interpolation between two positions.
///
/// `t` is clamped to `[0, 1]`, and `t == 1` returns `end` itself rather
/// than `start + (end - start)`, so a finished animation lands exactly on
/// its target.
#[inline]
#[must_use]
pub fn lerp_position(start: Position, end: Position, t: f64) -> Position {
    if t >= 1.0 {
        return end;
    }
    let t = t.max(0.0);
    start + (end - start) * t
}
