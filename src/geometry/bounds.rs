//! Regions that constrain where a view may move.

use glam::DVec2;

use crate::error::AnimationError;

/// A region constraining legal view positions.
///
/// Callers hand over either an arbitrary boundary polygon or a
/// lower-left/upper-right box; both are tested in the xy-plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// Closed polygon; the last vertex connects back to the first.
    Polygon(Vec<DVec2>),
    /// Minimum bounding rectangle.
    Mbr {
        /// Lower-left corner.
        ll: DVec2,
        /// Upper-right corner.
        ur: DVec2,
    },
}

impl Bounds {
    /// Polygon bounds from at least three finite vertices.
    pub fn polygon(points: Vec<DVec2>) -> Result<Self, AnimationError> {
        if points.len() < 3 {
            return Err(AnimationError::invalid(format!(
                "bounds polygon needs at least 3 vertices, got {}",
                points.len()
            )));
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(AnimationError::invalid(
                "bounds polygon has a non-finite vertex",
            ));
        }
        Ok(Self::Polygon(points))
    }

    /// Box bounds; `ll` must not exceed `ur` on either axis.
    pub fn mbr(ll: DVec2, ur: DVec2) -> Result<Self, AnimationError> {
        if !ll.is_finite() || !ur.is_finite() {
            return Err(AnimationError::invalid("bounds box is not finite"));
        }
        if ll.x > ur.x || ll.y > ur.y {
            return Err(AnimationError::invalid(format!(
                "bounds box corners out of order: ll={ll}, ur={ur}"
            )));
        }
        Ok(Self::Mbr { ll, ur })
    }

    /// Point-in-region test.
    ///
    /// Polygons use the even-odd rule: a ray cast from `point` towards +x
    /// toggles inclusion at every edge it crosses. Edge points get a fixed
    /// answer for fixed input. Boxes are inclusive on all sides.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        match self {
            Self::Polygon(vertices) => point_in_polygon(vertices, point),
            Self::Mbr { ll, ur } => {
                point.x >= ll.x
                    && point.x <= ur.x
                    && point.y >= ll.y
                    && point.y <= ur.y
            }
        }
    }

    /// Whether a `frame_size` rectangle centered on `center` fits inside.
    ///
    /// The center and all four corners must pass [`Bounds::contains`]. A
    /// zero frame size reduces to the plain point test.
    #[must_use]
    pub fn contains_frame(&self, center: DVec2, frame_size: DVec2) -> bool {
        if !self.contains(center) {
            return false;
        }
        let half = frame_size.abs() * 0.5;
        if half == DVec2::ZERO {
            return true;
        }
        [
            DVec2::new(-half.x, -half.y),
            DVec2::new(half.x, -half.y),
            DVec2::new(half.x, half.y),
            DVec2::new(-half.x, half.y),
        ]
        .into_iter()
        .all(|offset| self.contains(center + offset))
    }
}

/// Fewer than three vertices enclose nothing.
fn point_in_polygon(vertices: &[DVec2], point: DVec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let cross_x =
                (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
