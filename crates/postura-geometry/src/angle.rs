//! Signed joint angles.
//!
//! For three points `A`, `B`, `C` with `B` as the vertex the raw angle is
//!
//! ```text
//! raw = atan2(C.y − B.y, C.x − B.x) − atan2(A.y − B.y, A.x − B.x)
//! ```
//!
//! converted to degrees and folded into `(-180, 180]`.  Image rows grow
//! downward, so right-side measurements come out mirrored; they are negated
//! here and nowhere else.  The negated value is folded again, so a straight
//! angle reads `180` on either side.
//!
//! # Example
//!
//! ```rust
//! use postura_geometry::angle::angle_between;
//! use postura_types::{BodySide, Point2};
//!
//! let wrist = Point2::new(0.0, 0.0);
//! let shoulder = Point2::new(0.0, 1.0);
//! let hip = Point2::new(1.0, 1.0);
//!
//! let angle = angle_between(wrist, shoulder, hip, BodySide::Right).unwrap();
//! assert!((angle + 90.0).abs() < 1e-9);
//! ```

use postura_types::{BodySide, Joint, Point2, PoseFrame, PostureError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::landmark_view::LandmarkView;

/// Squared segment length below which the vertex is considered to coincide
/// with an endpoint.
const DEGENERATE_SQUARED_LENGTH: f64 = f64::EPSILON;

// ────────────────────────────────────────────────────────────────────────────
// Measurement configuration
// ────────────────────────────────────────────────────────────────────────────

/// A configured angle: three joints, the middle one being the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleMeasurement {
    pub joints: [Joint; 3],
    #[serde(default)]
    pub side: BodySide,
}

impl AngleMeasurement {
    pub fn new(first: Joint, vertex: Joint, last: Joint, side: BodySide) -> Self {
        Self {
            joints: [first, vertex, last],
            side,
        }
    }

    /// Shoulder abduction: wrist – shoulder – hip.
    pub fn shoulder_abduction(side: BodySide) -> Self {
        match side {
            BodySide::Left => {
                Self::new(Joint::LeftWrist, Joint::LeftShoulder, Joint::LeftHip, side)
            }
            BodySide::Right => {
                Self::new(Joint::RightWrist, Joint::RightShoulder, Joint::RightHip, side)
            }
        }
    }

    /// Elbow bend: elbow – wrist – shoulder.
    pub fn elbow(side: BodySide) -> Self {
        match side {
            BodySide::Left => {
                Self::new(Joint::LeftElbow, Joint::LeftWrist, Joint::LeftShoulder, side)
            }
            BodySide::Right => {
                Self::new(Joint::RightElbow, Joint::RightWrist, Joint::RightShoulder, side)
            }
        }
    }

    pub fn vertex(&self) -> Joint {
        self.joints[1]
    }

    pub fn indices(&self) -> [usize; 3] {
        self.joints.map(Joint::index)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Angle computation
// ────────────────────────────────────────────────────────────────────────────

/// Fold a difference of two `atan2` results (in degrees) into `(-180, 180]`.
pub fn normalize_degrees(raw: f64) -> f64 {
    if raw > 180.0 {
        raw - 360.0
    } else if raw <= -180.0 {
        raw + 360.0
    } else {
        raw
    }
}

/// Signed angle at vertex `b` between segments `b→a` and `b→c`, in degrees.
///
/// Returns `None` when either segment has zero length or a coordinate is not
/// finite.
pub fn angle_between(a: Point2, b: Point2, c: Point2, side: BodySide) -> Option<f64> {
    let finite = [a, b, c].iter().all(|p| p.x.is_finite() && p.y.is_finite());
    if !finite {
        debug!("angle undefined: non-finite landmark coordinate");
        return None;
    }

    let (ax, ay) = (a.x - b.x, a.y - b.y);
    let (cx, cy) = (c.x - b.x, c.y - b.y);
    let degenerate = |x: f64, y: f64| x * x + y * y < DEGENERATE_SQUARED_LENGTH;
    if degenerate(ax, ay) || degenerate(cx, cy) {
        debug!("angle undefined: vertex coincides with an endpoint");
        return None;
    }

    let raw = (cy.atan2(cx) - ay.atan2(ax)).to_degrees();
    let angle = normalize_degrees(raw);

    Some(match side {
        BodySide::Right => normalize_degrees(-angle),
        BodySide::Left => angle,
    })
}

/// Angle at `indices[1]` between `indices[0]` and `indices[2]`.
///
/// An empty `indices` slice means there is nothing to measure and yields
/// `Ok(None)`.
///
/// # Errors
///
/// - [`PostureError::InvalidMeasurement`] – `indices` is neither empty nor
///   exactly three entries long.
/// - [`PostureError::IndexOutOfRange`] – an index is not inside `frame`.
pub fn compute_angle(
    frame: &PoseFrame,
    indices: &[usize],
    side: BodySide,
) -> Result<Option<f64>, PostureError> {
    if indices.is_empty() {
        debug!("cannot compute angle: no landmarks requested");
        return Ok(None);
    }
    if indices.len() != 3 {
        return Err(PostureError::InvalidMeasurement(format!(
            "an angle needs exactly 3 landmarks, got {}",
            indices.len()
        )));
    }

    let view = LandmarkView::from_indices(frame, indices)?;
    Ok(angle_between(view.points[0], view.points[1], view.points[2], side))
}

/// Evaluate a configured [`AngleMeasurement`] on `frame`.
pub fn measure(
    frame: &PoseFrame,
    measurement: &AngleMeasurement,
) -> Result<Option<f64>, PostureError> {
    let angle = compute_angle(frame, &measurement.indices(), measurement.side)?;
    if angle.is_none() {
        debug!(vertex = %measurement.vertex(), "measurement produced no angle");
    }
    Ok(angle)
}
