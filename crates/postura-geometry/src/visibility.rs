//! Frontal-pose gate.
//!
//! When a subject turns sideways, the left and right landmarks of the hips
//! and shoulders collapse onto each other in the image plane.  A pose is
//! usable only when both pairs are at least `threshold` apart (normalized
//! image units).
//!
//! Each frame is judged on its own; there is no hysteresis, so a subject near
//! the threshold may flicker between usable and not usable across a video.

use postura_types::{Joint, PoseFrame, PostureError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::landmark_view::LandmarkView;

/// Default minimum separation of the hip and shoulder pairs.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;

const HIP_PAIR: (Joint, Joint) = (Joint::RightHip, Joint::LeftHip);
const SHOULDER_PAIR: (Joint, Joint) = (Joint::RightShoulder, Joint::LeftShoulder);

fn default_threshold() -> f64 {
    DEFAULT_VISIBILITY_THRESHOLD
}

/// Tunable parameters of [`check_visibility`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl VisibilityConfig {
    /// Build a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`PostureError::InvalidConfig`] for a negative or non-finite
    /// threshold.
    pub fn new(threshold: f64) -> Result<Self, PostureError> {
        let cfg = Self { threshold };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), PostureError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(PostureError::InvalidConfig(format!(
                "visibility threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Result of [`check_visibility`], with the distances that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityVerdict {
    pub usable: bool,
    pub hip_distance: f64,
    pub shoulder_distance: f64,
}

/// Planar distance between two joints of `frame`.
pub fn landmark_distance(frame: &PoseFrame, a: Joint, b: Joint) -> Result<f64, PostureError> {
    let view = LandmarkView::from_joints(frame, &[a, b])?;
    Ok(view.points[0].distance(view.points[1]))
}

/// Decide whether `frame` shows the subject frontally enough to measure.
///
/// # Errors
///
/// Returns [`PostureError::IndexOutOfRange`] when the frame does not contain
/// the hip or shoulder landmarks.
pub fn check_visibility(
    frame: &PoseFrame,
    config: &VisibilityConfig,
) -> Result<VisibilityVerdict, PostureError> {
    let hip_distance = landmark_distance(frame, HIP_PAIR.0, HIP_PAIR.1)?;
    let shoulder_distance = landmark_distance(frame, SHOULDER_PAIR.0, SHOULDER_PAIR.1)?;
    let usable = hip_distance >= config.threshold && shoulder_distance >= config.threshold;

    debug!(
        hip_distance,
        shoulder_distance,
        threshold = config.threshold,
        usable,
        "visibility check"
    );

    Ok(VisibilityVerdict {
        usable,
        hip_distance,
        shoulder_distance,
    })
}
