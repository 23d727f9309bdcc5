//! `postura-types` – shared data model for the Postura workspace.
//!
//! Every other crate speaks in these types: the anatomical [`Joint`]
//! enumeration, the per-joint [`LandmarkRecord`] produced by a pose model,
//! the [`PoseFrame`] that groups them, and the [`FeedbackResult`] handed to
//! the rendering collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Joint enumeration
// ────────────────────────────────────────────────────────────────────────────

/// The 33-point BlazePose body topology, index-addressed in model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Joint {
    /// Number of joints in a full detection.
    pub const COUNT: usize = 33;

    /// Position of this joint inside a [`PoseFrame`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEyeInner => "left_eye_inner",
            Joint::LeftEye => "left_eye",
            Joint::LeftEyeOuter => "left_eye_outer",
            Joint::RightEyeInner => "right_eye_inner",
            Joint::RightEye => "right_eye",
            Joint::RightEyeOuter => "right_eye_outer",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::MouthLeft => "mouth_left",
            Joint::MouthRight => "mouth_right",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftPinky => "left_pinky",
            Joint::RightPinky => "right_pinky",
            Joint::LeftIndex => "left_index",
            Joint::RightIndex => "right_index",
            Joint::LeftThumb => "left_thumb",
            Joint::RightThumb => "right_thumb",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHeel => "left_heel",
            Joint::RightHeel => "right_heel",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of the body a measurement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    Left,
    #[default]
    Right,
}

impl std::fmt::Display for BodySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodySide::Left => write!(f, "left"),
            BodySide::Right => write!(f, "right"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Landmarks
// ────────────────────────────────────────────────────────────────────────────

/// One detected joint, in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    /// Likelihood that the joint is unoccluded.
    #[serde(default)]
    pub visibility: f32,
    /// Likelihood that the joint lies inside the image.
    #[serde(default)]
    pub presence: f32,
}

impl LandmarkRecord {
    /// A landmark with full confidence.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: 1.0,
            presence: 1.0,
        }
    }

    pub fn with_confidence(mut self, visibility: f32, presence: f32) -> Self {
        self.visibility = visibility;
        self.presence = presence;
        self
    }
}

/// A planar point used by the geometry layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<&LandmarkRecord> for Point2 {
    fn from(record: &LandmarkRecord) -> Self {
        Self::new(f64::from(record.x), f64::from(record.y))
    }
}

/// All landmarks of a single detected person, in [`Joint`] index order.
///
/// A frame is read-only once built; the geometry layer only ever borrows it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseFrame {
    landmarks: Vec<LandmarkRecord>,
}

impl PoseFrame {
    pub fn new(landmarks: Vec<LandmarkRecord>) -> Self {
        Self { landmarks }
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// All records in native order.
    pub fn records(&self) -> &[LandmarkRecord] {
        &self.landmarks
    }

    /// Look up the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PostureError::IndexOutOfRange`] when `index` is not inside
    /// the frame.
    pub fn get(&self, index: usize) -> Result<&LandmarkRecord, PostureError> {
        self.landmarks
            .get(index)
            .ok_or(PostureError::IndexOutOfRange {
                index,
                len: self.landmarks.len(),
            })
    }

    /// Look up a named joint.
    pub fn joint(&self, joint: Joint) -> Result<&LandmarkRecord, PostureError> {
        self.get(joint.index())
    }
}

/// Output of the pose model for one image: zero or more people.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Detection {
    pub poses: Vec<PoseFrame>,
}

impl Detection {
    pub fn new(poses: Vec<PoseFrame>) -> Self {
        Self { poses }
    }

    /// The pose that gets measured. Only the first person is analysed.
    pub fn primary(&self) -> Option<&PoseFrame> {
        self.poses.first().filter(|frame| !frame.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.primary().is_none()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback
// ────────────────────────────────────────────────────────────────────────────

/// Outcome class of a frame's evaluation.
///
/// Variants are declared in ascending severity so that the derived ordering
/// can be used to pick the dominant state of a frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackState {
    #[default]
    None,
    Ok,
    Warning,
    InsufficientVisibility,
}

impl std::fmt::Display for FeedbackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackState::None => write!(f, "NONE"),
            FeedbackState::Ok => write!(f, "OK"),
            FeedbackState::Warning => write!(f, "WARNING"),
            FeedbackState::InsufficientVisibility => write!(f, "INSUFFICIENT_VISIBILITY"),
        }
    }
}

/// Vertical anchor of a text banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPlacement {
    #[default]
    Top,
    Bottom,
}

/// Which banner style the renderer should use for an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    /// Neutral measurement report.
    Plain,
    /// Corrective message.
    Warning,
}

/// One banner requested from the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub kind: BannerKind,
}

/// Per-frame result of the scenario evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Most severe state reached while evaluating the frame.
    pub state: FeedbackState,
    /// Text belonging to `state`; empty for [`FeedbackState::None`].
    pub message: String,
    /// Primary measurement (shoulder abduction), when one was made.
    pub measured_angle: Option<f64>,
    /// Banners to draw, in request order.
    pub annotations: Vec<Annotation>,
    /// Number of angle computations performed for this frame.
    pub angle_computations: u32,
}

impl FeedbackResult {
    /// A result that requests nothing from the renderer.
    pub fn none() -> Self {
        Self::default()
    }

    /// Append a banner and escalate `state`/`message` if `state` is more
    /// severe than anything recorded so far.
    pub fn push(&mut self, state: FeedbackState, text: impl Into<String>, kind: BannerKind) {
        let text = text.into();
        if state > self.state {
            self.state = state;
            self.message = text.clone();
        }
        self.annotations.push(Annotation { text, kind });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Hard failures. "Cannot compute" outcomes are `Ok(None)`, not errors.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostureError {
    #[error("Landmark index {index} out of range for frame of {len} landmarks")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pose detection failed: {0}")]
    Detection(String),

    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Joint ───────────────────────────────────────────────────────────────

    #[test]
    fn joint_index_matches_model_order() {
        assert_eq!(Joint::Nose.index(), 0);
        assert_eq!(Joint::LeftShoulder.index(), 11);
        assert_eq!(Joint::RightShoulder.index(), 12);
        assert_eq!(Joint::RightWrist.index(), 16);
        assert_eq!(Joint::LeftHip.index(), 23);
        assert_eq!(Joint::RightHip.index(), 24);
        assert_eq!(Joint::RightFootIndex.index(), Joint::COUNT - 1);
    }

    #[test]
    fn joint_name_matches_serde() {
        let json = serde_json::to_string(&Joint::RightElbow).unwrap();
        assert_eq!(json, format!("\"{}\"", Joint::RightElbow.name()));
        let back: Joint = serde_json::from_str("\"left_foot_index\"").unwrap();
        assert_eq!(back, Joint::LeftFootIndex);
    }

    #[test]
    fn body_side_defaults_to_right() {
        assert_eq!(BodySide::default(), BodySide::Right);
        let side: BodySide = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(side, BodySide::Left);
    }

    // ── PoseFrame ───────────────────────────────────────────────────────────

    #[test]
    fn frame_get_out_of_range_is_error() {
        let frame = PoseFrame::new(vec![LandmarkRecord::new(0.1, 0.2, 0.0)]);
        assert!(frame.get(0).is_ok());
        assert_eq!(
            frame.get(5),
            Err(PostureError::IndexOutOfRange { index: 5, len: 1 })
        );
        assert!(frame.joint(Joint::RightHip).is_err());
    }

    #[test]
    fn landmark_confidence_defaults_when_missing() {
        let record: LandmarkRecord = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(record.z, 0.0);
        assert_eq!(record.visibility, 0.0);
        assert_eq!(record.presence, 0.0);
    }

    #[test]
    fn detection_parses_nested_arrays() {
        let json = r#"[[{"x":0.1,"y":0.2,"z":0.0,"visibility":0.9,"presence":0.8}]]"#;
        let detection: Detection = serde_json::from_str(json).unwrap();
        let frame = detection.primary().unwrap();
        assert_eq!(frame.len(), 1);
        assert!((frame.records()[0].visibility - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_detection_has_no_primary() {
        assert!(Detection::default().is_empty());
        assert!(Detection::new(vec![PoseFrame::default()]).is_empty());
    }

    #[test]
    fn point_distance() {
        let d = Point2::new(0.0, 0.0).distance(Point2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    // ── Feedback ────────────────────────────────────────────────────────────

    #[test]
    fn feedback_state_severity_order() {
        assert!(FeedbackState::None < FeedbackState::Ok);
        assert!(FeedbackState::Ok < FeedbackState::Warning);
        assert!(FeedbackState::Warning < FeedbackState::InsufficientVisibility);
    }

    #[test]
    fn feedback_push_escalates_but_keeps_all_annotations() {
        let mut result = FeedbackResult::none();
        result.push(FeedbackState::Ok, "report", BannerKind::Plain);
        result.push(FeedbackState::Warning, "fix it", BannerKind::Warning);
        assert_eq!(result.state, FeedbackState::Warning);
        assert_eq!(result.message, "fix it");
        assert_eq!(result.annotations.len(), 2);
        assert_eq!(result.annotations[0].text, "report");
    }

    #[test]
    fn posture_error_display() {
        let err = PostureError::IndexOutOfRange { index: 40, len: 33 };
        assert!(err.to_string().contains("40"));
        assert!(err.to_string().contains("33"));
        assert_eq!(FeedbackState::InsufficientVisibility.to_string(), "INSUFFICIENT_VISIBILITY");
    }
}
