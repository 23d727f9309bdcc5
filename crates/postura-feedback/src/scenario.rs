//! [`ScenarioEvaluator`] – turns one pose into a [`FeedbackResult`].
//!
//! Scenario identifiers are open-ended labels.  The behaviour behind each
//! known label is one row of [`SCENARIO_TABLE`]:
//!
//! | Scenario | Visibility gate | Measurements | Feedback |
//! |---|---|---|---|
//! | `A` | no | shoulder abduction | OK banner with the angle |
//! | `B` | no | shoulder abduction, elbow | OK banner, plus WARNING when elbow > 10° |
//! | `C` | yes | shoulder abduction | INSUFFICIENT_VISIBILITY when gated out, else as `A` |
//!
//! Unknown labels produce [`FeedbackState::None`] without error.
//!
//! Scenarios without the gate measure whatever coordinates the model
//! returned, even for landmarks with near-zero confidence.
//!
//! # Example
//!
//! ```
//! use postura_feedback::scenario::{Scenario, ScenarioEvaluator};
//! use postura_types::FeedbackState;
//!
//! let evaluator = ScenarioEvaluator::default();
//! let result = evaluator.evaluate(&Scenario::new("Z"), None).unwrap();
//! assert_eq!(result.state, FeedbackState::None);
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use postura_geometry::{AngleMeasurement, VisibilityConfig, check_visibility, measure};
use postura_types::{BannerKind, BodySide, FeedbackResult, FeedbackState, PoseFrame, PostureError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PosturaConfig;

/// Elbow angles strictly above this many degrees trigger a warning.
pub const ELBOW_WARNING_DEGREES: f64 = 10.0;

pub const STRAIGHT_ARM_MESSAGE: &str = "Your arm should be straight.";
pub const STAND_IN_FRONT_MESSAGE: &str = "Stand in front of the camera.";

/// Text of the shoulder-abduction report.
pub fn shoulder_message(angle: f64) -> String {
    format!("Shoulder abduction angle: {angle:.2} degrees.")
}

/// Whether an elbow angle calls for the straight-arm warning.
pub fn elbow_needs_warning(angle: f64) -> bool {
    angle > ELBOW_WARNING_DEGREES
}

// ────────────────────────────────────────────────────────────────────────────
// Scenario table
// ────────────────────────────────────────────────────────────────────────────

/// What a scenario does with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioPlan {
    /// Run the visibility gate before measuring anything.
    pub gate_visibility: bool,
    /// Measure the elbow and warn when it is bent.
    pub elbow_check: bool,
}

/// Every scenario with behaviour. Adding a scenario means adding a row.
pub const SCENARIO_TABLE: &[(&str, ScenarioPlan)] = &[
    (
        "A",
        ScenarioPlan {
            gate_visibility: false,
            elbow_check: false,
        },
    ),
    (
        "B",
        ScenarioPlan {
            gate_visibility: false,
            elbow_check: true,
        },
    ),
    (
        "C",
        ScenarioPlan {
            gate_visibility: true,
            elbow_check: false,
        },
    ),
];

/// A scenario identifier, e.g. `"A"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario(String);

impl Scenario {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// The table row for this identifier, if it has one.
    pub fn plan(&self) -> Option<ScenarioPlan> {
        SCENARIO_TABLE
            .iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, plan)| *plan)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new("A")
    }
}

impl FromStr for Scenario {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ScenarioEvaluator
// ────────────────────────────────────────────────────────────────────────────

/// Stateless per-frame decision procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioEvaluator {
    shoulder: AngleMeasurement,
    elbow: AngleMeasurement,
    visibility: VisibilityConfig,
}

impl Default for ScenarioEvaluator {
    fn default() -> Self {
        Self::new(
            AngleMeasurement::shoulder_abduction(BodySide::Right),
            AngleMeasurement::elbow(BodySide::Right),
            VisibilityConfig::default(),
        )
    }
}

impl ScenarioEvaluator {
    pub fn new(
        shoulder: AngleMeasurement,
        elbow: AngleMeasurement,
        visibility: VisibilityConfig,
    ) -> Self {
        Self {
            shoulder,
            elbow,
            visibility,
        }
    }

    pub fn from_config(cfg: &PosturaConfig) -> Self {
        Self::new(cfg.shoulder, cfg.elbow, cfg.visibility)
    }

    /// Evaluate `scenario` on the measured pose of a frame.
    ///
    /// `frame` is `None` when the detector found nobody; the result is then
    /// [`FeedbackState::None`].
    ///
    /// # Errors
    ///
    /// Propagates [`PostureError::IndexOutOfRange`] when the frame lacks a
    /// configured joint.
    pub fn evaluate(
        &self,
        scenario: &Scenario,
        frame: Option<&PoseFrame>,
    ) -> Result<FeedbackResult, PostureError> {
        let mut result = FeedbackResult::none();

        let Some(plan) = scenario.plan() else {
            debug!(scenario = %scenario, "no behaviour registered for scenario");
            return Ok(result);
        };
        let Some(frame) = frame else {
            debug!(scenario = %scenario, "no pose detected; nothing to evaluate");
            return Ok(result);
        };

        if plan.gate_visibility && !check_visibility(frame, &self.visibility)?.usable {
            result.push(
                FeedbackState::InsufficientVisibility,
                STAND_IN_FRONT_MESSAGE,
                BannerKind::Warning,
            );
            return Ok(result);
        }

        result.angle_computations += 1;
        if let Some(angle) = measure(frame, &self.shoulder)? {
            result.measured_angle = Some(angle);
            result.push(FeedbackState::Ok, shoulder_message(angle), BannerKind::Plain);
        }

        if plan.elbow_check {
            result.angle_computations += 1;
            let elbow = measure(frame, &self.elbow)?;
            debug!(?elbow, "elbow angle");
            if elbow.is_some_and(elbow_needs_warning) {
                result.push(FeedbackState::Warning, STRAIGHT_ARM_MESSAGE, BannerKind::Warning);
            }
        }

        Ok(result)
    }
}
