//! [`Pipeline`] – the frame-at-a-time loop.
//!
//! For each image: detect → load → draw the skeleton of every detected
//! person → evaluate the scenario on the first person → draw one banner per
//! annotation → optionally show.  A failure on one image is logged and the
//! loop moves on to the next; the [`RunSummary`] records what happened.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use postura_types::{FeedbackResult, FeedbackState, PostureError};
use tracing::{info, warn};

use crate::collaborators::{PoseDetector, Renderer};
use crate::config::{PosturaConfig, StyleConfig};
use crate::scenario::{Scenario, ScenarioEvaluator};

/// What happened to one image.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub path: PathBuf,
    pub result: Result<FeedbackResult, PostureError>,
}

/// Per-image outcomes of a [`Pipeline::run`], in processing order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FrameOutcome>,
}

impl RunSummary {
    /// Images evaluated without error.
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Images skipped because of an error.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    /// Number of evaluated images per feedback state.
    pub fn state_counts(&self) -> BTreeMap<FeedbackState, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if let Ok(result) = &outcome.result {
                *counts.entry(result.state).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Drives detection, evaluation, and rendering over a list of images.
#[derive(Debug, Clone)]
pub struct Pipeline {
    scenario: Scenario,
    evaluator: ScenarioEvaluator,
    style: StyleConfig,
    show: bool,
}

impl Pipeline {
    pub fn new(cfg: &PosturaConfig) -> Self {
        Self {
            scenario: cfg.scenario.clone(),
            evaluator: ScenarioEvaluator::from_config(cfg),
            style: cfg.style.clone(),
            show: cfg.show,
        }
    }

    /// Process a single image and return its feedback with the annotated
    /// image.
    pub fn process<D, R>(
        &self,
        detector: &mut D,
        renderer: &mut R,
        path: &Path,
    ) -> Result<(FeedbackResult, R::Image), PostureError>
    where
        D: PoseDetector,
        R: Renderer,
    {
        let detection = detector.detect(path)?;
        let mut image = renderer.load(path)?;

        for pose in &detection.poses {
            image = renderer.draw_landmarks(image, pose, &self.style.landmarks);
        }

        let result = self.evaluator.evaluate(&self.scenario, detection.primary())?;
        for annotation in &result.annotations {
            let style = self.style.banner(annotation.kind);
            image = renderer.draw_banner(image, &annotation.text, style);
        }

        if self.show {
            renderer.show(&image);
        }
        Ok((result, image))
    }

    /// Process every image in `images`, continuing past failures.
    pub fn run<D, R>(&self, detector: &mut D, renderer: &mut R, images: &[PathBuf]) -> RunSummary
    where
        D: PoseDetector,
        R: Renderer,
    {
        let mut summary = RunSummary::default();
        for path in images {
            let result = match self.process(detector, renderer, path) {
                Ok((result, _image)) => {
                    info!(
                        image = %path.display(),
                        scenario = %self.scenario,
                        state = %result.state,
                        angle = ?result.measured_angle,
                        "frame evaluated"
                    );
                    Ok(result)
                }
                Err(e) => {
                    warn!(image = %path.display(), error = %e, "skipping image");
                    Err(e)
                }
            };
            summary.outcomes.push(FrameOutcome {
                path: path.clone(),
                result,
            });
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BannerStyle, LandmarkStyle};
    use postura_types::{BannerPlacement, Detection, Joint, LandmarkRecord, PoseFrame};
    use std::collections::HashMap;

    // ------------------------------------------------------------------ helpers

    fn arm_frame(elbow: (f32, f32)) -> PoseFrame {
        let mut records = vec![LandmarkRecord::new(0.0, 0.0, 0.0); Joint::COUNT];
        let mut set = |joint: Joint, x: f32, y: f32| {
            records[joint.index()] = LandmarkRecord::new(x, y, 0.0);
        };
        set(Joint::RightWrist, 0.0, 0.0);
        set(Joint::RightElbow, elbow.0, elbow.1);
        set(Joint::RightShoulder, 0.0, 1.0);
        set(Joint::RightHip, 1.0, 1.0);
        set(Joint::LeftShoulder, 0.5, 1.0);
        set(Joint::LeftHip, 1.5, 1.0);
        PoseFrame::new(records)
    }

    /// Looks detections up by file name; unknown names fail.
    struct MapDetector(HashMap<String, Detection>);

    impl PoseDetector for MapDetector {
        fn detect(&mut self, image: &Path) -> Result<Detection, PostureError> {
            let key = image.to_string_lossy().to_string();
            self.0
                .get(&key)
                .cloned()
                .ok_or_else(|| PostureError::Detection(format!("no detection for {key}")))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        shown: usize,
    }

    impl Renderer for RecordingRenderer {
        type Image = Vec<String>;

        fn load(&mut self, _path: &Path) -> Result<Self::Image, PostureError> {
            Ok(Vec::new())
        }

        fn draw_landmarks(
            &mut self,
            mut image: Self::Image,
            _pose: &PoseFrame,
            _style: &LandmarkStyle,
        ) -> Self::Image {
            image.push("skeleton".to_string());
            image
        }

        fn draw_banner(
            &mut self,
            mut image: Self::Image,
            text: &str,
            style: &BannerStyle,
        ) -> Self::Image {
            let at = match style.placement {
                BannerPlacement::Top => "top",
                BannerPlacement::Bottom => "bottom",
            };
            image.push(format!("{at}: {text}"));
            image
        }

        fn show(&mut self, _image: &Self::Image) {
            self.shown += 1;
        }
    }

    fn pipeline(scenario: &str, show: bool) -> Pipeline {
        let mut cfg = PosturaConfig::default();
        cfg.scenario = Scenario::new(scenario);
        cfg.show = show;
        Pipeline::new(&cfg)
    }

    fn detector() -> MapDetector {
        let mut map = HashMap::new();
        map.insert(
            "straight.jpeg".to_string(),
            Detection::new(vec![arm_frame((0.0, 0.5))]),
        );
        map.insert(
            "bent.jpeg".to_string(),
            Detection::new(vec![arm_frame((-0.5, 0.5))]),
        );
        map.insert("nobody.jpeg".to_string(), Detection::default());
        MapDetector(map)
    }

    // ------------------------------------------------------------------ process

    #[test]
    fn scenario_b_draws_report_on_top_and_warning_at_bottom() {
        let mut renderer = RecordingRenderer::default();
        let (result, image) = pipeline("B", true)
            .process(&mut detector(), &mut renderer, Path::new("bent.jpeg"))
            .unwrap();
        assert_eq!(result.state, FeedbackState::Warning);
        assert_eq!(image.len(), 3);
        assert_eq!(image[0], "skeleton");
        assert!(image[1].starts_with("top: Shoulder abduction angle"));
        assert_eq!(image[2], "bottom: Your arm should be straight.");
        assert_eq!(renderer.shown, 1);
    }

    #[test]
    fn unknown_scenario_still_draws_skeleton() {
        let mut renderer = RecordingRenderer::default();
        let (result, image) = pipeline("Z", false)
            .process(&mut detector(), &mut renderer, Path::new("straight.jpeg"))
            .unwrap();
        assert_eq!(result.state, FeedbackState::None);
        assert_eq!(image, vec!["skeleton"]);
        assert_eq!(renderer.shown, 0);
    }

    #[test]
    fn empty_detection_draws_nothing() {
        let mut renderer = RecordingRenderer::default();
        let (result, image) = pipeline("A", false)
            .process(&mut detector(), &mut renderer, Path::new("nobody.jpeg"))
            .unwrap();
        assert_eq!(result.state, FeedbackState::None);
        assert!(image.is_empty());
    }

    // ------------------------------------------------------------------ run

    #[test]
    fn run_continues_past_failed_images() {
        let images: Vec<PathBuf> = ["straight.jpeg", "missing.jpeg", "bent.jpeg", "nobody.jpeg"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let mut renderer = RecordingRenderer::default();
        let summary = pipeline("B", true).run(&mut detector(), &mut renderer, &images);

        assert_eq!(summary.outcomes.len(), 4);
        assert_eq!(summary.processed(), 3);
        assert_eq!(summary.failed(), 1);
        assert!(matches!(
            summary.outcomes[1].result,
            Err(PostureError::Detection(_))
        ));
        let counts = summary.state_counts();
        assert_eq!(counts.get(&FeedbackState::Ok), Some(&1));
        assert_eq!(counts.get(&FeedbackState::Warning), Some(&1));
        assert_eq!(counts.get(&FeedbackState::None), Some(&1));
        assert_eq!(renderer.shown, 3);
    }
}
