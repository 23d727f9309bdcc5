//! `postura-feedback` – scenario decisions and the per-image loop.
//!
//! # Modules
//!
//! - [`scenario`] – [`ScenarioEvaluator`][scenario::ScenarioEvaluator]:
//!   composes the angle engine and the visibility gate into a
//!   [`FeedbackResult`][postura_types::FeedbackResult] according to one
//!   central table of scenario behaviours.
//! - [`config`] – [`PosturaConfig`][config::PosturaConfig]: strongly typed
//!   configuration (measurements, visibility threshold, rendering style)
//!   loaded from TOML with `POSTURA_*` environment overrides.
//! - [`collaborators`] – the [`PoseDetector`][collaborators::PoseDetector] and
//!   [`Renderer`][collaborators::Renderer] traits through which the pose
//!   model and the drawing backend are plugged in.
//! - [`pipeline`] – [`Pipeline`][pipeline::Pipeline]: processes images one at
//!   a time (detect → draw skeleton → evaluate → draw banners → show).

pub mod collaborators;
pub mod config;
pub mod pipeline;
pub mod scenario;

pub use collaborators::{PoseDetector, Renderer};
pub use config::{BannerStyle, Bgr, JointStyle, LandmarkStyle, PosturaConfig, StyleConfig};
pub use pipeline::{FrameOutcome, Pipeline, RunSummary};
pub use scenario::{Scenario, ScenarioEvaluator, ScenarioPlan};
