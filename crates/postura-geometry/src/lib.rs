//! `postura-geometry` – planar landmark geometry.
//!
//! Pure functions over a borrowed [`PoseFrame`][postura_types::PoseFrame].
//! Nothing here keeps state between calls, so every function is safe to call
//! from any number of threads on independent frames.
//!
//! # Modules
//!
//! - [`landmark_view`] – [`LandmarkView`][landmark_view::LandmarkView]:
//!   projects selected landmarks to 2-D points with parallel visibility and
//!   presence arrays, in the order they were requested.
//! - [`angle`] – [`compute_angle`][angle::compute_angle]: signed angle at a
//!   vertex joint, normalized to `(-180, 180]` with the body-side sign
//!   convention applied.
//! - [`visibility`] – [`check_visibility`][visibility::check_visibility]:
//!   frontal-pose gate based on hip and shoulder separation.

pub mod angle;
pub mod landmark_view;
pub mod visibility;

pub use angle::{AngleMeasurement, angle_between, compute_angle, measure, normalize_degrees};
pub use landmark_view::LandmarkView;
pub use visibility::{VisibilityConfig, VisibilityVerdict, check_visibility};
