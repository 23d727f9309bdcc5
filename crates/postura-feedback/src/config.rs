//! Typed configuration, read from and written to TOML.
//!
//! Every field has a default that reproduces the stock right-arm setup, so an
//! empty file (or no file at all) is a valid configuration.

use std::fs;
use std::path::Path;

use postura_geometry::{AngleMeasurement, VisibilityConfig};
use postura_types::{BannerKind, BannerPlacement, BodySide, Joint, PostureError};
use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// A colour triple in blue-green-red channel order, as drawing backends
/// built on OpenCV expect.
pub type Bgr = [u8; 3];

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

/// How a single highlighted joint is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointStyle {
    pub joint: Joint,
    pub color: Bgr,
    pub radius: u32,
    /// Negative values mean a filled circle.
    pub thickness: i32,
}

impl JointStyle {
    fn filled(joint: Joint, color: Bgr) -> Self {
        Self {
            joint,
            color,
            radius: 12,
            thickness: -1,
        }
    }
}

/// Skeleton overlay style: only the listed joints are highlighted, the rest
/// of the skeleton is drawn with the renderer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkStyle {
    pub highlighted: Vec<JointStyle>,
}

impl Default for LandmarkStyle {
    fn default() -> Self {
        const GREEN: Bgr = [0, 255, 0];
        Self {
            highlighted: vec![
                JointStyle::filled(Joint::RightElbow, GREEN),
                JointStyle::filled(Joint::RightShoulder, [100, 100, 100]),
                JointStyle::filled(Joint::RightHip, GREEN),
                JointStyle::filled(Joint::RightWrist, GREEN),
            ],
        }
    }
}

impl LandmarkStyle {
    pub fn style_for(&self, joint: Joint) -> Option<&JointStyle> {
        self.highlighted.iter().find(|s| s.joint == joint)
    }
}

/// A translucent rectangle spanning the image width with centred text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BannerStyle {
    pub placement: BannerPlacement,
    pub text_color: Bgr,
    pub rectangle_color: Bgr,
    /// Rectangle opacity in `[0, 1]`.
    pub alpha: f32,
    pub rectangle_height: u32,
    pub font_scale: f32,
    pub font_thickness: u32,
}

impl BannerStyle {
    /// White text near the top.
    pub fn plain() -> Self {
        Self {
            placement: BannerPlacement::Top,
            text_color: [255, 255, 255],
            rectangle_color: [0, 0, 0],
            alpha: 0.5,
            rectangle_height: 100,
            font_scale: 2.0,
            font_thickness: 2,
        }
    }

    /// Red text near the bottom.
    pub fn warning() -> Self {
        Self {
            placement: BannerPlacement::Bottom,
            text_color: [0, 0, 255],
            ..Self::plain()
        }
    }
}

fn default_plain() -> BannerStyle {
    BannerStyle::plain()
}
fn default_warning() -> BannerStyle {
    BannerStyle::warning()
}

/// All rendering parameters handed to the [`Renderer`][crate::Renderer].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub landmarks: LandmarkStyle,
    #[serde(default = "default_plain")]
    pub plain: BannerStyle,
    #[serde(default = "default_warning")]
    pub warning: BannerStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            landmarks: LandmarkStyle::default(),
            plain: default_plain(),
            warning: default_warning(),
        }
    }
}

impl StyleConfig {
    pub fn banner(&self, kind: BannerKind) -> &BannerStyle {
        match kind {
            BannerKind::Plain => &self.plain,
            BannerKind::Warning => &self.warning,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PosturaConfig
// ────────────────────────────────────────────────────────────────────────────

fn default_show() -> bool {
    true
}
fn default_shoulder() -> AngleMeasurement {
    AngleMeasurement::shoulder_abduction(BodySide::Right)
}
fn default_elbow() -> AngleMeasurement {
    AngleMeasurement::elbow(BodySide::Right)
}

/// Top-level configuration of a Postura run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosturaConfig {
    /// Scenario identifier (`"A"`, `"B"`, `"C"`, …).
    #[serde(default)]
    pub scenario: Scenario,

    /// Ask the renderer to display each annotated image.
    #[serde(default = "default_show")]
    pub show: bool,

    #[serde(default)]
    pub visibility: VisibilityConfig,

    /// Shoulder abduction measurement (wrist – shoulder – hip).
    #[serde(default = "default_shoulder")]
    pub shoulder: AngleMeasurement,

    /// Elbow measurement (elbow – wrist – shoulder).
    #[serde(default = "default_elbow")]
    pub elbow: AngleMeasurement,

    #[serde(default)]
    pub style: StyleConfig,
}

impl Default for PosturaConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            show: default_show(),
            visibility: VisibilityConfig::default(),
            shoulder: default_shoulder(),
            elbow: default_elbow(),
            style: StyleConfig::default(),
        }
    }
}

impl PosturaConfig {
    /// Check constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), PostureError> {
        self.visibility.validate()?;
        for banner in [&self.style.plain, &self.style.warning] {
            if !(0.0..=1.0).contains(&banner.alpha) {
                return Err(PostureError::InvalidConfig(format!(
                    "banner alpha must be within [0, 1], got {}",
                    banner.alpha
                )));
            }
        }
        Ok(())
    }
}

/// Load the config from `path`.  Returns `None` if the file does not exist.
pub fn load_from(path: &Path) -> Result<Option<PosturaConfig>, PostureError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| PostureError::Io(format!("failed to read {}: {e}", path.display())))?;
    let cfg: PosturaConfig = toml::from_str(&raw).map_err(|e| {
        PostureError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
    })?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Resolve the effective configuration: the file at `path` (or defaults when
/// it is absent) with environment overrides applied on top.
pub fn resolve(path: &Path) -> Result<PosturaConfig, PostureError> {
    let mut cfg = load_from(path)?.unwrap_or_default();
    apply_env_overrides(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

/// Apply `POSTURA_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `POSTURA_SCENARIO` | `scenario` |
/// | `POSTURA_VISIBILITY_THRESHOLD` | `visibility.threshold` |
/// | `POSTURA_SHOW` | `show` |
///
/// Values that fail to parse are ignored.
pub fn apply_env_overrides(cfg: &mut PosturaConfig) {
    if let Ok(v) = std::env::var("POSTURA_SCENARIO") {
        cfg.scenario = Scenario::new(v.trim());
    }
    if let Ok(v) = std::env::var("POSTURA_VISIBILITY_THRESHOLD")
        && let Ok(threshold) = v.trim().parse::<f64>()
    {
        cfg.visibility.threshold = threshold;
    }
    if let Ok(v) = std::env::var("POSTURA_SHOW")
        && let Ok(show) = v.trim().parse::<bool>()
    {
        cfg.show = show;
    }
}

/// Save the config to `path`, creating parent directories if necessary.
pub fn save_to(cfg: &PosturaConfig, path: &Path) -> Result<(), PostureError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            PostureError::Io(format!("failed to create {}: {e}", parent.display()))
        })?;
    }
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| PostureError::InvalidConfig(format!("failed to serialize config: {e}")))?;
    fs::write(path, raw)
        .map_err(|e| PostureError::Io(format!("failed to write {}: {e}", path.display())))
}
