//! [`JsonSidecarDetector`] – reads detections exported next to each image.
//!
//! For `photo.jpeg` the detector reads `photo.json`: a JSON array of poses,
//! each an array of landmark objects
//! (`{"x", "y", "z", "visibility", "presence"}`) in joint order.

use std::fs;
use std::path::{Path, PathBuf};

use postura_feedback::PoseDetector;
use postura_types::{Detection, PostureError};
use tracing::debug;

pub struct JsonSidecarDetector {
    /// Where the sidecars live; `None` means next to the image.
    dir: Option<PathBuf>,
}

impl JsonSidecarDetector {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn sidecar_path(&self, image: &Path) -> PathBuf {
        let sidecar = image.with_extension("json");
        match (&self.dir, sidecar.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => sidecar,
        }
    }
}

impl PoseDetector for JsonSidecarDetector {
    fn detect(&mut self, image: &Path) -> Result<Detection, PostureError> {
        let path = self.sidecar_path(image);
        let raw = fs::read_to_string(&path).map_err(|e| {
            PostureError::Detection(format!("cannot read {}: {e}", path.display()))
        })?;
        let detection: Detection = serde_json::from_str(&raw).map_err(|e| {
            PostureError::Detection(format!("malformed detections in {}: {e}", path.display()))
        })?;
        debug!(sidecar = %path.display(), poses = detection.poses.len(), "loaded detection");
        Ok(detection)
    }
}
