//! Traits for the external collaborators of the pipeline.
//!
//! The pose model and the drawing backend live outside this workspace's
//! core.  Implement [`PoseDetector`] and [`Renderer`] to plug them in; the
//! pipeline only ever decides *what* to draw.

use std::path::Path;

use postura_types::{Detection, PoseFrame, PostureError};

use crate::config::{BannerStyle, LandmarkStyle};

/// A pose-estimation model.
pub trait PoseDetector {
    /// Run the model on the image at `image`.
    ///
    /// An image without people is an empty [`Detection`], not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PostureError::Detection`] or [`PostureError::Io`] when the
    /// image cannot be processed at all.
    fn detect(&mut self, image: &Path) -> Result<Detection, PostureError>;
}

/// A drawing backend.
///
/// Every drawing call consumes an image and returns the annotated image.
pub trait Renderer {
    type Image;

    /// Load the image at `path`.
    fn load(&mut self, path: &Path) -> Result<Self::Image, PostureError>;

    /// Draw the skeleton of `pose`, highlighting the joints in `style`.
    fn draw_landmarks(
        &mut self,
        image: Self::Image,
        pose: &PoseFrame,
        style: &LandmarkStyle,
    ) -> Self::Image;

    /// Draw a text banner.
    fn draw_banner(&mut self, image: Self::Image, text: &str, style: &BannerStyle) -> Self::Image;

    /// Present the annotated image to the user.
    fn show(&mut self, image: &Self::Image);
}
