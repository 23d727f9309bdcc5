//! [`ConsoleRenderer`] – prints drawing requests to the terminal.
//!
//! Stands in for a pixel renderer: each banner is printed in its configured
//! text colour and the annotated "image" is the list of requests made for it.

use std::path::{Path, PathBuf};

use colored::Colorize;
use postura_feedback::{BannerStyle, LandmarkStyle, Renderer};
use postura_types::{BannerPlacement, PoseFrame, PostureError};

/// Everything requested for one image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotated {
    pub path: PathBuf,
    pub skeletons: usize,
    pub highlighted: Vec<String>,
    pub banners: Vec<(BannerPlacement, String)>,
}

#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    /// Suppress terminal output; requests are still recorded.
    quiet: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Renderer for ConsoleRenderer {
    type Image = Annotated;

    fn load(&mut self, path: &Path) -> Result<Self::Image, PostureError> {
        if !path.is_file() {
            return Err(PostureError::Io(format!("image not found: {}", path.display())));
        }
        Ok(Annotated {
            path: path.to_path_buf(),
            ..Annotated::default()
        })
    }

    fn draw_landmarks(
        &mut self,
        mut image: Self::Image,
        pose: &PoseFrame,
        style: &LandmarkStyle,
    ) -> Self::Image {
        image.skeletons += 1;
        image.highlighted = style
            .highlighted
            .iter()
            .filter(|s| pose.joint(s.joint).is_ok())
            .map(|s| s.joint.name().to_string())
            .collect();
        image
    }

    fn draw_banner(
        &mut self,
        mut image: Self::Image,
        text: &str,
        style: &BannerStyle,
    ) -> Self::Image {
        if !self.quiet {
            let [b, g, r] = style.text_color;
            println!("    {}", text.truecolor(r, g, b).bold());
        }
        image.banners.push((style.placement, text.to_string()));
        image
    }

    fn show(&mut self, image: &Self::Image) {
        if self.quiet {
            return;
        }
        let name = image
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!(
            "  {} {} ({} pose(s), {} banner(s))",
            "▸".cyan(),
            name.bold(),
            image.skeletons,
            image.banners.len()
        );
    }
}
