use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Posture feedback for a folder of images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Scenario to run (A, B, C). Overrides the config file.
    #[arg(long)]
    pub scenario: Option<String>,

    /// Folder containing the images.
    #[arg(long, default_value = "./Data/A")]
    pub folder: PathBuf,

    /// Show each annotated image (true/false). Overrides the config file.
    #[arg(long, action = ArgAction::Set)]
    pub show: Option<bool>,

    /// Configuration file.
    #[arg(long, default_value = "postura.toml")]
    pub config: PathBuf,

    /// Image file extension to pick up.
    #[arg(long, default_value = ".jpeg")]
    pub extension: String,

    /// Folder holding the `<image>.json` detections. Defaults to the image
    /// folder.
    #[arg(long)]
    pub detections: Option<PathBuf>,

    /// Write the effective configuration to `--config` and exit.
    #[arg(long)]
    pub write_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["postura"]);
        assert!(args.scenario.is_none());
        assert_eq!(args.folder, PathBuf::from("./Data/A"));
        assert!(args.show.is_none());
        assert_eq!(args.extension, ".jpeg");
        assert!(!args.write_config);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "postura",
            "--scenario",
            "C",
            "--folder",
            "/tmp/imgs",
            "--show",
            "false",
        ]);
        assert_eq!(args.scenario.as_deref(), Some("C"));
        assert_eq!(args.folder, PathBuf::from("/tmp/imgs"));
        assert_eq!(args.show, Some(false));
    }
}
