// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;

use std::path::PathBuf;

use crate::color::Color;
use crate::diff::Threshold;
use crate::source::clean_path;

#[derive(Debug, StructOpt)]
#[structopt(about = "Highlight the regions where two images differ.")]
pub struct Args {
    /// Path to a configuration file.
    #[structopt(short, long, parse(from_os_str))]
    pub config_path: Option<PathBuf>,

    /// The first image. Its dimensions are used for the comparison.
    #[structopt(parse(from_str = clean_path))]
    pub left: PathBuf,

    /// The second image, resized to match the first if needed.
    #[structopt(parse(from_str = clean_path))]
    pub right: PathBuf,

    /// Directory the annotated images and the difference mask are written to.
    #[structopt(short, long, parse(from_os_str), default_value = ".")]
    pub output: PathBuf,

    /// Difference threshold (0-255), or "automatic". Overrides the configuration file.
    #[structopt(short, long)]
    pub threshold: Option<Threshold>,

    /// Outline color as a name or "#rrggbb". Overrides the configuration file.
    #[structopt(short = "C", long)]
    pub highlight: Option<Color>,

    /// Write the outputs scaled down for viewing instead of at full size.
    #[structopt(long)]
    pub preview: bool,
}

#[cfg(test)]
mod test {
    use super::Args;
    use crate::color::Color;
    use crate::diff::Threshold;
    use std::path::PathBuf;
    use structopt::StructOpt;

    #[test]
    fn minimal() {
        let args = Args::from_iter(&["visual-diff", "a.png", "b.png"]);
        assert_eq!(args.left, PathBuf::from("a.png"));
        assert_eq!(args.right, PathBuf::from("b.png"));
        assert_eq!(args.output, PathBuf::from("."));
        assert_eq!(args.config_path, None);
        assert_eq!(args.threshold, None);
        assert!(!args.preview);
    }

    #[test]
    fn dropped_paths() {
        let args = Args::from_iter(&["visual-diff", "{/tmp/my a.png}", "{/tmp/my b.png}"]);
        assert_eq!(args.left, PathBuf::from("/tmp/my a.png"));
        assert_eq!(args.right, PathBuf::from("/tmp/my b.png"));
    }

    #[test]
    fn overrides() {
        let args = Args::from_iter(&[
            "visual-diff",
            "-t",
            "automatic",
            "-C",
            "#00ffff",
            "--preview",
            "-o",
            "out",
            "a.png",
            "b.png",
        ]);
        assert_eq!(args.threshold, Some(Threshold::Automatic));
        assert_eq!(args.highlight, Some(Color::CYAN));
        assert_eq!(args.output, PathBuf::from("out"));
        assert!(args.preview);
    }

    #[test]
    fn bad_threshold() {
        let parsed = Args::from_iter_safe(&["visual-diff", "-t", "lots", "a.png", "b.png"]);
        assert!(parsed.is_err());
    }
}
