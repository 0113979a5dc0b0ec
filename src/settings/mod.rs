// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use serde::Deserialize;
use tracing::debug;

use std::fs;
use std::path::Path;

mod cli;

use crate::diff::CompareSettings;
use crate::display::DisplaySettings;
pub use cli::Args;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// How images are compared.
    #[serde(default)]
    pub compare: CompareSettings,

    /// How images are scaled for viewing.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Settings {
    /// Read settings from a TOML file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let config_data = fs::read_to_string(path)
            .with_context(|| format!("Unable to read configuration file {}", path.display()))?;
        let settings: Self = toml::from_str(&config_data)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        debug!(?settings, "loaded configuration");
        Ok(settings)
    }

    /// Load the configuration file named on the command line (if any), then apply any overrides
    /// also given on the command line.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        if let Some(threshold) = args.threshold {
            settings.compare.threshold = threshold;
        }
        if let Some(highlight) = args.highlight {
            settings.compare.highlight = highlight;
        }
        let highlight = format!("{:x}", settings.compare.highlight);
        debug!(
            threshold = ?settings.compare.threshold,
            %highlight,
            line_width = settings.compare.line_width,
            "effective comparison settings"
        );
        Ok(settings)
    }
}
