// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use visual_diff::settings::{Args, Settings};
use visual_diff::{source, Error, ImagePair};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::from_args();
    let settings = Settings::from_args(&args).context("Error loading configuration")?;

    let pair = ImagePair {
        left: Some(source::load(&args.left).context("Error loading the left image")?),
        right: Some(source::load(&args.right).context("Error loading the right image")?),
    };

    let comparison = match pair.compare(&settings.compare) {
        Ok(comparison) => comparison,
        Err(Error::MissingInput(slot)) => {
            warn!(%slot, "nothing to compare");
            return Ok(());
        }
        Err(err) => return Err(err).context("Error comparing images"),
    };
    if comparison.has_differences() {
        for (index, region) in comparison.regions.iter().enumerate() {
            let (top_left, bottom_right) = region.bounds();
            info!(
                index,
                pixels = region.pixel_count(),
                left = top_left.x,
                top = top_left.y,
                right = bottom_right.x,
                bottom = bottom_right.y,
                "difference region"
            );
        }
    } else {
        info!("images are the same");
    }

    let preview_size = if args.preview {
        Some(settings.display.max_size)
    } else {
        None
    };
    source::write_comparison(&comparison, &args.output, preview_size)
        .context("Error writing results")?;
    Ok(())
}
