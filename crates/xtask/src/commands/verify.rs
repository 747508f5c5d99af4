//! Verify a content directory
//!
//! Loads every catalog, reports all dangling references at once, then builds
//! the repository to surface structural errors.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use realm_content::{ContentFactory, ContentRepository, verify};
use realm_core::GameError;

use crate::utils;

/// Check content for errors
#[derive(Parser, Debug)]
pub struct Verify {
    /// Content directory (defaults to CONTENT_DATA_DIR or the sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Verify {
    pub fn execute(self) -> Result<()> {
        let data_dir = utils::data_dir(self.data_dir);
        let bundle = ContentFactory::new(&data_dir)
            .load_bundle()
            .with_context(|| format!("Failed to load content from {}", data_dir.display()))?;

        let report = verify(&bundle);
        for finding in report.iter() {
            println!(
                "{} [{}] {}",
                style("✗").red().bold(),
                finding.error_code(),
                finding
            );
        }
        if !report.is_clean() {
            anyhow::bail!("{}", report);
        }

        let repository = ContentRepository::build(bundle)?;
        println!(
            "{} {} locations, {} zones, {} skills verified in {}",
            style("✓").green().bold(),
            repository.locations().len(),
            repository.zones().len(),
            repository.skills().count(),
            style(data_dir.display()).cyan()
        );
        Ok(())
    }
}
