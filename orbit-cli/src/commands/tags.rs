//! Tags command: list every tag with its article count and route slug.

use crate::cache;
use anyhow::{Context, Result};
use orbit_core::Config;
use std::path::Path;

pub fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let site_index = cache::load_or_build(&config)?;
    let tags = site_index.articles.tags_with_counts();

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    if tags.is_empty() {
        println!("No tags found");
        return Ok(());
    }

    for entry in &tags {
        println!(
            "{:>4}  {}  (/tags/{})",
            entry.count, entry.tag, entry.slug
        );
    }

    Ok(())
}
