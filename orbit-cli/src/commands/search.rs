//! Search command implementation.

use crate::cache;
use anyhow::{Context, Result};
use orbit_core::{build_search_index, Config, SearchEntry};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub limit: usize,
    pub json: bool,
    pub tags: Vec<String>,
}

/// Search article content from the terminal.
pub fn search_site(config_path: &Path, query: &str, opts: SearchOptions) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let site_index = cache::load_or_build(&config)?;
    let entries = build_search_index(&site_index.articles, &config.collection);

    let results = perform_search(&entries, query, &opts.tags);

    if opts.json {
        let payload: Vec<_> = results
            .iter()
            .take(opts.limit)
            .map(|(entry, score)| {
                serde_json::json!({
                    "slug": entry.slug,
                    "url": entry.url,
                    "title": entry.title,
                    "snippet": entry.snippet,
                    "tags": entry.tags,
                    "score": score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if results.is_empty() {
        println!("No results found for '{}'", query);
    } else {
        println!("\nFound {} results for '{}':\n", results.len(), query);

        for (entry, _score) in results.iter().take(opts.limit) {
            println!("{} ({})", entry.title, entry.date);
            println!("  {}", entry.url);
            println!("  {}", entry.snippet);
            println!();
        }

        if results.len() > opts.limit {
            println!("  ... and {} more results", results.len() - opts.limit);
        }
    }

    Ok(())
}

/// Score entries against a query. Title hits weigh the most, tag hits
/// next, then plain occurrences in the body text. Entries matching none
/// of the terms are dropped; `tag_filter` (display form, exact) narrows
/// the candidate set first.
pub fn perform_search<'a>(
    entries: &'a [SearchEntry],
    query: &str,
    tag_filter: &[String],
) -> Vec<(&'a SearchEntry, f64)> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<(&SearchEntry, f64)> = entries
        .iter()
        .filter(|entry| {
            tag_filter.is_empty() || entry.tags.iter().any(|t| tag_filter.contains(t))
        })
        .filter_map(|entry| {
            let title = entry.title.to_lowercase();
            let content = entry.content.to_lowercase();
            let tags: Vec<String> = entry.tags.iter().map(|t| t.to_lowercase()).collect();

            let mut score = 0.0;
            for term in &terms {
                if title.contains(term) {
                    score += 5.0;
                }
                if tags.iter().any(|t| t.contains(term)) {
                    score += 3.0;
                }
                score += content.matches(term).count() as f64;
            }

            (score > 0.0).then_some((entry, score))
        })
        .collect();

    // Stable sort keeps date order among equal scores
    results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    results
}
