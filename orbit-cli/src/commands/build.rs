//! Build command implementation.

use crate::cache;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use orbit_core::{build_search_index, static_paths, Config, SiteBuilder, SiteIndex};
use std::fs;
use std::path::Path;

/// Build the site (writes artifacts) and discard the in-memory index
pub fn build_site(config_path: &Path) -> Result<()> {
    build_site_with_index(config_path).map(|_| ())
}

/// Build the site and return the in-memory index alongside the loaded config
pub fn build_site_with_index(config_path: &Path) -> Result<(Config, SiteIndex)> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config)
}

/// Build from an already loaded config, writing artifacts and returning the index.
pub fn build_site_with_config(config: Config) -> Result<(Config, SiteIndex)> {
    tracing::info!("Building site: {}", config.site.title);

    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build().context("Failed to build site")?;

    tracing::info!("Indexed {} articles", site_index.articles.len());
    for diag in &site_index.diagnostics {
        tracing::warn!("[{}] {}", diag.code, diag.message);
    }

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    generate_search_json(&config, &site_index)?;
    generate_tags_json(&config, &site_index)?;
    generate_routes_json(&config, &site_index)?;

    if config.enable_rss {
        generate_rss(&config, &site_index)?;
    } else {
        tracing::info!("RSS disabled; skipping rss.xml");
    }

    if config.enable_sitemap {
        generate_sitemap(&config, &site_index)?;
    } else {
        tracing::info!("Sitemap disabled; skipping sitemap.xml");
    }

    tracing::info!("✓ Built index for {} articles", site_index.articles.len());
    tracing::info!("✓ Output written to {:?}", output_dir);

    if let Err(err) = cache::write_site_index_cache(&config, &site_index) {
        tracing::warn!("Failed to write site index cache: {}", err);
    }

    Ok((config, site_index))
}

/// Generate search.json for the client-side search dialog
fn generate_search_json(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let entries = build_search_index(&site_index.articles, &config.collection);

    let output_path = config.output_dir().join("search.json");
    let json = serde_json::to_string_pretty(&entries).context("Failed to serialize search index")?;
    fs::write(&output_path, json).context("Failed to write search.json")?;

    tracing::info!("Generated search.json with {} entries", entries.len());

    Ok(())
}

/// Generate tags.json with counts and route slugs
fn generate_tags_json(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let tags = site_index.articles.tags_with_counts();

    let output_path = config.output_dir().join("tags.json");
    let json = serde_json::to_string_pretty(&tags).context("Failed to serialize tags")?;
    fs::write(&output_path, json).context("Failed to write tags.json")?;

    tracing::info!("Generated tags.json with {} tags", tags.len());

    Ok(())
}

/// Generate routes.json, the static path manifest for the page generator
fn generate_routes_json(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let paths = static_paths(&site_index.articles, config);

    let output_path = config.output_dir().join("routes.json");
    let json = serde_json::to_string_pretty(&paths).context("Failed to serialize routes")?;
    fs::write(&output_path, json).context("Failed to write routes.json")?;

    tracing::info!("Generated routes.json with {} paths", paths.len());

    Ok(())
}

/// Generate rss.xml
fn generate_rss(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let mut items = String::new();

    for article in site_index.articles.sorted_by_date_desc() {
        let link = absolute_url(&config.site.url, &article.url(&config.collection));
        let title = escape_xml(&article.title);
        let description = escape_xml(article.description.as_deref().unwrap_or(&article.title));

        items.push_str(&format!(
            "<item><title>{}</title><link>{}</link><guid>{}</guid><description>{}</description>",
            title, link, link, description
        ));
        if let Some(pub_date) = article.published.as_ref().map(naive_to_rfc2822) {
            items.push_str(&format!("<pubDate>{}</pubDate>", pub_date));
        }
        items.push_str("</item>");
    }

    let rss = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{}</title>
    <link>{}</link>
    <description>{}</description>
    {}
  </channel>
</rss>
"#,
        escape_xml(&config.site.title),
        absolute_url(&config.site.url, ""),
        escape_xml(&config.site.description),
        items
    );

    fs::write(config.output_dir().join("rss.xml"), rss)?;
    tracing::info!("Generated rss.xml");
    Ok(())
}

/// Generate sitemap.xml over the full route surface
fn generate_sitemap(config: &Config, site_index: &SiteIndex) -> Result<()> {
    let mut urls = String::new();

    for path in static_paths(&site_index.articles, config) {
        let loc = absolute_url(&config.site.url, &path);
        urls.push_str("<url>");
        urls.push_str(&format!("<loc>{}</loc>", escape_xml(&loc)));

        // Article URLs carry a lastmod; listing and tag pages don't
        let slug = path.rsplit('/').next().unwrap_or("");
        if let Some(article) = site_index.articles.by_slug(slug) {
            if let Some(published) = &article.published {
                urls.push_str(&format!(
                    "<lastmod>{}</lastmod>",
                    published.format("%Y-%m-%d")
                ));
            }
        }
        urls.push_str("</url>");
    }

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>
"#,
        urls
    );

    fs::write(config.output_dir().join("sitemap.xml"), xml)?;
    tracing::info!("Generated sitemap.xml");
    Ok(())
}

fn absolute_url(site_url: &str, path: &str) -> String {
    let root = site_url.trim_end_matches('/');
    let rel = path.trim_start_matches('/');
    if rel.is_empty() {
        root.to_string()
    } else {
        format!("{}/{}", root, rel)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn naive_to_rfc2822(datetime: &NaiveDateTime) -> String {
    datetime.and_utc().to_rfc2822()
}
