//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../orbit.yml.example");

/// Initialize a new orbit project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_content(root)?;

    println!("✓ orbit initialized in {:?}", root);
    println!("  - Edit orbit.yml to customize site metadata");
    println!("  - Write articles in content/articles/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("orbit.yml");
    if config_path.exists() {
        println!("orbit.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_content(root: &Path) -> Result<()> {
    let articles = root.join("content").join("articles");
    fs::create_dir_all(&articles).with_context(|| format!("Failed to create {:?}", articles))?;

    // Starter article
    let sample = articles.join("welcome.md");
    if !sample.exists() {
        fs::write(&sample, sample_article())?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

fn sample_article() -> String {
    r#"---
title: Welcome to orbit
date: 2025-01-01 09:00
tags: [orbit, intro]
---

# Welcome

This is your first article. Edit `orbit.yml` to update site metadata, then run:

```bash
orbit build
orbit dev
```

Articles get a date-derived slug; this one lives at `/tech-page/2025-01-01-0900`.
"#
    .to_string()
}
