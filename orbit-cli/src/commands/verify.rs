//! Verify content health and emit diagnostics.

use anyhow::{Context, Result};
use orbit_core::{Config, DiagnosticSeverity, SiteBuilder};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct VerificationSummary<'a> {
    articles: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    diagnostics: &'a [orbit_core::Diagnostic],
}

/// Run the build pipeline without writing output and surface diagnostics.
pub fn verify_site(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let site_index = SiteBuilder::new(config)
        .build()
        .context("Failed to build site for verification")?;

    let diagnostics = site_index.diagnostics;
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Warning)
        .count();
    let infos = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Info)
        .count();

    let summary = VerificationSummary {
        articles: site_index.articles.len(),
        errors,
        warnings,
        infos,
        diagnostics: &diagnostics,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Verification complete: {} articles, {} errors, {} warnings, {} info",
            summary.articles, errors, warnings, infos
        );
        for diag in &diagnostics {
            println!("  [{}] {}", diag.code, diag.message);
        }
    }

    Ok(())
}
