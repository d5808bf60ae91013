//! Frontmatter parsing from markdown files.

use crate::models::Frontmatter;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("No frontmatter block found")]
    MissingFrontmatter,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n?(.*)$").unwrap())
}

/// Parse frontmatter from markdown content.
///
/// Returns `(frontmatter, markdown_body)`. Articles must declare a
/// non-empty `title` and `date`; a document without a frontmatter block
/// is rejected rather than defaulted, since it can't be indexed.
///
/// # Example
///
/// ```
/// use orbit_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\n---\n# Hello\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title, "My Post");
/// assert_eq!(fm.date, "2025-01-01");
/// assert!(body.trim().starts_with("# Hello"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let re = frontmatter_regex();

    let captures = re
        .captures(content)
        .ok_or(FrontmatterError::MissingFrontmatter)?;

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;

    if frontmatter.title.is_empty() {
        return Err(FrontmatterError::MissingField("title".to_string()));
    }
    if frontmatter.date.is_empty() {
        return Err(FrontmatterError::MissingField("date".to_string()));
    }

    Ok((frontmatter, body.to_string()))
}
