//! Slug generation and deduplication.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Punctuation that becomes a word separator rather than being dropped.
/// Covers the CJK marks that show up in article filenames plus em/en dashes.
const SEPARATOR_PUNCT: &[&str] = &[
    "，", "。", "！", "？", "、", "；", "：", "「", "」", "『", "』", "（", "）", "—", "–", ".",
];

/// Convert a raw identifier (e.g. a filename stem) to a URL-safe slug.
///
/// Rules:
/// - Lowercase
/// - Replace whitespace, underscores, and separator punctuation with hyphens
/// - Drop anything that is not ASCII alphanumeric, a CJK ideograph, or a hyphen
/// - Collapse repeated hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use orbit_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("週記，三月"), "週記-三月");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let with_hyphens = lowercased
        .graphemes(true)
        .map(|g| {
            let is_space = g.chars().all(char::is_whitespace) && !g.is_empty();
            if is_space || g == "_" || SEPARATOR_PUNCT.contains(&g) {
                "-"
            } else {
                g
            }
        })
        .collect::<String>();

    let cleaned = with_hyphens
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_ascii_alphanumeric() || c == '-' || is_cjk(c) {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = HYPHEN_RUNS.replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fff}'   // CJK Unified Ideographs
        | '\u{3400}'..='\u{4dbf}' // Extension A
        | '\u{f900}'..='\u{faff}' // Compatibility Ideographs
    )
}

/// Derive a fixed-width slug from a date-like string.
///
/// Accepted inputs are RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM[:SS]`, or a bare `YYYY-MM-DD` (treated as midnight).
/// The output pattern is always `YYYY-MM-DD-HHmm`. A string that fails
/// every parse is returned unchanged so a bad date never fails a build.
///
/// # Examples
///
/// ```
/// use orbit_core::date_slug;
///
/// assert_eq!(date_slug("2022-02-06 05:55"), "2022-02-06-0555");
/// assert_eq!(date_slug("2022-02-06"), "2022-02-06-0000");
/// assert_eq!(date_slug("not a date"), "not a date");
/// ```
pub fn date_slug(raw: &str) -> String {
    match parse_date(raw) {
        Some(dt) => dt.format("%Y-%m-%d-%H%M").to_string(),
        None => raw.to_string(),
    }
}

/// Parse a frontmatter date string into a timestamp usable as a sort key.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

/// Collision accumulator for one index-build pass.
///
/// The first occurrence of a base slug is emitted unchanged; the Nth
/// repeat gets `-N` appended. Callers must feed documents in a fixed,
/// stable order (the builder sorts by source path) so assignment is
/// reproducible across environments.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    seen: HashMap<String, u32>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        let slug = if *count == 0 {
            base.to_string()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}
