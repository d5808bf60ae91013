//! Client-side search index construction.
//!
//! One entry per article, built from the raw markdown body. Bodies are
//! never rendered to markup inside this crate, so the plain text comes
//! from lightweight markdown-syntax stripping rather than HTML parsing.

use crate::models::ArticleIndex;
use once_cell::sync::Lazy;
use orbit_types::Slug;
use regex::Regex;
use serde::{Deserialize, Serialize};

const SNIPPET_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntry {
    pub slug: Slug,
    pub url: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,

    /// Plain text content for matching.
    pub content: String,

    /// First ~200 chars for result previews.
    pub snippet: String,
}

/// Build the search index over every article, date descending.
pub fn build_search_index(index: &ArticleIndex, collection: &str) -> Vec<SearchEntry> {
    index
        .sorted_by_date_desc()
        .into_iter()
        .map(|article| {
            let content = markdown_to_text(&article.body);
            let snippet = create_snippet(&content, SNIPPET_LEN);
            SearchEntry {
                slug: article.slug.clone(),
                url: article.url(collection),
                title: article.title.clone(),
                date: article.date.clone(),
                tags: article.tags.clone(),
                content,
                snippet,
            }
        })
        .collect()
}

static INLINE_MARKUP: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        // Images first so their link syntax doesn't leave alt text with a URL
        (Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap(), "$1"),
        (Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap(), "$1"),
        (Regex::new(r"`([^`]*)`").unwrap(), "$1"),
        (Regex::new(r"[*_]{1,3}([^*_]+)[*_]{1,3}").unwrap(), "$1"),
        (Regex::new(r"<[^>]+>").unwrap(), ""),
    ]
});

/// Strip markdown syntax down to searchable plain text. Fenced code
/// blocks are dropped wholesale; heading/quote/list markers and inline
/// markup are removed.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let stripped = trimmed
            .trim_start_matches('#')
            .trim_start_matches('>')
            .trim_start_matches(['-', '*', '+'])
            .trim_start();
        if !stripped.is_empty() {
            lines.push(stripped.to_string());
        }
    }

    let mut text = lines.join(" ");
    for (re, replacement) in INLINE_MARKUP.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }

    // Collapse whitespace left behind by stripping
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars`, on a char boundary, appending an
/// ellipsis when anything was cut.
pub fn create_snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;
    use crate::slug::parse_date;
    use std::path::PathBuf;

    fn article_with_body(slug: &str, body: &str) -> Article {
        Article {
            slug: Slug::new(slug),
            title: "Title".to_string(),
            date: "2024-01-01".to_string(),
            published: parse_date("2024-01-01"),
            tags: vec!["React".to_string()],
            description: None,
            body: body.to_string(),
            source_path: PathBuf::from(format!("{slug}.md")),
        }
    }

    #[test]
    fn test_markdown_to_text() {
        let md = "# Heading\n\nSome *bold* text with a [link](https://example.com).\n\n```rust\nfn hidden() {}\n```\n\n- item one\n- item two\n";
        let text = markdown_to_text(md);
        assert_eq!(
            text,
            "Heading Some bold text with a link. item one item two"
        );
    }

    #[test]
    fn test_markdown_to_text_images() {
        let text = markdown_to_text("Intro ![diagram](img.png) outro");
        assert_eq!(text, "Intro diagram outro");
    }

    #[test]
    fn test_snippet_truncation() {
        let text = "a".repeat(300);
        let snippet = create_snippet(&text, 200);
        assert_eq!(snippet.chars().count(), 201); // 200 chars + ellipsis
        assert!(snippet.ends_with('…'));

        assert_eq!(create_snippet("short", 200), "short");
    }

    #[test]
    fn test_build_search_index() {
        let index = ArticleIndex::new(vec![article_with_body(
            "2024-01-01-0000",
            "# Hello\n\nSearchable body",
        )]);
        let entries = build_search_index(&index, "tech-page");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "/tech-page/2024-01-01-0000");
        assert_eq!(entries[0].content, "Hello Searchable body");
        assert_eq!(entries[0].tags, vec!["React"]);
    }
}
