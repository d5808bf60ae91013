//! Content model structs for articles, the index, and diagnostics.

use crate::tags::{find_original_tag, tag_to_slug};
use chrono::NaiveDateTime;
use orbit_types::{Slug, TagSlug};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Frontmatter metadata from markdown files.
///
/// `title` and `date` are required; empty values are rejected by the
/// frontmatter parser. The optional `slug` field, when present, is used
/// as the date-format source for slug derivation instead of `date`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub draft: bool,
}

/// A single published article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Canonical URL identifier, unique within the index.
    pub slug: Slug,

    /// Display title.
    pub title: String,

    /// Raw date string from frontmatter, preserved for display.
    pub date: String,

    /// Parsed timestamp used as the sort key; `None` when the raw date
    /// fails to parse (such articles sort after all dated ones).
    pub published: Option<NaiveDateTime>,

    /// Display-facing tags, original casing and characters preserved.
    pub tags: Vec<String>,

    /// Optional summary from frontmatter.
    pub description: Option<String>,

    /// Raw markdown body. Rendering to markup happens outside this
    /// crate; the body is opaque here.
    pub body: String,

    /// Source file path relative to the content directory.
    pub source_path: PathBuf,
}

impl Article {
    /// URL path for this article under the collection base segment.
    pub fn url(&self, collection: &str) -> String {
        format!("/{}/{}", collection.trim_matches('/'), self.slug)
    }
}

/// A display tag with its occurrence count and route slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub slug: TagSlug,
    pub count: usize,
}

/// Immutable registry over the full article set.
///
/// Built once per content build; all queries are read-only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArticleIndex {
    articles: Vec<Article>,
}

impl ArticleIndex {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles ordered by date descending. Equal dates keep input
    /// order (stable sort), which the builder fixes to source-path order.
    pub fn sorted_by_date_desc(&self) -> Vec<&Article> {
        let mut sorted: Vec<&Article> = self.articles.iter().collect();
        sorted.sort_by(|a, b| b.published.cmp(&a.published));
        sorted
    }

    /// Look up an article by its canonical slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug.as_str() == slug)
    }

    /// All articles carrying `tag` (exact display-tag match), date
    /// descending.
    pub fn by_tag(&self, tag: &str) -> Vec<&Article> {
        let mut matched: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.tags.iter().any(|t| t == tag))
            .collect();
        matched.sort_by(|a, b| b.published.cmp(&a.published));
        matched
    }

    /// Every tag appearing in any article, once each, in first-encounter
    /// order.
    pub fn unique_tags(&self) -> Vec<String> {
        self.unique_tag_refs()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Tags with occurrence counts, sorted by count descending; ties
    /// keep first-encounter order.
    pub fn tags_with_counts(&self) -> Vec<TagCount> {
        let mut counts: Vec<TagCount> = Vec::new();

        for article in &self.articles {
            for tag in &article.tags {
                match counts.iter_mut().find(|c| &c.tag == tag) {
                    Some(entry) => entry.count += 1,
                    None => counts.push(TagCount {
                        tag: tag.clone(),
                        slug: tag_to_slug(tag),
                        count: 1,
                    }),
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }

    /// Resolve a tag slug back to the display tag known to this index.
    pub fn find_original_tag(&self, slug: &str) -> Option<&str> {
        let tags = self.unique_tag_refs();
        find_original_tag(slug, &tags)
    }

    fn unique_tag_refs(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for article in &self.articles {
            for tag in &article.tags {
                if seen.insert(tag.as_str()) {
                    tags.push(tag.as_str());
                }
            }
        }
        tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Info,
}

/// A build-time finding that should not fail the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Slug>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

/// Complete build-time artifact: the article index plus diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteIndex {
    pub articles: ArticleIndex,
    pub diagnostics: Vec<Diagnostic>,
}
