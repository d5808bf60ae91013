//! Index building - discovers content, assigns slugs, aggregates tags.

use crate::config::Config;
use crate::frontmatter::parse_frontmatter;
use crate::models::{Article, ArticleIndex, Diagnostic, DiagnosticSeverity, SiteIndex};
use crate::slug::{date_slug, parse_date, SlugAllocator};
use crate::tags::tag_to_slug;
use orbit_types::Slug;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] crate::frontmatter::FrontmatterError),
}

/// Builds the immutable site index in one deterministic pass.
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the full index.
    ///
    /// Documents are processed in source-path order so slug
    /// deduplication is reproducible regardless of filesystem iteration
    /// order. Files that fail to parse are logged and skipped; they
    /// never abort the build.
    pub fn build(&self) -> Result<SiteIndex, BuildError> {
        let mut files = self.discover_content_files()?;
        files.sort();

        tracing::info!("Found {} markdown files", files.len());

        let content_dir = self.config.content_dir();
        let mut allocator = SlugAllocator::new();
        let mut articles: Vec<Article> = Vec::new();
        let mut seen_slugs: HashSet<String> = HashSet::new();

        for file_path in &files {
            match self.parse_article(file_path, &content_dir, &mut allocator, &mut seen_slugs) {
                Ok(Some(article)) => {
                    articles.push(article);
                }
                Ok(None) => {
                    tracing::debug!("Skipping draft: {:?}", file_path);
                }
                Err(e) => {
                    tracing::error!("Failed to parse {:?}: {}", file_path, e);
                    // Continue with other files
                }
            }
        }

        let index = ArticleIndex::new(articles);
        let diagnostics = tag_collision_diagnostics(&index);

        tracing::info!(
            "Built article index with {} articles, {} tags",
            index.len(),
            index.unique_tags().len()
        );

        Ok(SiteIndex {
            articles: index,
            diagnostics,
        })
    }

    /// Discover all markdown files under the content directory.
    fn discover_content_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let content_dir = self.config.content_dir();
        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);
        let mut files = Vec::new();

        for entry in WalkDir::new(&content_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Some(ext) = entry.path().extension() {
                if ext == "md" {
                    let rel = entry
                        .path()
                        .strip_prefix(&content_dir)
                        .unwrap_or(entry.path())
                        .to_string_lossy()
                        .to_string();
                    if should_ignore(&rel, &ignore_patterns) {
                        tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                        continue;
                    }

                    files.push(entry.path().to_path_buf());
                }
            }
        }

        Ok(files)
    }

    /// Parse a single markdown file into an Article. Returns `Ok(None)`
    /// for drafts.
    fn parse_article(
        &self,
        path: &Path,
        content_dir: &Path,
        allocator: &mut SlugAllocator,
        seen_slugs: &mut HashSet<String>,
    ) -> Result<Option<Article>, BuildError> {
        let content = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_frontmatter(&content)?;

        if frontmatter.draft {
            return Ok(None);
        }

        // A declared slug field is the date-format source; otherwise the
        // publish date is. Unparseable strings pass through unchanged.
        let base = match &frontmatter.slug {
            Some(declared) => date_slug(declared),
            None => date_slug(&frontmatter.date),
        };

        // The allocator disambiguates repeated bases, but a
        // frontmatter-declared slug can still land on an already
        // assigned suffix. Re-feed the colliding slug until it is
        // unique; path order keeps this deterministic.
        let mut slug = allocator.assign(&base);
        while !seen_slugs.insert(slug.clone()) {
            tracing::warn!("Slug {} already assigned, reassigning", slug);
            slug = allocator.assign(&slug);
        }

        let source_path = path
            .strip_prefix(content_dir)
            .unwrap_or(path)
            .to_path_buf();

        Ok(Some(Article {
            slug: Slug::new(slug),
            title: frontmatter.title.clone(),
            published: parse_date(&frontmatter.date),
            date: frontmatter.date.clone(),
            tags: frontmatter.tags.clone(),
            description: frontmatter.description.clone(),
            body,
            source_path,
        }))
    }
}

/// Detect distinct display tags canonicalizing to the same slug.
/// Policy is first-wins: the earlier tag (encounter order) owns the
/// slug; the collision surfaces as a warning, never a build failure.
fn tag_collision_diagnostics(index: &ArticleIndex) -> Vec<Diagnostic> {
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut diagnostics = Vec::new();

    for tag in index.unique_tags() {
        let slug = tag_to_slug(&tag);
        match owners.get(slug.as_str()) {
            Some(owner) => {
                tracing::warn!(
                    "Tag '{}' collides with '{}' on slug '{}'",
                    tag,
                    owner,
                    slug
                );
                diagnostics.push(Diagnostic {
                    code: "tag.slug_collision".to_string(),
                    message: format!(
                        "Tag '{}' collides with '{}' on slug '{}'; '{}' keeps the route",
                        tag, owner, slug, owner
                    ),
                    severity: DiagnosticSeverity::Warning,
                    slug: None,
                    source_path: None,
                });
            }
            None => {
                owners.insert(slug.as_str().to_string(), tag);
            }
        }
    }

    diagnostics
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("Invalid ignore pattern '{}': {}", p, e);
                None
            }
        })
        .collect()
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_article(dir: &Path, name: &str, frontmatter: &str, body: &str) {
        let content = format!("---\n{}\n---\n{}", frontmatter, body);
        fs::write(dir.join(name), content).unwrap();
    }

    fn test_config(root: &Path) -> Config {
        let yaml = r#"
site:
  title: "Test"
  author: "Tester"
  description: "Desc"
  url: "https://example.com"
paths:
  content: "content"
  output: "dist"
collection: tech-page
"#;
        let config_path = root.join("orbit.yml");
        fs::write(&config_path, yaml).unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        Config::from_file(&config_path).unwrap()
    }

    #[test]
    fn test_build_assigns_date_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        write_article(&content, "a.md", "title: A\ndate: 2024-01-03", "Body A");
        write_article(
            &content,
            "b.md",
            "title: B\ndate: 2024-01-01 09:30",
            "Body B",
        );

        let site = SiteBuilder::new(config).build().unwrap();
        assert_eq!(site.articles.len(), 2);
        assert!(site.articles.by_slug("2024-01-03-0000").is_some());
        assert!(site.articles.by_slug("2024-01-01-0930").is_some());
    }

    #[test]
    fn test_build_dedups_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        // Same base slug from three files; path order fixes the counters
        for name in ["a.md", "b.md", "c.md"] {
            write_article(
                &content,
                name,
                "title: Dup\ndate: 2022-02-06 05:55",
                "Body",
            );
        }

        let site = SiteBuilder::new(config).build().unwrap();
        let slugs: Vec<&str> = site
            .articles
            .articles()
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        assert_eq!(
            slugs,
            vec![
                "2022-02-06-0555",
                "2022-02-06-0555-1",
                "2022-02-06-0555-2"
            ]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        for (name, date) in [("x.md", "2024-05-01"), ("y.md", "2024-05-01"), ("z.md", "2024-06-01")]
        {
            write_article(&content, name, &format!("title: T\ndate: {}", date), "Body");
        }

        let first = SiteBuilder::new(config.clone()).build().unwrap();
        let second = SiteBuilder::new(config).build().unwrap();

        let slugs = |site: &SiteIndex| -> Vec<String> {
            site.articles
                .articles()
                .iter()
                .map(|a| a.slug.to_string())
                .collect()
        };
        assert_eq!(slugs(&first), slugs(&second));
    }

    #[test]
    fn test_declared_slug_overrides_date() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        write_article(
            &content,
            "a.md",
            "title: A\ndate: 2024-01-03\nslug: 2020-12-24 18:00",
            "Body",
        );

        let site = SiteBuilder::new(config).build().unwrap();
        assert!(site.articles.by_slug("2020-12-24-1800").is_some());
    }

    #[test]
    fn test_declared_slug_collision_is_reassigned() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        // c.md's allocated "x-1" lands on b.md's declared slug; the
        // build resolves it instead of failing.
        write_article(&content, "a.md", "title: A\ndate: 2024-01-01\nslug: x", "Body");
        write_article(&content, "b.md", "title: B\ndate: 2024-01-02\nslug: x-1", "Body");
        write_article(&content, "c.md", "title: C\ndate: 2024-01-03\nslug: x", "Body");

        let site = SiteBuilder::new(config).build().unwrap();
        let slugs: Vec<&str> = site
            .articles
            .articles()
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["x", "x-1", "x-1-1"]);
    }

    #[test]
    fn test_unparseable_date_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        write_article(&content, "a.md", "title: A\ndate: someday", "Body");

        let site = SiteBuilder::new(config).build().unwrap();
        let article = site.articles.by_slug("someday").unwrap();
        assert!(article.published.is_none());
    }

    #[test]
    fn test_drafts_and_broken_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        write_article(&content, "a.md", "title: A\ndate: 2024-01-01", "Body");
        write_article(
            &content,
            "b.md",
            "title: B\ndate: 2024-01-02\ndraft: true",
            "Body",
        );
        fs::write(content.join("c.md"), "no frontmatter here").unwrap();

        let site = SiteBuilder::new(config).build().unwrap();
        assert_eq!(site.articles.len(), 1);
    }

    #[test]
    fn test_tag_collision_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let content = dir.path().join("content");

        write_article(
            &content,
            "a.md",
            "title: A\ndate: 2024-01-01\ntags: [\"Node.js\"]",
            "Body",
        );
        write_article(
            &content,
            "b.md",
            "title: B\ndate: 2024-01-02\ntags: [\"node js\"]",
            "Body",
        );

        let site = SiteBuilder::new(config).build().unwrap();
        assert_eq!(site.diagnostics.len(), 1);
        let diag = &site.diagnostics[0];
        assert_eq!(diag.code, "tag.slug_collision");
        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        // First-wins: the earlier tag keeps the route
        assert_eq!(site.articles.find_original_tag("node-js"), Some("Node.js"));
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.ignore_patterns = vec!["^templates/".to_string()];
        let content = dir.path().join("content");
        fs::create_dir_all(content.join("templates")).unwrap();

        write_article(&content, "a.md", "title: A\ndate: 2024-01-01", "Body");
        write_article(
            &content.join("templates"),
            "t.md",
            "title: T\ndate: 2024-01-02",
            "Body",
        );

        let site = SiteBuilder::new(config).build().unwrap();
        assert_eq!(site.articles.len(), 1);
    }
}
