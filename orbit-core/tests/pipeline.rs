//! End-to-end pipeline test: content files in, routes and queries out.

use orbit_core::{
    build_search_index, resolve_collection_token, resolve_tag_slug, static_paths,
    CollectionRoute, Config, SiteBuilder,
};
use std::fs;
use std::path::Path;

fn scaffold(root: &Path) -> Config {
    let yaml = r#"
site:
  title: "Pipeline Test"
  author: "Tester"
  description: "Desc"
  url: "https://example.com"
paths:
  content: "content"
  output: "dist"
collection: tech-page
articles_per_page: 2
"#;
    let config_path = root.join("orbit.yml");
    fs::write(&config_path, yaml).unwrap();
    fs::create_dir_all(root.join("content")).unwrap();
    Config::from_file(&config_path).unwrap()
}

fn write_article(root: &Path, name: &str, title: &str, date: &str, tags: &str, body: &str) {
    let content = format!(
        "---\ntitle: {}\ndate: {}\ntags: {}\n---\n{}",
        title, date, tags, body
    );
    fs::write(root.join("content").join(name), content).unwrap();
}

#[test]
fn full_pipeline_from_content_to_routes() {
    let dir = tempfile::tempdir().unwrap();
    let config = scaffold(dir.path());

    write_article(
        dir.path(),
        "react.md",
        "React 18 Features",
        "2024-01-03",
        "[React]",
        "# React\n\nConcurrent rendering notes.",
    );
    write_article(
        dir.path(),
        "frontend.md",
        "前端筆記",
        "2024-01-02",
        "[\"前端\", React]",
        "Front-end notes.",
    );
    write_article(
        dir.path(),
        "rust.md",
        "Rust Ownership",
        "2024-01-01",
        "[Rust]",
        "Ownership and borrowing.",
    );

    let site = SiteBuilder::new(config.clone()).build().unwrap();
    let index = &site.articles;
    assert!(site.diagnostics.is_empty());

    // Date-descending listing
    let titles: Vec<&str> = index
        .sorted_by_date_desc()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(titles, vec!["React 18 Features", "前端筆記", "Rust Ownership"]);

    // Slug uniqueness
    let mut slugs: Vec<&str> = index.articles().iter().map(|a| a.slug.as_str()).collect();
    slugs.sort();
    slugs.dedup();
    assert_eq!(slugs.len(), index.len());

    // Page 2 of 2-per-page holds the oldest article
    match resolve_collection_token(index, "2", config.articles_per_page) {
        Some(CollectionRoute::Page {
            number, articles, ..
        }) => {
            assert_eq!(number, 2);
            assert_eq!(articles.len(), 1);
            assert_eq!(articles[0].title, "Rust Ownership");
        }
        other => panic!("expected page 2, got {:?}", other),
    }

    // Slug token resolves to the article itself
    match resolve_collection_token(index, "2024-01-03-0000", config.articles_per_page) {
        Some(CollectionRoute::Article(a)) => assert_eq!(a.title, "React 18 Features"),
        other => panic!("expected article, got {:?}", other),
    }

    // Tag routes: ASCII and percent-encoded CJK both round-trip
    let (tag, articles) = resolve_tag_slug(index, "react").unwrap();
    assert_eq!(tag, "React");
    assert_eq!(articles.len(), 2);

    let (tag, articles) = resolve_tag_slug(index, "%E5%89%8D%E7%AB%AF").unwrap();
    assert_eq!(tag, "前端");
    assert_eq!(articles.len(), 1);

    assert!(resolve_tag_slug(index, "missing").is_none());

    // Static path manifest covers listing pages, articles, and tags
    let paths = static_paths(index, &config);
    assert!(paths.contains(&"/tech-page".to_string()));
    assert!(paths.contains(&"/tech-page/2".to_string()));
    assert!(!paths.contains(&"/tech-page/1".to_string()));
    assert!(paths.contains(&"/tech-page/2024-01-01-0000".to_string()));
    assert!(paths.contains(&"/tags".to_string()));
    assert!(paths.contains(&"/tags/react".to_string()));
    assert!(paths.contains(&"/tags/%E5%89%8D%E7%AB%AF".to_string()));

    // Search entries mirror the sorted listing
    let entries = build_search_index(index, &config.collection);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].title, "React 18 Features");
    assert!(entries[0].content.contains("Concurrent rendering"));
    assert!(!entries[0].content.contains('#'));
}

#[test]
fn rebuilding_yields_identical_slugs() {
    let dir = tempfile::tempdir().unwrap();
    let config = scaffold(dir.path());

    for name in ["a.md", "b.md", "c.md"] {
        write_article(dir.path(), name, "Same Day", "2022-02-06 05:55", "[]", "Body");
    }

    let slugs = |site: &orbit_core::SiteIndex| -> Vec<String> {
        site.articles
            .articles()
            .iter()
            .map(|a| a.slug.to_string())
            .collect()
    };

    let first = SiteBuilder::new(config.clone()).build().unwrap();
    let second = SiteBuilder::new(config).build().unwrap();

    assert_eq!(slugs(&first), slugs(&second));
    assert_eq!(
        slugs(&first),
        vec!["2022-02-06-0555", "2022-02-06-0555-1", "2022-02-06-0555-2"]
    );
}
