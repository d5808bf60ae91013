//! Route surface over the article index.
//!
//! The routing layer exposes:
//! - `/{collection}`: page 1 of the date-sorted listing
//! - `/{collection}/{n}`: page n (n >= 2, numeric token)
//! - `/{collection}/{slug}`: single article
//! - `/tags`: tag listing with counts
//! - `/tags/{tagSlug}`: articles for a tag
//!
//! Resolution is pure; every miss is a sentinel the caller turns into a
//! 404, never an error that aborts anything.

use crate::config::Config;
use crate::models::{Article, ArticleIndex};
use crate::pagination::{is_page_number, page_path, page_slice, total_pages};
use crate::tags::tag_to_slug;

/// Resolution of the `/{collection}/{token}` segment.
#[derive(Debug)]
pub enum CollectionRoute<'a> {
    /// Listing page `number` (always >= 2; page 1 is the bare path).
    Page {
        number: usize,
        total_pages: usize,
        articles: Vec<&'a Article>,
    },

    /// Single article addressed by slug.
    Article(&'a Article),
}

/// Classify and resolve a collection token. `None` covers every miss:
/// unknown slug, page 0 or 1 (page 1 has no suffix), and pages past the
/// end.
pub fn resolve_collection_token<'a>(
    index: &'a ArticleIndex,
    token: &str,
    page_size: usize,
) -> Option<CollectionRoute<'a>> {
    if is_page_number(token) {
        let number: usize = token.parse().ok()?;
        if number < 2 {
            return None;
        }

        let sorted = index.sorted_by_date_desc();
        let total = total_pages(sorted.len(), page_size);
        if number > total {
            return None;
        }

        let articles = page_slice(&sorted, number, page_size)?.to_vec();
        return Some(CollectionRoute::Page {
            number,
            total_pages: total,
            articles,
        });
    }

    index.by_slug(token).map(CollectionRoute::Article)
}

/// Resolve a `/tags/{tagSlug}` segment to the display tag and its
/// articles, date descending.
pub fn resolve_tag_slug<'a>(
    index: &'a ArticleIndex,
    tag_slug: &str,
) -> Option<(&'a str, Vec<&'a Article>)> {
    let tag = index.find_original_tag(tag_slug)?;
    let articles = index.by_tag(tag);
    Some((tag, articles))
}

/// Every route path the static generator must emit for this index:
/// the listing base, numbered pages from 2, each article URL, the tag
/// listing, and each tag path.
pub fn static_paths(index: &ArticleIndex, config: &Config) -> Vec<String> {
    let collection = &config.collection;
    let mut paths = vec![page_path(collection, 1)];

    let total = total_pages(index.len(), config.articles_per_page);
    for number in 2..=total {
        paths.push(page_path(collection, number));
    }

    for article in index.sorted_by_date_desc() {
        paths.push(article.url(collection));
    }

    paths.push("/tags".to_string());
    for tag in index.unique_tags() {
        paths.push(format!("/tags/{}", tag_to_slug(&tag)));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slug::parse_date;
    use orbit_types::Slug;
    use std::path::PathBuf;

    fn article(slug: &str, date: &str, tags: &[&str]) -> Article {
        Article {
            slug: Slug::new(slug),
            title: slug.to_string(),
            date: date.to_string(),
            published: parse_date(date),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: None,
            body: String::new(),
            source_path: PathBuf::from(format!("{slug}.md")),
        }
    }

    fn index_of(n: usize) -> ArticleIndex {
        ArticleIndex::new(
            (0..n)
                .map(|i| {
                    article(
                        &format!("2024-01-01-{:04}", i),
                        &format!("2024-01-01 {:02}:{:02}", i / 60, i % 60),
                        &[],
                    )
                })
                .collect(),
        )
    }

    fn config() -> Config {
        serde_yaml::from_str(
            r#"
site:
  title: "T"
  author: "A"
  description: "D"
  url: "https://example.com"
paths:
  content: "content"
  output: "dist"
collection: tech-page
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_token_resolves_to_page() {
        let index = index_of(25);
        match resolve_collection_token(&index, "3", 10) {
            Some(CollectionRoute::Page {
                number,
                total_pages,
                articles,
            }) => {
                assert_eq!(number, 3);
                assert_eq!(total_pages, 3);
                assert_eq!(articles.len(), 5);
            }
            other => panic!("expected page, got {:?}", other),
        }
    }

    #[test]
    fn test_page_one_and_zero_are_not_found() {
        let index = index_of(25);
        assert!(resolve_collection_token(&index, "1", 10).is_none());
        assert!(resolve_collection_token(&index, "0", 10).is_none());
    }

    #[test]
    fn test_page_past_end_is_not_found() {
        let index = index_of(25);
        assert!(resolve_collection_token(&index, "4", 10).is_none());
    }

    #[test]
    fn test_slug_token_resolves_to_article() {
        let index = index_of(3);
        match resolve_collection_token(&index, "2024-01-01-0001", 10) {
            Some(CollectionRoute::Article(a)) => assert_eq!(a.slug.as_str(), "2024-01-01-0001"),
            other => panic!("expected article, got {:?}", other),
        }
        assert!(resolve_collection_token(&index, "missing-slug", 10).is_none());
    }

    #[test]
    fn test_resolve_tag_slug() {
        let index = ArticleIndex::new(vec![
            article("a", "2024-01-01", &["React"]),
            article("b", "2024-01-02", &["React", "前端"]),
        ]);

        let (tag, articles) = resolve_tag_slug(&index, "react").unwrap();
        assert_eq!(tag, "React");
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].slug.as_str(), "b");

        let (tag, articles) = resolve_tag_slug(&index, "%E5%89%8D%E7%AB%AF").unwrap();
        assert_eq!(tag, "前端");
        assert_eq!(articles.len(), 1);

        assert!(resolve_tag_slug(&index, "vue").is_none());
    }

    #[test]
    fn test_static_paths() {
        let index = ArticleIndex::new(vec![
            article("2024-01-03-0000", "2024-01-03", &["React"]),
            article("2024-01-01-0000", "2024-01-01", &["前端"]),
        ]);
        let mut config = config();
        config.articles_per_page = 1;

        let paths = static_paths(&index, &config);
        assert_eq!(
            paths,
            vec![
                "/tech-page",
                "/tech-page/2",
                "/tech-page/2024-01-03-0000",
                "/tech-page/2024-01-01-0000",
                "/tags",
                "/tags/react",
                "/tags/%E5%89%8D%E7%AB%AF",
            ]
        );
    }

    #[test]
    fn test_static_paths_empty_index() {
        let index = ArticleIndex::default();
        let paths = static_paths(&index, &config());
        assert_eq!(paths, vec!["/tech-page", "/tags"]);
    }
}
