//! Dev server command implementation with JSON APIs.

use super::build::build_site_with_index;
use super::search::perform_search;
use anyhow::{Context, Result};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use orbit_core::{
    build_search_index, resolve_collection_token, resolve_tag_slug, Article, CollectionRoute,
    Config, SearchEntry, SiteIndex,
};
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

#[derive(Clone)]
struct AppState {
    data: Arc<RwLock<SiteData>>,
}

struct SiteData {
    config: Config,
    site_index: SiteIndex,
    search_entries: Vec<SearchEntry>,
}

impl SiteData {
    fn new(config: Config, site_index: SiteIndex) -> Self {
        let search_entries = build_search_index(&site_index.articles, &config.collection);
        Self {
            config,
            site_index,
            search_entries,
        }
    }
}

/// Start development server with file watching
pub async fn dev_server(config_path: &Path, port: Option<u16>) -> Result<()> {
    // Initial build + in-memory index
    let (config, site_index) = build_site_with_index(config_path).context("Failed to build site")?;
    let port = port.unwrap_or(config.server.port);
    let output_dir = config.output_dir();
    let content_dir = config.content_dir();
    let config_path_buf = config_path.to_path_buf();
    let shared_data = Arc::new(RwLock::new(SiteData::new(config, site_index)));

    tracing::info!("Starting dev server on http://localhost:{}", port);
    println!("\nServing at http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    // Set up file watching for live rebuilds
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut _watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to initialize file watcher")?;

    _watcher
        .watch(&content_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {:?}", content_dir))?;

    tokio::spawn({
        let data_handle = shared_data.clone();
        async move {
            while let Some(event) = rx.recv().await {
                match event {
                    Ok(_ev) => {
                        // Debounce a bit by draining pending events
                        while rx.try_recv().is_ok() {}
                        tracing::info!("Change detected, rebuilding site...");
                        let res = tokio::task::spawn_blocking({
                            let config_path = config_path_buf.clone();
                            move || build_site_with_index(&config_path)
                        })
                        .await;

                        match res {
                            Ok(Ok((config, site_index))) => {
                                let mut data = data_handle.write().await;
                                *data = SiteData::new(config, site_index);
                                tracing::info!("Rebuild complete");
                            }
                            Ok(Err(err)) => tracing::error!("Rebuild failed: {}", err),
                            Err(err) => tracing::error!("Rebuild task panicked: {}", err),
                        }
                    }
                    Err(err) => tracing::warn!("Watch error: {}", err),
                }
            }
        }
    });

    let state = AppState { data: shared_data };

    let app = Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/{token}", get(collection_token))
        .route("/api/tags", get(list_tags))
        .route("/api/tags/{slug}", get(tag_articles))
        .route("/api/search", get(search_articles))
        .fallback_service(tower_http::services::ServeDir::new(output_dir))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    limit: Option<usize>,
}

fn article_summary(article: &Article, collection: &str) -> serde_json::Value {
    json!({
        "slug": article.slug,
        "title": article.title,
        "date": article.date,
        "tags": article.tags,
        "url": article.url(collection),
    })
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

fn page_response(
    number: usize,
    total_pages: usize,
    articles: &[&Article],
    collection: &str,
) -> Response {
    let articles: Vec<_> = articles
        .iter()
        .map(|a| article_summary(a, collection))
        .collect();
    Json(json!({
        "page": number,
        "total_pages": total_pages,
        "articles": articles,
    }))
    .into_response()
}

/// GET /api/articles?page=N: date-sorted listing, page 1 by default
async fn list_articles(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let data = state.data.read().await;
    let index = &data.site_index.articles;
    let page_size = data.config.articles_per_page;
    let page = query.page.unwrap_or(1);

    let sorted = index.sorted_by_date_desc();
    let total = orbit_core::total_pages(sorted.len(), page_size);

    // An empty index still serves an empty page 1
    if page == 1 && sorted.is_empty() {
        return page_response(1, 0, &[], &data.config.collection);
    }

    match orbit_core::page_slice(&sorted, page, page_size) {
        Some(slice) => page_response(page, total, slice, &data.config.collection),
        None => not_found("page out of range"),
    }
}

/// GET /api/articles/{token}: numeric tokens are pages (from 2),
/// anything else is an article slug
async fn collection_token(
    State(state): State<AppState>,
    AxumPath(token): AxumPath<String>,
) -> Response {
    let data = state.data.read().await;
    let index = &data.site_index.articles;
    let collection = &data.config.collection;

    match resolve_collection_token(index, &token, data.config.articles_per_page) {
        Some(CollectionRoute::Page {
            number,
            total_pages,
            articles,
        }) => page_response(number, total_pages, &articles, collection),
        Some(CollectionRoute::Article(article)) => Json(json!({
            "slug": article.slug,
            "title": article.title,
            "date": article.date,
            "tags": article.tags,
            "description": article.description,
            "url": article.url(collection),
            "body": article.body,
        }))
        .into_response(),
        None => not_found("no such page or article"),
    }
}

/// GET /api/tags: tags with counts and route slugs
async fn list_tags(State(state): State<AppState>) -> Response {
    let data = state.data.read().await;
    Json(data.site_index.articles.tags_with_counts()).into_response()
}

/// GET /api/tags/{slug}: articles for the resolved display tag
async fn tag_articles(
    State(state): State<AppState>,
    AxumPath(slug): AxumPath<String>,
) -> Response {
    let data = state.data.read().await;
    let index = &data.site_index.articles;

    match resolve_tag_slug(index, &slug) {
        Some((tag, articles)) => {
            let articles: Vec<_> = articles
                .iter()
                .map(|a| article_summary(a, &data.config.collection))
                .collect();
            Json(json!({
                "tag": tag,
                "count": articles.len(),
                "articles": articles,
            }))
            .into_response()
        }
        None => not_found("no such tag"),
    }
}

/// GET /api/search?q=...&limit=N
async fn search_articles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let data = state.data.read().await;
    let limit = query.limit.unwrap_or(10);
    let results = perform_search(&data.search_entries, &query.q, &[]);

    let payload: Vec<_> = results
        .iter()
        .take(limit)
        .map(|(entry, score)| {
            json!({
                "slug": entry.slug,
                "url": entry.url,
                "title": entry.title,
                "snippet": entry.snippet,
                "tags": entry.tags,
                "score": score,
            })
        })
        .collect();

    Json(json!({
        "query": query.q,
        "total": results.len(),
        "results": payload,
    }))
    .into_response()
}
