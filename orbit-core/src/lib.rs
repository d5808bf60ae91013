//! # orbit-core
//!
//! Core library for the orbit static blog generator.
//!
//! This crate provides the content-indexing layer: slug generation with
//! collision handling, tag canonicalization with round-trip decoding,
//! the immutable article index, and page-number arithmetic. Everything
//! here is a pure build-time computation; markdown rendering and
//! presentation are out of scope.

pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod slug;
pub mod tags;

pub use builder::{BuildError, SiteBuilder};
pub use config::Config;
pub use models::{
    Article, ArticleIndex, Diagnostic, DiagnosticSeverity, Frontmatter, SiteIndex, TagCount,
};
pub use pagination::{is_page_number, page_path, page_slice, total_pages};
pub use routes::{resolve_collection_token, resolve_tag_slug, static_paths, CollectionRoute};
pub use search::{build_search_index, SearchEntry};
pub use slug::{date_slug, slugify, SlugAllocator};
pub use tags::{find_original_tag, kebab_case, tag_to_slug};
