//! Shared types for orbit
//!
//! This crate provides the identifier types used across the orbit
//! workspace: article slugs and tag slugs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical article identifier, unique within a site index.
///
/// A slug is non-empty, lowercase, contains no whitespace, and uses
/// hyphens as the only separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(pub String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Slug {
    fn from(s: String) -> Self {
        Slug(s)
    }
}

impl From<&str> for Slug {
    fn from(s: &str) -> Self {
        Slug(s.to_string())
    }
}

/// Route-safe form of a display tag.
///
/// ASCII tags kebab-case into readable slugs; tags with non-ASCII
/// content are percent-encoded so the original string stays recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSlug(pub String);

impl TagSlug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TagSlug {
    fn from(s: String) -> Self {
        TagSlug(s)
    }
}

impl From<&str> for TagSlug {
    fn from(s: &str) -> Self {
        TagSlug(s.to_string())
    }
}
