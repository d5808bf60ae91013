//! Tag canonicalization: bidirectional mapping between display tags and
//! route-safe slugs.
//!
//! Kebab-casing is lossy for non-ASCII input, so any tag containing
//! non-ASCII content is percent-encoded instead; that keeps the original
//! string exactly recoverable while ASCII tags get readable slugs.

use orbit_types::TagSlug;

/// Kebab-case an ASCII-ish string: lowercase words joined by single
/// hyphens. Word boundaries are non-alphanumeric runs, camelCase
/// transitions, and letter/digit transitions.
///
/// # Examples
///
/// ```
/// use orbit_core::kebab_case;
///
/// assert_eq!(kebab_case("React"), "react");
/// assert_eq!(kebab_case("Node.js"), "node-js");
/// assert_eq!(kebab_case("WebAssembly"), "web-assembly");
/// assert_eq!(kebab_case("React18"), "react-18");
/// ```
pub fn kebab_case(input: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            let camel = c.is_uppercase() && p.is_lowercase();
            let into_digits = c.is_numeric() && p.is_alphabetic();
            let out_of_digits = c.is_alphabetic() && p.is_numeric();
            if (camel || into_digits || out_of_digits) && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
        prev = Some(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Map a display tag to its route slug.
///
/// ASCII tags kebab-case; anything containing non-ASCII characters is
/// percent-encoded in full so `find_original_tag` can recover it exactly.
pub fn tag_to_slug(tag: &str) -> TagSlug {
    if tag.is_ascii() {
        TagSlug::new(kebab_case(tag))
    } else {
        TagSlug::new(urlencoding::encode(tag).into_owned())
    }
}

/// Resolve a candidate tag slug back to the original display tag.
///
/// Tries an exact (case-sensitive) match on the percent-decoded slug
/// first, then falls back to comparing `kebab_case(tag)` against the
/// slug across all known tags. Returns `None` when nothing matches;
/// callers surface that as a navigable not-found, never a failure.
pub fn find_original_tag<'a>(slug: &str, known_tags: &[&'a str]) -> Option<&'a str> {
    if let Ok(decoded) = urlencoding::decode(slug) {
        let decoded = decoded.as_ref();
        if let Some(&tag) = known_tags.iter().find(|&&t| t == decoded) {
            return Some(tag);
        }
    }

    known_tags
        .iter()
        .find(|t| kebab_case(t) == slug)
        .copied()
}
