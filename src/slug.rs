//! Slug generation and validation

use regex::Regex;

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Runs of anything that may not appear in a slug
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Derive a URL-safe slug from a title.
///
/// Returns `None` when the title has no ASCII letters or digits to keep.
pub fn slugify(title: &str) -> Option<String> {
    let lowered = title.to_lowercase();
    let slug = SEPARATOR_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}
