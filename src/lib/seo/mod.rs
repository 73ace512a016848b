//! Derives the title, description, image and canonical URL a page
//! advertises in its head tags.

use tracing::warn;
use url::Url;

use crate::config::{ConfigError, DEFAULT_DESCRIPTION_LEN, PageKind, SiteConfig};

/// Per-page overrides. Every field is optional; missing ones fall back to
/// the site configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMetadataInput {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Relative to the site root or already absolute.
    pub image: Option<String>,
    pub kind: Option<PageKind>,
    /// Path segment the canonical URL is resolved from, e.g. `/my-post/`.
    pub canonical_path: Option<String>,
}

/// Final values for a single render. Built fresh on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedMetadata {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub canonical_url: String,
    pub kind: PageKind,
}

/// Resolve `path` against `base`, leaving `http(s)://` URLs untouched.
pub fn resolve_absolute_url(path: &str, base: &str) -> Result<String, ConfigError> {
    if is_absolute(path) {
        return Ok(path.to_string());
    }
    let base = Url::parse(base).map_err(|source| ConfigError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    Ok(join_lossy(&base, path))
}

/// Cut `text` to at most `max_len` characters on a word boundary and mark the
/// cut with `...`. Text that already fits comes back unchanged.
///
/// When the cut holds no whitespace at all the hard cut is kept.
pub fn truncate_description(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let cut = match text.char_indices().nth(max_len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    };

    let without_word = cut.trim_end_matches(|c: char| !c.is_whitespace());
    let kept = if without_word.is_empty() {
        cut
    } else {
        without_word.trim_end()
    };

    format!("{kept}...")
}

impl SiteConfig {
    /// Absolute URL for `path`, resolved against the site's base URL.
    pub fn absolute_url(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        join_lossy(self.base_url(), path)
    }

    /// Absolute image URL, falling back to the default image.
    pub fn image_url(&self, image: Option<&str>) -> String {
        match non_blank(image) {
            Some(path) => self.absolute_url(path),
            None => self.absolute_url(&self.default_image),
        }
    }

    pub fn derive(&self, input: &PageMetadataInput) -> DerivedMetadata {
        let kind = input.kind.unwrap_or_default();

        let title = non_blank(input.title.as_deref())
            .unwrap_or(self.default_title.as_str())
            .to_string();

        let description = non_blank(input.description.as_deref())
            .unwrap_or(self.default_description.as_str());
        let description = truncate_description(description, DEFAULT_DESCRIPTION_LEN);

        let image_url = match non_blank(input.image.as_deref()) {
            Some(image) => self.absolute_url(image),
            None => match input.kind {
                Some(kind) => self.absolute_url(self.fallback_images.for_kind(kind)),
                None => self.image_url(None),
            },
        };

        let canonical_url = match non_blank(input.canonical_path.as_deref()) {
            Some(path) => self.absolute_url(path),
            None => self.base_url().to_string(),
        };

        DerivedMetadata {
            title,
            description,
            image_url,
            canonical_url,
            kind,
        }
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// `Url::join` only fails on inputs like `//bad host`; those fall back to
// plain concatenation.
fn join_lossy(base: &Url, path: &str) -> String {
    match base.join(path) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!(path, error = %e, "could not resolve path against base url");
            let base = base.as_str().trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }
}

#[cfg(test)]
mod tests;
