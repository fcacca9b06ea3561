//! Image source resolution.

use serde::Serialize;

use crate::venue::{Category, Venue};

/// Directory that holds the placeholder artwork.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "/images/";

/// File extension of the placeholder artwork.
pub const DEFAULT_PLACEHOLDER_EXTENSION: &str = ".svg";

/// Which tier produced a resolved image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// An image served by the site itself.
    Local,
    /// A remotely cached copy.
    Cached,
    /// Category placeholder artwork.
    Placeholder,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cached => write!(f, "cached"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// The outcome of resolving a venue's image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    /// Image reference to request. Never empty.
    pub url: String,
    /// Tier the reference came from.
    pub source: ImageSource,
}

impl ResolvedImage {
    /// Whether this is placeholder artwork rather than a real image.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.source == ImageSource::Placeholder
    }

    /// Whether this came from the remote cache.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.source == ImageSource::Cached
    }
}

impl AsRef<str> for ResolvedImage {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for ResolvedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// Picks an image for a venue: local image, then cached image, then a
/// category placeholder.
///
/// The placeholder path is `prefix + "placeholder-" + category + extension`.
/// [`Resolver::default`] uses `/images/` and `.svg` with `playhouse` as the
/// fallback category, which matches the existing placeholder asset set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    prefix: String,
    extension: String,
    fallback_category: Category,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            extension: DEFAULT_PLACEHOLDER_EXTENSION.to_string(),
            fallback_category: Category::Playhouse,
        }
    }
}

impl Resolver {
    /// Create a resolver with a custom placeholder layout.
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        extension: impl Into<String>,
        fallback_category: Category,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
            fallback_category,
        }
    }

    /// Build a resolver from the `[images]` configuration section.
    #[must_use]
    pub fn from_config(config: &crate::config::ImagesConfig) -> Self {
        Self::new(
            config.placeholder_prefix.clone(),
            config.placeholder_extension.clone(),
            Category::from(config.fallback_category.as_str()),
        )
    }

    /// Category used to pick the placeholder for `venue`.
    ///
    /// Absent venues, absent categories and unknown categories all use the
    /// fallback category.
    #[must_use]
    pub fn placeholder_category<'a>(&'a self, venue: Option<&'a Venue>) -> &'a Category {
        venue
            .and_then(|venue| venue.category.as_ref())
            .filter(|category| category.is_known())
            .unwrap_or(&self.fallback_category)
    }

    /// Placeholder path for `venue`, regardless of any images it has.
    #[must_use]
    pub fn placeholder(&self, venue: Option<&Venue>) -> String {
        format!(
            "{}placeholder-{}{}",
            self.prefix,
            self.placeholder_category(venue),
            self.extension
        )
    }

    /// Resolve the best available image for `venue`.
    ///
    /// First match wins: local image, cached image, placeholder.
    #[must_use]
    pub fn resolve(&self, venue: Option<&Venue>) -> ResolvedImage {
        let Some(venue) = venue else {
            return ResolvedImage {
                url: self.placeholder(None),
                source: ImageSource::Placeholder,
            };
        };

        if let Some(path) = venue.local_image() {
            return ResolvedImage {
                url: path.to_string(),
                source: ImageSource::Local,
            };
        }

        if let Some(url) = venue.cached_image() {
            return ResolvedImage {
                url: url.to_string(),
                source: ImageSource::Cached,
            };
        }

        ResolvedImage {
            url: self.placeholder(Some(venue)),
            source: ImageSource::Placeholder,
        }
    }
}
