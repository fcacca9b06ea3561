//! Preload hints for the first images of a listing.

use std::collections::HashSet;

use html_escape::encode_double_quoted_attribute as attr;
use serde::Serialize;
use tracing::{debug, trace};

use super::resolve::Resolver;
use crate::venue::Venue;

/// How many leading venues get a preload hint by default.
pub const DEFAULT_PRELOAD_LIMIT: usize = 4;

/// A `<link rel="preload" as="image">` hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PreloadHint {
    /// Image reference to fetch early.
    pub href: String,
}

impl PreloadHint {
    /// Render as a `<link>` element.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<link rel="preload" as="image" href="{}">"#,
            attr(&self.href)
        )
    }
}

/// Where preload hints go: the document head or its equivalent.
pub trait DocumentHead {
    /// Append a hint after any already present.
    fn append_preload(&mut self, hint: PreloadHint);
}

/// An in-memory head that records hints in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadRegistry {
    hints: Vec<PreloadHint>,
}

impl HeadRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hints in insertion order.
    #[must_use]
    pub fn hints(&self) -> &[PreloadHint] {
        &self.hints
    }

    /// Number of hints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether no hints were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Render every hint, one `<link>` per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.hints
            .iter()
            .map(PreloadHint::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentHead for HeadRegistry {
    fn append_preload(&mut self, hint: PreloadHint) {
        self.hints.push(hint);
    }
}

/// An environment without a document head. Hints are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl DocumentHead for Detached {
    fn append_preload(&mut self, hint: PreloadHint) {
        trace!(href = %hint.href, "no document head, dropping preload hint");
    }
}

impl Resolver {
    /// Add preload hints for the first `limit` venues that have a real image.
    ///
    /// Placeholders are skipped. Within one call a URL is hinted at most
    /// once; separate calls share no state.
    pub fn preload<'a, I, H>(&self, venues: I, limit: usize, head: &mut H)
    where
        I: IntoIterator<Item = &'a Venue>,
        H: DocumentHead + ?Sized,
    {
        let mut seen = HashSet::new();

        for venue in venues.into_iter().take(limit) {
            let resolved = self.resolve(Some(venue));
            if resolved.is_placeholder() {
                trace!(venue = %venue.id, "skipping preload for placeholder");
                continue;
            }
            if !seen.insert(resolved.url.clone()) {
                continue;
            }
            debug!(venue = %venue.id, href = %resolved.url, "preloading image");
            head.append_preload(PreloadHint { href: resolved.url });
        }
    }
}
