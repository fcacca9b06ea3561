//! Venue image resolution and display.
//!
//! Every venue gets something to show:
//!
//! - **Resolution** picks the local image, else the cached remote copy, else
//!   a category placeholder such as `/images/placeholder-museum.svg`.
//!
//! - **Rendering** wraps the result in a [`DisplayUnit`]. The unit reserves a
//!   fixed-size box, loads lazily, and swaps to the placeholder once if the
//!   image fails.
//!
//! - **Preloading** emits `<link rel="preload">` hints for the first few
//!   real images of a listing.
//!
//! # Example
//!
//! ```
//! use parentmap::images::{self, HeadRegistry, SizePreset};
//! use parentmap::venue::{Category, Venue};
//!
//! let venue = Venue::new("013", "香港動植物公園")
//!     .with_category(Category::Park)
//!     .with_cached_image("https://cdn/x.jpg");
//!
//! assert_eq!(images::resolve(Some(&venue)).url, "https://cdn/x.jpg");
//!
//! let unit = images::render(Some(&venue), SizePreset::Card);
//! assert!(unit.has_cached_badge());
//! assert_eq!(unit.fallback_src, "/images/placeholder-park.svg");
//!
//! let mut head = HeadRegistry::new();
//! images::preload(&[venue], images::DEFAULT_PRELOAD_LIMIT, &mut head);
//! assert_eq!(head.len(), 1);
//! ```

mod preload;
mod render;
mod resolve;

pub use preload::{DocumentHead, Detached, HeadRegistry, PreloadHint, DEFAULT_PRELOAD_LIMIT};
pub use render::{fallback_script_tag, DisplayUnit, LoadState, SizePreset, FALLBACK_SCRIPT};
pub use resolve::{
    ImageSource, ResolvedImage, Resolver, DEFAULT_PLACEHOLDER_EXTENSION,
    DEFAULT_PLACEHOLDER_PREFIX,
};

use crate::venue::Venue;

/// Resolve `venue`'s image with the default placeholder layout.
#[must_use]
pub fn resolve(venue: Option<&Venue>) -> ResolvedImage {
    Resolver::default().resolve(venue)
}

/// Render `venue` at `preset` with the default placeholder layout.
#[must_use]
pub fn render(venue: Option<&Venue>, preset: SizePreset) -> DisplayUnit {
    Resolver::default().render(venue, preset)
}

/// Preload the first `limit` real images with the default placeholder layout.
pub fn preload<'a, I, H>(venues: I, limit: usize, head: &mut H)
where
    I: IntoIterator<Item = &'a Venue>,
    H: DocumentHead + ?Sized,
{
    Resolver::default().preload(venues, limit, head);
}
