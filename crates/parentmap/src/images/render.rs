//! Display units: lazily loaded image slots with a one-shot fallback.

use std::fmt;

use html_escape::encode_double_quoted_attribute as attr;
use serde::{Deserialize, Serialize};

use super::resolve::{ImageSource, Resolver};
use crate::venue::Venue;

/// Markup for the visible "cached" badge.
const CACHED_BADGE: &str = r#"<div class="absolute bottom-1 right-1 text-[10px] text-white/50 bg-black/30 px-1 rounded">cached</div>"#;

/// Page-level script that performs the fallback swap.
///
/// It listens for `error` events in the capture phase (image errors do not
/// bubble). The `data-fallback-armed` flag is cleared before the swap, so an
/// unreachable placeholder cannot trigger a second swap.
pub const FALLBACK_SCRIPT: &str = r"document.addEventListener('error', function (event) {
  var img = event.target;
  if (!(img instanceof HTMLImageElement) || img.dataset.fallbackArmed !== 'true') return;
  img.dataset.fallbackArmed = 'false';
  img.src = img.dataset.fallbackSrc;
}, true);";

/// Named width/height pair for an image slot.
///
/// Unrecognized names parse to [`SizePreset::Card`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SizePreset {
    /// 400×300.
    Thumbnail,
    /// 600×400.
    #[default]
    Card,
    /// 1200×600.
    Hero,
}

impl SizePreset {
    /// All presets.
    pub const ALL: [SizePreset; 3] = [Self::Thumbnail, Self::Card, Self::Hero];

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Thumbnail => (400, 300),
            Self::Card => (600, 400),
            Self::Hero => (1200, 600),
        }
    }

    /// Preset name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Card => "card",
            Self::Hero => "hero",
        }
    }
}

impl From<&str> for SizePreset {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "thumbnail" => Self::Thumbnail,
            "hero" => Self::Hero,
            _ => Self::Card,
        }
    }
}

impl From<String> for SizePreset {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<SizePreset> for String {
    fn from(preset: SizePreset) -> Self {
        preset.as_str().to_string()
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load state of a display unit.
///
/// Transitions are one-way: `Unresolved → Shown` or
/// `Unresolved → FallbackShown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing has loaded yet.
    #[default]
    Unresolved,
    /// The primary image loaded.
    Shown,
    /// The primary image failed and the fallback was swapped in.
    FallbackShown,
}

/// A self-contained image slot for one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUnit {
    /// Primary image reference.
    pub src: String,
    /// Placeholder to swap in if `src` fails to load.
    pub fallback_src: String,
    /// Alt text (the venue name).
    pub alt: String,
    /// Reserved width in pixels.
    pub width: u32,
    /// Reserved height in pixels.
    pub height: u32,
    /// Preset the dimensions came from.
    pub preset: SizePreset,
    /// Tier `src` was resolved from.
    pub source: ImageSource,
    state: LoadState,
    fallback_armed: bool,
}

impl DisplayUnit {
    /// Whether the "cached" badge is shown.
    #[must_use]
    pub fn has_cached_badge(&self) -> bool {
        self.source == ImageSource::Cached
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Whether a load error would still trigger the fallback swap.
    #[must_use]
    pub fn fallback_armed(&self) -> bool {
        self.fallback_armed
    }

    /// The reference currently being displayed.
    #[must_use]
    pub fn current_src(&self) -> &str {
        match self.state {
            LoadState::FallbackShown => &self.fallback_src,
            LoadState::Unresolved | LoadState::Shown => &self.src,
        }
    }

    /// CSS `aspect-ratio` value for the layout box.
    #[must_use]
    pub fn aspect_ratio(&self) -> String {
        format!("{}/{}", self.width, self.height)
    }

    /// The primary image finished loading.
    pub fn on_load(&mut self) {
        if self.state == LoadState::Unresolved {
            self.state = LoadState::Shown;
        }
    }

    /// An image failed to load.
    ///
    /// The first failure swaps to the fallback and disarms it. Returns `true`
    /// only when a swap happened.
    pub fn on_error(&mut self) -> bool {
        if !self.fallback_armed || self.state == LoadState::Shown {
            return false;
        }
        self.fallback_armed = false;
        self.state = LoadState::FallbackShown;
        true
    }

    /// Render as embeddable markup.
    ///
    /// The fallback target travels in `data-fallback-src`. The page must
    /// include [`FALLBACK_SCRIPT`] once for the swap to happen.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<div class="relative overflow-hidden" style="aspect-ratio: {};">"#,
            self.aspect_ratio()
        )?;
        writeln!(
            f,
            r#"  <img src="{}" alt="{}" loading="lazy" decoding="async" class="w-full h-full object-cover transition-transform duration-300 hover:scale-105" data-fallback-src="{}" data-fallback-armed="{}" width="{}" height="{}">"#,
            attr(&self.src),
            attr(&self.alt),
            attr(&self.fallback_src),
            self.fallback_armed,
            self.width,
            self.height
        )?;
        if self.has_cached_badge() {
            writeln!(f, "  {CACHED_BADGE}")?;
        }
        f.write_str("</div>")
    }
}

/// `<script>` element wrapping [`FALLBACK_SCRIPT`].
#[must_use]
pub fn fallback_script_tag() -> String {
    format!("<script>{FALLBACK_SCRIPT}</script>")
}

impl Resolver {
    /// Build the display unit for `venue` at `preset`.
    ///
    /// Always yields a renderable unit; a venue with no image data gets its
    /// category placeholder as both source and fallback.
    #[must_use]
    pub fn render(&self, venue: Option<&Venue>, preset: SizePreset) -> DisplayUnit {
        let resolved = self.resolve(venue);
        let (width, height) = preset.dimensions();

        DisplayUnit {
            src: resolved.url,
            fallback_src: self.placeholder(venue),
            alt: venue.map(|venue| venue.name.clone()).unwrap_or_default(),
            width,
            height,
            preset,
            source: resolved.source,
            state: LoadState::Unresolved,
            fallback_armed: true,
        }
    }
}
