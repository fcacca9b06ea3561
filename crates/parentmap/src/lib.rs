//! `parentmap` - A catalog of family-friendly venues in Hong Kong
//!
//! This library loads venue datasets and picks, renders and preloads the
//! image shown for each venue, falling back to category placeholders when no
//! image is available.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod images;
pub mod logging;
pub mod validate;
pub mod venue;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use filter::VenueFilter;
pub use images::{DisplayUnit, ResolvedImage, Resolver, SizePreset};
pub use logging::init_logging;
pub use validate::{ValidationReport, Validator};
pub use venue::{Category, Venue};
