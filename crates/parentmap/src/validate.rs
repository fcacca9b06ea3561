//! Offline validation of venue records.
//!
//! These are the cheap checks: field bounds, tag vocabularies, link and
//! phone formats, and duplicates across the dataset. Nothing here touches
//! the network, and a bad record never stops the rest from being checked.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::venue::Venue;

/// Name length bounds, in characters.
const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=100;

/// Longest allowed description, in characters.
const DESCRIPTION_MAX: usize = 500;

/// Descriptions shorter than this get a warning.
const DESCRIPTION_THIN: usize = 20;

/// Hong Kong latitude bounds.
const LAT_BOUNDS: std::ops::RangeInclusive<f64> = 22.0..=23.0;

/// Hong Kong longitude bounds.
const LNG_BOUNDS: std::ops::RangeInclusive<f64> = 113.0..=115.0;

/// Oldest age an age range may mention.
const MAX_AGE: u8 = 18;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth fixing, but the record is usable.
    Warning,
    /// The record is wrong.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One problem found in one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// How serious it is.
    pub severity: Severity,
    /// Id of the offending venue.
    pub venue_id: String,
    /// Field the problem is in.
    pub field: &'static str,
    /// What is wrong.
    pub message: String,
}

impl Finding {
    fn error(venue: &Venue, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            venue_id: venue.id.clone(),
            field,
            message: message.into(),
        }
    }

    fn warning(venue: &Venue, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            venue_id: venue.id.clone(),
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.venue_id, self.field, self.message
        )
    }
}

/// Outcome of validating a set of venues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of venues checked.
    pub checked: usize,
    /// Everything found, grouped by venue in input order.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Number of error findings.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning findings.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Findings for one venue.
    pub fn for_venue<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings
            .iter()
            .filter(move |finding| finding.venue_id == id)
    }

    /// Whether the dataset passes: no errors, and no warnings when `strict`.
    #[must_use]
    pub fn passes(&self, strict: bool) -> bool {
        self.error_count() == 0 && (!strict || self.warning_count() == 0)
    }
}

/// Record validator.
#[derive(Debug)]
pub struct Validator {
    phone: Regex,
    website: Regex,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator.
    ///
    /// # Panics
    ///
    /// Panics if a built-in regex pattern is invalid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // 8-digit local number, optionally split 4+4, optional +852
            phone: Regex::new(r"^(\+852\s?)?\d{4}\s?\d{4}$").expect("Invalid regex pattern"),
            website: Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+(/\S*)?$")
                .expect("Invalid regex pattern"),
        }
    }

    /// Check a single venue in isolation.
    #[must_use]
    pub fn check_venue(&self, venue: &Venue) -> Vec<Finding> {
        let mut findings = Vec::new();

        let name_len = venue.name.trim().chars().count();
        if !NAME_LEN.contains(&name_len) {
            findings.push(Finding::error(
                venue,
                "name",
                format!(
                    "name must be {}-{} characters, got {name_len}",
                    NAME_LEN.start(),
                    NAME_LEN.end()
                ),
            ));
        }

        let description_len = venue.description.chars().count();
        if description_len > DESCRIPTION_MAX {
            findings.push(Finding::error(
                venue,
                "description",
                format!("description exceeds {DESCRIPTION_MAX} characters ({description_len})"),
            ));
        } else if description_len < DESCRIPTION_THIN {
            findings.push(Finding::warning(venue, "description", "thin description"));
        }

        match venue.category.as_ref() {
            None => findings.push(Finding::warning(venue, "category", "missing category")),
            Some(category) if !category.is_known() => findings.push(Finding::error(
                venue,
                "category",
                format!("unknown category {:?}", category.as_str()),
            )),
            Some(_) => {}
        }

        if let Some(region) = venue.region.as_ref().filter(|region| !region.is_known()) {
            findings.push(Finding::warning(
                venue,
                "region",
                format!("unknown region {:?}", region.as_str()),
            ));
        }

        if let Some(tier) = venue.price_type.as_ref().filter(|tier| !tier.is_known()) {
            findings.push(Finding::warning(
                venue,
                "priceType",
                format!("unknown price tier {:?}", tier.as_str()),
            ));
        }

        match (venue.lat, venue.lng) {
            (Some(lat), Some(lng)) => {
                if !LAT_BOUNDS.contains(&lat) || !LNG_BOUNDS.contains(&lng) {
                    findings.push(Finding::error(
                        venue,
                        "lat/lng",
                        format!("coordinates ({lat}, {lng}) are outside Hong Kong"),
                    ));
                }
            }
            _ => findings.push(Finding::error(venue, "lat/lng", "missing coordinates")),
        }

        if let Some(range) = venue.age_range {
            if range.min > range.max {
                findings.push(Finding::error(
                    venue,
                    "ageRange",
                    format!("minimum age {} is above maximum {}", range.min, range.max),
                ));
            }
            if range.max > MAX_AGE {
                findings.push(Finding::error(
                    venue,
                    "ageRange",
                    format!("maximum age {} is above {MAX_AGE}", range.max),
                ));
            }
        }

        if venue.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
            findings.push(Finding::warning(venue, "address", "missing address"));
        }

        match venue.website.as_deref() {
            Some(url) if !self.website.is_match(url.trim()) => findings.push(Finding::error(
                venue,
                "website",
                format!("not an http(s) URL: {url}"),
            )),
            Some(_) => {}
            None if venue.phone.is_none() => {
                findings.push(Finding::warning(venue, "contact", "no website or phone"));
            }
            None => {}
        }

        if let Some(phone) = venue.phone.as_deref() {
            if !self.phone.is_match(phone.trim()) {
                findings.push(Finding::warning(
                    venue,
                    "phone",
                    format!("not a Hong Kong phone number: {phone}"),
                ));
            }
        }

        debug!(venue = %venue.id, findings = findings.len(), "checked venue");
        findings
    }

    /// Check every venue plus duplicates across the set.
    ///
    /// A repeated id is an error. A repeated content hash (the same place
    /// under another id) is a warning naming the first id seen.
    pub fn validate<'a, I>(&self, venues: I) -> ValidationReport
    where
        I: IntoIterator<Item = &'a Venue>,
    {
        let mut report = ValidationReport::default();
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut hashes: HashMap<String, &str> = HashMap::new();

        for venue in venues {
            report.checked += 1;
            report.findings.extend(self.check_venue(venue));

            let seen = ids.entry(venue.id.as_str()).or_insert(0);
            *seen += 1;
            if *seen == 2 {
                report
                    .findings
                    .push(Finding::error(venue, "id", "duplicate id"));
            }

            let hash = venue.content_hash();
            match hashes.get(&hash) {
                Some(first) if *first != venue.id => report.findings.push(Finding::warning(
                    venue,
                    "id",
                    format!("same venue as {first}"),
                )),
                Some(_) => {}
                None => {
                    hashes.insert(hash, venue.id.as_str());
                }
            }
        }

        info!(
            "Validated {} venues: {} errors, {} warnings",
            report.checked,
            report.error_count(),
            report.warning_count()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::{AgeRange, Category, Region};

    fn good() -> Venue {
        let mut venue = Venue::new("011", "香港科學館").with_category(Category::Museum);
        venue.region = Some(Region::Kowloon);
        venue.lat = Some(22.3015);
        venue.lng = Some(114.1790);
        venue.age_range = Some(AgeRange::new(3, 12));
        venue.description = "互動式科學展覽，小朋友可以動手體驗科學原理，適合一家大細".to_string();
        venue.address = Some("尖沙咀科學館道2號".to_string());
        venue.website = Some("https://hk.science.museum".to_string());
        venue.phone = Some("2732 3232".to_string());
        venue
    }

    fn fields(findings: &[Finding]) -> Vec<&'static str> {
        findings.iter().map(|f| f.field).collect()
    }

    #[test]
    fn test_good_venue_is_clean() {
        let findings = Validator::new().check_venue(&good());
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn test_name_length() {
        let mut venue = good();
        venue.name = "樹".to_string();
        let findings = Validator::new().check_venue(&venue);
        assert_eq!(fields(&findings), vec!["name"]);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_description_bounds() {
        let mut venue = good();
        venue.description = "短".to_string();
        let findings = Validator::new().check_venue(&venue);
        assert_eq!(findings[0].severity, Severity::Warning);

        venue.description = "x".repeat(501);
        let findings = Validator::new().check_venue(&venue);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_coordinates_outside_hong_kong() {
        let mut venue = good();
        venue.lat = Some(51.5);
        let findings = Validator::new().check_venue(&venue);
        assert_eq!(fields(&findings), vec!["lat/lng"]);

        venue.lat = None;
        let findings = Validator::new().check_venue(&venue);
        assert!(findings[0].message.contains("missing"));
    }

    #[test]
    fn test_age_range_checks() {
        let mut venue = good();
        venue.age_range = Some(AgeRange::new(12, 3));
        assert_eq!(fields(&Validator::new().check_venue(&venue)), vec!["ageRange"]);

        venue.age_range = Some(AgeRange::new(0, 25));
        assert_eq!(fields(&Validator::new().check_venue(&venue)), vec!["ageRange"]);
    }

    #[test]
    fn test_unknown_tags() {
        let mut venue = good().with_category("zoo");
        venue.region = Some(Region::from("macau"));
        let findings = Validator::new().check_venue(&venue);

        assert_eq!(fields(&findings), vec!["category", "region"]);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[1].severity, Severity::Warning);
    }

    #[test]
    fn test_contact_checks() {
        let mut venue = good();
        venue.website = Some("www.example.com".to_string());
        venue.phone = Some("123".to_string());
        assert_eq!(
            fields(&Validator::new().check_venue(&venue)),
            vec!["website", "phone"]
        );

        venue.website = None;
        venue.phone = None;
        assert_eq!(fields(&Validator::new().check_venue(&venue)), vec!["contact"]);
    }

    #[test]
    fn test_phone_formats() {
        let validator = Validator::new();
        assert!(validator.phone.is_match("27323232"));
        assert!(validator.phone.is_match("2732 3232"));
        assert!(validator.phone.is_match("+852 2732 3232"));
        assert!(!validator.phone.is_match("2732-32"));
    }

    #[test]
    fn test_duplicates_across_set() {
        let first = good();
        let mut same_id = good();
        same_id.name = "另一個地方".to_string();
        let mut same_place = good();
        same_place.id = "099".to_string();

        let report = Validator::new().validate([&first, &same_id, &same_place]);

        assert_eq!(report.checked, 3);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        let dup: Vec<_> = report.for_venue("099").collect();
        assert_eq!(dup.len(), 1);
        assert!(dup[0].message.contains("011"));
    }

    #[test]
    fn test_report_passes() {
        let mut report = ValidationReport::default();
        assert!(report.passes(true));

        report.findings.push(Finding::warning(&good(), "address", "missing address"));
        assert!(report.passes(false));
        assert!(!report.passes(true));

        report.findings.push(Finding::error(&good(), "name", "bad"));
        assert!(!report.passes(false));
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::error(&good(), "website", "not an http(s) URL: x");
        assert_eq!(finding.to_string(), "[error] 011 website: not an http(s) URL: x");
    }
}
