//! Venue records.
//!
//! A [`Venue`] is one family-friendly location as it appears in the frontend
//! dataset: camelCase keys, an `ageRange` pair and an optional `images` object.
//! Tag-like fields ([`Category`], [`Region`], [`PriceTier`]) accept unknown
//! strings so that one odd record never fails a whole dataset load.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Venue category.
///
/// Unknown tags are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Museums and exhibition centres.
    Museum,
    /// Parks and outdoor playgrounds.
    Park,
    /// Indoor playrooms.
    Playhouse,
    /// Family restaurants.
    Restaurant,
    /// Public libraries.
    Library,
    /// Malls with family facilities.
    Shopping,
    /// Any tag not in the list above.
    Other(String),
}

impl Category {
    /// Every known category, in display order.
    pub const KNOWN: [Category; 6] = [
        Self::Museum,
        Self::Park,
        Self::Playhouse,
        Self::Restaurant,
        Self::Library,
        Self::Shopping,
    ];

    /// The tag string used in data files and placeholder names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Playhouse => "playhouse",
            Self::Restaurant => "restaurant",
            Self::Library => "library",
            Self::Shopping => "shopping",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this is one of the known categories.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "museum" => Self::Museum,
            "park" => Self::Park,
            "playhouse" => Self::Playhouse,
            "restaurant" => Self::Restaurant,
            "library" => Self::Library,
            "shopping" => Self::Shopping,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic region tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    /// Hong Kong Island.
    HkIsland,
    /// Kowloon.
    Kowloon,
    /// New Territories (including outlying islands).
    NewTerritories,
    /// Any tag not in the list above.
    Other(String),
}

impl Region {
    /// The tag string used in data files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::HkIsland => "hk-island",
            Self::Kowloon => "kowloon",
            Self::NewTerritories => "nt",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this is one of the known regions.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for Region {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hk-island" => Self::HkIsland,
            "kowloon" => Self::Kowloon,
            "nt" => Self::NewTerritories,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for Region {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_string()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriceTier {
    /// No admission fee.
    Free,
    /// Roughly under HK$100.
    Low,
    /// Roughly HK$100-200.
    Medium,
    /// Above HK$200.
    High,
    /// Any tag not in the list above.
    Other(String),
}

impl PriceTier {
    /// The tag string used in data files.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Free => "free",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this is one of the known tiers.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for PriceTier {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "free" => Self::Free,
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for PriceTier {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<PriceTier> for String {
    fn from(tier: PriceTier) -> Self {
        tier.as_str().to_string()
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive age range in years, stored as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct AgeRange {
    /// Youngest suitable age.
    pub min: u8,
    /// Oldest suitable age.
    pub max: u8,
}

impl AgeRange {
    /// Create an age range.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Whether `age` lies within the range.
    #[must_use]
    pub fn contains(&self, age: u8) -> bool {
        (self.min..=self.max).contains(&age)
    }
}

impl From<[u8; 2]> for AgeRange {
    fn from([min, max]: [u8; 2]) -> Self {
        Self { min, max }
    }
}

impl From<AgeRange> for [u8; 2] {
    fn from(range: AgeRange) -> Self {
        [range.min, range.max]
    }
}

impl std::fmt::Display for AgeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Image references for a venue. Both fields are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRefs {
    /// Path to an image served by the site itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,

    /// URL of a remotely cached copy of the venue's image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudinary: Option<String>,
}

/// One family-friendly venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Unique identifier.
    pub id: String,

    /// Display name (usually Chinese).
    pub name: String,

    /// English name, when the display name is not English.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    /// District, e.g. "尖沙咀".
    #[serde(default)]
    pub district: String,

    /// Region tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    /// Latitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    /// Longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,

    /// Category tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Whether the venue is indoors.
    #[serde(default = "default_true")]
    pub indoor: bool,

    /// Suitable age range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeRange>,

    /// Price tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<PriceTier>,

    /// Human-readable price, e.g. "$100-200".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_description: Option<String>,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Visiting tips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,

    /// Opening hours as free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Official website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// Baby-changing room on site.
    #[serde(default)]
    pub has_baby_room: bool,

    /// Step-free stroller access.
    #[serde(default = "default_true")]
    pub has_stroller_access: bool,

    /// Restaurant on site.
    #[serde(default)]
    pub has_restaurant: bool,

    /// Good choice for a rainy day.
    #[serde(default = "default_true")]
    pub rainy_day_suitable: bool,

    /// Checked by a person rather than only scraped.
    #[serde(default)]
    pub verified: bool,

    /// Found by the automated scout.
    #[serde(default)]
    pub auto_discovered: bool,

    /// Last time the record changed.
    ///
    /// Accepts RFC 3339, offset-less ISO-8601 (read as UTC), a bare date,
    /// or an empty string for "unknown".
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Image references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageRefs>,
}

fn default_true() -> bool {
    true
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("updatedAt: unrecognised timestamp {raw:?}")))
}

/// Parse the timestamp forms found in venue datasets.
///
/// Values without an offset are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Venue {
    /// Create a venue with only an id and a name; everything else defaults.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_en: None,
            district: String::new(),
            region: None,
            lat: None,
            lng: None,
            category: None,
            indoor: true,
            age_range: None,
            price_type: None,
            price_description: None,
            description: String::new(),
            tips: None,
            opening_hours: None,
            address: None,
            phone: None,
            website: None,
            has_baby_room: false,
            has_stroller_access: true,
            has_restaurant: false,
            rainy_day_suitable: true,
            verified: false,
            auto_discovered: false,
            updated_at: None,
            images: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the local image path.
    #[must_use]
    pub fn with_local_image(mut self, path: impl Into<String>) -> Self {
        self.images.get_or_insert_with(ImageRefs::default).local = Some(path.into());
        self
    }

    /// Set the cached image URL.
    #[must_use]
    pub fn with_cached_image(mut self, url: impl Into<String>) -> Self {
        self.images.get_or_insert_with(ImageRefs::default).cloudinary = Some(url.into());
        self
    }

    /// The local image path, ignoring empty strings.
    #[must_use]
    pub fn local_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.local.as_deref())
            .filter(|path| !path.trim().is_empty())
    }

    /// The cached image URL, ignoring empty strings.
    #[must_use]
    pub fn cached_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.cloudinary.as_deref())
            .filter(|url| !url.trim().is_empty())
    }

    /// Whether any real image is referenced.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.local_image().is_some() || self.cached_image().is_some()
    }

    /// Whether admission is free.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price_type == Some(PriceTier::Free)
    }

    /// Whether a child of `age` fits the venue's age range.
    ///
    /// Venues without an age range are treated as suitable for all ages.
    #[must_use]
    pub fn suits_age(&self, age: u8) -> bool {
        self.age_range.map_or(true, |range| range.contains(age))
    }

    /// BLAKE3 hash of the venue's identifying content.
    ///
    /// Two records describing the same place under different ids hash the
    /// same: the name is case-folded and whitespace-trimmed, and coordinates
    /// are rounded to four decimal places.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => format!("{lat:.4},{lng:.4}"),
            _ => String::new(),
        };
        let key = format!(
            "{}|{}|{}",
            self.name.trim().to_lowercase(),
            self.address.as_deref().unwrap_or("").trim(),
            coords
        );
        blake3::hash(key.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SCIENCE_MUSEUM: &str = r#"{
        "id": "011", "name": "香港科學館", "district": "尖沙咀", "region": "kowloon",
        "lat": 22.3015, "lng": 114.1790, "category": "museum", "indoor": true,
        "ageRange": [3, 12], "priceType": "free", "priceDescription": "免費",
        "description": "互動式科學展覽", "website": "https://hk.science.museum",
        "hasBabyRoom": true, "hasStrollerAccess": true, "hasRestaurant": false,
        "rainyDaySuitable": true, "openingHours": "10:00-19:00",
        "address": "尖沙咀科學館道2號", "phone": "2732 3232"
    }"#;

    #[test]
    fn test_deserialize_frontend_record() {
        let venue: Venue = serde_json::from_str(SCIENCE_MUSEUM).unwrap();

        assert_eq!(venue.id, "011");
        assert_eq!(venue.category, Some(Category::Museum));
        assert_eq!(venue.region, Some(Region::Kowloon));
        assert_eq!(venue.price_type, Some(PriceTier::Free));
        assert_eq!(venue.age_range, Some(AgeRange::new(3, 12)));
        assert_eq!(venue.phone.as_deref(), Some("2732 3232"));
        assert!(venue.has_baby_room);
        assert!(venue.images.is_none());
    }

    #[test]
    fn test_deserialize_minimal_record_uses_defaults() {
        let venue: Venue = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();

        assert!(venue.indoor);
        assert!(venue.has_stroller_access);
        assert!(venue.rainy_day_suitable);
        assert!(!venue.has_baby_room);
        assert!(venue.category.is_none());
        assert!(venue.description.is_empty());
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let venue: Venue = serde_json::from_str(
            r#"{"id": "x", "name": "X", "category": "zoo", "region": "macau", "priceType": "vip"}"#,
        )
        .unwrap();

        assert_eq!(venue.category, Some(Category::Other("zoo".to_string())));
        assert_eq!(venue.region, Some(Region::Other("macau".to_string())));
        assert_eq!(venue.price_type, Some(PriceTier::Other("vip".to_string())));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let venue: Venue =
            serde_json::from_str(r#"{"id": "x", "name": "X", "facilities": ["wifi"]}"#).unwrap();
        assert_eq!(venue.id, "x");
    }

    #[test]
    fn test_serialize_uses_camel_case_and_skips_absent() {
        let venue = Venue::new("1", "Park").with_category(Category::Park);
        let json = serde_json::to_value(&venue).unwrap();

        assert_eq!(json["category"], "park");
        assert_eq!(json["hasStrollerAccess"], true);
        assert!(json.get("images").is_none());
        assert!(json.get("ageRange").is_none());
    }

    #[test]
    fn test_age_range_serializes_as_pair() {
        let mut venue = Venue::new("1", "Playroom");
        venue.age_range = Some(AgeRange::new(0, 6));
        let json = serde_json::to_value(&venue).unwrap();
        assert_eq!(json["ageRange"], serde_json::json!([0, 6]));
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from("Museum"), Category::Museum);
        assert_eq!(Category::from(" park "), Category::Park);
        assert!(!Category::from("aquarium").is_known());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Shopping.to_string(), "shopping");
        assert_eq!(Category::Other("zoo".into()).to_string(), "zoo");
        assert_eq!(Region::NewTerritories.to_string(), "nt");
        assert_eq!(PriceTier::Medium.to_string(), "medium");
    }

    #[test]
    fn test_image_accessors_ignore_empty_strings() {
        let venue = Venue::new("1", "A")
            .with_local_image("")
            .with_cached_image("https://cdn/x.jpg");

        assert!(venue.local_image().is_none());
        assert_eq!(venue.cached_image(), Some("https://cdn/x.jpg"));
        assert!(venue.has_image());
        assert!(!Venue::new("2", "B").has_image());
    }

    #[test]
    fn test_suits_age() {
        let mut venue = Venue::new("1", "A");
        assert!(venue.suits_age(15));

        venue.age_range = Some(AgeRange::new(2, 6));
        assert!(venue.suits_age(2));
        assert!(venue.suits_age(6));
        assert!(!venue.suits_age(7));
        assert!(!venue.suits_age(1));
    }

    #[test]
    fn test_is_free() {
        let mut venue = Venue::new("1", "A");
        assert!(!venue.is_free());
        venue.price_type = Some(PriceTier::Free);
        assert!(venue.is_free());
    }

    #[test]
    fn test_content_hash_ignores_id_and_case() {
        let mut a = Venue::new("001", "Kiztopia");
        a.lat = Some(22.302_51);
        a.lng = Some(114.178_5);
        let mut b = a.clone();
        b.id = "099".to_string();
        b.name = "  kiztopia ".to_string();
        b.lat = Some(22.302_54);

        assert_eq!(a.content_hash(), b.content_hash());

        b.address = Some("灣仔".to_string());
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_pipeline_export_record_loads() {
        let json = r#"{
            "id": "024", "name": "Kiztopia", "nameEn": null, "district": "九龍灣",
            "region": "kowloon", "lat": 22.3225, "lng": 114.2131,
            "category": "playhouse", "indoor": true, "ageRange": [0, 6],
            "priceType": "medium", "priceDescription": "$100-200",
            "description": "大型室內遊樂場", "website": null,
            "googleMapsUrl": "https://maps.google.com/?q=kiztopia",
            "tips": null, "openingHours": "請查詢官網", "address": "",
            "hasBabyRoom": false, "hasStrollerAccess": true, "hasRestaurant": false,
            "rainyDaySuitable": true, "verified": false,
            "updatedAt": "", "checkedAt": "2025-01-16",
            "sourceUrls": ["https://example.com/a"]
        }"#;
        let venue: Venue = serde_json::from_str(json).unwrap();
        assert_eq!(venue.id, "024");
        assert_eq!(venue.updated_at, None);
        assert_eq!(venue.age_range, Some(AgeRange { min: 0, max: 6 }));
    }

    #[test]
    fn test_updated_at_forms() {
        let parse = |value: &str| {
            let json = format!(r#"{{"id": "1", "name": "A", "updatedAt": {value}}}"#);
            serde_json::from_str::<Venue>(&json).map(|venue| venue.updated_at)
        };
        let expected = Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();

        assert_eq!(parse(r#""2025-01-15T10:30:00""#).unwrap(), Some(expected));
        assert_eq!(parse(r#""2025-01-15T10:30:00.000000""#).unwrap(), Some(expected));
        assert_eq!(parse(r#""2025-01-15T18:30:00+08:00""#).unwrap(), Some(expected));
        assert_eq!(parse(r#""2025-01-15T10:30:00Z""#).unwrap(), Some(expected));
        assert_eq!(
            parse(r#""2025-01-15""#).unwrap(),
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse("null").unwrap(), None);
        assert_eq!(parse(r#""  ""#).unwrap(), None);

        let err = parse(r#""last tuesday""#).unwrap_err();
        assert!(err.to_string().contains("updatedAt"));
    }

    #[test]
    fn test_updated_at_round_trips() {
        let mut venue = Venue::new("1", "A");
        venue.updated_at = parse_timestamp("2025-01-15T10:30:00");
        let json = serde_json::to_string(&venue).unwrap();
        let back: Venue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.updated_at, venue.updated_at);
    }
}
