//! Venue filtering for listings.

use crate::venue::{Category, PriceTier, Region, Venue};

/// Criteria for narrowing a venue listing. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueFilter {
    /// Only this category.
    pub category: Option<Category>,
    /// Only this region.
    pub region: Option<Region>,
    /// District must contain this text.
    pub district: Option<String>,
    /// Child's age must fall within the venue's age range.
    pub age: Option<u8>,
    /// Only this price tier.
    pub price: Option<PriceTier>,
    /// Only indoor venues.
    pub indoor_only: bool,
    /// Only venues suitable for rainy days.
    pub rainy_day_only: bool,
    /// Only free venues.
    pub free_only: bool,
    /// Only venues with a real image.
    pub with_image_only: bool,
}

impl VenueFilter {
    /// A filter that matches every venue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    #[must_use]
    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a region.
    #[must_use]
    pub fn region(mut self, region: impl Into<Region>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Restrict to districts containing `district`.
    #[must_use]
    pub fn district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Restrict to venues suitable for a child of `age`.
    #[must_use]
    pub fn age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    /// Restrict to a price tier.
    #[must_use]
    pub fn price(mut self, price: impl Into<PriceTier>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Restrict to indoor venues.
    #[must_use]
    pub fn indoor_only(mut self) -> Self {
        self.indoor_only = true;
        self
    }

    /// Restrict to rainy-day venues.
    #[must_use]
    pub fn rainy_day_only(mut self) -> Self {
        self.rainy_day_only = true;
        self
    }

    /// Restrict to free venues.
    #[must_use]
    pub fn free_only(mut self) -> Self {
        self.free_only = true;
        self
    }

    /// Restrict to venues with a real image.
    #[must_use]
    pub fn with_image_only(mut self) -> Self {
        self.with_image_only = true;
        self
    }

    /// Whether `venue` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, venue: &Venue) -> bool {
        if let Some(category) = &self.category {
            if venue.category.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(region) = &self.region {
            if venue.region.as_ref() != Some(region) {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if !venue.district.contains(district.as_str()) {
                return false;
            }
        }
        if let Some(age) = self.age {
            if !venue.suits_age(age) {
                return false;
            }
        }
        if let Some(price) = &self.price {
            if venue.price_type.as_ref() != Some(price) {
                return false;
            }
        }

        (!self.indoor_only || venue.indoor)
            && (!self.rainy_day_only || venue.rainy_day_suitable)
            && (!self.free_only || venue.is_free())
            && (!self.with_image_only || venue.has_image())
    }

    /// Matching venues, in input order.
    pub fn apply<'a, I>(&'a self, venues: I) -> impl Iterator<Item = &'a Venue> + 'a
    where
        I: IntoIterator<Item = &'a Venue>,
        I::IntoIter: 'a,
    {
        venues.into_iter().filter(move |venue| self.matches(venue))
    }
}
