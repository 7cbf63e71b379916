//! Hotel catalog records
//!
//! A [`Hotel`] is identified by an opaque string id assigned by the durable
//! store. Creation takes a [`HotelDraft`] (no id yet); updates take a
//! [`HotelPatch`] that distinguishes absent fields from fields set to a
//! value, so the durable store can merge it into the stored record.

use crate::constants::HOTEL_CACHE_NAMESPACE;
use crate::entities::record::CacheableRecord;
use serde::{Deserialize, Serialize};

/// A hotel as stored in every tier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    /// Identifier assigned by the durable store
    pub id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// City
    pub city: String,
    /// State or province
    pub state: String,
    /// Average rating
    pub rating: f64,
    /// Amenity labels
    pub amenities: Vec<String>,
    /// Free-text description paragraphs
    #[serde(alias = "descripcion")]
    pub description: Vec<String>,
}

impl Hotel {
    /// Cache key for a hotel id
    pub fn cache_key(id: &str) -> String {
        format!("{HOTEL_CACHE_NAMESPACE}:{id}")
    }
}

impl CacheableRecord for Hotel {
    const KIND: &'static str = "hotel";

    fn cache_keys(&self) -> Vec<String> {
        vec![Self::cache_key(&self.id)]
    }
}

/// Fields of a hotel that does not exist yet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotelDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub rating: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
}

impl HotelDraft {
    /// Attach the id assigned by the durable store
    pub fn into_hotel(self, id: impl Into<String>) -> Hotel {
        Hotel {
            id: id.into(),
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            rating: self.rating,
            amenities: self.amenities,
            description: self.description,
        }
    }
}

/// Partial update of a hotel
///
/// `None` leaves the stored field untouched; `Some(value)` overwrites it,
/// including with an empty value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HotelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Vec<String>>,
}

impl HotelPatch {
    /// Build a patch from a full draft, keeping only non-zero fields
    ///
    /// Empty strings, empty lists and a zero rating are treated as absent.
    /// This is the mapping used by clients that send whole records.
    pub fn from_non_zero(draft: HotelDraft) -> Self {
        fn text(value: String) -> Option<String> {
            (!value.is_empty()).then_some(value)
        }
        fn list(value: Vec<String>) -> Option<Vec<String>> {
            (!value.is_empty()).then_some(value)
        }

        Self {
            name: text(draft.name),
            address: text(draft.address),
            city: text(draft.city),
            state: text(draft.state),
            rating: (draft.rating != 0.0).then_some(draft.rating),
            amenities: list(draft.amenities),
            description: list(draft.description),
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the amenities
    pub fn with_amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = Some(amenities);
        self
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.rating.is_none()
            && self.amenities.is_none()
            && self.description.is_none()
    }

    /// Merge the present fields into `hotel`
    pub fn apply_to(&self, hotel: &mut Hotel) {
        if let Some(name) = &self.name {
            hotel.name.clone_from(name);
        }
        if let Some(address) = &self.address {
            hotel.address.clone_from(address);
        }
        if let Some(city) = &self.city {
            hotel.city.clone_from(city);
        }
        if let Some(state) = &self.state {
            hotel.state.clone_from(state);
        }
        if let Some(rating) = self.rating {
            hotel.rating = rating;
        }
        if let Some(amenities) = &self.amenities {
            hotel.amenities.clone_from(amenities);
        }
        if let Some(description) = &self.description {
            hotel.description.clone_from(description);
        }
    }
}
