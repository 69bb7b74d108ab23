pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub use validation::{FieldError, PropertyFields, ValidationErrors};

/// A stored property listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u64,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Build a fresh record from validated fields, stamping both timestamps
    pub fn new(fields: PropertyFields, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            address: fields.address,
            price: fields.price,
            bedrooms: fields.bedrooms,
            bathrooms: fields.bathrooms,
            sqft: fields.sqft,
            description: fields.description,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping id and createdAt
    pub fn apply(&mut self, fields: PropertyFields, now: DateTime<Utc>) {
        self.address = fields.address;
        self.price = fields.price;
        self.bedrooms = fields.bedrooms;
        self.bathrooms = fields.bathrooms;
        self.sqft = fields.sqft;
        self.description = fields.description;
        self.image_url = fields.image_url;
        self.updated_at = now;
    }
}

/// Unvalidated property fields as they arrive in a request body.
///
/// Used for both create (every field required) and update (any subset).
/// Numbers are taken as `f64` so that negative or fractional values reach
/// validation instead of failing deserialization. Identity and timestamps
/// are not part of the input and are ignored if sent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(from = "RawPropertyInput")]
pub struct PropertyInput {
    pub address: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Wire names of fields sent as an explicit `null`
    pub cleared: Vec<&'static str>,
}

impl PropertyInput {
    /// Overlay these fields on top of an existing record.
    ///
    /// Absent fields keep the existing value; cleared fields stay empty so
    /// validation rejects them.
    pub fn merged_onto(&self, existing: &Property) -> PropertyInput {
        PropertyInput {
            address: self.or_existing("address", &self.address, || existing.address.clone()),
            price: self.or_existing("price", &self.price, || existing.price),
            bedrooms: self.or_existing("bedrooms", &self.bedrooms, || existing.bedrooms as f64),
            bathrooms: self.or_existing("bathrooms", &self.bathrooms, || existing.bathrooms),
            sqft: self.or_existing("sqft", &self.sqft, || existing.sqft as f64),
            description: self.or_existing("description", &self.description, || {
                existing.description.clone()
            }),
            image_url: self.or_existing("imageUrl", &self.image_url, || {
                existing.image_url.clone()
            }),
            cleared: self.cleared.clone(),
        }
    }

    pub fn is_cleared(&self, field: &str) -> bool {
        self.cleared.iter().any(|c| *c == field)
    }

    fn or_existing<T: Clone>(
        &self,
        field: &str,
        patch: &Option<T>,
        existing: impl FnOnce() -> T,
    ) -> Option<T> {
        match patch {
            Some(v) => Some(v.clone()),
            None if self.is_cleared(field) => None,
            None => Some(existing()),
        }
    }
}

// outer None: field absent, Some(None): explicit null
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPropertyInput {
    #[serde(default, deserialize_with = "present")]
    address: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    bedrooms: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    bathrooms: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    sqft: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    image_url: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<RawPropertyInput> for PropertyInput {
    fn from(raw: RawPropertyInput) -> Self {
        let mut cleared = Vec::new();
        PropertyInput {
            address: take(&mut cleared, "address", raw.address),
            price: take(&mut cleared, "price", raw.price),
            bedrooms: take(&mut cleared, "bedrooms", raw.bedrooms),
            bathrooms: take(&mut cleared, "bathrooms", raw.bathrooms),
            sqft: take(&mut cleared, "sqft", raw.sqft),
            description: take(&mut cleared, "description", raw.description),
            image_url: take(&mut cleared, "imageUrl", raw.image_url),
            cleared,
        }
    }
}

fn take<T>(
    cleared: &mut Vec<&'static str>,
    field: &'static str,
    value: Option<Option<T>>,
) -> Option<T> {
    if matches!(value, Some(None)) {
        cleared.push(field);
    }
    value.flatten()
}

/// Generated news article, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub summary: String,
    /// Human readable, e.g. "March 3, 2025"
    pub date: String,
    pub image_url: String,
}
