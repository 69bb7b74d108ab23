use std::fmt;

use serde::Serialize;

use super::{Property, PropertyInput};

/// A single rejected field
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field error found in one input, in field order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Property fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFields {
    pub address: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub sqft: u64,
    pub description: String,
    pub image_url: String,
}

impl From<&Property> for PropertyFields {
    fn from(p: &Property) -> Self {
        Self {
            address: p.address.clone(),
            price: p.price,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            sqft: p.sqft,
            description: p.description.clone(),
            image_url: p.image_url.clone(),
        }
    }
}

/// Validate a complete input. Missing fields are reported as required.
pub fn validate(input: &PropertyInput) -> Result<PropertyFields, ValidationErrors> {
    let mut errors = Vec::new();

    let address = required_text(&mut errors, "address", input.address.as_deref());
    let price = non_negative(&mut errors, "price", input.price);
    let bedrooms = whole_number(&mut errors, "bedrooms", input.bedrooms, u32::MAX as f64);
    let bathrooms = non_negative(&mut errors, "bathrooms", input.bathrooms);
    let sqft = whole_number(&mut errors, "sqft", input.sqft, u64::MAX as f64);
    let description = required_text(&mut errors, "description", input.description.as_deref());
    let image_url = required_text(&mut errors, "imageUrl", input.image_url.as_deref());

    match (address, price, bedrooms, bathrooms, sqft, description, image_url) {
        (
            Some(address),
            Some(price),
            Some(bedrooms),
            Some(bathrooms),
            Some(sqft),
            Some(description),
            Some(image_url),
        ) if errors.is_empty() => Ok(PropertyFields {
            address: address.trim().to_string(),
            price,
            bedrooms: bedrooms as u32,
            bathrooms,
            sqft: sqft as u64,
            // stored as written
            description: description.to_string(),
            image_url: image_url.to_string(),
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn push(errors: &mut Vec<FieldError>, field: &'static str, message: &str) {
    errors.push(FieldError {
        field,
        message: message.to_string(),
    });
}

fn required_text<'a>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        None => {
            push(errors, field, "is required");
            None
        }
        Some(v) if v.trim().is_empty() => {
            push(errors, field, "must not be empty");
            None
        }
        Some(v) => Some(v),
    }
}

fn non_negative(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<f64>,
) -> Option<f64> {
    match value {
        None => {
            push(errors, field, "is required");
            None
        }
        Some(v) if !v.is_finite() => {
            push(errors, field, "must be a finite number");
            None
        }
        Some(v) if v < 0.0 => {
            push(errors, field, "must be greater than or equal to 0");
            None
        }
        Some(v) => Some(v),
    }
}

fn whole_number(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<f64>,
    max: f64,
) -> Option<f64> {
    let v = non_negative(errors, field, value)?;
    if v.fract() != 0.0 {
        push(errors, field, "must be a whole number");
        return None;
    }
    if v > max {
        push(errors, field, "is too large");
        return None;
    }
    Some(v)
}
