use serde::{Serialize, Serializer};
use std::fmt::Display;

use super::FeatureVector;

/// Sentinel written wherever a listing field could not be read
pub const NOT_AVAILABLE: &str = "NA";

/// A text field that may be missing from the source
///
/// Serializes as the raw string or `"NA"`. Never parse it as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Available(String),
    NotAvailable,
}

impl Attribute {
    /// Blank and sentinel values collapse into `NotAvailable`
    pub fn from_optional(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() && v.trim() != NOT_AVAILABLE => {
                Attribute::Available(v.trim().to_string())
            }
            _ => Attribute::NotAvailable,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Attribute::Available(v) => v,
            Attribute::NotAvailable => NOT_AVAILABLE,
        }
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One hotel as yielded by a source, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHotel {
    pub name: Option<String>,
    pub city: String,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub url: Option<String>,
    /// Free-text amenity tags in no particular order
    pub tags: Vec<String>,
}

/// A normalized hotel with its amenity vector
#[derive(Debug, Clone, PartialEq)]
pub struct HotelRecord {
    pub name: String,
    pub city: String,
    pub rating: Attribute,
    pub price: Attribute,
    pub url: Attribute,
    pub features: FeatureVector,
}

/// Hotels under consideration for a single request, in insertion order
pub type Catalog = Vec<HotelRecord>;

/// A catalog entry paired with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHotel {
    pub record: HotelRecord,
    pub similarity: f64,
}
