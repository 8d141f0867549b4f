use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

pub mod feature;
pub mod hotel;

pub use feature::{FeatureSchema, FeatureVector, HOTEL_AMENITIES};
pub use hotel::{Attribute, Catalog, HotelRecord, RankedHotel, RawHotel, NOT_AVAILABLE};

/// Request to rank hotels against a desired amenity profile
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Case-insensitive city filter; all hotels when absent
    #[serde(default)]
    pub city: Option<String>,
    /// One weight per schema label, in schema order
    pub features: Vec<f64>,
}

/// A ranked hotel as returned to the client
///
/// Amenity flags are emitted as one key per schema label, in schema order,
/// after the identifying fields and the similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedHotel {
    pub name: String,
    pub city: String,
    pub rating: Attribute,
    pub price: Attribute,
    pub url: Attribute,
    pub similarity: f64,
    pub amenities: Vec<(String, u8)>,
}

impl RecommendedHotel {
    pub fn new(ranked: RankedHotel, schema: &FeatureSchema) -> Self {
        let amenities = schema
            .labels()
            .iter()
            .enumerate()
            .map(|(position, label)| {
                let present = ranked.record.features.is_set(position);
                (label.clone(), u8::from(present))
            })
            .collect();

        let record = ranked.record;
        Self {
            name: record.name,
            city: record.city,
            rating: record.rating,
            price: record.price,
            url: record.url,
            similarity: ranked.similarity,
            amenities,
        }
    }
}

impl Serialize for RecommendedHotel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6 + self.amenities.len()))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("city", &self.city)?;
        map.serialize_entry("rating", &self.rating)?;
        map.serialize_entry("price", &self.price)?;
        map.serialize_entry("url", &self.url)?;
        map.serialize_entry("similarity", &self.similarity)?;
        for (label, flag) in &self.amenities {
            map.serialize_entry(label, flag)?;
        }
        map.end()
    }
}

/// Feature schema as exposed to clients
#[derive(Debug, Serialize)]
pub struct FeatureListResponse {
    pub features: Vec<String>,
}
