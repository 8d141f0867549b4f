use crate::models::{Attribute, FeatureSchema, HotelRecord, RawHotel};

/// Normalizes one raw hotel into a record aligned with `schema`
///
/// Returns `None` when the hotel has no usable name. Callers keep going with
/// the remaining hotels.
pub fn normalize(schema: &FeatureSchema, raw: RawHotel) -> Option<HotelRecord> {
    let name = match raw.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            tracing::warn!(city = %raw.city, "Dropping hotel record without a name");
            return None;
        }
    };

    let features = schema.encode(raw.tags.iter().map(String::as_str));

    Some(HotelRecord {
        name,
        city: raw.city,
        rating: Attribute::from_optional(raw.rating),
        price: Attribute::from_optional(raw.price),
        url: Attribute::from_optional(raw.url),
        features,
    })
}

/// Normalizes a batch, preserving input order and skipping unnamed hotels
pub fn normalize_all<I>(schema: &FeatureSchema, raw: I) -> Vec<HotelRecord>
where
    I: IntoIterator<Item = RawHotel>,
{
    raw.into_iter()
        .filter_map(|hotel| normalize(schema, hotel))
        .collect()
}
