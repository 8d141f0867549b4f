use std::collections::HashMap;

use crate::error::{AppError, AppResult};

/// Amenity labels recognized by the default deployment, in vector order.
///
/// Spellings are canonical: a tag only counts if it matches one of these exactly.
pub const HOTEL_AMENITIES: [&str; 12] = [
    "Free breakfast",
    "Free Wi-Fi",
    "Air conditioning",
    "Restaurant",
    "Free parking",
    "Room service",
    "Pool",
    "Full-service laundry",
    "Fitness center",
    "Kitchen",
    "Airport shuttle",
    "Spa",
];

/// Ordered set of amenity labels that fixes the meaning of every vector index
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::hotel_amenities()
    }
}

impl FeatureSchema {
    /// Builds a schema from an ordered label list
    ///
    /// Rejects empty lists and duplicate labels, since either would make
    /// index meaning ambiguous.
    pub fn new<I, S>(labels: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(AppError::InvalidInput(
                "Feature schema needs at least one label".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), position).is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Duplicate feature label: {}",
                    label
                )));
            }
        }

        Ok(Self { labels, index })
    }

    /// The hotel amenity schema used by the service
    pub fn hotel_amenities() -> Self {
        let labels: Vec<String> = HOTEL_AMENITIES.iter().map(|l| l.to_string()).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();
        Self { labels, index }
    }

    /// Number of dimensions (K)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Vector index for a label, if the label is part of the schema
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Encodes free-text tags as a binary presence vector
    ///
    /// Tags that are not schema labels (including "no tag" sentinels) are ignored.
    pub fn encode<'a, I>(&self, tags: I) -> FeatureVector
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = vec![0.0; self.len()];
        for tag in tags {
            if let Some(position) = self.index_of(tag) {
                values[position] = 1.0;
            }
        }
        FeatureVector::new(values)
    }
}

/// Values aligned index-for-index with a [`FeatureSchema`]
///
/// Catalog vectors are strictly 0/1. Query vectors may carry non-negative weights.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Box<[f64]>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into_boxed_slice())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the amenity at `position` is present
    pub fn is_set(&self, position: usize) -> bool {
        self.0.get(position).is_some_and(|v| *v > 0.0)
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_amenities_are_unique() {
        let schema = FeatureSchema::hotel_amenities();
        assert_eq!(schema.len(), 12);
        assert_eq!(FeatureSchema::new(HOTEL_AMENITIES).unwrap(), schema);
    }

    #[test]
    fn test_index_follows_label_order() {
        let schema = FeatureSchema::hotel_amenities();
        assert_eq!(schema.index_of("Free breakfast"), Some(0));
        assert_eq!(schema.index_of("Spa"), Some(11));
        assert_eq!(schema.index_of("Fitness centre"), None);
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let result = FeatureSchema::new(["Pool", "Spa", "Pool"]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_empty_schema() {
        let result = FeatureSchema::new(Vec::<String>::new());
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_encode_sets_only_known_labels() {
        let schema = FeatureSchema::new(["Wi-Fi", "Pool", "Breakfast"]).unwrap();
        let vector = schema.encode(["Breakfast", "Sauna", "NA", "Wi-Fi"]);
        assert_eq!(vector.values(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_encode_is_case_sensitive() {
        let schema = FeatureSchema::new(["Pool"]).unwrap();
        let vector = schema.encode(["pool", "POOL"]);
        assert_eq!(vector.values(), &[0.0]);
    }

    #[test]
    fn test_is_set() {
        let vector = FeatureVector::new(vec![1.0, 0.0, 0.5]);
        assert!(vector.is_set(0));
        assert!(!vector.is_set(1));
        assert!(vector.is_set(2));
        assert!(!vector.is_set(7));
    }
}
