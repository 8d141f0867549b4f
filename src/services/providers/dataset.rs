/// Bulk hotel dataset loaded once at startup
///
/// The CSV has fixed columns: `Hotel_Name`, `City`, `Hotel_Rating`,
/// `Hotel_Price` and up to nine free-text tag slots `Feature_1`..`Feature_9`.
/// Empty cells are "no tag". Tag cells are kept verbatim; only the city is
/// trimmed for matching.
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

use crate::{
    error::AppResult,
    models::RawHotel,
    services::providers::HotelSource,
};

/// One CSV row as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "Hotel_Name", default)]
    pub name: Option<String>,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "Hotel_Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "Hotel_Price", default)]
    pub price: Option<String>,
    #[serde(rename = "Feature_1", default)]
    pub feature_1: Option<String>,
    #[serde(rename = "Feature_2", default)]
    pub feature_2: Option<String>,
    #[serde(rename = "Feature_3", default)]
    pub feature_3: Option<String>,
    #[serde(rename = "Feature_4", default)]
    pub feature_4: Option<String>,
    #[serde(rename = "Feature_5", default)]
    pub feature_5: Option<String>,
    #[serde(rename = "Feature_6", default)]
    pub feature_6: Option<String>,
    #[serde(rename = "Feature_7", default)]
    pub feature_7: Option<String>,
    #[serde(rename = "Feature_8", default)]
    pub feature_8: Option<String>,
    #[serde(rename = "Feature_9", default)]
    pub feature_9: Option<String>,
}

impl DatasetRow {
    fn tag_slots(&self) -> [&Option<String>; 9] {
        [
            &self.feature_1,
            &self.feature_2,
            &self.feature_3,
            &self.feature_4,
            &self.feature_5,
            &self.feature_6,
            &self.feature_7,
            &self.feature_8,
            &self.feature_9,
        ]
    }
}

impl From<&DatasetRow> for RawHotel {
    fn from(row: &DatasetRow) -> Self {
        RawHotel {
            name: row.name.clone(),
            city: row.city.trim().to_string(),
            rating: row.rating.clone(),
            price: row.price.clone(),
            url: None,
            tags: row
                .tag_slots()
                .into_iter()
                .flatten()
                .filter(|tag| !tag.trim().is_empty())
                .cloned()
                .collect(),
        }
    }
}

/// Read-only in-memory dataset, shared across requests without locking
#[derive(Debug, Clone, Default)]
pub struct HotelDataset {
    rows: Vec<DatasetRow>,
}

impl HotelDataset {
    /// Loads the dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(csv::Error::from)?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            "Loaded hotel dataset"
        );

        Ok(dataset)
    }

    /// Parses CSV content from any reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let rows = csv_reader
            .deserialize::<DatasetRow>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose city equals `city` ignoring case, in file order
    pub fn hotels_in(&self, city: Option<&str>) -> Vec<RawHotel> {
        let wanted = city.map(|c| c.trim().to_lowercase());
        self.rows
            .iter()
            .filter(|row| match &wanted {
                Some(wanted) => row.city.trim().to_lowercase() == *wanted,
                None => true,
            })
            .map(RawHotel::from)
            .collect()
    }
}

#[async_trait::async_trait]
impl HotelSource for HotelDataset {
    async fn fetch_hotels(&self, city: Option<&str>) -> AppResult<Vec<RawHotel>> {
        let hotels = self.hotels_in(city);
        tracing::debug!(
            city = city.unwrap_or("*"),
            matched = hotels.len(),
            provider = self.name(),
            "Dataset rows selected"
        );
        Ok(hotels)
    }

    fn name(&self) -> &'static str {
        "dataset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Hotel_Name,City,Hotel_Rating,Hotel_Price,Feature_1,Feature_2,Feature_3,Feature_4,Feature_5,Feature_6,Feature_7,Feature_8,Feature_9
The Savoy,London,4.7,$650,Free Wi-Fi,Spa,,,,,,,
Premier Inn,london,4.1,,Free Wi-Fi,Restaurant,Air conditioning,,,,,,
Hotel Adlon,Berlin,,$420,Pool, Spa ,Fitness centre,,,,,,
";

    #[test]
    fn test_parses_rows() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let berlin = dataset.hotels_in(Some("Berlin"));
        assert_eq!(berlin.len(), 1);
        assert_eq!(berlin[0].rating, None);
        assert_eq!(berlin[0].price.as_deref(), Some("$420"));
        assert_eq!(berlin[0].tags, vec!["Pool", " Spa ", "Fitness centre"]);
    }

    #[test]
    fn test_padded_tags_do_not_match_labels() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let schema = crate::models::FeatureSchema::hotel_amenities();
        let adlon = dataset.hotels_in(Some("Berlin")).remove(0);

        let record = crate::services::normalizer::normalize(&schema, adlon).unwrap();

        assert!(record.features.is_set(schema.index_of("Pool").unwrap()));
        assert!(!record.features.is_set(schema.index_of("Spa").unwrap()));
        assert!(!record.features.is_set(schema.index_of("Fitness center").unwrap()));
    }

    #[test]
    fn test_padded_city_still_matches() {
        let csv = "Hotel_Name,City,Hotel_Rating,Hotel_Price,Feature_1\n\
                   Hotel Sacher, Vienna ,4.8,$510,Spa\n";
        let dataset = HotelDataset::from_reader(csv.as_bytes()).unwrap();
        let hotels = dataset.hotels_in(Some("vienna"));
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].city, "Vienna");
    }

    #[test]
    fn test_city_filter_ignores_case() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let names: Vec<Option<String>> = dataset
            .hotels_in(Some("LONDON"))
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(
            names,
            vec![Some("The Savoy".to_string()), Some("Premier Inn".to_string())]
        );
    }

    #[test]
    fn test_no_city_returns_all_rows() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.hotels_in(None).len(), 3);
    }

    #[test]
    fn test_unknown_city_yields_nothing() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(dataset.hotels_in(Some("Paris")).is_empty());
    }

    #[tokio::test]
    async fn test_hotel_source_impl() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let hotels = dataset.fetch_hotels(Some("berlin")).await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(dataset.name(), "dataset");
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let result = HotelDataset::load("does/not/exist.csv");
        assert!(matches!(result, Err(crate::error::AppError::Dataset(_))));
    }
}
