use crate::{
    error::{AppError, AppResult},
    models::{FeatureSchema, FeatureVector, RecommendationRequest, RecommendedHotel},
    services::{
        catalog::build_catalog,
        providers::HotelSource,
        ranking::{rank, TOP_N},
    },
};

/// Checks the requested weights against the schema and wraps them as a query vector
///
/// Weights need not be binary, but must be finite and non-negative.
pub fn query_vector(schema: &FeatureSchema, features: Vec<f64>) -> AppResult<FeatureVector> {
    if features.len() != schema.len() {
        return Err(AppError::InvalidInput(format!(
            "Expected {} feature values, got {}",
            schema.len(),
            features.len()
        )));
    }

    if let Some(bad) = features.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(AppError::InvalidInput(format!(
            "Feature values must be non-negative numbers, got {}",
            bad
        )));
    }

    Ok(FeatureVector::new(features))
}

/// Ranks the hotels a source offers for the requested city
///
/// The request is validated before the source is touched, so a malformed
/// vector never opens a browser session.
pub async fn get_recommendations(
    source: &dyn HotelSource,
    schema: &FeatureSchema,
    request: RecommendationRequest,
) -> AppResult<Vec<RecommendedHotel>> {
    let query = query_vector(schema, request.features)?;
    let city = request
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let catalog = build_catalog(source, schema, city).await?;
    let ranked = rank(&query, catalog, TOP_N);

    Ok(ranked
        .into_iter()
        .map(|hotel| RecommendedHotel::new(hotel, schema))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::HotelDataset;

    const SAMPLE: &str = "\
Hotel_Name,City,Hotel_Rating,Hotel_Price,Feature_1,Feature_2
Alpha,Vienna,4.5,$200,Wi-Fi,Breakfast
Beta,Vienna,4.0,$150,Wi-Fi,Pool
Gamma,Vienna,,,,
Delta,Graz,3.8,$90,Pool,
";

    fn schema() -> FeatureSchema {
        FeatureSchema::new(["Wi-Fi", "Pool", "Breakfast"]).unwrap()
    }

    fn request(city: Option<&str>, features: Vec<f64>) -> RecommendationRequest {
        RecommendationRequest {
            city: city.map(str::to_string),
            features,
        }
    }

    #[test]
    fn test_query_vector_rejects_wrong_length() {
        let result = query_vector(&schema(), vec![1.0, 0.0]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_query_vector_rejects_negative_weights() {
        let result = query_vector(&schema(), vec![1.0, -0.5, 0.0]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_query_vector_accepts_weights() {
        let vector = query_vector(&schema(), vec![2.0, 0.0, 0.5]).unwrap();
        assert_eq!(vector.values(), &[2.0, 0.0, 0.5]);
    }

    #[tokio::test]
    async fn test_end_to_end_ranking() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let hotels = get_recommendations(
            &dataset,
            &schema(),
            request(Some("vienna"), vec![1.0, 0.0, 1.0]),
        )
        .await
        .unwrap();

        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert!((hotels[0].similarity - 1.0).abs() < 1e-12);
        assert!((hotels[1].similarity - 0.5).abs() < 1e-12);
        assert_eq!(hotels[2].similarity, 0.0);
        assert_eq!(hotels[2].rating.as_str(), "NA");
    }

    #[tokio::test]
    async fn test_huge_weights_rank_like_unit_weights() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let hotels = get_recommendations(
            &dataset,
            &schema(),
            request(Some("Vienna"), vec![1e200, 0.0, 1e200]),
        )
        .await
        .unwrap();

        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
        assert!((hotels[0].similarity - 1.0).abs() < 1e-12);
        assert!(hotels.iter().all(|h| h.similarity.is_finite()));
    }

    #[tokio::test]
    async fn test_blank_city_means_all_hotels() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let hotels = get_recommendations(&dataset, &schema(), request(Some("  "), vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();

        let names: Vec<&str> = hotels.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Delta", "Beta", "Alpha", "Gamma"]);
    }

    #[tokio::test]
    async fn test_unknown_city_is_not_found() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let result =
            get_recommendations(&dataset, &schema(), request(Some("Paris"), vec![1.0, 1.0, 1.0]))
                .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_vector_is_rejected_before_lookup() {
        let dataset = HotelDataset::from_reader(SAMPLE.as_bytes()).unwrap();
        let result =
            get_recommendations(&dataset, &schema(), request(Some("Paris"), vec![1.0])).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
