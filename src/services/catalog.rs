use crate::{
    error::{AppError, AppResult},
    models::{Catalog, FeatureSchema},
    services::{normalizer, providers::HotelSource},
};

/// Builds the per-request catalog for `city` from any hotel source
///
/// Returns [`AppError::NotFound`] when nothing survives normalization, so
/// callers never rank an empty catalog.
pub async fn build_catalog(
    source: &dyn HotelSource,
    schema: &FeatureSchema,
    city: Option<&str>,
) -> AppResult<Catalog> {
    let raw = source.fetch_hotels(city).await?;
    let fetched = raw.len();
    let catalog = normalizer::normalize_all(schema, raw);

    if catalog.len() < fetched {
        tracing::warn!(
            dropped = fetched - catalog.len(),
            provider = source.name(),
            "Some hotel records could not be normalized"
        );
    }

    if catalog.is_empty() {
        return Err(AppError::NotFound(
            "No hotels found in the specified city".to_string(),
        ));
    }

    tracing::info!(
        city = city.unwrap_or("*"),
        records = catalog.len(),
        provider = source.name(),
        "Catalog built"
    );

    Ok(catalog)
}
