use std::cmp::Ordering;

use crate::models::{Catalog, FeatureVector, RankedHotel};

/// Maximum number of hotels returned per request
pub const TOP_N: usize = 10;

/// Euclidean norm
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0_f64, |max, x| max.max(x.abs()))
}

/// Cosine similarity, defined as 0 when either vector has zero norm
///
/// Both vectors are scaled to a largest component of 1 first, so huge
/// weights cannot overflow the norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (scale_a, scale_b) = (max_abs(a), max_abs(b));
    if scale_a == 0.0 || scale_b == 0.0 {
        return 0.0;
    }

    let a: Vec<f64> = a.iter().map(|x| x / scale_a).collect();
    let b: Vec<f64> = b.iter().map(|x| x / scale_b).collect();
    dot(&a, &b) / (magnitude(&a) * magnitude(&b))
}

/// Scores every hotel against `query` and keeps the best `limit`
///
/// Ordering is score descending, then catalog position ascending, so equal
/// scores come back in the order the catalog was built.
///
/// # Panics
///
/// Panics if any catalog vector has a different length than `query`.
pub fn rank(query: &FeatureVector, catalog: Catalog, limit: usize) -> Vec<RankedHotel> {
    let mut scored: Vec<(usize, RankedHotel)> = catalog
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            assert_eq!(
                record.features.len(),
                query.len(),
                "feature vector length mismatch for {}",
                record.name
            );
            let similarity = cosine_similarity(query.values(), record.features.values());
            (position, RankedHotel { record, similarity })
        })
        .collect();

    scored.sort_by(|(pos_a, a), (pos_b, b)| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then(pos_a.cmp(pos_b))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, ranked)| ranked)
        .collect()
}
