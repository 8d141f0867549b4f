/// Hotel data sources
///
/// Each source yields raw hotels for a city. The catalog builder normalizes
/// them the same way regardless of where they came from.
use crate::{error::AppResult, models::RawHotel};

pub mod dataset;
pub mod live;
pub mod webdriver;

pub use dataset::HotelDataset;
pub use live::LiveListingsProvider;

/// Trait for raw hotel providers
///
/// `city` is matched case-insensitively. Sources that can enumerate everything
/// return all hotels when it is `None`.
#[async_trait::async_trait]
pub trait HotelSource: Send + Sync {
    async fn fetch_hotels(&self, city: Option<&str>) -> AppResult<Vec<RawHotel>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
