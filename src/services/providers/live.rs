/// Live listings provider
///
/// Drives a browser session against the listings page, searches for the city,
/// waits a fixed time for results to render, then parses every listing card.
/// A fresh session is opened per call and closed whatever the outcome, even
/// when the caller stops waiting.
use reqwest::{Client as HttpClient, Url};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::RawHotel,
    services::providers::{
        webdriver::{WebDriverSession, ENTER_KEY},
        HotelSource,
    },
};

/// Amenity tags read per listing
pub const MAX_TAG_SLOTS: usize = 9;

/// Extra time allowed on top of the browser's own page-load timeout
const NAVIGATION_GRACE: Duration = Duration::from_secs(5);

/// CSS selectors for the listings page
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    pub search_box: String,
    pub card: String,
    pub name: String,
    pub rating: String,
    pub price: String,
    pub amenity: String,
    pub link: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            search_box: "input[aria-label='Search for places, hotels and more']".to_string(),
            card: "div.uaTTDe".to_string(),
            name: "h2.BgYkof".to_string(),
            rating: "span.KFi5wf".to_string(),
            price: "span.qQOQpe".to_string(),
            amenity: "li.XX3dkb span.LtjZ2d".to_string(),
            link: "a.PVOOXe".to_string(),
        }
    }
}

struct CompiledSelectors {
    card: Selector,
    name: Selector,
    rating: Selector,
    price: Selector,
    amenity: Selector,
    link: Selector,
}

fn compile(css: &str) -> AppResult<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::Internal(format!("Invalid selector {}: {:?}", css, e)))
}

impl CompiledSelectors {
    fn new(selectors: &ListingSelectors) -> AppResult<Self> {
        Ok(Self {
            card: compile(&selectors.card)?,
            name: compile(&selectors.name)?,
            rating: compile(&selectors.rating)?,
            price: compile(&selectors.price)?,
            amenity: compile(&selectors.amenity)?,
            link: compile(&selectors.link)?,
        })
    }
}

fn first_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Parses every listing card on the page into raw hotels
///
/// Rating, price, amenities and link are each optional. Cards without a name
/// are kept here and dropped later by the normalizer.
pub fn parse_listings(
    html: &str,
    city: &str,
    selectors: &ListingSelectors,
    base_url: &str,
) -> AppResult<Vec<RawHotel>> {
    let compiled = CompiledSelectors::new(selectors)?;
    let base = Url::parse(base_url).ok();
    let document = Html::parse_document(html);

    let hotels = document
        .select(&compiled.card)
        .map(|card| {
            let name = first_text(&card, &compiled.name);
            let rating = first_text(&card, &compiled.rating);
            let price = first_text(&card, &compiled.price);

            let tags: Vec<String> = card
                .select(&compiled.amenity)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .take(MAX_TAG_SLOTS)
                .collect();

            let url = card
                .select(&compiled.link)
                .next()
                .and_then(|el| el.value().attr("href"))
                .and_then(|href| match &base {
                    Some(base) => base.join(href).ok().map(String::from),
                    None => Some(href.to_string()),
                });

            if rating.is_none() || price.is_none() || url.is_none() {
                tracing::debug!(
                    hotel = name.as_deref().unwrap_or("<unnamed>"),
                    has_rating = rating.is_some(),
                    has_price = price.is_some(),
                    has_url = url.is_some(),
                    "Listing field unavailable"
                );
            }

            RawHotel {
                name,
                city: city.to_string(),
                rating,
                price,
                url,
                tags,
            }
        })
        .collect();

    Ok(hotels)
}

#[derive(Clone)]
pub struct LiveListingsProvider {
    http_client: HttpClient,
    webdriver_url: String,
    listings_url: String,
    page_load_timeout: Duration,
    settle_delay: Duration,
    selectors: ListingSelectors,
}

impl LiveListingsProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            webdriver_url: config.webdriver_url.clone(),
            listings_url: config.listings_url.clone(),
            page_load_timeout: config.page_load_timeout(),
            settle_delay: config.settle_delay(),
            selectors: ListingSelectors::default(),
        }
    }

    /// Searches for `city` and returns the rendered page markup
    async fn search(&self, session: &WebDriverSession, city: &str) -> AppResult<String> {
        tokio::time::timeout(
            self.page_load_timeout + NAVIGATION_GRACE,
            session.goto(&self.listings_url),
        )
        .await
        .map_err(|_| AppError::Timeout(format!("Loading {} timed out", self.listings_url)))??;

        let search_box = session
            .find(&self.selectors.search_box)
            .await
            .map_err(|e| match e {
                AppError::Extraction(_) => {
                    AppError::Extraction("Search bar not found on listings page".to_string())
                }
                other => other,
            })?;

        session
            .send_keys(&search_box, &format!("{}{}", city, ENTER_KEY))
            .await?;

        tokio::time::sleep(self.settle_delay).await;

        session.source().await
    }

    /// Opens a session, searches, and closes the session whatever the search returned
    async fn scrape(&self, city: &str) -> AppResult<String> {
        let session = WebDriverSession::start(
            self.http_client.clone(),
            &self.webdriver_url,
            self.page_load_timeout,
        )
        .await?;
        let session_id = session.id().to_string();

        let outcome = self.search(&session, city).await;

        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, session_id = %session_id, "Failed to close WebDriver session");
        }

        outcome
    }
}

#[async_trait::async_trait]
impl HotelSource for LiveListingsProvider {
    async fn fetch_hotels(&self, city: Option<&str>) -> AppResult<Vec<RawHotel>> {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::InvalidInput("A city is required for live listings".to_string())
            })?;

        // Detached so a dropped request cannot skip the session close
        let provider = self.clone();
        let search_city = city.to_string();
        let html = tokio::spawn(async move { provider.scrape(&search_city).await })
            .await
            .map_err(|e| AppError::Internal(format!("Live extraction task failed: {}", e)))??;

        let hotels = parse_listings(&html, city, &self.selectors, &self.listings_url)?;

        tracing::info!(
            city = %city,
            listings = hotels.len(),
            provider = self.name(),
            "Live listings extracted"
        );

        Ok(hotels)
    }

    fn name(&self) -> &'static str {
        "live"
    }
}
