use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the hotel dataset CSV loaded at startup
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// WebDriver endpoint used for live listing extraction
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Listings page the browser session is pointed at
    #[serde(default = "default_listings_url")]
    pub listings_url: String,

    /// Page-load timeout applied to every browser session
    #[serde(default = "default_page_load_timeout_secs")]
    pub page_load_timeout_secs: u64,

    /// Fixed wait after submitting a search, before reading the page
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> String {
    "data/google_hotel_data_clean_v2.csv".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_listings_url() -> String {
    "https://www.google.com/travel/hotels".to_string()
}

fn default_page_load_timeout_secs() -> u64 {
    30
}

fn default_settle_delay_ms() -> u64 {
    5000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
