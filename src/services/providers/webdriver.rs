/// Minimal W3C WebDriver client
///
/// Only the commands the live listings provider needs: open a session, navigate,
/// find an element, type into it, read the page source and close the session.
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Key under which WebDriver returns element references
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// WebDriver code point for the Enter key
pub const ENTER_KEY: char = '\u{E007}';

#[derive(Debug, Deserialize)]
struct WireResponse<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

/// Opaque reference to an element on the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef(String);

/// Maps a failed WebDriver response onto the application error taxonomy
///
/// Page-load timeouts become [`AppError::Timeout`]; everything else is an
/// extraction failure.
fn map_wire_error(status: StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<WireResponse<WireError>>(body) {
        Ok(WireResponse { value }) => match value.error.as_str() {
            "timeout" | "script timeout" => {
                AppError::Timeout(format!("Page load timed out: {}", value.message))
            }
            "no such element" => {
                AppError::Extraction(format!("Element not found: {}", value.message))
            }
            other => AppError::Extraction(format!("WebDriver error {}: {}", other, value.message)),
        },
        Err(_) => AppError::Extraction(format!(
            "WebDriver returned status {}: {}",
            status, body
        )),
    }
}

/// One browser session
///
/// Not closed on drop. Owners must call [`WebDriverSession::close`] on every path.
#[derive(Debug)]
pub struct WebDriverSession {
    http_client: HttpClient,
    base_url: String,
    session_id: String,
}

impl WebDriverSession {
    /// Starts a headless browser session with the given page-load timeout
    pub async fn start(
        http_client: HttpClient,
        base_url: &str,
        page_load_timeout: Duration,
    ) -> AppResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": {
                        "args": ["--headless=new", "--no-sandbox", "--disable-dev-shm-usage"]
                    },
                    "timeouts": {
                        "pageLoad": page_load_timeout.as_millis() as u64
                    }
                }
            }
        });

        let session: NewSession = send(
            &http_client,
            Method::POST,
            &format!("{}/session", base_url),
            Some(capabilities),
        )
        .await?;

        tracing::debug!(session_id = %session.session_id, "WebDriver session started");

        Ok(Self {
            http_client,
            base_url,
            session_id: session.session_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.session_id
    }

    async fn command<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<T> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        send(&self.http_client, method, &url, body).await
    }

    /// Navigates and waits for the page load to finish
    pub async fn goto(&self, url: &str) -> AppResult<()> {
        let _: Value = self
            .command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    /// Finds the first element matching a CSS selector
    pub async fn find(&self, css: &str) -> AppResult<ElementRef> {
        let value: Value = self
            .command(
                Method::POST,
                "/element",
                Some(json!({ "using": "css selector", "value": css })),
            )
            .await?;

        value[ELEMENT_KEY]
            .as_str()
            .map(|id| ElementRef(id.to_string()))
            .ok_or_else(|| AppError::Extraction(format!("Malformed element reference for {}", css)))
    }

    pub async fn send_keys(&self, element: &ElementRef, text: &str) -> AppResult<()> {
        let _: Value = self
            .command(
                Method::POST,
                &format!("/element/{}/value", element.0),
                Some(json!({ "text": text })),
            )
            .await?;
        Ok(())
    }

    /// Current page markup
    pub async fn source(&self) -> AppResult<String> {
        self.command(Method::GET, "/source", None).await
    }

    /// Ends the session and releases the browser
    pub async fn close(self) -> AppResult<()> {
        let _: Value = self.command(Method::DELETE, "", None).await?;
        tracing::debug!(session_id = %self.session_id, "WebDriver session closed");
        Ok(())
    }
}

async fn send<T: DeserializeOwned>(
    http_client: &HttpClient,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> AppResult<T> {
    let mut request = http_client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(map_wire_error(status, &text));
    }

    let parsed: WireResponse<T> = serde_json::from_str(&text).map_err(|e| {
        tracing::error!(error = %e, response = %text, "Failed to deserialize WebDriver response");
        AppError::Extraction(format!("Failed to parse WebDriver response: {}", e))
    })?;

    Ok(parsed.value)
}
