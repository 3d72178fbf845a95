use super::FetchError;
use crate::config::{validate_endpoint, OrderSourceSettings};

/// Upstream order listing (allows mocking).
pub trait OrderSource {
    /// Fetch the raw, unstructured order listing.
    fn fetch_orders(&self) -> Result<String, FetchError>;
}

/// Order source backed by a single HTTP GET with a bounded timeout. No retries.
pub struct HttpOrderSource {
    url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpOrderSource {
    pub fn new(settings: &OrderSourceSettings) -> Result<Self, FetchError> {
        validate_endpoint(&settings.url).map_err(FetchError::InvalidUrl)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| FetchError::HttpClient(e.to_string()))?;

        Ok(Self {
            url: settings.url.clone(),
            client,
            timeout_secs: settings.timeout.as_secs(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl OrderSource for HttpOrderSource {
    fn fetch_orders(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                FetchError::Connection(self.url.clone())
            } else {
                FetchError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// Order source that always returns the same listing.
pub struct StaticOrderSource {
    body: String,
}

impl StaticOrderSource {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

impl OrderSource for StaticOrderSource {
    fn fetch_orders(&self) -> Result<String, FetchError> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
pub(crate) struct FailingOrderSource;

#[cfg(test)]
impl OrderSource for FailingOrderSource {
    fn fetch_orders(&self) -> Result<String, FetchError> {
        Err(FetchError::Connection("http://localhost:5001/api/orders".into()))
    }
}
