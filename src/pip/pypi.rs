//! PyPI metadata lookups.
//!
//! Only one query matters here: the latest published pip release, read
//! from the project JSON document at `/pypi/pip/json`.

use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::debug;

/// Public package index queried for release metadata.
pub const PYPI_BASE_URL: &str = "https://pypi.org";

/// Request timeout for index lookups.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The slice of a PyPI project document we care about.
#[derive(Debug, Deserialize)]
struct ProjectDocument {
    info: ProjectInfo,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    version: String,
}

/// Blocking client for the PyPI JSON API.
pub struct PyPiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl PyPiClient {
    /// Client against the public index.
    pub fn new() -> Self {
        Self::with_base_url(PYPI_BASE_URL)
    }

    /// Client against a custom index root, mainly for tests.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::builder()
                .user_agent("pytower")
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch the latest published pip version.
    pub fn latest_pip_version(&self) -> crate::Result<String> {
        let url = format!("{}/pypi/pip/json", self.base_url);
        debug!("fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url).into());
        }

        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))?;
        let document: ProjectDocument = serde_json::from_str(&body)
            .with_context(|| format!("Malformed project document from {}", url))?;

        Ok(document.info.version)
    }
}

impl Default for PyPiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetches_the_latest_pip_version() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/pypi/pip/json");
            then.status(200)
                .body(r#"{"info":{"version":"24.2","name":"pip"},"releases":{}}"#);
        });

        let client = PyPiClient::with_base_url(&server.base_url());
        let version = client.latest_pip_version().unwrap();

        assert_eq!(version, "24.2");
        mock.assert();
    }

    #[test]
    fn server_errors_surface_in_the_message() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/pypi/pip/json");
            then.status(500).body("Internal Server Error");
        });

        let client = PyPiClient::with_base_url(&server.base_url());
        let err = client.latest_pip_version().unwrap_err().to_string();

        assert!(err.contains("500"), "Error should mention 500: {}", err);
    }

    #[test]
    fn malformed_documents_are_an_error() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/pypi/pip/json");
            then.status(200).body("not json at all");
        });

        let client = PyPiClient::with_base_url(&server.base_url());
        let err = client.latest_pip_version().unwrap_err().to_string();

        assert!(
            err.contains("Malformed project document"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_normalized() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET).path("/pypi/pip/json");
            then.status(200).body(r#"{"info":{"version":"24.2"}}"#);
        });

        let base = format!("{}/", server.base_url());
        let client = PyPiClient::with_base_url(&base);

        assert_eq!(client.latest_pip_version().unwrap(), "24.2");
        mock.assert();
    }
}
