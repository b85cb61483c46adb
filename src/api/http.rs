//! reqwest-backed [`Backend`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

use super::{ActionResponse, Backend, routes};
use crate::domain::FeedPage;
use crate::error::Result;

/// Header value identifying an AJAX request to the feed endpoint.
const XHR_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// HTTP client for the server API.
///
/// # Example
///
/// ```rust,no_run
/// use chirec_ui::api::{Backend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:5000")?;
/// let feed = backend.job_feed(2).await?;
/// println!("{} jobs", feed.jobs.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend with a custom reqwest client.
    ///
    /// A path on `base_url` is kept as a prefix for every endpoint.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn post_action(&self, path: &str) -> Result<ActionResponse> {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "POST action");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Decode a JSON body regardless of the status code.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            tracing::debug!(status = %status, "Non-success status, decoding body anyway");
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn toggle_mode(&self) -> Result<ActionResponse> {
        self.post_action(routes::TOGGLE_MODE).await
    }

    async fn job_feed(&self, page: u32) -> Result<FeedPage> {
        let url = self.url(routes::JOB_FEED)?;
        tracing::debug!(url = %url, page, "GET job feed");
        let response = self
            .http
            .get(url)
            .query(&[("page", page)])
            .header(XHR_HEADER.0, XHR_HEADER.1)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn save_job(&self, job_id: i64) -> Result<ActionResponse> {
        self.post_action(&routes::save_job(job_id)).await
    }

    async fn enroll_event(&self, event_id: i64) -> Result<ActionResponse> {
        self.post_action(&routes::enroll_event(event_id)).await
    }

    async fn bookmark_event(&self, event_id: i64) -> Result<ActionResponse> {
        self.post_action(&routes::bookmark_event(event_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_keep_base_path() {
        let backend = HttpBackend::new("http://localhost:5000").unwrap();
        assert_eq!(
            backend.url(&routes::save_job(3)).unwrap().as_str(),
            "http://localhost:5000/jobs/3/save"
        );

        let prefixed = HttpBackend::new("https://example.com/chirec").unwrap();
        assert_eq!(
            prefixed.url(routes::TOGGLE_MODE).unwrap().as_str(),
            "https://example.com/chirec/api/toggle-mode"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpBackend::new("not a url").is_err());
    }
}
