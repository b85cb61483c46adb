//! Server API consumed by the controller.
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | POST | `/api/toggle-mode` | [`ActionResponse`] |
//! | GET | `/jobs/feed?page=<n>` | [`FeedPage`](crate::domain::FeedPage) |
//! | POST | `/jobs/<id>/save` | [`ActionResponse`] |
//! | GET | `/jobs/<id>/apply` | navigation only |
//! | POST | `/events/<id>/enroll` | [`ActionResponse`] |
//! | POST | `/events/<id>/bookmark` | [`ActionResponse`] |

mod http;
pub mod routes;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::FeedPage;
use crate::error::Result;

pub use http::HttpBackend;

/// Body returned by the action endpoints.
///
/// The server answers failures with a 4xx status and the same shape, so the
/// body is decoded whatever the status. A missing `success` reads as `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome, sent by the enroll endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// New user mode, sent by the toggle endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ActionResponse {
    /// A successful response with no extra fields.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// An unsuccessful response carrying `message`.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            mode: None,
        }
    }
}

/// Network operations the controller performs.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Switch the user's operating mode.
    async fn toggle_mode(&self) -> Result<ActionResponse>;

    /// Fetch one page of the job feed.
    async fn job_feed(&self, page: u32) -> Result<FeedPage>;

    async fn save_job(&self, job_id: i64) -> Result<ActionResponse>;

    async fn enroll_event(&self, event_id: i64) -> Result<ActionResponse>;

    async fn bookmark_event(&self, event_id: i64) -> Result<ActionResponse>;
}
