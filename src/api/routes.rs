//! Path builders for server endpoints.

pub const TOGGLE_MODE: &str = "/api/toggle-mode";
pub const JOB_FEED: &str = "/jobs/feed";

#[must_use]
pub fn save_job(job_id: i64) -> String {
    format!("/jobs/{job_id}/save")
}

/// Application page for a job; navigated to, never fetched.
#[must_use]
pub fn apply_job(job_id: i64) -> String {
    format!("/jobs/{job_id}/apply")
}

#[must_use]
pub fn enroll_event(event_id: i64) -> String {
    format!("/events/{event_id}/enroll")
}

#[must_use]
pub fn bookmark_event(event_id: i64) -> String {
    format!("/events/{event_id}/bookmark")
}
