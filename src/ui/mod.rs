//! Markup rendering and text helpers.
//!
//! Everything here is pure: functions take data and return strings, and the
//! [`controller`](crate::controller) decides where the markup goes.
//!
//! # Structure
//!
//! - [`escape`]: HTML escaping, applied to every interpolated text field
//! - [`time`]: relative time labels
//! - [`badge`]: unread-count badge state
//! - [`job_card`]: feed cards
//! - [`message`]: chat bubbles
//! - [`toast`]: toast notifications

pub mod badge;
pub mod escape;
pub mod job_card;
pub mod message;
pub mod time;
pub mod toast;

pub use badge::BadgeState;
pub use escape::escape_html;
pub use job_card::{JOB_CARD_CLASS, job_card_markup};
pub use message::{message_class, message_markup};
pub use time::{format_time, format_time_at};
pub use toast::{Severity, toast_class, toast_markup};
