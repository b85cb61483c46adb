//! Chirec UI controller
//!
//! Presentation logic for the Chirec job-matching site: page wiring, job and
//! event actions, an infinite job feed, real-time chat rendering and toast
//! notifications.
//!
//! # Architecture
//!
//! - **Controller**: [`controller::UiController`] reacts to page events and server pushes
//! - **Seams**: the document ([`dom::Dom`]), the window ([`page::Page`]), the
//!   server ([`api::Backend`]) and the chat socket ([`realtime::RealtimeChannel`])
//!   are traits, with headless and HTTP implementations in this crate
//! - **Rendering**: [`ui`] turns data into escaped HTML fragments
//! - **Observability**: failures flow through one [`telemetry::Reporter`]
//!
//! # Modules
//!
//! - [`api`]: server endpoints and the reqwest client
//! - [`config`]: layered configuration
//! - [`controller`]: the page controller
//! - [`dom`]: document seam and the in-memory document
//! - [`domain`]: jobs and chat messages
//! - [`page`]: window seam
//! - [`realtime`]: chat channel events and a local transport
//! - [`scroller`]: infinite feed paging
//! - [`telemetry`]: logging setup and reporters
//! - [`ui`]: markup rendering

pub mod api;
pub mod config;
pub mod controller;
pub mod dom;
pub mod domain;
pub mod error;
pub mod page;
pub mod realtime;
pub mod scroller;
pub mod telemetry;
pub mod ui;

pub use controller::UiController;
pub use error::{Error, Result};
