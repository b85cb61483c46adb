//! The page controller.
//!
//! [`UiController`] owns the seams (document, page, backend, reporter,
//! real-time channel) and implements every reaction the page has: bootstrap
//! wiring, job and event actions, message rendering and toasts.
//!
//! Actions return `()`. Failures go to the [`Reporter`] and, for enroll
//! only, to an error toast. Nothing is retried.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chirec_ui::{
//!     api::HttpBackend,
//!     controller::UiController,
//!     dom::MemoryDom,
//!     page::MemoryPage,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = UiController::builder(
//!     Arc::new(MemoryDom::page_skeleton()),
//!     Arc::new(MemoryPage::default()),
//!     Arc::new(HttpBackend::new("http://localhost:5000")?),
//! )
//! .build();
//!
//! let bootstrap = controller.bootstrap();
//! assert!(bootstrap.scroller.is_some());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use chrono::Utc;
use futures::StreamExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::{Backend, routes};
use crate::config::UiSettings;
use crate::dom::{Dom, DomEvent, NodeId, ScrollBehavior};
use crate::domain::{ChatMessage, Job};
use crate::page::{NotificationPermission, Page};
use crate::realtime::{Connection, Frame, InboundEvent, OutboundEvent, RealtimeChannel};
use crate::scroller::JobScroller;
use crate::telemetry::{Reporter, TracingReporter};
use crate::ui::{
    self, BadgeState, JOB_CARD_CLASS, Severity, job_card_markup, message_class, message_markup,
};

/// Element ids and classes the controller binds to.
pub mod selectors {
    pub const MOBILE_MENU_BUTTON: &str = "mobile-menu-btn";
    pub const MOBILE_MENU: &str = "mobile-menu";
    pub const FLASH_CLASS: &str = "alert";
    pub const MESSAGES_CONTAINER: &str = "messages-container";
    pub const MESSAGE_COUNT: &str = "message-count";
    pub const JOB_SCROLLER: &str = "job-scroller";
    pub const HIDDEN_CLASS: &str = "hidden";
}

/// Spawn `fut` on the current runtime, if there is one.
pub(crate) fn spawn_detached<F>(fut: F) -> Option<JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(fut)),
        Err(_) => {
            tracing::warn!(name: "ui.runtime.missing", "No async runtime; task dropped");
            None
        }
    }
}

/// Drop `nodes` to zero opacity, then remove them once the fade completes.
async fn fade_out(dom: Arc<dyn Dom>, nodes: Vec<NodeId>, settings: UiSettings) {
    for node in &nodes {
        dom.set_style(*node, "opacity", "0");
    }
    tokio::time::sleep(settings.fade_duration).await;
    for node in nodes {
        dom.remove(node);
    }
}

/// Handles produced by [`UiController::bootstrap`].
#[derive(Debug, Default)]
pub struct Bootstrap {
    /// Feed scroller, if the page has a feed container.
    pub scroller: Option<Arc<JobScroller>>,
    /// Pending flash-message dismissal.
    pub flash_dismissal: Option<JoinHandle<()>>,
}

/// Builder for [`UiController`].
pub struct UiControllerBuilder {
    dom: Arc<dyn Dom>,
    page: Arc<dyn Page>,
    backend: Arc<dyn Backend>,
    reporter: Arc<dyn Reporter>,
    settings: UiSettings,
}

impl fmt::Debug for UiControllerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiControllerBuilder")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl UiControllerBuilder {
    /// Replace the default [`TracingReporter`].
    #[must_use]
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: UiSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Arc<UiController> {
        Arc::new(UiController {
            dom: self.dom,
            page: self.page,
            backend: self.backend,
            reporter: self.reporter,
            settings: self.settings,
            realtime: RwLock::new(None),
        })
    }
}

/// Page controller. One per page view.
pub struct UiController {
    dom: Arc<dyn Dom>,
    page: Arc<dyn Page>,
    backend: Arc<dyn Backend>,
    reporter: Arc<dyn Reporter>,
    settings: UiSettings,
    realtime: RwLock<Option<Arc<dyn RealtimeChannel>>>,
}

impl fmt::Debug for UiController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiController")
            .field("settings", &self.settings)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl UiController {
    pub fn builder(
        dom: Arc<dyn Dom>,
        page: Arc<dyn Page>,
        backend: Arc<dyn Backend>,
    ) -> UiControllerBuilder {
        UiControllerBuilder {
            dom,
            page,
            backend,
            reporter: Arc::new(TracingReporter),
            settings: UiSettings::default(),
        }
    }

    pub fn dom(&self) -> &Arc<dyn Dom> {
        &self.dom
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────────────────────

    /// Wire the page once its document is ready.
    pub fn bootstrap(self: &Arc<Self>) -> Bootstrap {
        self.bind_mobile_menu();
        let flash_dismissal = self.schedule_flash_dismissal();
        let scroller = self.init_job_scroller();
        self.request_notification_permission();

        tracing::debug!(
            name: "ui.bootstrap.done",
            has_feed = scroller.is_some(),
            "Page bootstrapped"
        );
        Bootstrap {
            scroller,
            flash_dismissal,
        }
    }

    /// Toggle the mobile menu's `hidden` class on button clicks.
    pub fn bind_mobile_menu(&self) {
        let (Some(button), Some(menu)) = (
            self.dom.element_by_id(selectors::MOBILE_MENU_BUTTON),
            self.dom.element_by_id(selectors::MOBILE_MENU),
        ) else {
            return;
        };

        let dom = Arc::downgrade(&self.dom);
        self.dom.add_event_listener(
            button,
            DomEvent::Click,
            Arc::new(move || {
                if let Some(dom) = dom.upgrade() {
                    dom.toggle_class(menu, selectors::HIDDEN_CLASS);
                }
            }),
        );
    }

    /// Fade out and remove every flash message present when the delay ends.
    pub fn schedule_flash_dismissal(&self) -> Option<JoinHandle<()>> {
        let dom = Arc::clone(&self.dom);
        let settings = self.settings.clone();
        spawn_detached(async move {
            tokio::time::sleep(settings.flash_dismiss_delay).await;
            let alerts = dom.elements_by_class(selectors::FLASH_CLASS);
            if !alerts.is_empty() {
                tracing::debug!(count = alerts.len(), "Dismissing flash messages");
            }
            fade_out(dom, alerts, settings).await;
        })
    }

    /// Attach the infinite scroller to the feed container, if present.
    pub fn init_job_scroller(self: &Arc<Self>) -> Option<Arc<JobScroller>> {
        let container = self.dom.element_by_id(selectors::JOB_SCROLLER)?;
        Some(JobScroller::attach(self, container))
    }

    /// Ask for notification permission while it is still undecided.
    pub fn request_notification_permission(&self) {
        if self.page.notification_permission() == Some(NotificationPermission::Default) {
            self.page.request_notification_permission();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mode toggle
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch the user's mode and reload on success.
    pub async fn toggle_user_mode(&self) {
        match self.backend.toggle_mode().await {
            Ok(resp) if resp.success => {
                tracing::info!(name: "ui.mode.toggled", mode = ?resp.mode, "User mode toggled");
                self.page.reload();
            }
            Ok(resp) => {
                tracing::warn!(name: "ui.mode.refused", message = ?resp.message, "Mode toggle refused");
            }
            Err(e) => self.reporter.failure("Error toggling mode", &e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Job feed
    // ─────────────────────────────────────────────────────────────────────────

    /// Render `jobs` as cards at the end of `container`.
    pub fn append_jobs(self: &Arc<Self>, container: NodeId, jobs: &[Job]) {
        for job in jobs {
            let card = self.create_job_card(job);
            self.dom.append_child(container, card);
        }
    }

    /// Build a detached job card with its actions bound.
    pub fn create_job_card(self: &Arc<Self>, job: &Job) -> NodeId {
        let card = self.dom.create_element("div");
        self.dom.set_class_name(card, JOB_CARD_CLASS);
        self.dom.set_inner_html(card, &job_card_markup(job));

        let id = job.id;
        self.bind_action(card, "save", move |ctrl| {
            spawn_detached(async move { ctrl.save_job(id).await });
        });
        self.bind_action(card, "apply", move |ctrl| ctrl.apply_job(id));
        self.bind_action(card, "skip", move |ctrl| ctrl.skip_job(id));
        card
    }

    fn bind_action<F>(self: &Arc<Self>, node: NodeId, action: &'static str, f: F)
    where
        F: Fn(Arc<Self>) + Send + Sync + 'static,
    {
        let ctrl: Weak<Self> = Arc::downgrade(self);
        self.dom.add_event_listener(
            node,
            DomEvent::Action(action),
            Arc::new(move || {
                if let Some(ctrl) = ctrl.upgrade() {
                    f(ctrl);
                }
            }),
        );
    }

    /// Save a job; a success toast confirms it.
    pub async fn save_job(&self, job_id: i64) {
        match self.backend.save_job(job_id).await {
            Ok(resp) if resp.success => {
                self.show_notification("Job saved!", Severity::Success);
            }
            Ok(_) => tracing::warn!(name: "ui.job.save_refused", job_id, "Save refused"),
            Err(e) => self.reporter.failure("Error saving job", &e),
        }
    }

    /// Navigate to the job's application page.
    pub fn apply_job(&self, job_id: i64) {
        self.page.navigate(&routes::apply_job(job_id));
    }

    /// Smooth-scroll the feed by one viewport height.
    pub fn skip_job(&self, job_id: i64) {
        let Some(scroller) = self.dom.element_by_id(selectors::JOB_SCROLLER) else {
            return;
        };
        tracing::trace!(job_id, "Skipping job");
        self.dom
            .scroll_by(scroller, self.page.viewport_height(), ScrollBehavior::Smooth);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Enroll in an event; reloads on success, explains refusals in a toast.
    pub async fn enroll_event(&self, event_id: i64) {
        match self.backend.enroll_event(event_id).await {
            Ok(resp) if resp.success => {
                self.show_notification("Successfully enrolled!", Severity::Success);
                self.page.reload();
            }
            Ok(resp) => {
                let message = resp.message.as_deref().unwrap_or("Enrollment failed");
                self.show_notification(message, Severity::Error);
            }
            Err(e) => self.reporter.failure("Error enrolling", &e),
        }
    }

    pub async fn bookmark_event(&self, event_id: i64) {
        match self.backend.bookmark_event(event_id).await {
            Ok(resp) if resp.success => {
                self.show_notification("Event bookmarked!", Severity::Success);
            }
            Ok(_) => tracing::warn!(name: "ui.event.bookmark_refused", event_id, "Bookmark refused"),
            Err(e) => self.reporter.failure("Error bookmarking", &e),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Real-time messaging
    // ─────────────────────────────────────────────────────────────────────────

    /// Start messaging over `connection`.
    ///
    /// `None` means no transport is available: messaging stays disabled and
    /// nothing is reported. Otherwise the returned task dispatches inbound
    /// frames until the stream ends.
    pub fn connect_realtime(self: &Arc<Self>, connection: Option<Connection>) -> Option<JoinHandle<()>> {
        let Some(Connection { channel, mut frames }) = connection else {
            tracing::debug!(name: "ui.realtime.unavailable", "No real-time transport; messaging disabled");
            return None;
        };

        *self.realtime.write().unwrap_or_else(PoisonError::into_inner) = Some(channel);
        tracing::info!(name: "ui.realtime.connected", "Connected to server");
        self.reporter.info("Connected to server");

        let ctrl = Arc::clone(self);
        spawn_detached(async move {
            while let Some(frame) = frames.next().await {
                match Frame::decode(&frame) {
                    Ok(Some(event)) => ctrl.dispatch(event),
                    Ok(None) => tracing::debug!(frame = %frame, "Ignoring unhandled real-time event"),
                    Err(e) => ctrl.reporter.failure("Error decoding real-time frame", &e),
                }
            }
            tracing::debug!(name: "ui.realtime.closed", "Real-time stream ended");
        })
    }

    /// Whether a real-time channel is attached.
    pub fn is_connected(&self) -> bool {
        self.realtime
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Route an inbound event to its handler.
    pub fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::NewMessage(message) => self.handle_new_message(&message),
            InboundEvent::MessageCount(count) => self.update_message_count(count.count),
        }
    }

    /// Append a pushed message to the open conversation and scroll to it.
    pub fn handle_new_message(&self, message: &ChatMessage) {
        if let Some(container) = self.dom.element_by_id(selectors::MESSAGES_CONTAINER) {
            let bubble = self.dom.create_element("div");
            self.dom.set_class_name(bubble, message_class(message));
            self.dom
                .set_inner_html(bubble, &message_markup(message, Utc::now()));
            self.dom.append_child(container, bubble);

            if let Some(metrics) = self.dom.scroll_metrics(container) {
                self.dom.set_scroll_top(container, metrics.scroll_height);
            }
        }

        // The push carries no count; the indicator is refreshed empty.
        self.update_message_count(None);
    }

    /// Show or hide the unread badge.
    pub fn update_message_count(&self, count: Option<i64>) {
        let Some(badge) = self.dom.element_by_id(selectors::MESSAGE_COUNT) else {
            return;
        };
        let state = BadgeState::for_count(count, self.settings.badge_cap);
        if let BadgeState::Visible(label) = &state {
            self.dom.set_text_content(badge, label);
        }
        self.dom.set_style(badge, "display", state.display());
    }

    /// Emit a chat message. Fire-and-forget; a no-op when not connected.
    pub fn send_message(&self, conversation_id: i64, content: &str) {
        let channel = self
            .realtime
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(channel) = channel else {
            return;
        };
        let event = OutboundEvent::SendMessage {
            conversation_id,
            content: content.to_string(),
        };
        if let Err(e) = channel.emit(event) {
            self.reporter.failure("Error sending message", &e);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toasts
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a toast that fades out after the toast lifetime.
    ///
    /// The dismiss control removes it immediately.
    pub fn show_notification(&self, message: &str, severity: Severity) -> NodeId {
        let toast = self.dom.create_element("div");
        self.dom.set_class_name(toast, &ui::toast_class(severity));
        self.dom
            .set_inner_html(toast, &ui::toast_markup(message, severity));

        let dom = Arc::downgrade(&self.dom);
        self.dom.add_event_listener(
            toast,
            DomEvent::Action("dismiss"),
            Arc::new(move || {
                if let Some(dom) = dom.upgrade() {
                    dom.remove(toast);
                }
            }),
        );
        self.dom.append_child(self.dom.body(), toast);

        let dom = Arc::clone(&self.dom);
        let settings = self.settings.clone();
        spawn_detached(async move {
            tokio::time::sleep(settings.toast_lifetime).await;
            fade_out(dom, vec![toast], settings).await;
        });

        tracing::debug!(name: "ui.toast.shown", severity = %severity, "Toast shown");
        toast
    }
}
