//! Infinite scrolling for the job feed.
//!
//! A [`JobScroller`] owns the feed's page cursor and loading flag. Exactly one
//! exists per feed container; its scroll listener holds the only strong
//! reference besides the [`Bootstrap`](crate::controller::Bootstrap) handle.
//!
//! A failed page is skipped, not retried: the cursor keeps its incremented
//! value. Responses are appended in arrival order with no request-id check,
//! so a slow page can land after a later one.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::controller::UiController;
use crate::dom::{DomEvent, NodeId};

/// First page, already rendered by the server.
const FIRST_PAGE: u32 = 1;

/// Page cursor and re-entrancy guard for one feed container.
pub struct JobScroller {
    container: NodeId,
    threshold: f64,
    loading: AtomicBool,
    page: AtomicU32,
    controller: Weak<UiController>,
}

impl fmt::Debug for JobScroller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobScroller")
            .field("container", &self.container)
            .field("page", &self.page())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

impl JobScroller {
    /// Create the scroller for `container` and register its scroll listener.
    pub fn attach(controller: &Arc<UiController>, container: NodeId) -> Arc<Self> {
        let scroller = Arc::new(Self {
            container,
            threshold: controller.settings().scroll_threshold_px,
            loading: AtomicBool::new(false),
            page: AtomicU32::new(FIRST_PAGE),
            controller: Arc::downgrade(controller),
        });

        let listener = Arc::clone(&scroller);
        controller.dom().add_event_listener(
            container,
            DomEvent::Scroll,
            Arc::new(move || {
                listener.on_scroll();
            }),
        );
        tracing::debug!(name: "ui.feed.attached", container = %container, "Job scroller attached");
        scroller
    }

    /// Feed container this scroller watches.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Last page requested.
    pub fn page(&self) -> u32 {
        self.page.load(Ordering::Acquire)
    }

    /// Whether a page fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// React to a scroll of the container.
    ///
    /// Starts a fetch for the next page when the viewport is within the
    /// threshold of the bottom and no fetch is in flight. Returns the fetch
    /// task, or `None` when the event was ignored.
    pub fn on_scroll(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if self.is_loading() {
            return None;
        }
        let controller = self.controller.upgrade()?;
        let metrics = controller.dom().scroll_metrics(self.container)?;
        if !metrics.near_bottom(self.threshold) {
            return None;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(name: "ui.runtime.missing", "No async runtime; feed page not loaded");
            return None;
        };
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }

        let page = self.page.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(name: "ui.feed.load", page, "Loading next feed page");
        Some(runtime.spawn(Arc::clone(self).load_more(controller, page)))
    }

    async fn load_more(self: Arc<Self>, controller: Arc<UiController>, page: u32) {
        match controller.backend().job_feed(page).await {
            Ok(feed) => {
                if !feed.jobs.is_empty() {
                    controller.append_jobs(self.container, &feed.jobs);
                }
                tracing::debug!(page, jobs = feed.jobs.len(), "Feed page loaded");
            }
            Err(e) => controller.reporter().failure("Error loading jobs", &e),
        }
        self.loading.store(false, Ordering::Release);
    }
}
