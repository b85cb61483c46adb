#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chirec_ui::{
    Error, Result, UiController,
    api::{ActionResponse, Backend},
    config::UiSettings,
    dom::{Dom, MemoryDom, NodeId, ScrollMetrics},
    domain::{FeedPage, Job},
    page::{MemoryPage, Page},
    telemetry::{RecordingReporter, Reporter},
};
use tokio::sync::Semaphore;

/// Error standing in for a dropped connection or an HTML error page.
pub fn transport_error() -> Error {
    Error::Json(serde_json::from_str::<serde_json::Value>("<html>502</html>").unwrap_err())
}

pub fn job(id: i64, title: &str) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: "Acme".to_string(),
        description: "Build things".to_string(),
        skills: vec!["Rust".to_string()],
    }
}

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(ActionResponse),
    Fail,
}

/// Scripted [`Backend`] recording every call.
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<String>>,
    replies: Mutex<HashMap<&'static str, Reply>>,
    feed: Mutex<VecDeque<Option<FeedPage>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed requests wait for a permit on `gate` before answering.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(self, endpoint: &'static str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(endpoint, reply);
        self
    }

    /// Queue the next feed answer; `None` fails the request.
    pub fn queue_feed(&self, page: Option<FeedPage>) {
        self.feed.lock().unwrap().push_back(page);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn action(&self, endpoint: &'static str, call: String) -> Result<ActionResponse> {
        self.calls.lock().unwrap().push(call);
        match self.replies.lock().unwrap().get(endpoint).cloned() {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Fail) => Err(transport_error()),
            None => Ok(ActionResponse::ok()),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn toggle_mode(&self) -> Result<ActionResponse> {
        self.action("toggle_mode", "toggle_mode".to_string())
    }

    async fn job_feed(&self, page: u32) -> Result<FeedPage> {
        self.calls.lock().unwrap().push(format!("job_feed({page})"));
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let next = self.feed.lock().unwrap().pop_front();
        match next {
            Some(Some(page)) => Ok(page),
            Some(None) => Err(transport_error()),
            None => Ok(FeedPage::default()),
        }
    }

    async fn save_job(&self, job_id: i64) -> Result<ActionResponse> {
        self.action("save_job", format!("save_job({job_id})"))
    }

    async fn enroll_event(&self, event_id: i64) -> Result<ActionResponse> {
        self.action("enroll_event", format!("enroll_event({event_id})"))
    }

    async fn bookmark_event(&self, event_id: i64) -> Result<ActionResponse> {
        self.action("bookmark_event", format!("bookmark_event({event_id})"))
    }
}

/// A controller over a page skeleton with every collaborator inspectable.
pub struct Fixture {
    pub dom: Arc<MemoryDom>,
    pub page: Arc<MemoryPage>,
    pub backend: Arc<MockBackend>,
    pub reporter: Arc<RecordingReporter>,
    pub controller: Arc<UiController>,
}

impl Fixture {
    pub fn new(backend: MockBackend) -> Self {
        Self::with(MemoryDom::page_skeleton(), MemoryPage::new(600.0), backend)
    }

    pub fn with(dom: MemoryDom, page: MemoryPage, backend: MockBackend) -> Self {
        let dom = Arc::new(dom);
        let page = Arc::new(page);
        let backend = Arc::new(backend);
        let reporter = Arc::new(RecordingReporter::new());
        let controller = UiController::builder(
            Arc::clone(&dom) as Arc<dyn Dom>,
            Arc::clone(&page) as Arc<dyn Page>,
            Arc::clone(&backend) as Arc<dyn Backend>,
        )
        .reporter(Arc::clone(&reporter) as Arc<dyn Reporter>)
        .settings(UiSettings::default())
        .build();

        Self {
            dom,
            page,
            backend,
            reporter,
            controller,
        }
    }

    pub fn by_id(&self, id: &str) -> NodeId {
        self.dom.element_by_id(id).unwrap()
    }

    /// Toasts currently attached to the body.
    pub fn toasts(&self) -> Vec<NodeId> {
        self.dom
            .children(self.dom.body())
            .into_iter()
            .filter(|n| self.dom.has_class(*n, "alert"))
            .collect()
    }

    /// Place the feed viewport `distance` pixels above the bottom.
    pub fn scroll_feed_to(&self, distance: f64) {
        let feed = self.by_id("job-scroller");
        self.dom.set_scroll_metrics(
            feed,
            ScrollMetrics {
                scroll_top: 2000.0 - 600.0 - distance,
                client_height: 600.0,
                scroll_height: 2000.0,
            },
        );
    }
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Yield until `check` holds; spawned tasks get to run in between.
pub async fn eventually(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
