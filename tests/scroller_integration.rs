//! Infinite feed paging: one fetch in flight, no rollback on failure.

mod common;

use std::sync::Arc;

use chirec_ui::{
    controller::selectors,
    dom::DomEvent,
    domain::FeedPage,
};
use common::{Fixture, MockBackend, eventually, job};
use tokio::sync::Semaphore;

fn feed(ids: &[i64]) -> FeedPage {
    FeedPage {
        jobs: ids.iter().map(|id| job(*id, &format!("Job {id}"))).collect(),
    }
}

#[tokio::test]
async fn test_only_one_page_in_flight() {
    let gate = Arc::new(Semaphore::new(0));
    let fx = Fixture::new(MockBackend::gated(Arc::clone(&gate)));
    fx.backend.queue_feed(Some(feed(&[21, 22])));
    fx.backend.queue_feed(Some(feed(&[31])));
    let scroller = fx.controller.bootstrap().scroller.unwrap();
    let container = fx.by_id(selectors::JOB_SCROLLER);
    fx.scroll_feed_to(50.0);

    let first = scroller.on_scroll().unwrap();
    assert!(scroller.is_loading());
    assert_eq!(scroller.page(), 2);

    // Scroll events while the request is pending are ignored.
    assert!(scroller.on_scroll().is_none());
    fx.dom.dispatch(container, &DomEvent::Scroll);
    eventually(|| fx.backend.calls().len() == 1).await;
    assert_eq!(fx.backend.calls(), vec!["job_feed(2)"]);

    gate.add_permits(1);
    first.await.unwrap();
    assert!(!scroller.is_loading());
    assert_eq!(fx.dom.children(container).len(), 2);

    gate.add_permits(1);
    scroller.on_scroll().unwrap().await.unwrap();
    assert_eq!(fx.backend.calls(), vec!["job_feed(2)", "job_feed(3)"]);
    assert_eq!(fx.dom.children(container).len(), 3);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let fx = Fixture::new(MockBackend::new());
    fx.backend.queue_feed(None);
    fx.backend.queue_feed(Some(feed(&[41])));
    let scroller = fx.controller.bootstrap().scroller.unwrap();
    let container = fx.by_id(selectors::JOB_SCROLLER);
    fx.scroll_feed_to(0.0);

    scroller.on_scroll().unwrap().await.unwrap();
    assert!(!scroller.is_loading());
    assert_eq!(scroller.page(), 2);
    assert!(fx.reporter.failures()[0].starts_with("Error loading jobs: "));
    assert!(fx.dom.children(container).is_empty());

    scroller.on_scroll().unwrap().await.unwrap();
    assert_eq!(fx.backend.calls(), vec!["job_feed(2)", "job_feed(3)"]);
    assert_eq!(fx.dom.children(container).len(), 1);
}

#[tokio::test]
async fn test_far_from_bottom_does_not_load() {
    let fx = Fixture::new(MockBackend::new());
    let scroller = fx.controller.bootstrap().scroller.unwrap();

    fx.scroll_feed_to(101.0);
    assert!(scroller.on_scroll().is_none());
    assert_eq!(scroller.page(), 1);

    // Exactly at the threshold counts as near the bottom.
    fx.scroll_feed_to(100.0);
    assert!(scroller.on_scroll().is_some());
}

#[tokio::test]
async fn test_empty_page_appends_nothing() {
    let fx = Fixture::new(MockBackend::new());
    fx.backend.queue_feed(Some(FeedPage::default()));
    let scroller = fx.controller.bootstrap().scroller.unwrap();
    fx.scroll_feed_to(10.0);

    scroller.on_scroll().unwrap().await.unwrap();
    assert!(fx.dom.children(scroller.container()).is_empty());
    assert!(fx.reporter.failures().is_empty());
}

#[tokio::test]
async fn test_scroll_event_drives_loading() {
    let fx = Fixture::new(MockBackend::new());
    fx.backend.queue_feed(Some(feed(&[51])));
    let scroller = fx.controller.bootstrap().scroller.unwrap();
    fx.scroll_feed_to(20.0);

    assert_eq!(fx.dom.dispatch(scroller.container(), &DomEvent::Scroll), 1);
    eventually(|| fx.dom.children(scroller.container()).len() == 1).await;
    eventually(|| !scroller.is_loading()).await;

    // Appended cards carry their own bindings.
    let card = fx.dom.children(scroller.container())[0];
    fx.dom.dispatch(card, &DomEvent::Action("apply"));
    assert_eq!(fx.page.location(), "/jobs/51/apply");
}

#[test]
fn test_scroll_without_runtime_is_ignored() {
    let fx = Fixture::new(MockBackend::new());
    let scroller = fx.controller.init_job_scroller().unwrap();
    fx.scroll_feed_to(0.0);

    assert!(scroller.on_scroll().is_none());
    assert!(!scroller.is_loading());
    assert_eq!(scroller.page(), 1);
}
