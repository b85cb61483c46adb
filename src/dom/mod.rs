//! Document seam.
//!
//! The controller never touches a concrete document. It talks to a [`Dom`],
//! which a browser binding or the headless [`MemoryDom`] implements.
//!
//! # Events
//!
//! Listeners are plain closures registered per node and [`DomEvent`].
//! [`DomEvent::Action`] stands for a click on a descendant control carrying
//! `data-action="<name>"`; renderers emit those attributes instead of inline
//! handlers, and the controller binds the names when it inserts the fragment.

mod memory;

use std::fmt;
use std::sync::Arc;

pub use memory::MemoryDom;

/// Handle to a node owned by a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Scroll geometry of a scrollable element, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Bottom edge of the viewport, `scrollTop + clientHeight`.
    #[must_use]
    pub fn viewport_bottom(&self) -> f64 {
        self.scroll_top + self.client_height
    }

    /// Whether the viewport bottom is within `threshold` pixels of the end.
    #[must_use]
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.viewport_bottom() >= self.scroll_height - threshold
    }

    /// Largest valid `scrollTop`.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// How a programmatic scroll is animated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// Event a listener can be registered for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomEvent {
    Click,
    Scroll,
    /// Click on a descendant with `data-action="<name>"`.
    Action(&'static str),
}

/// Event listener callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Operations the controller performs on the document.
///
/// Every method tolerates stale handles: operating on a node that was
/// removed is a no-op rather than an error.
pub trait Dom: Send + Sync {
    /// The `<body>` element.
    fn body(&self) -> NodeId;

    /// Look up a connected element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All connected elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> NodeId;

    /// Replace the class list.
    fn set_class_name(&self, node: NodeId, class_name: &str);

    /// Add `class` if absent, remove it if present.
    fn toggle_class(&self, node: NodeId, class: &str);

    /// Replace the node's content with parsed markup.
    fn set_inner_html(&self, node: NodeId, html: &str);

    /// Replace the node's content with literal text.
    fn set_text_content(&self, node: NodeId, text: &str);

    /// Set an inline style property.
    fn set_style(&self, node: NodeId, property: &str, value: &str);

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId);

    /// Detach the node from the document.
    fn remove(&self, node: NodeId);

    /// Scroll geometry, or `None` for an unknown node.
    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics>;

    /// Set `scrollTop`, clamped to the scrollable range.
    fn set_scroll_top(&self, node: NodeId, top: f64);

    /// Scroll vertically by `delta` pixels.
    fn scroll_by(&self, node: NodeId, delta: f64, behavior: ScrollBehavior);

    /// Register `listener` for `event` on `node`.
    fn add_event_listener(&self, node: NodeId, event: DomEvent, listener: Listener);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_bottom() {
        let metrics = ScrollMetrics {
            scroll_top: 850.0,
            client_height: 100.0,
            scroll_height: 1000.0,
        };
        assert!(metrics.near_bottom(100.0));
        assert!(!metrics.near_bottom(40.0));
        assert!((metrics.max_scroll_top() - 900.0).abs() < f64::EPSILON);
    }
}
