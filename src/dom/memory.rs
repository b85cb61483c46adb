//! Headless in-memory document.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Dom, DomEvent, Listener, NodeId, ScrollBehavior, ScrollMetrics};
use crate::ui::escape_html;

const BODY: NodeId = NodeId(0);

struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    inner_html: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    scroll: ScrollMetrics,
    listeners: Vec<(DomEvent, Listener)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            style: BTreeMap::new(),
            inner_html: String::new(),
            children: Vec::new(),
            parent: None,
            scroll: ScrollMetrics::default(),
            listeners: Vec::new(),
        }
    }
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn is_connected(&self, mut id: NodeId) -> bool {
        loop {
            if id == BODY {
                return true;
            }
            match self.node(id).and_then(|n| n.parent) {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|c| *c != id);
        }
    }

    /// Connected nodes in document order.
    fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![BODY];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn render(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let _ = write!(out, "<{}", node.tag);
        if let Some(node_id) = &node.id {
            let _ = write!(out, r#" id="{}""#, escape_html(node_id));
        }
        if !node.classes.is_empty() {
            let _ = write!(out, r#" class="{}""#, escape_html(&node.classes.join(" ")));
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            let _ = write!(out, r#" style="{}""#, escape_html(&style.join("; ")));
        }
        out.push('>');
        out.push_str(&node.inner_html);
        for child in &node.children {
            self.render(*child, out);
        }
        let _ = write!(out, "</{}>", node.tag);
    }
}

/// In-memory [`Dom`] used by the headless harness and by tests.
///
/// Nodes live in an arena and are never freed; removing a node only detaches
/// it, so stale handles stay valid and inspectable. Every toast, bubble and
/// card ever created keeps its slot and its listeners until the document is
/// dropped, so memory grows with the page's activity. Suited to tests and
/// single-command harness runs, not to long-lived pages.
///
/// # Example
///
/// ```rust
/// use chirec_ui::dom::{Dom, MemoryDom};
///
/// let dom = MemoryDom::new();
/// let menu = dom.insert(dom.body(), "div", Some("mobile-menu"), "hidden");
/// dom.toggle_class(menu, "hidden");
/// assert!(!dom.has_class(menu, "hidden"));
/// ```
pub struct MemoryDom {
    tree: Mutex<Tree>,
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDom")
            .field("nodes", &self.node_count())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create a document holding only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Tree::default();
        tree.nodes.push(Node::new("body"));
        Self {
            tree: Mutex::new(tree),
        }
    }

    /// Create a document with every element the controller binds to:
    /// the mobile menu pair, the messages container, the unread badge and
    /// the job feed container.
    #[must_use]
    pub fn page_skeleton() -> Self {
        let dom = Self::new();
        let body = dom.body();
        dom.insert(body, "button", Some("mobile-menu-btn"), "md:hidden");
        dom.insert(body, "nav", Some("mobile-menu"), "hidden");
        dom.insert(body, "span", Some("message-count"), "badge");
        dom.insert(body, "div", Some("messages-container"), "overflow-y-auto");
        dom.insert(body, "div", Some("job-scroller"), "snap-y overflow-y-scroll");
        dom
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an element and append it to `parent`.
    pub fn insert(&self, parent: NodeId, tag: &str, id: Option<&str>, class_name: &str) -> NodeId {
        let node = self.create_element(tag);
        if let Some(node_id) = id {
            if let Some(n) = self.tree().node_mut(node) {
                n.id = Some(node_id.to_string());
            }
        }
        self.set_class_name(node, class_name);
        self.append_child(parent, node);
        node
    }

    /// Invoke every listener registered for `event` on `node`.
    ///
    /// Returns how many listeners ran. Listeners run outside the document
    /// lock, so they may mutate the document freely.
    pub fn dispatch(&self, node: NodeId, event: &DomEvent) -> usize {
        let listeners: Vec<Listener> = self
            .tree()
            .node(node)
            .map(|n| {
                n.listeners
                    .iter()
                    .filter(|(e, _)| e == event)
                    .map(|(_, l)| Arc::clone(l))
                    .collect()
            })
            .unwrap_or_default();
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    /// Replace the scroll geometry of `node`.
    pub fn set_scroll_metrics(&self, node: NodeId, metrics: ScrollMetrics) {
        if let Some(n) = self.tree().node_mut(node) {
            n.scroll = metrics;
        }
    }

    /// Number of nodes ever created, detached ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tree().nodes.len()
    }

    /// Whether `node` is attached under `<body>`.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree().is_connected(node)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().node(node).map(|n| n.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        self.tree().node(node).map(|n| n.inner_html.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn class_name(&self, node: NodeId) -> String {
        self.tree().node(node).map(|n| n.classes.join(" ")).unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree()
            .node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Inline style property, if set.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree().node(node).and_then(|n| n.style.get(property).cloned())
    }

    /// Number of listeners registered on `node` for `event`.
    #[must_use]
    pub fn listener_count(&self, node: NodeId, event: &DomEvent) -> usize {
        self.tree()
            .node(node)
            .map_or(0, |n| n.listeners.iter().filter(|(e, _)| e == event).count())
    }

    /// Serialize `node` and its subtree as HTML.
    #[must_use]
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.tree().render(node, &mut out);
        out
    }
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        BODY
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree();
        tree.walk()
            .into_iter()
            .find(|n| tree.node(*n).and_then(|n| n.id.as_deref()) == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        let tree = self.tree();
        tree.walk()
            .into_iter()
            .filter(|n| {
                tree.node(*n)
                    .is_some_and(|n| n.classes.iter().any(|c| c == class))
            })
            .collect()
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut tree = self.tree();
        tree.nodes.push(Node::new(tag));
        NodeId(tree.nodes.len() - 1)
    }

    fn set_class_name(&self, node: NodeId, class_name: &str) {
        if let Some(n) = self.tree().node_mut(node) {
            n.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn toggle_class(&self, node: NodeId, class: &str) {
        if let Some(n) = self.tree().node_mut(node) {
            if let Some(pos) = n.classes.iter().position(|c| c == class) {
                n.classes.remove(pos);
            } else {
                n.classes.push(class.to_string());
            }
        }
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        let mut tree = self.tree();
        let children = tree.node(node).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            tree.detach(child);
        }
        if let Some(n) = tree.node_mut(node) {
            n.inner_html = html.to_string();
        }
    }

    fn set_text_content(&self, node: NodeId, text: &str) {
        self.set_inner_html(node, &escape_html(text));
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.tree().node_mut(node) {
            n.style.insert(property.to_string(), value.to_string());
        }
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut tree = self.tree();
        if parent == child || tree.node(parent).is_none() || tree.node(child).is_none() {
            return;
        }
        tree.detach(child);
        if let Some(c) = tree.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = tree.node_mut(parent) {
            p.children.push(child);
        }
    }

    fn remove(&self, node: NodeId) {
        if node != BODY {
            self.tree().detach(node);
        }
    }

    fn scroll_metrics(&self, node: NodeId) -> Option<ScrollMetrics> {
        self.tree().node(node).map(|n| n.scroll)
    }

    fn set_scroll_top(&self, node: NodeId, top: f64) {
        if let Some(n) = self.tree().node_mut(node) {
            n.scroll.scroll_top = top.clamp(0.0, n.scroll.max_scroll_top());
        }
    }

    fn scroll_by(&self, node: NodeId, delta: f64, _behavior: ScrollBehavior) {
        if let Some(n) = self.tree().node_mut(node) {
            let top = n.scroll.scroll_top + delta;
            n.scroll.scroll_top = top.clamp(0.0, n.scroll.max_scroll_top());
        }
    }

    fn add_event_listener(&self, node: NodeId, event: DomEvent, listener: Listener) {
        if let Some(n) = self.tree().node_mut(node) {
            n.listeners.push((event, listener));
        }
    }
}
