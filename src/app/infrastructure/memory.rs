//! In-memory page used by tests and headless hosts.
//!
//! Elements are registered up front together with the selectors they answer
//! to; there is no CSS selector engine. `query("#theme-toggle")` returns the
//! first live element that was registered with exactly that selector string.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use super::dom::Dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryElement(pub usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    selectors: Vec<String>,
    parent: Option<usize>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    top: f64,
    height: f64,
    attached: bool,
}

#[derive(Debug)]
pub struct MemoryDocument {
    nodes: RefCell<Vec<Node>>,
    body: MemoryElement,
    scroll_y: Cell<f64>,
    viewport: Cell<(f64, f64)>,
    scroll_requests: RefCell<Vec<f64>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty page with a `<body>` and a 1280x800 viewport.
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            selectors: vec!["body".to_string()],
            attached: true,
            ..Default::default()
        };
        Self {
            nodes: RefCell::new(vec![body]),
            body: MemoryElement(0),
            scroll_y: Cell::new(0.0),
            viewport: Cell::new((1280.0, 800.0)),
            scroll_requests: RefCell::new(Vec::new()),
        }
    }

    /// Register a new element under `<body>`.
    pub fn insert(&self, tag: &str, selectors: &[&str]) -> MemoryElement {
        self.insert_child(self.body, tag, selectors)
    }

    pub fn insert_child(&self, parent: MemoryElement, tag: &str, selectors: &[&str]) -> MemoryElement {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_string(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent: Some(parent.0),
            attached: true,
            ..Default::default()
        });
        MemoryElement(nodes.len() - 1)
    }

    pub fn set_geometry(&self, element: MemoryElement, top: f64, height: f64) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(element.0) {
            node.top = top;
            node.height = height;
        }
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn set_viewport(&self, width: f64, height: f64) {
        self.viewport.set((width, height));
    }

    pub fn style(&self, element: MemoryElement, property: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(element.0)
            .and_then(|n| n.styles.get(property).cloned())
    }

    pub fn text(&self, element: MemoryElement) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    pub fn class_name(&self, element: MemoryElement) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|n| n.classes.iter().cloned().collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    pub fn tag(&self, element: MemoryElement) -> String {
        self.nodes
            .borrow()
            .get(element.0)
            .map(|n| n.tag.clone())
            .unwrap_or_default()
    }

    pub fn is_attached(&self, element: MemoryElement) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|n| n.attached)
    }

    /// Attached direct children of `<body>`.
    pub fn body_children(&self) -> Vec<MemoryElement> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.attached && n.parent == Some(self.body.0))
            .map(|(i, _)| MemoryElement(i))
            .collect()
    }

    /// Every `scroll_to` request in the order it was made.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    fn with_node<R>(&self, element: &MemoryElement, f: impl FnOnce(&mut Node) -> R) -> Option<R> {
        self.nodes.borrow_mut().get_mut(element.0).map(f)
    }

    fn live(&self, index: usize) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(index);
        while let Some(i) = current {
            match nodes.get(i) {
                Some(node) if node.attached => current = node.parent,
                _ => return false,
            }
        }
        true
    }
}

impl Dom for MemoryDocument {
    type Element = MemoryElement;

    fn query(&self, selector: &str) -> Option<MemoryElement> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        let matching: Vec<usize> = self
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.selectors.iter().any(|s| s == selector))
            .map(|(i, _)| i)
            .collect();
        matching
            .into_iter()
            .filter(|&i| self.live(i))
            .map(MemoryElement)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryElement> {
        let found = self
            .nodes
            .borrow()
            .iter()
            .position(|n| n.attributes.get("id").map(String::as_str) == Some(id));
        found.filter(|&i| self.live(i)).map(MemoryElement)
    }

    fn body(&self) -> Option<MemoryElement> {
        Some(self.body)
    }

    fn add_class(&self, element: &MemoryElement, class: &str) {
        self.with_node(element, |n| n.classes.insert(class.to_string()));
    }

    fn remove_class(&self, element: &MemoryElement, class: &str) {
        self.with_node(element, |n| n.classes.remove(class));
    }

    fn has_class(&self, element: &MemoryElement, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(element.0)
            .is_some_and(|n| n.classes.contains(class))
    }

    fn set_class_name(&self, element: &MemoryElement, value: &str) {
        self.with_node(element, |n| {
            n.classes = value.split_whitespace().map(str::to_string).collect();
        });
    }

    fn attribute(&self, element: &MemoryElement, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(element.0)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, element: &MemoryElement, name: &str, value: &str) {
        self.with_node(element, |n| {
            n.attributes.insert(name.to_string(), value.to_string())
        });
    }

    fn remove_attribute(&self, element: &MemoryElement, name: &str) {
        self.with_node(element, |n| n.attributes.remove(name));
    }

    fn set_style(&self, element: &MemoryElement, property: &str, value: &str) {
        self.with_node(element, |n| {
            n.styles.insert(property.to_string(), value.to_string())
        });
    }

    fn set_text(&self, element: &MemoryElement, text: &str) {
        self.with_node(element, |n| n.text = text.to_string());
    }

    fn contains(&self, ancestor: &MemoryElement, target: &MemoryElement) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(target.0);
        while let Some(i) = current {
            if i == ancestor.0 {
                return true;
            }
            current = nodes.get(i).and_then(|n| n.parent);
        }
        false
    }

    fn offset_top(&self, element: &MemoryElement) -> f64 {
        self.nodes.borrow().get(element.0).map_or(0.0, |n| n.top)
    }

    fn offset_height(&self, element: &MemoryElement) -> f64 {
        self.nodes.borrow().get(element.0).map_or(0.0, |n| n.height)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport.get().0
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.get().1
    }

    fn scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
        self.scroll_y.set(top.max(0.0));
    }

    fn create_element(&self, tag: &str) -> Option<MemoryElement> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_string(),
            ..Default::default()
        });
        Some(MemoryElement(nodes.len() - 1))
    }

    fn append_to_body(&self, element: &MemoryElement) {
        let body = self.body.0;
        self.with_node(element, |n| {
            n.parent = Some(body);
            n.attached = true;
        });
    }

    fn remove(&self, element: &MemoryElement) {
        self.with_node(element, |n| n.attached = false);
    }
}
