//! In-memory document model
//!
//! A small arena-backed element tree standing in for the server-rendered
//! page. Removed elements stay in the arena (handles never dangle) but are
//! detached from the tree, so `is_connected` reports false for them and
//! queries skip them.

use std::collections::BTreeMap;

use crate::error::{UiError, UiResult};

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A single element with the state the page glue reads and writes
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            ..Self::default()
        }
    }

    // ---- builders ----

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add one or more space separated classes
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    // ---- accessors ----

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space separated class list
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// `data-*` attribute lookup, e.g. `data("modal")` reads `data-modal`
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&format!("data-{}", key))
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ---- mutators ----

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Replace the whole class list
    pub fn set_class_name(&mut self, classes: &str) {
        self.classes.clear();
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        if name == "id" {
            self.id = Some(value.to_string());
        }
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn set_data(&mut self, key: &str, value: &str) {
        self.set_attr(&format!("data-{}", key), value);
    }

    pub fn remove_data(&mut self, key: &str) {
        self.remove_attr(&format!("data-{}", key));
    }

    /// Set an inline style; an empty value clears it
    pub fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.style.remove(property);
        } else {
            self.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// Element tree rooted at `<body>`
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId(0),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of elements ever created, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element
    pub fn create(&mut self, mut element: Element) -> NodeId {
        element.parent = None;
        element.children.clear();
        self.nodes.push(element);
        NodeId(self.nodes.len() - 1)
    }

    /// Create an element and append it to `parent`
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let node = self.create(element);
        // Both handles come from this arena, so attaching cannot fail.
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(node);
            self.nodes[node.0].parent = Some(parent);
        }
        node
    }

    /// Move `child` (and its subtree) to the end of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> UiResult<()> {
        self.element(parent)?;
        self.element(child)?;
        if self.path_to_root(parent).contains(&child) {
            return Err(UiError::InvalidTree {
                message: format!("{} cannot be appended inside itself", child),
            });
        }
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Detach an element from its parent. Returns false if it was already detached.
    pub fn remove(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.nodes.get(node.0).and_then(|e| e.parent) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].parent = None;
        true
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    pub fn element(&self, node: NodeId) -> UiResult<&Element> {
        self.nodes.get(node.0).ok_or(UiError::StaleNode { node })
    }

    pub fn element_mut(&mut self, node: NodeId) -> UiResult<&mut Element> {
        self.nodes.get_mut(node.0).ok_or(UiError::StaleNode { node })
    }

    /// True when the element is reachable from `<body>`
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.path_to_root(node).last() == Some(&self.body)
    }

    /// The element followed by its ancestors, innermost first
    pub fn path_to_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(node).map(|_| node);
        while let Some(id) = current {
            path.push(id);
            current = self.nodes[id.0].parent;
        }
        path
    }

    /// Descendants of `root` in document order, excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(element) = self.get(root) else {
            return out;
        };
        let mut stack: Vec<NodeId> = element.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Connected elements matching `pred`, in document order
    pub fn query<F>(&self, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.query_within(self.body, pred)
    }

    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.query(|e| e.has_class(class))
    }

    pub fn query_within<F>(&self, root: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .filter(|id| pred(&self.nodes[id.0]))
            .collect()
    }

    pub fn find_within<F>(&self, root: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .find(|id| pred(&self.nodes[id.0]))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(|e| e.id() == Some(id)).into_iter().next()
    }

    /// Nearest element (itself included) matching `pred` on the way to the root
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.path_to_root(node)
            .into_iter()
            .find(|id| pred(&self.nodes[id.0]))
    }

    /// Text of the element and every descendant, concatenated in order
    pub fn text_content(&self, node: NodeId) -> String {
        let Some(element) = self.get(node) else {
            return String::new();
        };
        let mut text = element.text.clone();
        for id in self.descendants(node) {
            text.push_str(&self.nodes[id.0].text);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let row = doc.append(doc.body(), Element::new("div").with_class("member-row"));
        let checkbox = doc.append(row, Element::new("input").with_class("member-checkbox").with_checked(true));
        let amount = doc.append(row, Element::new("span").with_class("split-amount").with_text("₹0.00"));
        (doc, row, checkbox, amount)
    }

    #[test]
    fn test_class_list_is_a_set() {
        let mut element = Element::new("DIV").with_class("modal-overlay active");
        element.add_class("active");
        assert_eq!(element.tag(), "div");
        assert_eq!(element.class_name(), "modal-overlay active");
        element.remove_class("active");
        assert!(!element.has_class("active"));
        element.set_class_name("text-success");
        assert_eq!(element.classes().to_vec(), vec!["text-success".to_string()]);
    }

    #[test]
    fn test_data_attributes_and_style() {
        let mut element = Element::new("button").with_attr("data-modal", "addExpense");
        assert_eq!(element.data("modal"), Some("addExpense"));
        element.set_data("original-text", "Save");
        assert_eq!(element.attr("data-original-text"), Some("Save"));
        element.remove_data("original-text");
        assert!(element.data("original-text").is_none());

        element.set_style("opacity", "0");
        assert_eq!(element.style("opacity"), Some("0"));
        element.set_style("opacity", "");
        assert!(element.style("opacity").is_none());
    }

    #[test]
    fn test_queries_follow_document_order() {
        let (mut doc, row, checkbox, amount) = sample();
        let second = doc.append(doc.body(), Element::new("span").with_class("split-amount"));
        assert_eq!(doc.query_class("split-amount"), vec![amount, second]);
        assert_eq!(doc.find_within(row, |e| e.has_class("member-checkbox")), Some(checkbox));
        assert_eq!(doc.closest(amount, |e| e.has_class("member-row")), Some(row));
        assert_eq!(doc.closest(row, |e| e.has_class("member-row")), Some(row));
    }

    #[test]
    fn test_removed_elements_are_skipped() {
        let (mut doc, row, _checkbox, amount) = sample();
        assert!(doc.is_connected(amount));
        assert!(doc.remove(row));
        assert!(!doc.remove(row));
        assert!(!doc.is_connected(amount));
        assert!(doc.query_class("split-amount").is_empty());
        assert!(doc.get(amount).is_some());
    }

    #[test]
    fn test_get_element_by_id_only_sees_connected() {
        let mut doc = Document::new();
        let detached = doc.create(Element::new("div").with_id("toast"));
        assert!(doc.get_element_by_id("toast").is_none());
        doc.append_child(doc.body(), detached).unwrap();
        assert_eq!(doc.get_element_by_id("toast"), Some(detached));
    }

    #[test]
    fn test_append_child_rejects_cycles() {
        let (mut doc, row, checkbox, _) = sample();
        assert!(doc.append_child(checkbox, row).is_err());
    }

    #[test]
    fn test_text_content() {
        let mut doc = Document::new();
        let alert = doc.append(doc.body(), Element::new("div").with_class("alert").with_text("  Expense "));
        doc.append(alert, Element::new("strong").with_text("saved  "));
        assert_eq!(doc.text_content(alert).trim(), "Expense saved");
    }
}
