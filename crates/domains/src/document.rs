//! # Document Tree
//!
//! An in-memory stand-in for the browser DOM: an arena of elements with
//! tags, classes, attributes, inline styles and text. Handlers look nodes
//! up the way browser code does (`getElementById`, `closest`, descendant
//! queries) and mutate them in place. There is no diffing and no batching;
//! a patch is a direct write.

use std::collections::BTreeMap;

/// Opaque handle to a node in a [`Document`]. Stale handles (nodes removed
/// from the tree) are ignored by mutators and yield `None` from accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One element: tag plus the display-relevant state the handlers touch.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    // Builder-style constructors, used by the fragment builders.

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, prop: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(prop.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    // Accessors.

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style_value(&self, prop: &str) -> Option<&str> {
        self.style.get(prop).map(String::as_str)
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Numeric id carried in a `data-*` attribute, e.g. `data-post-id`.
    pub fn data_id(&self, name: &str) -> Option<i64> {
        self.attribute(name)?.trim().parse().ok()
    }
}

#[derive(Debug)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The page. Owns every live element; the root is a `<body>` created by
/// [`Document::new`].
#[derive(Debug)]
pub struct Document {
    slots: Vec<Option<Slot>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Slot {
            element: Element::new("body"),
            parent: None,
            children: Vec::new(),
        };
        Self {
            slots: vec![Some(root)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates `element` as the last child of `parent` and returns its
    /// handle. Appending under a stale parent attaches nothing and returns
    /// the (equally stale) fresh handle.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(Slot {
            element,
            parent: Some(parent),
            children: Vec::new(),
        }));
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.push(id);
        } else {
            self.slots[id.0] = None;
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.slots.get(id.0)?.as_ref().map(|slot| &slot.element)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0)?.as_ref()?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    /// Live node count, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        false // the root is always present
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// First element in tree order carrying the given `id` attribute.
    pub fn by_dom_id(&self, dom_id: &str) -> Option<NodeId> {
        self.first_match(|el| el.dom_id() == Some(dom_id))
    }

    /// First element in tree order (depth-first, document order) matching
    /// the predicate. The root participates.
    pub fn first_match(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.search_from(self.root, true, &pred)
    }

    /// Nearest ancestor-or-self matching the predicate.
    pub fn closest(&self, from: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let element = self.get(id)?;
            if pred(element) {
                return Some(id);
            }
            cursor = self.parent(id);
        }
        None
    }

    /// First strict descendant of `from` matching the predicate.
    pub fn descendant(&self, from: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.search_from(from, false, &pred)
    }

    fn search_from(
        &self,
        from: NodeId,
        include_self: bool,
        pred: &impl Fn(&Element) -> bool,
    ) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = if include_self {
            vec![from]
        } else {
            let mut seed: Vec<NodeId> = self.children(from).to_vec();
            seed.reverse();
            seed
        };
        while let Some(id) = stack.pop() {
            if let Some(element) = self.get(id) {
                if pred(element) {
                    return Some(id);
                }
            }
            let children = self.children(id);
            for &child in children.iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    // ── Mutations ────────────────────────────────────────────────────────

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.element.text = Some(text.into());
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.element.attrs.insert(name.into(), value.into());
        }
    }

    pub fn set_style(&mut self, id: NodeId, prop: impl Into<String>, value: impl Into<String>) {
        if let Some(slot) = self.slot_mut(id) {
            slot.element.style.insert(prop.into(), value.into());
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(slot) = self.slot_mut(id) {
            if !slot.element.has_class(class) {
                slot.element.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(slot) = self.slot_mut(id) {
            slot.element.classes.retain(|c| c != class);
        }
    }

    /// `classList.toggle(class, force)`: present iff `force`.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: bool) {
        if force {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Drops every child subtree, the `innerHTML = ''` of this tree.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.slot_mut(id) {
            Some(slot) => std::mem::take(&mut slot.children),
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
    }

    /// Detaches `id` from its parent and frees the whole subtree. The root
    /// cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(slot) = self.slot_mut(parent) {
                slot.children.retain(|&child| child != id);
            }
        }
        self.free_subtree(id);
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.slots.get_mut(current.0).and_then(Option::take) {
                stack.extend(slot.children);
            }
        }
    }

    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    // ── Conveniences used by handlers and tests ──────────────────────────

    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.text_content()
    }

    pub fn attr_of(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.attribute(name)
    }

    pub fn style_of(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.get(id)?.style_value(prop)
    }
}
