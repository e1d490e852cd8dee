// Page registry
//
// Owns every element and hands out ids. Mutating accessors are tolerant of
// stale ids: operations on a missing element are silent no-ops, matching
// the engine's "absent target is not an error" rule.

use crate::element::{Element, ElementId, Rect};
use std::collections::HashMap;

/// The document: an element registry plus a current location
pub struct Page {
    elements: HashMap<ElementId, Element>,
    /// Ids in creation (document) order
    order: Vec<ElementId>,
    next_id: u64,
    root: ElementId,
    location: Option<String>,
}

impl Page {
    pub fn new() -> Self {
        let mut page = Self {
            elements: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            root: ElementId(0),
            location: None,
        };
        page.root = page.create("html");
        page
    }

    /// The root element; theme markers land here
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create a detached element
    pub fn create(&mut self, kind: &str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(id, kind));
        self.order.push(id);
        id
    }

    /// Create an element with classes and geometry in one step
    pub fn create_with(&mut self, kind: &str, classes: &[&str], rect: Rect) -> ElementId {
        let id = self.create(kind);
        if let Some(el) = self.elements.get_mut(&id) {
            for class in classes {
                el.classes.insert((*class).to_string());
            }
            el.rect = rect;
        }
        id
    }

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.elements.contains_key(&parent) || !self.elements.contains_key(&child) {
            return;
        }
        if let Some(el) = self.elements.get_mut(&child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.elements.get_mut(&parent) {
            el.children.push(child);
        }
    }

    /// Remove an element and detach it from its parent
    pub fn remove(&mut self, id: ElementId) {
        let Some(el) = self.elements.remove(&id) else {
            return;
        };
        self.order.retain(|other| *other != id);
        if let Some(parent) = el.parent {
            if let Some(parent_el) = self.elements.get_mut(&parent) {
                parent_el.children.retain(|child| *child != id);
            }
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// All elements carrying `class`, in document order
    pub fn select_class(&self, class: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.elements
                    .get(id)
                    .map(|el| el.has_class(class))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub fn first_class(&self, class: &str) -> Option<ElementId> {
        self.select_class(class).into_iter().next()
    }

    /// Children of `id`, in attachment order
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.elements
            .get(&id)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.classes.remove(class);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(&id)
            .map(|el| el.has_class(class))
            .unwrap_or(false)
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = text.into();
        }
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.elements.get(&id).map(|el| el.text.as_str()).unwrap_or("")
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(&id).and_then(|el| el.attr(name))
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.value = value.into();
        }
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.elements
            .get(&id)
            .map(|el| el.value.as_str())
            .unwrap_or("")
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.disabled = disabled;
        }
    }

    /// Navigate away from the page (confirmation redirects)
    pub fn navigate(&mut self, url: impl Into<String>) {
        self.location = Some(url.into());
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
