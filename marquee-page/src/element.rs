// Elements and geometry

use crate::style::InlineStyle;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Handle to an element in the page registry.
///
/// Ids are handed out in document order, so sorting by id recovers the
/// order elements were attached to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding box in document coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// One node in the page
#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    /// Tag-like label ("div", "button", "input"); informational only
    pub kind: String,
    pub classes: BTreeSet<String>,
    pub attrs: HashMap<String, String>,
    pub text: String,
    /// Current value for form controls
    pub value: String,
    pub style: InlineStyle,
    pub rect: Rect,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    /// Disabled flag for form controls
    pub disabled: bool,
}

impl Element {
    pub(crate) fn new(id: ElementId, kind: &str) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            classes: BTreeSet::new(),
            attrs: HashMap::new(),
            text: String::new(),
            value: String::new(),
            style: InlineStyle::default(),
            rect: Rect::default(),
            children: Vec::new(),
            parent: None,
            disabled: false,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}
