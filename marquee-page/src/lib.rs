// Marquee page model
//
// An explicit stand-in for the document a browser would provide: a registry
// of elements with classes, inline styles, data attributes and geometry,
// plus the viewport that decides what is visible. The engine mutates pages
// only through this crate, which keeps every style change observable in
// tests.

pub mod element;
pub mod page;
pub mod style;
pub mod viewport;

pub use element::{Element, ElementId, Rect};
pub use page::Page;
pub use style::{InlineStyle, TimingCurve, Transform, Transition};
pub use viewport::Viewport;
