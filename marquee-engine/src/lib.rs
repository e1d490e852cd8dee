// Marquee engine
//
// A deterministic, single-threaded reimagining of a marketing page's
// cosmetic interactivity: scroll reveals with staggering and a liveness
// fallback, count-up numbers, throttled scroll handlers, typewriter
// headings, progress bars, hover effects, navigation chrome, forms and a
// donation flow. Browser machinery is replaced by explicit abstractions —
// a page registry, a viewport, a virtual-time scheduler and a visibility
// observation registry — so every behavior is observable in tests.
//
// The `Runtime` is the entry point: feed it a page and events, advance
// its clock, and inspect the page afterwards.

pub mod collaborators;
pub mod counter;
pub mod donation;
pub mod easing;
pub mod effects;
pub mod forms;
pub mod navigation;
pub mod observer;
pub mod reveal;
pub mod runtime;
pub mod scheduler;
pub mod theme;
pub mod throttle;

pub use counter::CounterAnimator;
pub use donation::DonationController;
pub use observer::{IntersectionEntry, ObserverId, ObserverKind, Observations};
pub use reveal::{RevealEngine, REVEALED_CLASS};
pub use runtime::{InitReport, PageEvent, Runtime, RuntimeOptions};
pub use scheduler::{Moment, Scheduler, Task, TaskId, FRAME_INTERVAL};
pub use theme::ThemeController;
pub use throttle::{Submitted, Throttle};
