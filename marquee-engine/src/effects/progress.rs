// Progress bar fills
//
// A bar's width animates from 0 to its `data-percentage` value when it
// scrolls into view, after a short delay so the transition is visible.

use crate::observer::{IntersectionEntry, ObserverKind, Observations};
use crate::scheduler::{Scheduler, Task};
use marquee_page::{ElementId, Page, TimingCurve, Transition};
use marquee_utils::attrs;
use std::collections::HashMap;
use std::time::Duration;

pub const PROGRESS_CLASS: &str = "progress-bar";
pub const PERCENTAGE_ATTR: &str = "data-percentage";

const FILL_DELAY: Duration = Duration::from_millis(200);
const FILL_DURATION: Duration = Duration::from_millis(2000);
const THRESHOLD: f32 = 0.5;

/// Drives progress bar fill animations
pub struct ProgressBars {
    pending: HashMap<ElementId, f32>,
}

impl ProgressBars {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Observe every tagged bar
    pub fn register(&mut self, page: &Page, observations: &mut Observations) -> usize {
        let bars = page.select_class(PROGRESS_CLASS);
        if bars.is_empty() {
            return 0;
        }
        let count = bars.len();
        observations.observe(ObserverKind::Progress, THRESHOLD, 0.0, bars);
        count
    }

    /// Zero the bar, arm its transition, and schedule the fill
    pub fn on_intersection(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        entry: &IntersectionEntry,
    ) {
        if entry.kind != ObserverKind::Progress {
            return;
        }
        let element = entry.element;
        if self.pending.contains_key(&element) {
            return;
        }
        // Malformed percentage degrades to an empty bar
        let percentage = attrs::parse_percent(page.attr(element, PERCENTAGE_ATTR), 0.0);
        if let Some(el) = page.element_mut(element) {
            el.style.width_percent = Some(0.0);
            el.style.transition = Some(Transition::new(FILL_DURATION, TimingCurve::EaseInOut));
        }
        self.pending.insert(element, percentage);
        scheduler.schedule_after(FILL_DELAY, Task::ProgressStart(element));
    }

    pub fn on_start(&mut self, page: &mut Page, element: ElementId) {
        let Some(percentage) = self.pending.remove(&element) else {
            return;
        };
        if let Some(el) = page.element_mut(element) {
            el.style.width_percent = Some(percentage);
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for ProgressBars {
    fn default() -> Self {
        Self::new()
    }
}
