// Typewriter headline effect
//
// Captures the heading's text at initialization, blanks it, then reveals
// one character per tick behind a cursor border. The cursor is removed
// half a second after the last character lands.

use crate::scheduler::{Scheduler, Task};
use marquee_page::{ElementId, Page};
use std::collections::HashMap;
use std::time::Duration;

pub const TYPEWRITER_CLASS: &str = "typewriter";

const TICK: Duration = Duration::from_millis(100);
const CURSOR_LINGER: Duration = Duration::from_millis(500);
const CURSOR: &str = "2px solid var(--primary-color)";

struct TypeState {
    full: Vec<char>,
    index: usize,
}

/// Drives all typewriter headings
pub struct Typewriter {
    active: HashMap<ElementId, TypeState>,
}

impl Typewriter {
    pub fn new() -> Self {
        Self {
            active: HashMap::new(),
        }
    }

    /// Blank every tagged heading and start ticking. No targets, no work.
    pub fn init(&mut self, page: &mut Page, scheduler: &mut Scheduler) -> usize {
        let targets = page.select_class(TYPEWRITER_CLASS);
        for element in &targets {
            let full: Vec<char> = page.text(*element).chars().collect();
            page.set_text(*element, "");
            if let Some(el) = page.element_mut(*element) {
                el.style.border_right = Some(CURSOR.to_string());
            }
            self.active.insert(*element, TypeState { full, index: 0 });
            scheduler.schedule_after(TICK, Task::TypewriterTick(*element));
        }
        targets.len()
    }

    pub fn on_tick(&mut self, page: &mut Page, scheduler: &mut Scheduler, element: ElementId) {
        let Some(state) = self.active.get_mut(&element) else {
            return;
        };
        if state.index > state.full.len() {
            self.active.remove(&element);
            scheduler.schedule_after(CURSOR_LINGER, Task::TypewriterCursorOff(element));
            return;
        }
        let prefix: String = state.full[..state.index].iter().collect();
        state.index += 1;
        page.set_text(element, prefix);
        scheduler.schedule_after(TICK, Task::TypewriterTick(element));
    }

    pub fn on_cursor_off(&self, page: &mut Page, element: ElementId) {
        if let Some(el) = page.element_mut(element) {
            el.style.border_right = None;
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}
