// Pointer hover effects
//
// Card tilt follows the pointer with a perspective rotation, media images
// drift toward the pointer, and buttons spawn a short-lived ripple at the
// click point. Pointer coordinates are element-local.

use crate::scheduler::{Scheduler, Task};
use marquee_page::{ElementId, Page, Rect, TimingCurve, Transform, Transition};
use std::collections::HashSet;
use std::time::Duration;

/// Classes that opt a card into the tilt effect
pub const TILT_CLASSES: [&str; 4] = ["mission-item", "value-card", "event-card", "story-card"];

/// Media images that drift under the pointer
pub const MEDIA_CLASS: &str = "media-zoom";

pub const BUTTON_CLASS: &str = "btn";
pub const RIPPLE_CLASS: &str = "ripple";

const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);
const TILT_DIVISOR: f32 = 10.0;
const DRIFT_FACTOR: f32 = 0.05;

/// Pointer-driven transforms and click ripples
pub struct HoverEffects {
    tilt_targets: HashSet<ElementId>,
    media_targets: HashSet<ElementId>,
    buttons: HashSet<ElementId>,
}

impl HoverEffects {
    pub fn new() -> Self {
        Self {
            tilt_targets: HashSet::new(),
            media_targets: HashSet::new(),
            buttons: HashSet::new(),
        }
    }

    pub fn init(&mut self, page: &mut Page) -> usize {
        for class in TILT_CLASSES {
            for element in page.select_class(class) {
                self.tilt_targets.insert(element);
                if let Some(el) = page.element_mut(element) {
                    el.style.transition = Some(Transition::new(
                        Duration::from_millis(100),
                        TimingCurve::EaseOut,
                    ));
                }
            }
        }
        for element in page.select_class(MEDIA_CLASS) {
            self.media_targets.insert(element);
            if let Some(el) = page.element_mut(element) {
                el.style.transition = Some(Transition::new(
                    Duration::from_millis(300),
                    TimingCurve::EaseOut,
                ));
            }
        }
        self.buttons = page.select_class(BUTTON_CLASS).into_iter().collect();
        self.tilt_targets.len() + self.media_targets.len() + self.buttons.len()
    }

    pub fn on_pointer_move(&self, page: &mut Page, element: ElementId, x: f32, y: f32) {
        if self.tilt_targets.contains(&element) {
            let Some(rect) = page.element(element).map(|el| el.rect) else {
                return;
            };
            let rotate_x = (y - rect.center_y()) / TILT_DIVISOR;
            let rotate_y = (rect.center_x() - x) / TILT_DIVISOR;
            if let Some(el) = page.element_mut(element) {
                el.style.transform = Some(Transform::Tilt {
                    rotate_x,
                    rotate_y,
                    scale: 1.02,
                });
            }
        } else if self.media_targets.contains(&element) {
            let Some(rect) = page.element(element).map(|el| el.rect) else {
                return;
            };
            let drift_x = (x - rect.width / 2.0) * DRIFT_FACTOR;
            let drift_y = (y - rect.height / 2.0) * DRIFT_FACTOR;
            if let Some(el) = page.element_mut(element) {
                el.style.transform = Some(Transform::Translate {
                    x: drift_x,
                    y: drift_y,
                    scale: 1.1,
                });
            }
        }
    }

    pub fn on_pointer_leave(&self, page: &mut Page, element: ElementId) {
        if self.tilt_targets.contains(&element) {
            if let Some(el) = page.element_mut(element) {
                el.style.transform = Some(Transform::Tilt {
                    rotate_x: 0.0,
                    rotate_y: 0.0,
                    scale: 1.0,
                });
            }
        } else if self.media_targets.contains(&element) {
            if let Some(el) = page.element_mut(element) {
                el.style.transform = Some(Transform::Translate {
                    x: 0.0,
                    y: 0.0,
                    scale: 1.05,
                });
            }
        }
    }

    /// Spawn a ripple on button clicks; it cleans itself up after its
    /// animation finishes.
    pub fn on_click(
        &self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        element: ElementId,
        x: f32,
        y: f32,
    ) {
        if !self.buttons.contains(&element) {
            return;
        }
        let Some(rect) = page.element(element).map(|el| el.rect) else {
            return;
        };
        let size = rect.width.max(rect.height);
        let ripple = page.create_with(
            "span",
            &[RIPPLE_CLASS],
            Rect::new(x - size / 2.0, y - size / 2.0, size, size),
        );
        page.append_child(element, ripple);
        scheduler.schedule_after(RIPPLE_LIFETIME, Task::RippleCleanup(ripple));
    }

    pub fn clear(&mut self) {
        self.tilt_targets.clear();
        self.media_targets.clear();
        self.buttons.clear();
    }
}

impl Default for HoverEffects {
    fn default() -> Self {
        Self::new()
    }
}
