// Background parallax
//
// Backgrounds drift at half scroll speed. The handler runs on the
// throttled scroll path, so it sees at most one update per frame interval.

use marquee_page::{ElementId, Page, Transform};

pub const PARALLAX_CLASS: &str = "hero-background";

const SPEED: f32 = 0.5;

/// Scroll-position parallax over registered backgrounds
pub struct Parallax {
    targets: Vec<ElementId>,
}

impl Parallax {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    pub fn init(&mut self, page: &Page) -> usize {
        self.targets = page.select_class(PARALLAX_CLASS);
        self.targets.len()
    }

    pub fn on_scroll(&self, page: &mut Page, scroll_y: f32) {
        for target in &self.targets {
            if let Some(el) = page.element_mut(*target) {
                el.style.transform = Some(Transform::TranslateY(scroll_y * SPEED));
            }
        }
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new()
    }
}
