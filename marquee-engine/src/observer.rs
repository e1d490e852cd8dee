// Visibility observations
//
// The registry behind every "when this scrolls into view" trigger. Each
// observation watches a set of elements with one threshold and root
// margin; evaluation fires an entry the first time an element's ratio
// crosses the threshold and then stops watching it, so delivery is at
// most once per element.

use marquee_page::{ElementId, Page, Viewport};

/// Handle to one registered observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Which component an observation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverKind {
    /// Standalone scroll-reveal element
    Reveal,
    /// Container whose children reveal with a stagger
    RevealGroup,
    /// Count-up number
    Counter,
    /// Progress bar fill
    Progress,
}

#[derive(Debug)]
struct Observation {
    kind: ObserverKind,
    threshold: f32,
    root_margin_bottom: f32,
    watched: Vec<ElementId>,
}

/// An element that crossed its observation's threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub observer: ObserverId,
    pub kind: ObserverKind,
    pub element: ElementId,
    pub ratio: f32,
}

/// All live observations
#[derive(Default)]
pub struct Observations {
    entries: Vec<(ObserverId, Observation)>,
    next_id: u64,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observation over `elements`
    pub fn observe(
        &mut self,
        kind: ObserverKind,
        threshold: f32,
        root_margin_bottom: f32,
        elements: Vec<ElementId>,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((
            id,
            Observation {
                kind,
                threshold,
                root_margin_bottom,
                watched: elements,
            },
        ));
        id
    }

    /// Stop watching one element early (e.g. revealed by the fallback
    /// sweep before its observer fired)
    pub fn unobserve(&mut self, element: ElementId) {
        for (_, obs) in &mut self.entries {
            obs.watched.retain(|watched| *watched != element);
        }
        self.entries.retain(|(_, obs)| !obs.watched.is_empty());
    }

    /// Evaluate every observation against the current viewport, consuming
    /// and returning the elements that crossed their threshold. Elements
    /// that no longer exist on the page are dropped silently.
    pub fn evaluate(&mut self, page: &Page, viewport: &Viewport) -> Vec<IntersectionEntry> {
        let mut fired = Vec::new();
        for (id, obs) in &mut self.entries {
            obs.watched.retain(|element| {
                let Some(el) = page.element(*element) else {
                    return false;
                };
                let ratio = viewport.intersection_ratio(&el.rect, obs.root_margin_bottom);
                if ratio >= obs.threshold {
                    fired.push(IntersectionEntry {
                        observer: *id,
                        kind: obs.kind,
                        element: *element,
                        ratio,
                    });
                    false
                } else {
                    true
                }
            });
        }
        self.entries.retain(|(_, obs)| !obs.watched.is_empty());
        fired
    }

    /// Number of elements still being watched
    pub fn watched_count(&self) -> usize {
        self.entries.iter().map(|(_, obs)| obs.watched.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
