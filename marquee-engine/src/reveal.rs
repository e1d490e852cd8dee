// Progressive reveal engine
//
// Tagged elements start hidden (opacity 0, pushed down, transition armed)
// and transition to revealed the first time they become sufficiently
// visible. Container groups reveal their children with a per-child stagger.
// A fallback sweep guarantees every tracked element ends up revealed within
// the configured window even if its observation never fires.
//
// Invariant: hidden → revealed happens at most once per element, and the
// engine never re-hides anything.

use crate::observer::{IntersectionEntry, ObserverId, ObserverKind, Observations};
use crate::scheduler::{Scheduler, Task};
use log::{debug, info};
use marquee_page::{ElementId, Page, Transform, Transition};
use marquee_utils::attrs;
use marquee_utils::config::{ConfigResult, RevealConfig};
use std::collections::HashMap;
use std::time::Duration;

/// Marker class external stylesheets key the final visuals off
pub const REVEALED_CLASS: &str = "revealed";

/// Optional per-child attribute overriding stagger order
pub const STAGGER_INDEX_ATTR: &str = "data-stagger-index";

struct GroupState {
    children: Vec<ElementId>,
    stagger: Duration,
}

/// The reveal engine: tracks tagged elements and owns their transition
/// from hidden to revealed.
pub struct RevealEngine {
    /// Every element that must eventually be revealed
    tracked: Vec<ElementId>,
    /// Pending container groups, keyed by their observation
    groups: HashMap<ObserverId, GroupState>,
    revealed: usize,
}

impl RevealEngine {
    pub fn new() -> Self {
        Self {
            tracked: Vec::new(),
            groups: HashMap::new(),
            revealed: 0,
        }
    }

    /// Register standalone elements for scroll reveal.
    ///
    /// Applies the hidden entrance style, observes the elements, and
    /// schedules the fallback sweep. Absent elements are skipped; an empty
    /// registration is a no-op, not an error.
    pub fn register_elements(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        observations: &mut Observations,
        elements: &[ElementId],
        config: &RevealConfig,
    ) -> ConfigResult<usize> {
        config.validate()?;
        let present: Vec<ElementId> = elements
            .iter()
            .copied()
            .filter(|el| page.contains(*el))
            .collect();
        if present.is_empty() {
            return Ok(0);
        }

        for element in &present {
            self.hide(page, *element, config);
            self.tracked.push(*element);
        }
        observations.observe(
            ObserverKind::Reveal,
            config.threshold,
            config.root_margin_bottom,
            present.clone(),
        );
        scheduler.schedule_after(config.fallback.window, Task::FallbackSweep);
        debug!("Marquee: tracking {} reveal elements", present.len());
        Ok(present.len())
    }

    /// Register a container whose children reveal with a stagger once the
    /// container itself becomes visible.
    ///
    /// Children are ordered by their natural position; a well-formed
    /// `data-stagger-index` attribute overrides that, and a malformed one
    /// falls back to the natural position instead of erroring.
    pub fn register_group(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        observations: &mut Observations,
        container: ElementId,
        config: &RevealConfig,
    ) -> ConfigResult<usize> {
        config.validate()?;
        let mut children = page.children(container);
        if children.is_empty() {
            return Ok(0);
        }

        let natural: HashMap<ElementId, usize> = children
            .iter()
            .enumerate()
            .map(|(position, el)| (*el, position))
            .collect();
        children.sort_by_key(|el| {
            attrs::parse_index(page.attr(*el, STAGGER_INDEX_ATTR), natural[el])
        });

        for child in &children {
            self.hide(page, *child, config);
            self.tracked.push(*child);
        }
        let count = children.len();
        let observer = observations.observe(
            ObserverKind::RevealGroup,
            config.threshold,
            config.root_margin_bottom,
            vec![container],
        );
        self.groups.insert(
            observer,
            GroupState {
                children,
                stagger: config.stagger_interval,
            },
        );
        scheduler.schedule_after(config.fallback.window, Task::FallbackSweep);
        debug!(
            "Marquee: tracking group {} with {} staggered children",
            container, count
        );
        Ok(count)
    }

    /// Handle an intersection entry routed to this engine
    pub fn on_intersection(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        entry: &IntersectionEntry,
    ) {
        match entry.kind {
            ObserverKind::Reveal => {
                self.reveal_now(page, entry.element);
            }
            ObserverKind::RevealGroup => {
                let Some(group) = self.groups.remove(&entry.observer) else {
                    return;
                };
                for (index, child) in group.children.iter().enumerate() {
                    scheduler.schedule_after(
                        group.stagger * index as u32,
                        Task::RevealElement(*child),
                    );
                }
            }
            _ => {}
        }
    }

    /// Transition one element to revealed. Idempotent: revealing an
    /// already-revealed (or missing) element changes nothing and returns
    /// false.
    pub fn reveal_now(&mut self, page: &mut Page, element: ElementId) -> bool {
        if !page.contains(element) || page.has_class(element, REVEALED_CLASS) {
            return false;
        }
        if let Some(el) = page.element_mut(element) {
            el.style.opacity = Some(1.0);
            el.style.transform = Some(Transform::None);
        }
        page.add_class(element, REVEALED_CLASS);
        self.revealed += 1;
        debug!("Marquee: revealed {}", element);
        true
    }

    /// Force-reveal every tracked element that is still hidden and drop
    /// their observations. Safe to run any number of times.
    pub fn fallback_sweep(
        &mut self,
        page: &mut Page,
        observations: &mut Observations,
    ) -> usize {
        let pending: Vec<ElementId> = self
            .tracked
            .iter()
            .copied()
            .filter(|el| page.contains(*el) && !page.has_class(*el, REVEALED_CLASS))
            .collect();
        for element in &pending {
            self.reveal_now(page, *element);
            observations.unobserve(*element);
        }
        if !pending.is_empty() {
            info!(
                "Marquee: fallback sweep revealed {} elements the observer never delivered",
                pending.len()
            );
        }
        pending.len()
    }

    pub fn is_revealed(&self, page: &Page, element: ElementId) -> bool {
        page.has_class(element, REVEALED_CLASS)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Drop all tracked state (teardown)
    pub fn clear(&mut self) {
        self.tracked.clear();
        self.groups.clear();
    }

    fn hide(&self, page: &mut Page, element: ElementId, config: &RevealConfig) {
        if let Some(el) = page.element_mut(element) {
            el.style.opacity = Some(0.0);
            el.style.transform = Some(Transform::TranslateY(config.hidden_offset));
            el.style.transition = Some(Transition::entrance(config.transition));
        }
    }
}

impl Default for RevealEngine {
    fn default() -> Self {
        Self::new()
    }
}
