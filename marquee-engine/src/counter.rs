// Count-up number animations
//
// A counter element carries its target in `data-target` and an optional
// `data-duration` (ms). When it scrolls into view the displayed value
// climbs from 0 to the target on a cubic ease-out curve anchored to the
// clock, so the run takes the same time regardless of frame cadence. The
// final frame always shows the exact target.

use crate::easing::Easing;
use crate::observer::{IntersectionEntry, ObserverKind, Observations};
use crate::scheduler::{Moment, Scheduler, Task, FRAME_INTERVAL};
use log::debug;
use marquee_page::{ElementId, Page};
use marquee_utils::attrs;
use marquee_utils::config::CounterDefaults;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

pub const TARGET_ATTR: &str = "data-target";
pub const DURATION_ATTR: &str = "data-duration";

/// Visibility threshold for starting a counter
pub const COUNTER_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct CounterState {
    target: i64,
    start_value: i64,
    started: Moment,
    duration: Duration,
}

/// Drives all count-up animations on the page
pub struct CounterAnimator {
    defaults: CounterDefaults,
    active: HashMap<ElementId, CounterState>,
    finished: HashSet<ElementId>,
}

impl CounterAnimator {
    pub fn new(defaults: CounterDefaults) -> Self {
        Self {
            defaults,
            active: HashMap::new(),
            finished: HashSet::new(),
        }
    }

    /// Observe counter elements. Absent targets are a no-op.
    pub fn register(
        &mut self,
        page: &Page,
        observations: &mut Observations,
        elements: &[ElementId],
    ) -> usize {
        let present: Vec<ElementId> = elements
            .iter()
            .copied()
            .filter(|el| page.contains(*el))
            .collect();
        if present.is_empty() {
            return 0;
        }
        let count = present.len();
        observations.observe(ObserverKind::Counter, COUNTER_THRESHOLD, 0.0, present);
        count
    }

    /// Start a counter when its observation fires. At most once per
    /// element; a duplicate trigger is ignored.
    pub fn on_intersection(
        &mut self,
        page: &mut Page,
        scheduler: &mut Scheduler,
        entry: &IntersectionEntry,
    ) {
        if entry.kind != ObserverKind::Counter {
            return;
        }
        let element = entry.element;
        if self.active.contains_key(&element) || self.finished.contains(&element) {
            return;
        }

        // Malformed attributes degrade to defaults, never an error
        let target = attrs::parse_int(page.attr(element, TARGET_ATTR), 0);
        let duration =
            attrs::parse_duration_ms(page.attr(element, DURATION_ATTR), self.defaults.duration);

        let state = CounterState {
            target,
            start_value: 0,
            started: scheduler.now(),
            duration,
        };
        self.active.insert(element, state);
        debug!(
            "Marquee: counter {} running to {} over {}ms",
            element,
            target,
            duration.as_millis()
        );
        // Render the starting frame immediately, then tick
        self.render(page, element, &state, scheduler.now());
        if !self.finish_if_done(page, element, &state, scheduler.now()) {
            scheduler.schedule_after(FRAME_INTERVAL, Task::CounterFrame(element));
        }
    }

    /// Advance one counter by a frame
    pub fn on_frame(&mut self, page: &mut Page, scheduler: &mut Scheduler, element: ElementId) {
        let Some(state) = self.active.get(&element).copied() else {
            return;
        };
        let now = scheduler.now();
        self.render(page, element, &state, now);
        if !self.finish_if_done(page, element, &state, now) {
            scheduler.schedule_after(FRAME_INTERVAL, Task::CounterFrame(element));
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.finished.clear();
    }

    fn progress(state: &CounterState, now: Moment) -> f32 {
        let elapsed = now - state.started;
        if state.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / state.duration.as_secs_f32()).min(1.0)
    }

    fn render(&self, page: &mut Page, element: ElementId, state: &CounterState, now: Moment) {
        let progress = Self::progress(state, now);
        let current = if progress >= 1.0 {
            state.target
        } else {
            let eased = Easing::EaseOutCubic.apply(progress) as f64;
            let span = (state.target - state.start_value) as f64;
            (state.start_value as f64 + span * eased).floor() as i64
        };
        page.set_text(element, format_grouped(current));
    }

    fn finish_if_done(
        &mut self,
        page: &mut Page,
        element: ElementId,
        state: &CounterState,
        now: Moment,
    ) -> bool {
        if Self::progress(state, now) >= 1.0 || !page.contains(element) {
            self.active.remove(&element);
            self.finished.insert(element);
            true
        } else {
            false
        }
    }
}

/// Format an integer with comma thousands separators ("1,000")
pub fn format_grouped(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_page::{Rect, Viewport};

    struct Fixture {
        page: Page,
        scheduler: Scheduler,
        observations: Observations,
        counters: CounterAnimator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                page: Page::new(),
                scheduler: Scheduler::new(),
                observations: Observations::new(),
                counters: CounterAnimator::new(CounterDefaults::default()),
            }
        }

        fn counter(&mut self, target: &str, duration: Option<&str>) -> ElementId {
            let el = self
                .page
                .create_with("span", &["scroll-counter"], Rect::new(0.0, 100.0, 200.0, 40.0));
            self.page.set_attr(el, TARGET_ATTR, target);
            if let Some(duration) = duration {
                self.page.set_attr(el, DURATION_ATTR, duration);
            }
            el
        }

        fn trigger(&mut self, el: ElementId) {
            self.counters
                .register(&self.page, &mut self.observations, &[el]);
            let viewport = Viewport::new(800.0, 2000.0);
            let entries = self.observations.evaluate(&self.page, &viewport);
            for entry in &entries {
                self.counters
                    .on_intersection(&mut self.page, &mut self.scheduler, entry);
            }
        }

        fn advance(&mut self, limit_ms: u64) {
            let limit = Moment::from_millis(limit_ms);
            while let Some((_, task)) = self.scheduler.pop_due(limit) {
                if let Task::CounterFrame(el) = task {
                    self.counters
                        .on_frame(&mut self.page, &mut self.scheduler, el);
                }
            }
            self.scheduler.set_now(limit);
        }
    }

    #[test]
    fn test_starts_at_zero_ends_exactly_on_target() {
        let mut fx = Fixture::new();
        let el = fx.counter("1000", Some("2000"));
        fx.trigger(el);

        // t=0 shows the starting value
        assert_eq!(fx.page.text(el), "0");

        fx.advance(2000);
        assert_eq!(fx.page.text(el), "1,000");
        assert_eq!(fx.counters.active_count(), 0);
        assert_eq!(fx.counters.finished_count(), 1);
        // No further frames scheduled once complete
        assert_eq!(fx.scheduler.pending(), 0);
    }

    #[test]
    fn test_displayed_value_is_monotonic() {
        let mut fx = Fixture::new();
        let el = fx.counter("5000", Some("1000"));
        fx.trigger(el);

        let mut last = 0i64;
        for ms in (0..=1100).step_by(16) {
            fx.advance(ms);
            let shown: i64 = fx.page.text(el).replace(',', "").parse().unwrap();
            assert!(shown >= last, "value regressed at t={}", ms);
            last = shown;
        }
        assert_eq!(last, 5000);
    }

    #[test]
    fn test_ease_out_front_loads_the_climb() {
        let mut fx = Fixture::new();
        let el = fx.counter("1000", Some("2000"));
        fx.trigger(el);

        fx.advance(1000);
        let halfway: i64 = fx.page.text(el).replace(',', "").parse().unwrap();
        assert!(halfway > 800, "expected ease-out, got {} at halfway", halfway);
    }

    #[test]
    fn test_duplicate_trigger_ignored() {
        let mut fx = Fixture::new();
        let el = fx.counter("100", Some("500"));
        fx.trigger(el);
        fx.advance(500);
        assert_eq!(fx.page.text(el), "100");

        // Observing and firing again must not restart the animation
        fx.trigger(el);
        fx.advance(600);
        assert_eq!(fx.counters.active_count(), 0);
        assert_eq!(fx.page.text(el), "100");
    }

    #[test]
    fn test_zero_and_negative_targets_terminate() {
        let mut fx = Fixture::new();
        let zero = fx.counter("0", Some("500"));
        fx.trigger(zero);
        fx.advance(500);
        assert_eq!(fx.page.text(zero), "0");

        let negative = fx.counter("-250", Some("500"));
        fx.trigger(negative);
        fx.advance(1100);
        assert_eq!(fx.page.text(negative), "-250");
        assert_eq!(fx.counters.active_count(), 0);
    }

    #[test]
    fn test_missing_duration_defaults_to_2000ms() {
        let mut fx = Fixture::new();
        let el = fx.counter("400", None);
        fx.trigger(el);

        fx.advance(1999);
        assert_eq!(fx.counters.active_count(), 1);
        fx.advance(2016);
        assert_eq!(fx.page.text(el), "400");
        assert_eq!(fx.counters.active_count(), 0);
    }

    #[test]
    fn test_malformed_target_defaults_to_zero() {
        let mut fx = Fixture::new();
        let el = fx.counter("lots", Some("500"));
        fx.trigger(el);
        fx.advance(500);
        assert_eq!(fx.page.text(el), "0");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1,000");
        assert_eq!(format_grouped(1234567), "1,234,567");
        assert_eq!(format_grouped(-1234567), "-1,234,567");
    }
}
