// Marquee runtime
//
// Owns the page, the viewport, the scheduler and every component, and is
// the single dispatch point: external input arrives as page events, and
// deferred work comes back out of the scheduler as tasks. One document
// ready signal fans out to all sub-initializers; each one tolerates a page
// without its targets.

use crate::collaborators::{FormEndpoint, PaymentGateway};
use crate::counter::CounterAnimator;
use crate::donation::DonationController;
use crate::effects::{spawn_particles, HoverEffects, Parallax, ProgressBars, Typewriter};
use crate::forms::{FormController, MessageCenter, FORM_CLASS};
use crate::navigation::Navigation;
use crate::observer::{IntersectionEntry, ObserverKind, Observations};
use crate::reveal::RevealEngine;
use crate::scheduler::{Moment, Scheduler, Task, FRAME_INTERVAL};
use crate::theme::ThemeController;
use crate::throttle::{Submitted, Throttle};
use log::{debug, info};
use marquee_page::{ElementId, Page, Viewport};
use marquee_utils::config::{ConfigResult, CounterDefaults, RevealConfig};
use marquee_utils::{PreferenceStore, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::time::Duration;

/// Elements tagged for standalone scroll reveal
pub const SCROLL_REVEAL_CLASS: &str = "scroll-reveal";
/// Containers whose children reveal with a stagger
pub const STAGGER_GRID_CLASS: &str = "stagger-grid";
/// Count-up number elements
pub const SCROLL_COUNTER_CLASS: &str = "scroll-counter";
/// The boot overlay hidden shortly after load
pub const LOADING_SCREEN_CLASS: &str = "loading-screen";

const LOADING_FADE_AFTER: Duration = Duration::from_millis(1000);
const LOADING_REMOVE_AFTER: Duration = Duration::from_millis(1500);

/// External input delivered to the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The user scrolled to `y`
    Scroll { y: f32 },
    /// Pointer moved over an element (element-local coordinates)
    PointerMove { element: ElementId, x: f32, y: f32 },
    PointerLeave { element: ElementId },
    Click { element: ElementId, x: f32, y: f32 },
    /// A form control changed value
    Input { element: ElementId, value: String },
    /// Focus left a form control
    Blur { element: ElementId },
    /// A form was submitted
    Submit { form: ElementId },
    /// The OS color-scheme preference changed
    SystemTheme { dark: bool },
}

/// Tuning for a runtime instance
pub struct RuntimeOptions {
    pub reveal: RevealConfig,
    pub counter_defaults: CounterDefaults,
    pub particle_count: usize,
    pub particle_seed: u64,
    pub system_theme: Theme,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            counter_defaults: CounterDefaults::default(),
            particle_count: crate::effects::particles::DEFAULT_COUNT,
            particle_seed: 0,
            system_theme: Theme::Light,
        }
    }
}

/// What each sub-initializer found on the page
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    pub reveal_elements: usize,
    pub group_children: usize,
    pub counters: usize,
    pub typewriters: usize,
    pub progress_bars: usize,
    pub parallax_targets: usize,
    pub hover_targets: usize,
    pub particles: usize,
    pub forms: usize,
    pub donation_form: bool,
}

impl fmt::Display for InitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reveal elements, {} staggered children, {} counters, {} typewriters, \
             {} progress bars, {} forms{}",
            self.reveal_elements,
            self.group_children,
            self.counters,
            self.typewriters,
            self.progress_bars,
            self.forms,
            if self.donation_form {
                ", donation form"
            } else {
                ""
            }
        )
    }
}

/// The page's single-threaded cooperative runtime
pub struct Runtime {
    page: Page,
    viewport: Viewport,
    scheduler: Scheduler,
    observations: Observations,
    reveal: RevealEngine,
    counters: CounterAnimator,
    typewriter: Typewriter,
    progress: ProgressBars,
    parallax: Parallax,
    hover: HoverEffects,
    nav: Navigation,
    center: MessageCenter,
    forms: Vec<FormController>,
    donation: Option<DonationController>,
    theme: ThemeController,
    endpoint: Box<dyn FormEndpoint>,
    gateway: Box<dyn PaymentGateway>,
    scroll_throttle: Throttle<f32>,
    reveal_config: RevealConfig,
    particle_count: usize,
    rng: StdRng,
}

impl Runtime {
    pub fn new(
        page: Page,
        viewport: Viewport,
        prefs: PreferenceStore,
        endpoint: Box<dyn FormEndpoint>,
        gateway: Box<dyn PaymentGateway>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            page,
            viewport,
            scheduler: Scheduler::new(),
            observations: Observations::new(),
            reveal: RevealEngine::new(),
            counters: CounterAnimator::new(options.counter_defaults),
            typewriter: Typewriter::new(),
            progress: ProgressBars::new(),
            parallax: Parallax::new(),
            hover: HoverEffects::new(),
            nav: Navigation::new(),
            center: MessageCenter::new(),
            forms: Vec::new(),
            donation: None,
            theme: ThemeController::new(prefs, options.system_theme),
            endpoint,
            gateway,
            scroll_throttle: Throttle::new(FRAME_INTERVAL),
            reveal_config: options.reveal,
            particle_count: options.particle_count,
            rng: StdRng::seed_from_u64(options.particle_seed),
        }
    }

    /// The "document ready" fan-out. Every sub-initializer is independent
    /// and a page without its targets is fine; only an invalid reveal
    /// configuration is an error.
    pub fn init(&mut self) -> ConfigResult<InitReport> {
        let mut report = InitReport::default();

        let reveal_targets = self.page.select_class(SCROLL_REVEAL_CLASS);
        report.reveal_elements = self.reveal.register_elements(
            &mut self.page,
            &mut self.scheduler,
            &mut self.observations,
            &reveal_targets,
            &self.reveal_config,
        )?;
        for container in self.page.select_class(STAGGER_GRID_CLASS) {
            report.group_children += self.reveal.register_group(
                &mut self.page,
                &mut self.scheduler,
                &mut self.observations,
                container,
                &self.reveal_config,
            )?;
        }

        let counter_targets = self.page.select_class(SCROLL_COUNTER_CLASS);
        report.counters =
            self.counters
                .register(&self.page, &mut self.observations, &counter_targets);

        report.typewriters = self.typewriter.init(&mut self.page, &mut self.scheduler);
        report.progress_bars = self.progress.register(&self.page, &mut self.observations);
        report.parallax_targets = self.parallax.init(&self.page);
        report.hover_targets = self.hover.init(&mut self.page);
        report.particles =
            spawn_particles(&mut self.page, &mut self.rng, self.particle_count);

        self.nav.init(&self.page);
        self.theme.init(&mut self.page);

        for form in self.page.select_class(FORM_CLASS) {
            if let Some(controller) = FormController::bind(&self.page, form) {
                self.forms.push(controller);
            }
        }
        report.forms = self.forms.len();
        self.donation = DonationController::bind(&mut self.page);
        report.donation_form = self.donation.is_some();

        if self.page.first_class(LOADING_SCREEN_CLASS).is_some() {
            self.scheduler
                .schedule_after(LOADING_FADE_AFTER, Task::LoadingFade);
            self.scheduler
                .schedule_after(LOADING_REMOVE_AFTER, Task::LoadingRemove);
        }

        // Observers deliver the initial state for whatever is already in
        // view; anything they miss is caught by the fallback sweep.
        self.evaluate_observations();

        info!("Marquee: initialized ({})", report);
        Ok(report)
    }

    /// Deliver one page event
    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Scroll { y } => {
                let now = self.scheduler.now();
                match self.scroll_throttle.submit(now, y.max(0.0)) {
                    Submitted::Run(y) => self.apply_scroll(y),
                    Submitted::Deferred {
                        due,
                        already_scheduled,
                    } => {
                        if !already_scheduled {
                            self.scheduler.schedule_at(due, Task::ScrollTrailing);
                        }
                    }
                }
            }
            PageEvent::PointerMove { element, x, y } => {
                self.hover.on_pointer_move(&mut self.page, element, x, y);
            }
            PageEvent::PointerLeave { element } => {
                self.hover.on_pointer_leave(&mut self.page, element);
            }
            PageEvent::Click { element, x, y } => {
                self.hover
                    .on_click(&mut self.page, &mut self.scheduler, element, x, y);
                if self.theme.is_toggle(&self.page, element) {
                    self.theme.toggle(&mut self.page);
                }
                if let Some(donation) = self.donation.as_mut() {
                    if donation.owns_option(element) {
                        donation.select_preset(&mut self.page, element);
                    }
                }
                if self.nav.on_click(&mut self.page, element) {
                    // Back-to-top: jump the viewport home
                    self.apply_scroll(0.0);
                }
            }
            PageEvent::Input { element, value } => {
                self.page.set_value(element, value.clone());
                for form in &self.forms {
                    form.on_input(&mut self.page, element);
                }
                if let Some(donation) = self.donation.as_mut() {
                    if donation.is_custom_input(element) {
                        donation.set_custom_amount(&mut self.page, &value);
                    } else if donation.is_frequency_input(&self.page, element) {
                        donation.set_frequency(&mut self.page, &value);
                    }
                }
            }
            PageEvent::Blur { element } => {
                for form in &self.forms {
                    if form.owns_input(element) {
                        form.on_blur(&mut self.page, element);
                    }
                }
            }
            PageEvent::Submit { form } => {
                if let Some(donation) = self.donation.as_mut() {
                    if donation.form() == form {
                        donation.submit(
                            &mut self.page,
                            &mut self.scheduler,
                            &mut self.center,
                            self.gateway.as_mut(),
                        );
                        return;
                    }
                }
                if let Some(controller) =
                    self.forms.iter_mut().find(|controller| controller.form() == form)
                {
                    controller.submit(
                        &mut self.page,
                        &mut self.scheduler,
                        &mut self.center,
                        self.endpoint.as_mut(),
                    );
                }
            }
            PageEvent::SystemTheme { dark } => {
                self.theme.on_system_change(&mut self.page, dark);
            }
        }
    }

    /// Run everything due up to `to`, then park the clock there
    pub fn advance_to(&mut self, to: Moment) {
        while let Some((_, task)) = self.scheduler.pop_due(to) {
            self.dispatch(task);
        }
        self.scheduler.set_now(to);
    }

    pub fn advance_by(&mut self, delta: Duration) {
        self.advance_to(self.scheduler.now() + delta);
    }

    /// Detach every observation and pending task
    pub fn teardown(&mut self) {
        self.observations.clear();
        self.scheduler.clear();
        self.reveal.clear();
        self.counters.clear();
        self.typewriter.clear();
        self.progress.clear();
        self.parallax.clear();
        self.hover.clear();
        self.nav.clear();
        self.forms.clear();
        self.donation = None;
        debug!("Marquee: runtime torn down");
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn now(&self) -> Moment {
        self.scheduler.now()
    }

    pub fn messages(&self) -> &MessageCenter {
        &self.center
    }

    pub fn revealed_count(&self) -> usize {
        self.reveal.revealed_count()
    }

    pub fn tracked_count(&self) -> usize {
        self.reveal.tracked_count()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn apply_scroll(&mut self, y: f32) {
        self.viewport.scroll_y = y;
        self.nav.on_scroll(&mut self.page, &self.viewport);
        self.parallax.on_scroll(&mut self.page, y);
        self.evaluate_observations();
    }

    fn evaluate_observations(&mut self) {
        let entries = self.observations.evaluate(&self.page, &self.viewport);
        for entry in entries {
            self.route(entry);
        }
    }

    fn route(&mut self, entry: IntersectionEntry) {
        match entry.kind {
            ObserverKind::Reveal | ObserverKind::RevealGroup => {
                self.reveal
                    .on_intersection(&mut self.page, &mut self.scheduler, &entry);
            }
            ObserverKind::Counter => {
                self.counters
                    .on_intersection(&mut self.page, &mut self.scheduler, &entry);
            }
            ObserverKind::Progress => {
                self.progress
                    .on_intersection(&mut self.page, &mut self.scheduler, &entry);
            }
        }
    }

    fn dispatch(&mut self, task: Task) {
        match task {
            Task::RevealElement(element) => {
                self.reveal.reveal_now(&mut self.page, element);
            }
            Task::FallbackSweep => {
                self.reveal
                    .fallback_sweep(&mut self.page, &mut self.observations);
            }
            Task::CounterFrame(element) => {
                self.counters
                    .on_frame(&mut self.page, &mut self.scheduler, element);
            }
            Task::TypewriterTick(element) => {
                self.typewriter
                    .on_tick(&mut self.page, &mut self.scheduler, element);
            }
            Task::TypewriterCursorOff(element) => {
                self.typewriter.on_cursor_off(&mut self.page, element);
            }
            Task::ProgressStart(element) => {
                self.progress.on_start(&mut self.page, element);
            }
            Task::ScrollTrailing => {
                let now = self.scheduler.now();
                if let Some(y) = self.scroll_throttle.fire_trailing(now) {
                    self.apply_scroll(y);
                }
            }
            Task::DismissMessage(element) => {
                self.center.dismiss(&mut self.page, element);
            }
            Task::RippleCleanup(element) => {
                self.page.remove(element);
            }
            Task::Redirect(url) => {
                info!("Marquee: redirecting to {}", url);
                self.page.navigate(url);
            }
            Task::LoadingFade => {
                if let Some(screen) = self.page.first_class(LOADING_SCREEN_CLASS) {
                    if let Some(el) = self.page.element_mut(screen) {
                        el.style.opacity = Some(0.0);
                    }
                }
            }
            Task::LoadingRemove => {
                if let Some(screen) = self.page.first_class(LOADING_SCREEN_CLASS) {
                    if let Some(el) = self.page.element_mut(screen) {
                        el.style.hidden = true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "./unit/runtime_tests.rs"]
mod runtime_tests;
