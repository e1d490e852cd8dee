// Marquee demo driver
//
// Builds a sample landing page, wires the runtime with mock collaborators,
// replays a scripted scroll-and-interaction timeline against the virtual
// clock, and reports what the engine did. `--no-scroll` leaves the page
// alone so the fallback sweep does the revealing.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use marquee_engine::{PageEvent, Runtime, RuntimeOptions};
use marquee_page::{Page, Rect, Viewport};
use marquee_utils::config::{FallbackPolicy, RevealConfig};
use marquee_utils::{PreferenceStore, Theme};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(name = "marquee", about = "Progressive-reveal engine demo", version)]
struct Cli {
    /// Fallback window for the reveal engine (e.g. "2s", "2500ms")
    #[clap(long, default_value = "2500ms")]
    fallback: String,

    /// Delay between staggered group children
    #[clap(long, default_value = "100ms")]
    stagger: String,

    /// How much scripted time to run
    #[clap(long, default_value = "6s")]
    run_for: String,

    /// Skip the scripted scroll timeline and let the fallback sweep reveal
    #[clap(long)]
    no_scroll: bool,

    /// Seed for particle placement
    #[clap(long, default_value_t = 7)]
    seed: u64,

    /// Preference file for the theme choice (in-memory when omitted)
    #[clap(long)]
    prefs: Option<PathBuf>,

    /// Start from a dark system color-scheme preference
    #[clap(long)]
    dark: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let fallback = parse_duration(&cli.fallback).context("invalid --fallback")?;
    let stagger = parse_duration(&cli.stagger).context("invalid --stagger")?;
    let run_for = parse_duration(&cli.run_for).context("invalid --run-for")?;

    let options = RuntimeOptions {
        reveal: RevealConfig::default()
            .with_stagger_interval(stagger)
            .with_fallback(FallbackPolicy::new(fallback)),
        particle_seed: cli.seed,
        system_theme: if cli.dark { Theme::Dark } else { Theme::Light },
        ..RuntimeOptions::default()
    };
    let prefs = match &cli.prefs {
        Some(path) => PreferenceStore::open(path),
        None => PreferenceStore::in_memory(),
    };

    let (page, demo) = demo_page();
    let mut runtime = Runtime::new(
        page,
        Viewport::new(800.0, 3600.0),
        prefs,
        Box::new(marquee_engine::collaborators::MockEndpoint::new("newsletter")),
        Box::new(marquee_engine::collaborators::MockGateway::new()),
        options,
    );

    let report = runtime.init().context("initializing page")?;
    info!("page initialized: {}", report);

    if !cli.no_scroll {
        replay_timeline(&mut runtime, &demo, run_for);
    } else {
        runtime.advance_by(run_for);
    }

    print_summary(&runtime, &demo);
    Ok(())
}

fn parse_duration(raw: &str) -> Result<Duration> {
    humantime::parse_duration(raw).with_context(|| format!("cannot parse duration {:?}", raw))
}

/// Handles the demo page's interesting element ids
struct DemoIds {
    headline: marquee_page::ElementId,
    counters: Vec<marquee_page::ElementId>,
    email_input: marquee_page::ElementId,
    newsletter: marquee_page::ElementId,
    donate_option: marquee_page::ElementId,
    donor_name: marquee_page::ElementId,
    donor_email: marquee_page::ElementId,
    donation_form: marquee_page::ElementId,
}

/// A landing page shaped like the marketing site: hero, stats, mission
/// grid, progress bars, newsletter and donation forms.
fn demo_page() -> (Page, DemoIds) {
    let mut page = Page::new();
    let root = page.root();

    page.create_with("div", &["loading-screen"], Rect::new(0.0, 0.0, 1200.0, 800.0));

    let navbar = page.create_with("nav", &["navbar"], Rect::new(0.0, 0.0, 1200.0, 60.0));
    let menu = page.create_with("ul", &["nav-menu"], Rect::default());
    page.append_child(navbar, menu);
    page.append_child(root, navbar);
    page.create_with("div", &["scroll-indicator"], Rect::new(0.0, 60.0, 0.0, 4.0));
    page.create_with("button", &["back-to-top"], Rect::default());

    page.create_with("div", &["hero-background"], Rect::new(0.0, 0.0, 1200.0, 800.0));
    page.create_with("div", &["hero-particles"], Rect::new(0.0, 0.0, 1200.0, 800.0));
    let headline = page.create_with("h1", &["typewriter"], Rect::new(0.0, 120.0, 900.0, 90.0));
    page.set_text(headline, "Every voice deserves a stage");

    let mut counters = Vec::new();
    for (i, target) in ["12500", "340", "48"].iter().enumerate() {
        let counter = page.create_with(
            "span",
            &["scroll-counter"],
            Rect::new(80.0 + 360.0 * i as f32, 950.0, 240.0, 48.0),
        );
        page.set_attr(counter, "data-target", *target);
        counters.push(counter);
    }

    for top in [1500.0, 1750.0] {
        page.create_with("p", &["scroll-reveal"], Rect::new(0.0, top, 900.0, 120.0));
    }

    let grid = page.create_with("div", &["stagger-grid"], Rect::new(0.0, 2100.0, 1200.0, 360.0));
    for i in 0..4 {
        let card = page.create_with(
            "div",
            &["mission-item", "btn"],
            Rect::new(20.0 + 290.0 * i as f32, 2120.0, 270.0, 320.0),
        );
        page.append_child(grid, card);
    }

    for (i, pct) in ["85", "60"].iter().enumerate() {
        let bar = page.create_with(
            "div",
            &["progress-bar"],
            Rect::new(0.0, 2600.0 + 60.0 * i as f32, 700.0, 18.0),
        );
        page.set_attr(bar, "data-percentage", *pct);
    }

    let newsletter = page.create_with("form", &["ajax-form"], Rect::new(0.0, 3000.0, 700.0, 140.0));
    page.set_attr(newsletter, "action", "/newsletter-subscribe/");
    page.set_attr(newsletter, "data-success-message", "Thank you for subscribing!");
    let group = page.create("div");
    page.append_child(newsletter, group);
    let email_input = page.create("input");
    page.set_attr(email_input, "name", "email");
    page.set_attr(email_input, "type", "email");
    page.set_attr(email_input, "required", "");
    page.append_child(group, email_input);
    let csrf = page.create("input");
    page.set_attr(csrf, "name", "csrfmiddlewaretoken");
    page.set_value(csrf, "demo-token");
    page.append_child(newsletter, csrf);
    let subscribe = page.create("button");
    page.set_text(subscribe, "Subscribe");
    page.append_child(newsletter, subscribe);

    let donation_form = page.create_with(
        "form",
        &["donation-form"],
        Rect::new(0.0, 3250.0, 700.0, 320.0),
    );
    let donate_option = page.create_with("div", &["amount-option"], Rect::default());
    page.set_attr(donate_option, "data-amount", "100");
    page.append_child(donation_form, donate_option);
    let donor_name = page.create_with("input", &["donor-name"], Rect::default());
    let donor_email = page.create_with("input", &["donor-email"], Rect::default());
    page.append_child(donation_form, donor_name);
    page.append_child(donation_form, donor_email);
    for class in ["selected-amount", "summary-amount", "summary-frequency", "summary-total", "impact-description"] {
        let display = page.create_with("span", &[class], Rect::default());
        page.append_child(donation_form, display);
    }
    let donate_button = page.create_with("button", &["donate-btn"], Rect::default());
    page.set_text(donate_button, "Complete Donation");
    page.append_child(donation_form, donate_button);

    let ids = DemoIds {
        headline,
        counters,
        email_input,
        newsletter,
        donate_option,
        donor_name,
        donor_email,
        donation_form,
    };
    (page, ids)
}

/// Scroll down the page in steps, subscribe to the newsletter, and make a
/// donation, all on the virtual clock.
fn replay_timeline(runtime: &mut Runtime, demo: &DemoIds, run_for: Duration) {
    let steps: &[(u64, f32)] = &[
        (300, 250.0),
        (800, 700.0),
        (1300, 1200.0),
        (1800, 1700.0),
        (2300, 2200.0),
        (2800, 2700.0),
        (3300, 3200.0),
    ];
    for (at_ms, y) in steps {
        runtime.advance_to(marquee_engine::Moment::from_millis(*at_ms));
        runtime.handle(PageEvent::Scroll { y: *y });
    }

    runtime.advance_by(Duration::from_millis(200));
    runtime.handle(PageEvent::Input {
        element: demo.email_input,
        value: "reader@example.org".to_string(),
    });
    runtime.handle(PageEvent::Submit {
        form: demo.newsletter,
    });

    runtime.handle(PageEvent::Click {
        element: demo.donate_option,
        x: 0.0,
        y: 0.0,
    });
    runtime.handle(PageEvent::Input {
        element: demo.donor_name,
        value: "Demo Donor".to_string(),
    });
    runtime.handle(PageEvent::Input {
        element: demo.donor_email,
        value: "donor@example.org".to_string(),
    });
    runtime.handle(PageEvent::Submit {
        form: demo.donation_form,
    });

    let end = marquee_engine::Moment::from_millis(run_for.as_millis() as u64);
    runtime.advance_to(end);
}

fn print_summary(runtime: &Runtime, demo: &DemoIds) {
    println!("— marquee run summary —");
    println!(
        "revealed {}/{} tracked elements",
        runtime.revealed_count(),
        runtime.tracked_count()
    );
    println!("headline: {:?}", runtime.page().text(demo.headline));
    for counter in &demo.counters {
        println!(
            "counter {} shows {:?} (target {})",
            counter,
            runtime.page().text(*counter),
            runtime.page().attr(*counter, "data-target").unwrap_or("?")
        );
    }
    println!(
        "scroll position {:.0} ({:.0}% of document)",
        runtime.viewport().scroll_y,
        runtime.viewport().scroll_percent()
    );
    match runtime.page().location() {
        Some(url) => println!("redirected to {}", url),
        None => println!("no redirect occurred"),
    }
}
