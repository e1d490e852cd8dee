// Floating hero particles
//
// Decorative particles appended under the hero container with randomized
// size, position and float-cycle parameters. The float animation itself is
// a stylesheet concern; the parameters are recorded as data attributes.
// Callers pass a seeded RNG, which keeps demo runs and tests repeatable.

use log::debug;
use marquee_page::{Page, Rect};
use rand::Rng;

pub const HOST_CLASS: &str = "hero-particles";
pub const PARTICLE_CLASS: &str = "floating-particle";

pub const DEFAULT_COUNT: usize = 6;

/// Spawn `count` particles under the host container. Returns how many
/// were created; zero when no host exists.
pub fn spawn_particles<R: Rng>(page: &mut Page, rng: &mut R, count: usize) -> usize {
    let Some(host) = page.first_class(HOST_CLASS) else {
        return 0;
    };
    let host_rect = page.element(host).map(|el| el.rect).unwrap_or_default();

    for _ in 0..count {
        let size = rng.gen_range(10.0..30.0);
        let left = host_rect.left + host_rect.width * rng.gen_range(0.0..1.0);
        let top = host_rect.top + host_rect.height * rng.gen_range(0.0..1.0);
        let cycle_secs = 6.0 + rng.gen_range(0.0..4.0);
        let delay_secs = rng.gen_range(0.0..2.0);

        let particle = page.create_with(
            "div",
            &[PARTICLE_CLASS],
            Rect::new(left, top, size, size),
        );
        page.set_attr(particle, "data-float-cycle", format!("{:.2}", cycle_secs));
        page.set_attr(particle, "data-float-delay", format!("{:.2}", delay_secs));
        page.append_child(host, particle);
    }
    debug!("Marquee: spawned {} particles", count);
    count
}
