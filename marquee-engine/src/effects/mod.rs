// Cosmetic page effects
//
// Independent sub-initializers layered on top of the scheduler: each one
// no-ops when its target elements are absent.

pub mod hover;
pub mod parallax;
pub mod particles;
pub mod progress;
pub mod typewriter;

pub use hover::HoverEffects;
pub use parallax::Parallax;
pub use particles::spawn_particles;
pub use progress::ProgressBars;
pub use typewriter::Typewriter;
