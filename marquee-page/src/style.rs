// Inline style values
//
// Only the properties the engine actually animates are modeled. Final
// "revealed" visuals belong to external stylesheets keyed off marker
// classes; inline style carries initial and transition values.

use std::fmt;
use std::time::Duration;

/// Transform applied to an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Explicit `none`, clearing any earlier transform
    None,
    /// Vertical offset in pixels
    TranslateY(f32),
    /// Offset plus uniform scale, used by pointer-follow effects
    Translate { x: f32, y: f32, scale: f32 },
    /// Perspective tilt around both axes with a slight scale
    Tilt {
        rotate_x: f32,
        rotate_y: f32,
        scale: f32,
    },
    /// Uniform scale
    Scale(f32),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::None => write!(f, "none"),
            Transform::TranslateY(y) => write!(f, "translateY({}px)", y),
            Transform::Translate { x, y, scale } => {
                write!(f, "translate({}px, {}px) scale({})", x, y, scale)
            }
            Transform::Tilt {
                rotate_x,
                rotate_y,
                scale,
            } => write!(
                f,
                "perspective(1000px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
                rotate_x,
                rotate_y,
                s = scale
            ),
            Transform::Scale(s) => write!(f, "scale({})", s),
        }
    }
}

/// Timing curve for a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingCurve {
    Ease,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl fmt::Display for TimingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingCurve::Ease => write!(f, "ease"),
            TimingCurve::EaseOut => write!(f, "ease-out"),
            TimingCurve::EaseInOut => write!(f, "ease-in-out"),
            TimingCurve::CubicBezier(a, b, c, d) => {
                write!(f, "cubic-bezier({}, {}, {}, {})", a, b, c, d)
            }
        }
    }
}

/// A transition declaration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub curve: TimingCurve,
}

impl Transition {
    pub fn new(duration: Duration, curve: TimingCurve) -> Self {
        Self { duration, curve }
    }

    /// The entrance curve used across the site
    pub fn entrance(duration: Duration) -> Self {
        Self::new(duration, TimingCurve::CubicBezier(0.4, 0.0, 0.2, 1.0))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all {}ms {}", self.duration.as_millis(), self.curve)
    }
}

/// Inline style owned by an element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    pub opacity: Option<f32>,
    pub transform: Option<Transform>,
    pub transition: Option<Transition>,
    /// Width as a percentage, used by progress bars and scroll indicators
    pub width_percent: Option<f32>,
    /// Cursor border used by the typewriter effect
    pub border_right: Option<String>,
    /// display: none
    pub hidden: bool,
}
