// Typed animation configuration
//
// The engine refuses stringly-typed tuning knobs: every registration takes
// one of these records, validated up front. Runtime attribute parsing
// (attrs.rs) never errors; configuration mistakes made in code do.

use std::fmt;
use std::time::Duration;

/// How long the engine waits before force-revealing elements whose
/// visibility observation never fired.
///
/// One policy is shared by every registration. Observed behavior in the
/// wild used windows between 2 and 3 seconds; 2500ms is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPolicy {
    pub window: Duration,
}

impl FallbackPolicy {
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(2500);

    pub fn new(window: Duration) -> Self {
        Self { window }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }
}

/// Configuration for one reveal registration (a set of standalone elements
/// or a container group sharing one observation).
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Fraction of the element that must be inside the viewport before it
    /// counts as intersecting (0, 1].
    pub threshold: f32,

    /// Pixels shaved off the bottom of the viewport, so reveals trigger
    /// slightly before the element fully enters.
    pub root_margin_bottom: f32,

    /// Initial vertical offset applied to hidden elements, in pixels.
    pub hidden_offset: f32,

    /// Duration of the entrance transition.
    pub transition: Duration,

    /// Per-child delay when revealing a container group's children.
    pub stagger_interval: Duration,

    /// Liveness fallback shared by the registration.
    pub fallback: FallbackPolicy,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: 50.0,
            hidden_offset: 50.0,
            transition: Duration::from_millis(800),
            stagger_interval: Duration::from_millis(100),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl RevealConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_stagger_interval(mut self, interval: Duration) -> Self {
        self.stagger_interval = interval;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Check the record before the engine accepts it.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        if self.root_margin_bottom < 0.0 {
            return Err(ConfigError::NegativeMargin(self.root_margin_bottom));
        }
        if self.fallback.window.is_zero() {
            return Err(ConfigError::ZeroFallbackWindow);
        }
        Ok(())
    }
}

/// Defaults applied when a counter element carries no usable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDefaults {
    pub duration: Duration,
}

impl Default for CounterDefaults {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(2000),
        }
    }
}

/// Errors produced by registration-time validation
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Intersection threshold outside (0, 1]
    ThresholdOutOfRange(f32),
    /// Root margin must not be negative
    NegativeMargin(f32),
    /// A zero fallback window would force-reveal everything immediately
    ZeroFallbackWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(t) => {
                write!(f, "intersection threshold {} outside (0, 1]", t)
            }
            Self::NegativeMargin(m) => write!(f, "negative root margin: {}", m),
            Self::ZeroFallbackWindow => write!(f, "fallback window must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;
