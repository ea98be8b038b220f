// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple effect parameters, validated at construction.

use core::fmt;
use core::time::Duration;

use kurbo::Size;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::origin::OriginSpec;

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Default initial opacity.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Final radius of the wave.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum RadiusSpec {
    /// The larger of the container's width and height.
    #[default]
    Auto,
    /// A fixed radius in logical pixels.
    Fixed(f64),
}

impl RadiusSpec {
    /// Final radius for a container of the given size.
    pub fn max_radius(self, size: Size) -> f64 {
        match self {
            Self::Auto => size.width.max(size.height),
            Self::Fixed(radius) => radius,
        }
    }
}

/// Reason a [`RippleConfig`] was rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The duration was zero.
    ZeroDuration,
    /// A fixed radius was not a positive finite number.
    InvalidRadius(f64),
    /// The alpha was outside `[0, 1]` or not finite.
    AlphaOutOfRange(f64),
    /// The color string could not be parsed as a CSS color.
    InvalidColor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDuration => f.write_str("ripple duration must be greater than zero"),
            Self::InvalidRadius(r) => {
                write!(f, "ripple radius must be positive and finite, got {r}")
            }
            Self::AlphaOutOfRange(a) => {
                write!(f, "ripple alpha must be within [0, 1], got {a}")
            }
            Self::InvalidColor => f.write_str("ripple color is not a valid CSS color"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated ripple parameters.
///
/// Build one with [`RippleConfig::builder`]; [`RippleConfig::default`] gives the
/// stock effect (500 ms, white, centered on the tap, auto radius, 0.3 alpha).
#[derive(Copy, Clone, Debug)]
pub struct RippleConfig {
    duration: Duration,
    color: Color,
    origin: OriginSpec,
    radius: RadiusSpec,
    alpha: f64,
    disabled: Option<bool>,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            color: Color::WHITE,
            origin: OriginSpec::AUTO,
            radius: RadiusSpec::Auto,
            alpha: DEFAULT_ALPHA,
            disabled: None,
        }
    }
}

impl RippleConfig {
    /// Start from the defaults.
    pub fn builder() -> RippleConfigBuilder {
        RippleConfigBuilder {
            config: Self::default(),
            error: None,
        }
    }

    /// Animation length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Animation length in milliseconds.
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    /// Fill color before opacity is applied.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Wave center.
    pub fn origin(&self) -> OriginSpec {
        self.origin
    }

    /// Final radius.
    pub fn radius(&self) -> RadiusSpec {
        self.radius
    }

    /// Initial opacity.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Explicit disabled override; `None` defers to the container.
    pub fn disabled(&self) -> Option<bool> {
        self.disabled
    }

    /// Disabled state given the container's own flag.
    pub fn is_disabled(&self, container_disabled: impl FnOnce() -> bool) -> bool {
        self.disabled.unwrap_or_else(container_disabled)
    }
}

/// Builder for [`RippleConfig`].
///
/// ```
/// use core::time::Duration;
/// use understory_ripple::config::{RadiusSpec, RippleConfig};
///
/// let config = RippleConfig::builder()
///     .duration(Duration::from_millis(800))
///     .color_str("#2196f3")
///     .origin("center")
///     .radius(RadiusSpec::Fixed(64.0))
///     .alpha(0.5)
///     .build()
///     .unwrap();
/// assert_eq!(config.alpha(), 0.5);
///
/// assert!(RippleConfig::builder().duration(Duration::ZERO).build().is_err());
/// ```
#[derive(Copy, Clone, Debug)]
pub struct RippleConfigBuilder {
    config: RippleConfig,
    error: Option<ConfigError>,
}

impl RippleConfigBuilder {
    /// Animation length. Must be non-zero.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = duration;
        self
    }

    /// Fill color.
    pub fn color(mut self, color: Color) -> Self {
        self.config.color = color;
        self
    }

    /// Fill color as a CSS color string such as `"#fff"` or `"rgb(0 0 0 / 50%)"`.
    pub fn color_str(mut self, color: &str) -> Self {
        match parse_color(color) {
            Ok(parsed) => self.config.color = parsed.to_alpha_color::<Srgb>(),
            Err(_) => {
                self.error.get_or_insert(ConfigError::InvalidColor);
            }
        }
        self
    }

    /// Wave center as an `"x y"` origin string; see [`origin`](crate::origin).
    pub fn origin(mut self, origin: &str) -> Self {
        self.config.origin = OriginSpec::parse(origin);
        self
    }

    /// Wave center as a parsed origin.
    pub fn origin_spec(mut self, origin: OriginSpec) -> Self {
        self.config.origin = origin;
        self
    }

    /// Final radius.
    pub fn radius(mut self, radius: RadiusSpec) -> Self {
        self.config.radius = radius;
        self
    }

    /// Initial opacity in `[0, 1]`.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Explicit disabled override; `None` inherits from the container.
    pub fn disabled(mut self, disabled: Option<bool>) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<RippleConfig, ConfigError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let config = self.config;
        if config.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if let RadiusSpec::Fixed(r) = config.radius
            && !(r.is_finite() && r > 0.0)
        {
            return Err(ConfigError::InvalidRadius(r));
        }
        if !(0.0..=1.0).contains(&config.alpha) {
            return Err(ConfigError::AlphaOutOfRange(config.alpha));
        }
        Ok(config)
    }
}
