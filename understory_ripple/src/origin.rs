// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Origin resolution: turn a CSS-like `"x y"` anchor into container coordinates.
//!
//! Each axis token is one of:
//!
//! - a bare number of pixels (`"24"`),
//! - a percentage of the container extent on that axis (`"50%"`),
//! - a keyword: `top`/`left` (0), `right`/`bottom` (100%), `center` (50%),
//! - anything else, which falls back to a leading-number parse (`"12px"` is 12)
//!   and otherwise to NaN.
//!
//! NaN means "follow the pointer on this axis": the ripple is centered on the tap
//! coordinate for that axis. The sentinel survives resolution untouched and is
//! only replaced in [`OriginSpec::anchor`].
//!
//! ```
//! use understory_ripple::origin::resolve;
//!
//! assert_eq!(resolve("50%", 200.0), 100.0);
//! assert_eq!(resolve("top", 300.0), 0.0);
//! assert_eq!(resolve("center", 100.0), 50.0);
//! assert!(resolve("auto", 300.0).is_nan());
//! ```

use kurbo::{Point, Size};

/// Resolve one axis token against the container extent on that axis.
///
/// Returns NaN for tokens with no numeric reading, such as `"auto"`.
pub fn resolve(token: &str, size: f64) -> f64 {
    OriginAxis::parse(token).resolve(size)
}

/// One parsed axis of an origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OriginAxis {
    value: f64,
    percent: bool,
}

impl OriginAxis {
    /// Follow the pointer on this axis.
    pub const AUTO: Self = Self {
        value: f64::NAN,
        percent: false,
    };

    /// Parse an axis token. Never fails.
    pub fn parse(token: &str) -> Self {
        let token = match token {
            "top" | "left" => "0",
            "right" | "bottom" => "100%",
            "center" => "50%",
            other => other,
        };
        Self {
            value: parse_float_prefix(token),
            percent: token.ends_with('%'),
        }
    }

    /// Fixed pixel offset.
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            percent: false,
        }
    }

    /// Percentage of the container extent.
    pub const fn percent(value: f64) -> Self {
        Self {
            value,
            percent: true,
        }
    }

    /// Returns `true` if this axis follows the pointer.
    pub fn is_auto(&self) -> bool {
        self.value.is_nan()
    }

    /// Resolve against the container extent on this axis.
    pub fn resolve(&self, size: f64) -> f64 {
        if self.percent {
            self.value * (size / 100.0)
        } else {
            self.value
        }
    }
}

/// Two-axis ripple origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OriginSpec {
    /// Horizontal axis.
    pub x: OriginAxis,
    /// Vertical axis.
    pub y: OriginAxis,
}

impl Default for OriginSpec {
    fn default() -> Self {
        Self::AUTO
    }
}

impl OriginSpec {
    /// Center on the tap point on both axes.
    pub const AUTO: Self = Self {
        x: OriginAxis::AUTO,
        y: OriginAxis::AUTO,
    };

    /// Parse a whitespace separated `"x y"` pair. Missing tokens are `auto`.
    ///
    /// ```
    /// use kurbo::Size;
    /// use understory_ripple::origin::OriginSpec;
    ///
    /// let origin = OriginSpec::parse("right 25%");
    /// assert_eq!(origin.resolve(Size::new(200.0, 400.0)), (200.0, 100.0));
    /// ```
    pub fn parse(spec: &str) -> Self {
        let mut tokens = spec.split_whitespace();
        let x = tokens.next().map_or(OriginAxis::AUTO, OriginAxis::parse);
        let y = tokens.next().map_or(OriginAxis::AUTO, OriginAxis::parse);
        Self { x, y }
    }

    /// Resolve both axes; either may be NaN.
    pub fn resolve(&self, size: Size) -> (f64, f64) {
        (self.x.resolve(size.width), self.y.resolve(size.height))
    }

    /// Resolved origin with NaN axes taken from `trigger`.
    pub fn anchor(&self, size: Size, trigger: Point) -> Point {
        let (x, y) = self.resolve(size);
        anchor_point(Point::new(x, y), trigger)
    }
}

/// Replace NaN axes of `origin` with the matching axis of `trigger`.
pub fn anchor_point(origin: Point, trigger: Point) -> Point {
    Point::new(
        if origin.x.is_nan() { trigger.x } else { origin.x },
        if origin.y.is_nan() { trigger.y } else { origin.y },
    )
}

/// Parse the longest leading decimal number, the way `parseFloat` does.
fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(resolve("top", 300.0), 0.0);
        assert_eq!(resolve("left", 300.0), 0.0);
        assert_eq!(resolve("right", 300.0), 300.0);
        assert_eq!(resolve("bottom", 200.0), 200.0);
        assert_eq!(resolve("center", 100.0), 50.0);
    }

    #[test]
    fn percentages_scale_with_size() {
        assert_eq!(resolve("50%", 200.0), 100.0);
        assert_eq!(resolve("0%", 200.0), 0.0);
        assert_eq!(resolve("150%", 200.0), 300.0);
        assert_eq!(resolve("12.5%", 400.0), 50.0);
    }

    #[test]
    fn numbers_are_verbatim() {
        assert_eq!(resolve("24", 1000.0), 24.0);
        assert_eq!(resolve("-4", 1000.0), -4.0);
        assert_eq!(resolve("1.5", 1000.0), 1.5);
        assert_eq!(resolve("1e2", 1000.0), 100.0);
    }

    #[test]
    fn leading_number_is_used_for_malformed_tokens() {
        assert_eq!(resolve("12px", 1000.0), 12.0);
        assert_eq!(resolve("7.", 1000.0), 7.0);
        assert_eq!(resolve(".5", 1000.0), 0.5);
        assert_eq!(resolve("3e", 1000.0), 3.0);
    }

    #[test]
    fn non_numeric_tokens_are_nan() {
        assert!(resolve("auto", 300.0).is_nan());
        assert!(resolve("", 300.0).is_nan());
        assert!(resolve("middle", 300.0).is_nan());
        assert!(resolve("-", 300.0).is_nan());
        assert!(resolve(".", 300.0).is_nan());
        assert!(resolve("%", 300.0).is_nan());
    }

    #[test]
    fn infinity_follows_parse_float() {
        assert_eq!(resolve("Infinity", 1.0), f64::INFINITY);
        assert_eq!(resolve("-Infinity", 1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!(resolve("Center", 100.0).is_nan());
    }

    #[test]
    fn spec_defaults_to_auto() {
        let origin = OriginSpec::default();
        assert!(origin.x.is_auto());
        assert!(origin.y.is_auto());
        let origin = OriginSpec::parse("");
        assert!(origin.x.is_auto());
        assert!(origin.y.is_auto());
    }

    #[test]
    fn single_token_leaves_second_axis_auto() {
        let origin = OriginSpec::parse("center");
        let (x, y) = origin.resolve(Size::new(100.0, 200.0));
        assert_eq!(x, 50.0);
        assert!(y.is_nan());
    }

    #[test]
    fn extra_whitespace_between_tokens() {
        let origin = OriginSpec::parse("  left \t bottom  ");
        assert_eq!(origin.resolve(Size::new(100.0, 200.0)), (0.0, 200.0));
    }

    #[test]
    fn anchor_takes_nan_axes_from_trigger() {
        let size = Size::new(200.0, 100.0);
        let trigger = Point::new(33.0, 44.0);
        assert_eq!(OriginSpec::AUTO.anchor(size, trigger), trigger);
        assert_eq!(
            OriginSpec::parse("center auto").anchor(size, trigger),
            Point::new(100.0, 44.0)
        );
        assert_eq!(
            OriginSpec::parse("auto 0").anchor(size, trigger),
            Point::new(33.0, 0.0)
        );
    }

    #[test]
    fn anchor_keeps_zero_origin() {
        // Zero is a real coordinate, not the "follow the pointer" sentinel.
        let origin = OriginSpec::parse("0 0");
        assert_eq!(
            origin.anchor(Size::new(10.0, 10.0), Point::new(5.0, 5.0)),
            Point::ZERO
        );
    }

    #[test]
    fn constructors() {
        assert_eq!(OriginAxis::px(8.0).resolve(100.0), 8.0);
        assert_eq!(OriginAxis::percent(25.0).resolve(100.0), 25.0);
        assert_eq!(OriginAxis::parse("25%"), OriginAxis::percent(25.0));
    }
}
