use crate::{Length, Subdivision, UnitSystem};

/// Rounds `num` down to the largest cartographic step not exceeding it,
/// a value `d * 10^k` with `d` in {1, 2, 3, 5}. This produces the
/// conventional map-scale sequence ..., 0.5, 1, 2, 3, 5, 10, 20, 30, 50,
/// 100, ... and continues through negative magnitudes for inputs below 1.
///
/// `num` must be positive and finite; [`ScaleFigure::select`] guards the
/// degenerate cases before calling this.
#[must_use]
pub fn nice_number(num: f64) -> f64 {
    #[expect(clippy::cast_possible_truncation, reason = "f64 exponents fit i32 comfortably")]
    let magnitude = 10f64.powi(num.log10().floor() as i32);
    let digit = num / magnitude;
    // The quotient lands at or slightly above 10 when log10 rounds down
    // across a power of ten, so the ladder starts there.
    let digit = if digit >= 10. {
        10.
    } else if digit >= 5. {
        5.
    } else if digit >= 3. {
        3.
    } else if digit >= 2. {
        2.
    } else {
        1.
    };
    digit * magnitude
}

/// A computed scale-bar figure: how wide to draw the bar relative to the
/// sampled extent, and what to write on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleFigure {
    /// Fraction of the sampled extent covered by the rounded distance.
    /// Always within `(0, 1]`.
    pub ratio: f64,
    /// Display label, e.g. `5 km`.
    pub label: String,
}

impl ScaleFigure {
    /// Selects the figure to display when the full bar extent spans `max`
    /// of ground distance.
    ///
    /// Returns `None` for degenerate extents (zero, negative or
    /// non-finite), which callers should render as no bar at all.
    #[must_use]
    pub fn select(max: Length, units: UnitSystem) -> Option<Self> {
        if !max.is_finite() || !max.is_positive() {
            return None;
        }

        let Subdivision { value, suffix } = units.subdivision(max);
        let nice = nice_number(value);
        // Rung values reconstructed through the magnitude may overshoot the
        // input by an ulp.
        let ratio = (nice / value).min(1.);
        Some(Self { ratio, label: format!("{} {suffix}", fmt_value(nice)) })
    }
}

fn fmt_value(value: f64) -> String {
    // Sub-unit steps pick up binary-rounding artifacts such as
    // 0.30000000000000004; snap them off before printing.
    let value = if value < 1. { (value * 1e12).round() / 1e12 } else { value };
    format!("{value}")
}
