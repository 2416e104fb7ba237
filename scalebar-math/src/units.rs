use crate::{FEET_PER_MILE, Length};

/// Measurement system used to label a scale bar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    strum::EnumIter,
)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
    Nautical,
}

impl UnitSystem {
    /// Resolves the default unit system from a locale tag.
    ///
    /// Accepts BCP 47 tags (`en-US`) as well as POSIX locale strings
    /// (`en_US.UTF-8`). US English selects [imperial](Self::Imperial)
    /// units; everything else, including an empty or unparseable tag, is
    /// [metric](Self::Metric). Callers choose where the tag comes from,
    /// typically `LC_MEASUREMENT` or `LANG`.
    #[must_use]
    pub fn from_locale(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default();
        let region =
            parts.find(|part| part.len() == 2 && part.bytes().all(|b| b.is_ascii_alphabetic()));

        if language.eq_ignore_ascii_case("en")
            && region.is_some_and(|region| region.eq_ignore_ascii_case("US"))
        {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    /// Expresses `max` in the largest applicable display unit of this
    /// system, first match wins: miles over feet beyond one mile,
    /// kilometers over meters from one kilometer up, nautical miles over
    /// meters from one nautical mile up.
    ///
    /// The returned value is not yet rounded; see
    /// [`ScaleFigure::select`](crate::ScaleFigure::select).
    #[must_use]
    pub fn subdivision(self, max: Length) -> Subdivision {
        match self {
            Self::Imperial => {
                let feet = max.into_feet();
                if feet > FEET_PER_MILE {
                    Subdivision { value: max.into_miles(), suffix: "mi" }
                } else {
                    Subdivision { value: feet, suffix: "ft" }
                }
            }
            Self::Metric => {
                if max < Length::from_km(1.) {
                    Subdivision { value: max.into_meters(), suffix: "m" }
                } else {
                    Subdivision { value: max.into_km(), suffix: "km" }
                }
            }
            Self::Nautical => {
                if max < Length::from_nm(1.) {
                    Subdivision { value: max.into_meters(), suffix: "m" }
                } else {
                    Subdivision { value: max.into_nm(), suffix: "nm" }
                }
            }
        }
    }
}

/// A distance expressed in the display unit chosen by
/// [`UnitSystem::subdivision`], before nice-number rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivision {
    /// Distance in the display unit.
    pub value:  f64,
    /// Label suffix of the display unit.
    pub suffix: &'static str,
}
