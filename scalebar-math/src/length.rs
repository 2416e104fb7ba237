use std::fmt;

/// Converts meters to feet. Fixed approximation used throughout, not the
/// exact 3.28084.
pub const FEET_PER_METER: f64 = 3.2808;
/// Converts miles to feet.
pub const FEET_PER_MILE: f64 = 5280.;
/// Converts kilometers to meters.
pub const METERS_PER_KM: f64 = 1000.;
/// Converts nautical miles to meters.
pub const METERS_PER_NM: f64 = 1852.;

/// A ground distance. Internal representation is in meters.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, serde::Serialize)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Self = Self(0.);

    #[must_use]
    pub const fn into_meters(self) -> f64 { self.0 }

    #[must_use]
    pub const fn from_meters(meters: f64) -> Self { Self(meters) }

    #[must_use]
    pub const fn into_feet(self) -> f64 { self.0 * FEET_PER_METER }

    #[must_use]
    pub const fn from_feet(feet: f64) -> Self { Self(feet / FEET_PER_METER) }

    #[must_use]
    pub const fn into_miles(self) -> f64 { self.into_feet() / FEET_PER_MILE }

    #[must_use]
    pub const fn from_miles(miles: f64) -> Self { Self::from_feet(miles * FEET_PER_MILE) }

    #[must_use]
    pub const fn into_km(self) -> f64 { self.0 / METERS_PER_KM }

    #[must_use]
    pub const fn from_km(km: f64) -> Self { Self(km * METERS_PER_KM) }

    #[must_use]
    pub const fn into_nm(self) -> f64 { self.0 / METERS_PER_NM }

    #[must_use]
    pub const fn from_nm(nm: f64) -> Self { Self(nm * METERS_PER_NM) }

    #[must_use]
    pub fn is_positive(self) -> bool { self.0 > 0. }

    #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length").field("m", &self.0).finish()
    }
}

impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;

        if !value.is_finite() {
            return Err(<D::Error as serde::de::Error>::custom("non-finite quantity"));
        }

        Ok(Self(value))
    }
}
