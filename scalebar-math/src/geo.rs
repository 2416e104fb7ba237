use crate::Length;

/// Mean Earth radius used for the spherical distance approximation.
pub const EARTH_RADIUS: Length = Length::from_meters(6_371_000.);

/// A geographic position in degrees, latitude positive north and longitude
/// positive east.
///
/// Components must be finite. [`GeoPos::new`] and the serde impl enforce
/// this; code writing the fields directly is responsible for upholding it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GeoPos {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPos {
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidPosition> {
        if lat.is_finite() && lng.is_finite() {
            Ok(Self { lat, lng })
        } else {
            Err(InvalidPosition { lat, lng })
        }
    }

    /// Great-circle distance to `other` by the spherical law of cosines.
    ///
    /// Symmetric in its two endpoints. Identical positions return exactly
    /// zero.
    #[must_use]
    pub fn distance_to(self, other: Self) -> Length {
        if self == other {
            return Length::ZERO;
        }

        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let delta_lng = (other.lng - self.lng).to_radians();
        // The cosine sum may overshoot 1 by rounding when the endpoints
        // nearly coincide, which would turn acos into NaN.
        let a = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * delta_lng.cos()).min(1.);
        Length::from_meters(EARTH_RADIUS.into_meters() * a.acos())
    }
}

impl<'de> serde::Deserialize<'de> for GeoPos {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            lat: f64,
            lng: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.lat, raw.lng).map_err(<D::Error as serde::de::Error>::custom)
    }
}

/// A position with non-finite components was rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("non-finite position ({lat}, {lng})")]
pub struct InvalidPosition {
    pub lat: f64,
    pub lng: f64,
}
