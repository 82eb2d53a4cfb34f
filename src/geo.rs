//! Geographic distance

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Create a new coordinate pair.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Pair up optional latitude/longitude columns; both must be present.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self::new(latitude?, longitude?))
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points using the haversine formula.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat_from = from.latitude.to_radians();
    let lat_to = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Search radius in whole kilometres, kept within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct SearchRadius(u32);

impl SearchRadius {
    /// Smallest radius a shopper can pick.
    pub const MIN_KM: u32 = 1;

    /// Largest radius a shopper can pick.
    pub const MAX_KM: u32 = 100;

    /// Radius used when none is chosen.
    pub const DEFAULT_KM: u32 = 50;

    /// Create a radius, clamping into the allowed range.
    pub fn new(km: u32) -> Self {
        Self(km.clamp(Self::MIN_KM, Self::MAX_KM))
    }

    /// Radius in kilometres.
    pub fn km(self) -> u32 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(Self::DEFAULT_KM)
    }
}

impl From<u32> for SearchRadius {
    fn from(km: u32) -> Self {
        Self::new(km)
    }
}

impl From<SearchRadius> for u32 {
    fn from(radius: SearchRadius) -> Self {
        radius.0
    }
}

/// Whether a store lies within `radius` of the shopper.
///
/// Missing coordinates on either side always pass.
pub fn within_radius(
    shopper: Option<Coordinates>,
    store: Option<Coordinates>,
    radius: SearchRadius,
) -> bool {
    match (shopper, store) {
        (Some(shopper), Some(store)) => haversine_km(shopper, store) <= f64::from(radius.km()),
        _ => true,
    }
}
