use serde::{Deserialize, Serialize};

/// Mean earth radius in metres (IUGG).
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlng = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Coordinates::new(53.3498, -6.2603);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_distance_heuston_to_trinity() {
        let heuston = Coordinates::new(53.3464, -6.2921);
        let trinity = Coordinates::new(53.3439, -6.2546);
        let d = heuston.distance_to(&trinity);
        // Roughly 2.5km across the city centre
        assert!((d - 2505.0).abs() < 20.0, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(53.3250, -6.2642);
        let b = Coordinates::new(53.3712, -6.2573);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        let p = Coordinates::new(53.34981, -6.26031);
        assert_eq!(p.to_string(), "53.3498, -6.2603");
    }
}
