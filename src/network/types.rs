use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DemandLevel::High => "High",
            DemandLevel::Medium => "Medium",
            DemandLevel::Low => "Low",
        };
        f.write_str(s)
    }
}

/// A Dublin Bikes docking station.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BikeStation {
    pub id: u32,
    pub name: String,
    pub coordinates: Coordinates,
    pub available_bikes: u32,
    pub available_stands: u32,
    pub capacity: u32,
    pub status: StationStatus,
}

impl BikeStation {
    /// Share of capacity currently holding a bike
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.available_bikes as f64 / self.capacity as f64
        }
    }

    /// Bikes plus free stands
    pub fn availability(&self) -> u32 {
        self.available_bikes + self.available_stands
    }

    pub fn demand_level(&self) -> DemandLevel {
        let rate = self.utilization();
        if rate > 0.8 {
            DemandLevel::High
        } else if rate > 0.5 {
            DemandLevel::Medium
        } else {
            DemandLevel::Low
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct BusStop {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub routes: Vec<String>,
}

impl BusStop {
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_major_hub(&self) -> bool {
        self.route_count() >= 4
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum LuasLine {
    Green,
    Red,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LuasStop {
    pub name: String,
    pub coordinates: Coordinates,
    pub line: LuasLine,
    pub interchange: bool,
}

/// Anything with a name and a position.
pub trait TransportNode {
    fn name(&self) -> &str;
    fn coordinates(&self) -> Coordinates;
}

impl TransportNode for BikeStation {
    fn name(&self) -> &str {
        &self.name
    }
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl TransportNode for BusStop {
    fn name(&self) -> &str {
        &self.name
    }
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl TransportNode for LuasStop {
    fn name(&self) -> &str {
        &self.name
    }
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

/// Nearest node to a point and how far away it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Proximity {
    pub name: String,
    pub distance_m: f64,
}

impl Proximity {
    pub fn within(&self, metres: f64) -> bool {
        self.distance_m <= metres
    }
}

/// Find the closest node to `point`. `None` for an empty slice.
pub fn nearest<T: TransportNode>(point: &Coordinates, nodes: &[T]) -> Option<Proximity> {
    nodes
        .iter()
        .map(|node| (node, point.distance_to(&node.coordinates())))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(node, distance_m)| Proximity {
            name: node.name().to_string(),
            distance_m,
        })
}

/// All transport layers used to derive candidate features.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TransportNetwork {
    #[serde(default)]
    pub bike_stations: Vec<BikeStation>,
    #[serde(default)]
    pub bus_stops: Vec<BusStop>,
    #[serde(default)]
    pub luas_stops: Vec<LuasStop>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(bikes: u32, stands: u32, capacity: u32) -> BikeStation {
        BikeStation {
            id: 1,
            name: "Test".to_string(),
            coordinates: Coordinates::new(53.34, -6.26),
            available_bikes: bikes,
            available_stands: stands,
            capacity,
            status: StationStatus::Open,
        }
    }

    #[test]
    fn test_bike_station_metrics() {
        let s = station(18, 2, 20);
        assert_eq!(s.utilization(), 0.9);
        assert_eq!(s.availability(), 20);
        assert_eq!(s.demand_level(), DemandLevel::High);

        assert_eq!(station(12, 8, 20).demand_level(), DemandLevel::Medium);
        assert_eq!(station(10, 10, 20).demand_level(), DemandLevel::Low);
        assert_eq!(DemandLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_zero_capacity_utilization() {
        assert_eq!(station(0, 0, 0).utilization(), 0.0);
    }

    #[test]
    fn test_major_hub() {
        let mut stop = BusStop {
            id: "1".to_string(),
            name: "Stop".to_string(),
            coordinates: Coordinates::new(53.34, -6.26),
            routes: vec!["7".into(), "8".into(), "10".into()],
        };
        assert!(!stop.is_major_hub());
        stop.routes.push("46".into());
        assert!(stop.is_major_hub());
    }

    #[test]
    fn test_nearest() {
        let stops = vec![
            LuasStop {
                name: "Far".to_string(),
                coordinates: Coordinates::new(53.40, -6.30),
                line: LuasLine::Red,
                interchange: false,
            },
            LuasStop {
                name: "Near".to_string(),
                coordinates: Coordinates::new(53.3451, -6.2589),
                line: LuasLine::Green,
                interchange: true,
            },
        ];
        let found = nearest(&Coordinates::new(53.3450, -6.2589), &stops).unwrap();
        assert_eq!(found.name, "Near");
        assert!(found.within(20.0));
        assert!(nearest::<LuasStop>(&Coordinates::new(53.0, -6.0), &[]).is_none());
    }
}
