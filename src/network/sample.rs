//! Built-in Dublin sample network.
//!
//! Stations and stops sit at real Dublin locations. Bike availability shifts
//! with the hour of day to mimic commuter flows.

use super::features::derive_candidate;
use super::types::{BikeStation, BusStop, LuasLine, LuasStop, StationStatus, TransportNetwork};
use crate::geo::Coordinates;
use crate::scoring::CandidateLocation;

// (id, name, lat, lng, bikes, stands, capacity)
const BIKE_STATIONS: &[(u32, &str, f64, f64, u32, u32, u32)] = &[
    (1, "Heuston Station", 53.3464, -6.2921, 5, 10, 20),
    (2, "Smithfield", 53.3475, -6.2785, 2, 8, 15),
    (3, "Merrion Square East", 53.3379, -6.2537, 7, 5, 20),
    (4, "Trinity College", 53.3439, -6.2546, 12, 8, 25),
    (5, "Dame Street", 53.3434, -6.2674, 3, 17, 20),
    (6, "IFSC", 53.3498, -6.2398, 8, 12, 20),
    (7, "Grand Canal Dock", 53.3391, -6.2351, 15, 5, 25),
    (8, "St. Stephen's Green", 53.3387, -6.2613, 6, 14, 20),
    (9, "Rathmines", 53.3250, -6.2642, 4, 11, 15),
    (10, "Parnell Square", 53.3527, -6.2648, 9, 11, 20),
    (11, "Drumcondra", 53.3712, -6.2573, 7, 8, 15),
];

const BUS_STOPS: &[(&str, &str, f64, f64, &[&str])] = &[
    ("1001", "Heuston Station", 53.3468, -6.2928, &["25", "26", "67", "69"]),
    ("1002", "Smithfield", 53.3478, -6.2792, &["37", "39", "70"]),
    ("1003", "Trinity College", 53.3442, -6.2540, &["7", "8", "15", "46"]),
    ("1004", "Merrion Square", 53.3382, -6.2534, &["7", "8", "10"]),
    ("1005", "Dame Street", 53.3437, -6.2671, &["15", "16", "49", "54"]),
    ("1006", "IFSC", 53.3501, -6.2395, &["90", "92"]),
    ("1007", "Grand Canal Dock", 53.3394, -6.2348, &["1", "47", "56"]),
    ("1008", "St. Stephen's Green", 53.3390, -6.2610, &["11", "14", "15", "20"]),
    ("1009", "Rathmines", 53.3253, -6.2639, &["14", "15", "83"]),
    ("1010", "Parnell Square", 53.3530, -6.2645, &["1", "7", "11", "13"]),
    ("1011", "Drumcondra", 53.3715, -6.2570, &["1", "7", "11"]),
];

const LUAS_STOPS: &[(&str, f64, f64, LuasLine)] = &[
    ("St. Stephen's Green", 53.3387, -6.2613, LuasLine::Green),
    ("Trinity", 53.3447, -6.2589, LuasLine::Green),
    ("Westmoreland", 53.3450, -6.2589, LuasLine::Green),
    ("Abbey Street", 53.3484, -6.2589, LuasLine::Green),
    ("Heuston", 53.3467, -6.2929, LuasLine::Red),
    ("Museum", 53.3474, -6.2867, LuasLine::Red),
    ("Smithfield", 53.3475, -6.2785, LuasLine::Red),
    ("Four Courts", 53.3467, -6.2743, LuasLine::Red),
];

const LUAS_INTERCHANGES: &[&str] = &["Abbey Street", "Westmoreland"];

// (id, name, lat, lng)
const SAMPLE_SITES: &[(&str, &str, f64, f64)] = &[
    ("smithfield-square", "Smithfield Square", 53.3475, -6.2785),
    ("docklands-central", "Docklands Central", 53.3495, -6.2400),
    ("phoenix-park-gate", "Phoenix Park Gate", 53.3550, -6.3000),
    ("ballsbridge", "Ballsbridge", 53.3300, -6.2300),
    ("rathmines-centre", "Rathmines Centre", 53.3250, -6.2642),
];

/// Multiplier applied to a station's bike count at the given hour.
///
/// Morning rush drains residential stations, evening rush drains the centre.
fn rush_hour_factor(name: &str, hour: u32) -> f64 {
    match hour {
        7..=9 => {
            if name.contains("Rathmines") || name.contains("Drumcondra") {
                0.7
            } else {
                1.2
            }
        }
        17..=19 => {
            if name.contains("Dame") || name.contains("IFSC") {
                0.6
            } else {
                1.1
            }
        }
        _ => 1.0,
    }
}

pub fn bike_stations(hour: u32) -> Vec<BikeStation> {
    BIKE_STATIONS
        .iter()
        .map(|&(id, name, lat, lng, bikes, _stands, capacity)| {
            let adjusted = (bikes as f64 * rush_hour_factor(name, hour)) as u32;
            let available_bikes = adjusted.min(capacity);
            let available_stands = capacity - available_bikes;
            let status = if available_bikes > 0 || available_stands > 0 {
                StationStatus::Open
            } else {
                StationStatus::Closed
            };
            BikeStation {
                id,
                name: name.to_string(),
                coordinates: Coordinates::new(lat, lng),
                available_bikes,
                available_stands,
                capacity,
                status,
            }
        })
        .collect()
}

pub fn bus_stops() -> Vec<BusStop> {
    BUS_STOPS
        .iter()
        .map(|&(id, name, lat, lng, routes)| BusStop {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            routes: routes.iter().map(|r| r.to_string()).collect(),
        })
        .collect()
}

pub fn luas_stops() -> Vec<LuasStop> {
    LUAS_STOPS
        .iter()
        .map(|&(name, lat, lng, line)| LuasStop {
            name: name.to_string(),
            coordinates: Coordinates::new(lat, lng),
            line,
            interchange: LUAS_INTERCHANGES.contains(&name),
        })
        .collect()
}

/// The full sample network with bike availability for `hour` (0-23).
pub fn dublin_network(hour: u32) -> TransportNetwork {
    TransportNetwork {
        bike_stations: bike_stations(hour),
        bus_stops: bus_stops(),
        luas_stops: luas_stops(),
    }
}

/// Named hub sites, with criteria derived from `network`.
pub fn sample_sites(network: &TransportNetwork) -> Vec<CandidateLocation> {
    SAMPLE_SITES
        .iter()
        .map(|&(id, name, lat, lng)| {
            derive_candidate(id, Coordinates::new(lat, lng), network).with_name(name)
        })
        .collect()
}
