//! Turns a transport network into raw criteria for candidate locations.

use super::grid::GridPoint;
use super::types::{nearest, Proximity, TransportNetwork};
use crate::geo::Coordinates;
use crate::scoring::{
    CandidateLocation, ACCESSIBILITY, BIKE_DEMAND, INFRASTRUCTURE_GAP, POPULATION_DENSITY,
    TRANSPORT_CONNECTIVITY,
};

/// Bike stations further away than this do not feed demand.
const DEMAND_RADIUS_M: f64 = 1000.0;

/// Places people already travel to.
const KEY_AMENITIES: &[(&str, f64, f64)] = &[
    ("City Centre", 53.3498, -6.2603),
    ("Temple Bar", 53.3446, -6.2691),
    ("St. Stephen's Green", 53.3387, -6.2613),
];

/// Population density is not measured; all candidates sit in the city centre.
const CITY_CENTRE_POPULATION: f64 = 1.0;

pub const NEAREST_BUS: &str = "nearest_bus";
pub const NEAREST_LUAS: &str = "nearest_luas";

/// Bus and Luas proximity points.
///
/// Bus: 15 within 200m, 10 within 500m, then losing a point per 100m.
/// Luas: 20 within 500m, then 15 losing a point per 100m.
pub fn transport_connectivity(bus: Option<&Proximity>, luas: Option<&Proximity>) -> f64 {
    let bus_points = match bus {
        Some(p) if p.within(200.0) => 15.0,
        Some(p) if p.within(500.0) => 10.0,
        Some(p) => (10.0 - (p.distance_m - 500.0) / 100.0).max(0.0),
        None => 0.0,
    };
    let luas_points = match luas {
        Some(p) if p.within(500.0) => 20.0,
        Some(p) => (15.0 - (p.distance_m - 500.0) / 100.0).max(0.0),
        None => 0.0,
    };
    bus_points + luas_points
}

/// Distance-decayed bike availability around a point, averaged over the
/// stations within 1km.
pub fn bike_demand(point: &Coordinates, network: &TransportNetwork) -> f64 {
    let (total, count) = network
        .bike_stations
        .iter()
        .filter_map(|station| {
            let d = point.distance_to(&station.coordinates);
            (d <= DEMAND_RADIUS_M)
                .then(|| station.availability() as f64 * (1.0 - d / DEMAND_RADIUS_M))
        })
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    total / count.max(1) as f64
}

/// How underserved a point is, 0 (well served) to 1.
///
/// Averages the nearest bike station distance (saturating at 1km) and the
/// nearest bus stop distance (saturating at 500m).
pub fn infrastructure_gap(bike: Option<&Proximity>, bus: Option<&Proximity>) -> f64 {
    let bike_gap = bike.map_or(1.0, |p| (p.distance_m / 1000.0).min(1.0));
    let bus_gap = bus.map_or(1.0, |p| (p.distance_m / 500.0).min(1.0));
    (bike_gap + bus_gap) / 2.0
}

/// Closeness to the nearest key amenity, 1 on top of it and 0 beyond 2km.
pub fn accessibility(point: &Coordinates) -> f64 {
    let closest = KEY_AMENITIES
        .iter()
        .map(|&(_, lat, lng)| point.distance_to(&Coordinates::new(lat, lng)))
        .fold(f64::INFINITY, f64::min);
    (1.0 - closest / 2000.0).max(0.0)
}

fn describe(p: &Proximity) -> String {
    format!("{} ({:.0} m)", p.name, p.distance_m)
}

/// Build a candidate for one point with every criterion filled in.
pub fn derive_candidate(
    id: impl Into<String>,
    point: Coordinates,
    network: &TransportNetwork,
) -> CandidateLocation {
    let bus = nearest(&point, &network.bus_stops);
    let luas = nearest(&point, &network.luas_stops);
    let bike = nearest(&point, &network.bike_stations);

    let mut candidate = CandidateLocation::new(id, point)
        .with_criterion(TRANSPORT_CONNECTIVITY, transport_connectivity(bus.as_ref(), luas.as_ref()))
        .with_criterion(BIKE_DEMAND, bike_demand(&point, network))
        .with_criterion(INFRASTRUCTURE_GAP, infrastructure_gap(bike.as_ref(), bus.as_ref()))
        .with_criterion(ACCESSIBILITY, accessibility(&point))
        .with_criterion(POPULATION_DENSITY, CITY_CENTRE_POPULATION);

    if let Some(ref p) = bus {
        candidate = candidate.with_annotation(NEAREST_BUS, describe(p));
    }
    if let Some(ref p) = luas {
        candidate = candidate.with_annotation(NEAREST_LUAS, describe(p));
    }
    candidate
}

/// Derive candidates for every grid point.
pub fn derive_candidates(
    points: &[GridPoint],
    network: &TransportNetwork,
) -> Vec<CandidateLocation> {
    points
        .iter()
        .map(|p| derive_candidate(p.id.clone(), p.coordinates, network))
        .collect()
}
