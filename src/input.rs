//! Reading candidate and network files supplied by external tooling.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::network::TransportNetwork;
use crate::scoring::CandidateLocation;

/// Files ending in `.yaml`/`.yml` are YAML, everything else is JSON.
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn load<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file at {}", what, path.display()))?;

    if is_yaml(path) {
        serde_saphyr::from_str(&content).with_context(|| {
            format!("Failed to parse {}: invalid YAML in {}", what, path.display())
        })
    } else {
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse {}: invalid JSON in {}", what, path.display())
        })
    }
}

/// Load a list of candidate locations.
pub fn load_candidates(path: &Path) -> Result<Vec<CandidateLocation>> {
    let candidates: Vec<CandidateLocation> = load(path, "candidates")?;
    tracing::debug!(count = candidates.len(), path = %path.display(), "loaded candidates");
    Ok(candidates)
}

/// Load a transport network (bike stations, bus stops, Luas stops).
pub fn load_network(path: &Path) -> Result<TransportNetwork> {
    let network: TransportNetwork = load(path, "network")?;
    tracing::debug!(
        bike_stations = network.bike_stations.len(),
        bus_stops = network.bus_stops.len(),
        luas_stops = network.luas_stops.len(),
        "loaded transport network"
    );
    Ok(network)
}
