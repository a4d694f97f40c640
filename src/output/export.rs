use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::network::{LuasLine, StationStatus, TransportNetwork};
use crate::scoring::ScoredLocation;

pub const BIKES_FILE: &str = "dublin_bikes_data.csv";
pub const BUS_STOPS_FILE: &str = "dublin_bus_stops.csv";
pub const LUAS_FILE: &str = "dublin_luas_stations.csv";

/// Render ranked locations as CSV.
///
/// Fixed columns first, then one `<criterion>_score` column per weighted
/// criterion and one column per annotation key seen in the set.
pub fn to_csv(ranked: &[ScoredLocation]) -> Result<Vec<u8>> {
    let criteria: Vec<&str> = ranked
        .first()
        .map(|s| s.components.iter().map(|c| c.criterion.as_str()).collect())
        .unwrap_or_default();
    let annotation_keys: BTreeSet<&str> = ranked
        .iter()
        .flat_map(|s| s.candidate.annotations.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "rank".to_string(),
        "id".to_string(),
        "name".to_string(),
        "latitude".to_string(),
        "longitude".to_string(),
        "hub_score".to_string(),
    ];
    header.extend(criteria.iter().map(|c| format!("{}_score", c)));
    header.extend(annotation_keys.iter().map(|k| k.to_string()));
    writer.write_record(&header)?;

    for (idx, scored) in ranked.iter().enumerate() {
        let candidate = &scored.candidate;
        let mut record = vec![
            (idx + 1).to_string(),
            candidate.id.clone(),
            candidate.name.clone().unwrap_or_default(),
            candidate.coordinates.latitude.to_string(),
            candidate.coordinates.longitude.to_string(),
            format!("{:.2}", scored.score),
        ];
        record.extend(criteria.iter().map(|c| {
            scored
                .sub_score(c)
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default()
        }));
        record.extend(
            annotation_keys
                .iter()
                .map(|k| candidate.annotations.get(*k).cloned().unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

/// Bike stations with utilization and demand level columns.
pub fn bike_stations_csv(network: &TransportNetwork) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "station_id",
        "name",
        "latitude",
        "longitude",
        "available_bikes",
        "available_stands",
        "total_capacity",
        "status",
        "utilization_rate",
        "demand_indicator",
    ])?;
    for station in &network.bike_stations {
        let status = match station.status {
            StationStatus::Open => "OPEN",
            StationStatus::Closed => "CLOSED",
        };
        writer.write_record([
            station.id.to_string(),
            station.name.clone(),
            station.coordinates.latitude.to_string(),
            station.coordinates.longitude.to_string(),
            station.available_bikes.to_string(),
            station.available_stands.to_string(),
            station.capacity.to_string(),
            status.to_string(),
            format!("{:.3}", station.utilization()),
            station.demand_level().to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

/// Bus stops with route count and major hub columns.
pub fn bus_stops_csv(network: &TransportNetwork) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "stop_id",
        "name",
        "latitude",
        "longitude",
        "routes",
        "route_count",
        "is_major_hub",
    ])?;
    for stop in &network.bus_stops {
        writer.write_record([
            stop.id.clone(),
            stop.name.clone(),
            stop.coordinates.latitude.to_string(),
            stop.coordinates.longitude.to_string(),
            stop.routes.join(" "),
            stop.route_count().to_string(),
            stop.is_major_hub().to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

pub fn luas_stops_csv(network: &TransportNetwork) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["name", "latitude", "longitude", "line", "interchange"])?;
    for stop in &network.luas_stops {
        let line = match stop.line {
            LuasLine::Green => "Green",
            LuasLine::Red => "Red",
        };
        writer.write_record([
            stop.name.clone(),
            stop.coordinates.latitude.to_string(),
            stop.coordinates.longitude.to_string(),
            line.to_string(),
            stop.interchange.to_string(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save CSV to {}", path.display()))?;
    Ok(())
}

/// Write ranked locations to a CSV file atomically
pub fn export_csv(path: &Path, ranked: &[ScoredLocation]) -> Result<()> {
    let bytes = to_csv(ranked)?;
    write_atomic(path, &bytes)?;

    tracing::info!(path = %path.display(), rows = ranked.len(), "exported recommendations");
    Ok(())
}

/// Write the bike, bus and Luas tables into `dir`, creating it if needed.
///
/// Returns the paths written.
pub fn export_network(dir: &Path, network: &TransportNetwork) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let tables = [
        (BIKES_FILE, bike_stations_csv(network)?),
        (BUS_STOPS_FILE, bus_stops_csv(network)?),
        (LUAS_FILE, luas_stops_csv(network)?),
    ];
    let mut written = Vec::with_capacity(tables.len());
    for (name, bytes) in tables {
        let path = dir.join(name);
        write_atomic(&path, &bytes)?;
        written.push(path);
    }

    tracing::info!(
        dir = %dir.display(),
        bike_stations = network.bike_stations.len(),
        bus_stops = network.bus_stops.len(),
        luas_stops = network.luas_stops.len(),
        "exported transport network"
    );
    Ok(written)
}
