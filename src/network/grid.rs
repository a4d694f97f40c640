use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Rectangular search area, sampled as a `rows` x `cols` grid of candidates.
///
/// Defaults cover Dublin city centre between the canals.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    #[serde(default = "default_steps")]
    pub rows: u32,
    #[serde(default = "default_steps")]
    pub cols: u32,
}

fn default_steps() -> u32 {
    20
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            north: 53.37,
            south: 53.32,
            east: -6.22,
            west: -6.30,
            rows: default_steps(),
            cols: default_steps(),
        }
    }
}

/// One sampled grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub id: String,
    pub coordinates: Coordinates,
}

impl GridConfig {
    /// Validate the grid. Returns all errors at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if !(self.north.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.west.is_finite())
        {
            errors.push("grid: bounds must be finite".to_string());
        }
        if self.north <= self.south {
            errors.push("grid: north must be greater than south".to_string());
        }
        if self.east <= self.west {
            errors.push("grid: east must be greater than west".to_string());
        }
        if self.rows == 0 || self.cols == 0 {
            errors.push("grid: rows and cols must be at least 1".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Sample the area starting at the south-west corner.
    ///
    /// Point (i, j) sits at `south + i * lat_step`, `west + j * lng_step`
    /// where each step is the span divided by the grid size, so the northern
    /// and eastern edges themselves are never sampled.
    pub fn points(&self) -> Vec<GridPoint> {
        let lat_step = (self.north - self.south) / self.rows as f64;
        let lng_step = (self.east - self.west) / self.cols as f64;

        (0..self.rows)
            .flat_map(|i| {
                (0..self.cols).map(move |j| GridPoint {
                    id: format!("grid-{:02}-{:02}", i, j),
                    coordinates: Coordinates::new(
                        self.south + i as f64 * lat_step,
                        self.west + j as f64 * lng_step,
                    ),
                })
            })
            .collect()
    }
}
