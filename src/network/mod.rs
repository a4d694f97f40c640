pub mod features;
pub mod grid;
pub mod sample;
pub mod types;

pub use features::{derive_candidate, derive_candidates, NEAREST_BUS, NEAREST_LUAS};
pub use grid::{GridConfig, GridPoint};
pub use types::{
    nearest, BikeStation, BusStop, DemandLevel, LuasLine, LuasStop, Proximity, StationStatus,
    TransportNetwork, TransportNode,
};
