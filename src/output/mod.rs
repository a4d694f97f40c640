pub mod export;
pub mod formatter;

pub use export::{export_csv, export_network, to_csv};
pub use formatter::{
    format_json, format_location_detail, format_score, format_scored_table, format_tsv,
    format_weights, should_use_colors,
};
