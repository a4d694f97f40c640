use chrono::Timelike;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use mobiflow::HubError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank a grid over the Dublin sample network (default if no subcommand)
    Sample {
        /// Hour of day (0-23) for bike availability; defaults to the current hour
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(0..24),
            conflicts_with = "network"
        )]
        hour: Option<u32>,

        /// YAML/JSON transport network to use instead of the built-in sample
        #[arg(long)]
        network: Option<PathBuf>,

        /// Rank the five named Dublin sites instead of the candidate grid
        #[arg(long)]
        sites: bool,

        /// Write bike, bus and Luas tables as CSV files into this directory
        #[arg(long, value_name = "DIR")]
        export_network: Option<PathBuf>,
    },
    /// Rank candidate locations read from a YAML or JSON file
    Rank {
        /// Candidate file (.yaml/.yml for YAML, anything else is JSON)
        input: PathBuf,
    },
    /// Show the effective criterion weights after renormalization
    Weights,
    /// Interactively create a config file
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "mobiflow")]
#[command(about = "Recommend mobility hub locations from transport data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-criterion breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/mobiflow/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Number of recommendations to show (0 shows all)
    #[arg(short, long, global = true)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also write the recommendations to this CSV file
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_code(err: &HubError) -> i32 {
    match err {
        HubError::Configuration(_) => EXIT_CONFIG,
        HubError::Input(_) => EXIT_INPUT,
    }
}

fn main() {
    let cli = Cli::parse();
    mobiflow::logging::init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Sample {
        hour: None,
        network: None,
        sites: false,
        export_network: None,
    });
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = mobiflow::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match mobiflow::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate weights at startup
    let weights = config.effective_weights();
    if let Err(errors) = mobiflow::scoring::validate_weights(&weights) {
        eprintln!("Scoring weight errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let candidates = match command {
        Commands::Weights => {
            match mobiflow::HubScorer::new(&weights) {
                Ok(scorer) => println!("{}", mobiflow::output::format_weights(scorer.weights())),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(exit_code(&e));
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Init => unreachable!("handled before config load"),
        Commands::Rank { input } => match mobiflow::input::load_candidates(&input) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        Commands::Sample {
            hour,
            network,
            sites,
            export_network,
        } => {
            let network = match network.or_else(|| config.network.clone()) {
                Some(path) => {
                    if hour.is_some() {
                        tracing::warn!(
                            network = %path.display(),
                            "--hour only applies to the built-in sample network, ignoring it"
                        );
                    }
                    match mobiflow::input::load_network(&path) {
                        Ok(n) => n,
                        Err(e) => {
                            eprintln!("Input error: {:#}", e);
                            std::process::exit(EXIT_INPUT);
                        }
                    }
                }
                None => {
                    let hour = hour.unwrap_or_else(|| chrono::Local::now().hour());
                    tracing::debug!(hour, "using built-in Dublin sample network");
                    mobiflow::network::sample::dublin_network(hour)
                }
            };
            tracing::info!(
                bike_stations = network.bike_stations.len(),
                bus_stops = network.bus_stops.len(),
                luas_stops = network.luas_stops.len(),
                major_bus_hubs = network.bus_stops.iter().filter(|s| s.is_major_hub()).count(),
                "loaded transport network"
            );

            if let Some(dir) = export_network {
                match mobiflow::output::export_network(&dir, &network) {
                    Ok(paths) if cli.verbose => {
                        for path in paths {
                            eprintln!("Exported {}", path.display());
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        eprintln!("Export failed: {:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                }
            }

            if sites {
                mobiflow::network::sample::sample_sites(&network)
            } else {
                match mobiflow::pipeline::grid_candidates(&config.effective_grid(), &network) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(exit_code(&e));
                    }
                }
            }
        }
    };

    let top = cli.top.unwrap_or_else(|| config.effective_top());
    let ranked = match mobiflow::pipeline::recommend(&candidates, &weights, top) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(exit_code(&e));
        }
    };

    let use_colors = !cli.no_color && mobiflow::output::should_use_colors();
    match cli.format {
        OutputFormat::Table if cli.verbose => {
            // Verbose mode: detailed output with per-criterion breakdown
            for (idx, scored) in ranked.iter().enumerate() {
                let detail = mobiflow::output::format_location_detail(scored, use_colors);
                println!("{:>2}. {}", idx + 1, detail);
                println!();
            }
        }
        OutputFormat::Table => {
            println!("{}", mobiflow::output::format_scored_table(&ranked, use_colors));
        }
        OutputFormat::Tsv => {
            println!("{}", mobiflow::output::format_tsv(&ranked));
        }
        OutputFormat::Json => match mobiflow::output::format_json(&ranked) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
        },
    }

    if let Some(path) = cli.export {
        if let Err(e) = mobiflow::output::export_csv(&path, &ranked) {
            eprintln!("Export failed: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
        if cli.verbose {
            eprintln!("Exported {} locations to {}", ranked.len(), path.display());
        }
    }

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Total: {} of {} candidates in {}",
            ranked.len(),
            candidates.len(),
            humantime::format_duration(start_time.elapsed())
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
