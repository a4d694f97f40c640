use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, DEFAULT_TOP};
use crate::scoring::{validate_weights, ScoringWeights};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a weight typed by the user.
fn parse_weight(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(_) => Err("must be a non-negative number".to_string()),
        Err(_) => Err("not a number".to_string()),
    }
}

/// Serialize `config` as YAML and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("MobiFlow Configuration Wizard");
    println!("=============================");
    println!();

    let defaults = ScoringWeights::default();
    let configure_weights =
        prompt_yes_no("Configure scoring weights? (n accepts defaults)", false)?;

    let weights = if configure_weights {
        println!();
        println!("Each criterion is scaled to 0-100 across all candidates, then mixed by weight.");
        println!("Weights are relative: they are rescaled to sum to 1. Use 0 to ignore a criterion.");
        loop {
            let mut weights = ScoringWeights::new();
            for (criterion, default) in defaults.iter() {
                let weight = loop {
                    let input = prompt_with_default(criterion, &default.to_string())?;
                    match parse_weight(&input) {
                        Ok(v) => break v,
                        Err(e) => println!("  Invalid: {}. Try again.", e),
                    }
                };
                weights.insert(criterion, weight);
            }
            match validate_weights(&weights) {
                Ok(()) => break weights,
                Err(errors) => {
                    for error in errors {
                        println!("  Invalid: {}", error);
                    }
                    println!("  Let's try that again.");
                }
            }
        }
    } else {
        defaults
    };

    println!();
    let top = loop {
        let input =
            prompt_with_default("How many recommendations to show", &DEFAULT_TOP.to_string())?;
        match input.parse::<usize>() {
            Ok(v) if v > 0 => break v,
            _ => println!("  Invalid: must be a positive whole number. Try again."),
        }
    };

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        weights: Some(weights),
        top: Some(top),
        grid: None,
        network: None,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `mobiflow` to get started.");

    Ok(())
}
