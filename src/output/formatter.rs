use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::network::NEAREST_BUS;
use crate::scoring::ScoredLocation;

const NO_RESULTS: &str = "No candidate locations found.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a 0-100 score with one decimal
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

const RANK_WIDTH: usize = 3;
const SCORE_WIDTH: usize = 5;
const COORDS_WIDTH: usize = 17; // "53.3498, -6.2603"
const SEPARATOR: &str = "  ";

/// Columns taken by everything but the label, in characters
fn fixed_width(near: &str) -> usize {
    RANK_WIDTH + 1 + SCORE_WIDTH + SEPARATOR.len() * 2 + COORDS_WIDTH + near.chars().count()
}

/// Format ranked locations as a table with columns: Rank, Score, Coordinates, Label, Nearest bus
/// No headers
/// Rank column: 3 chars (fits "99."), right-aligned
/// Score column: 5 chars (fits "100.0"), right-aligned
pub fn format_scored_table(ranked: &[ScoredLocation], use_colors: bool) -> String {
    if ranked.is_empty() {
        return NO_RESULTS.to_string();
    }

    let term_width = get_terminal_width();
    let separator = SEPARATOR;

    ranked
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let rank_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", format_score(scored.score), width = SCORE_WIDTH);
            let coords = format!(
                "{:<width$}",
                scored.candidate.coordinates.to_string(),
                width = COORDS_WIDTH
            );
            let near = scored
                .candidate
                .annotations
                .get(NEAREST_BUS)
                .map(|n| format!("{}near {}", separator, n))
                .unwrap_or_default();

            let fixed = fixed_width(&near);
            let label = scored.candidate.label();
            let label = match term_width {
                Some(width) if width > fixed + 10 => truncate_label(label, width - fixed),
                // Very narrow terminal, show truncated
                Some(_) => truncate_label(label, 20),
                // No terminal (pipe), don't truncate
                None => label.to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    separator,
                    coords.cyan(),
                    separator,
                    label,
                    near.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}",
                    rank_str, score_str, separator, coords, separator, label, near
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single location with its per-criterion breakdown (for verbose mode)
pub fn format_location_detail(scored: &ScoredLocation, use_colors: bool) -> String {
    let candidate = &scored.candidate;
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("{}  {}", candidate.label().bold(), format_score(scored.score).bold()));
    } else {
        lines.push(format!("{}  {}", candidate.label(), format_score(scored.score)));
    }
    if candidate.name.is_some() {
        lines.push(format!("  Id: {}", candidate.id));
    }
    lines.push(format!("  Location: {}", candidate.coordinates));

    for component in &scored.components {
        let raw = component
            .raw
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string());
        lines.push(format!(
            "  {}: {} -> {:.1} x {:.2} = {:.1}",
            component.criterion,
            raw,
            component.normalized,
            component.weight,
            component.contribution
        ));
    }

    for (key, value) in &candidate.annotations {
        lines.push(format!("  {}: {}", key, value));
    }

    lines.join("\n")
}

/// Format ranked locations as tab-separated values for scripting
/// Columns: rank, score, id, latitude, longitude (no headers, no colors)
pub fn format_tsv(ranked: &[ScoredLocation]) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            format!(
                "{}\t{}\t{}\t{:.6}\t{:.6}",
                idx + 1,
                format_score(scored.score),
                scored.candidate.id,
                scored.candidate.coordinates.latitude,
                scored.candidate.coordinates.longitude
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked locations as a pretty JSON array
pub fn format_json(ranked: &[ScoredLocation]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(ranked)?)
}

/// Format effective weights, one per line, as percentages
pub fn format_weights(weights: &[(String, f64)]) -> String {
    weights
        .iter()
        .map(|(criterion, weight)| format!("{:<24}{:>6.1}%", criterion, weight * 100.0))
        .collect::<Vec<_>>()
        .join("\n")
}
