//! Search command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use qff_finder::{
    HISTOGRAM_FILENAME, SearchDriver, SearchReport, draw_circuit, render_histogram_png,
};

use super::common::{
    create_spinner, directory, load_config, print_header, print_info, print_result,
    print_section, print_success,
};

/// Options of `qff search`.
pub struct SearchArgs {
    pub name: String,
    pub seed: Option<u64>,
    pub shots: Option<u32>,
    pub histogram: Option<PathBuf>,
    pub show_circuit: bool,
    pub fold: usize,
    pub json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a SearchReport,
    probability_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    circuit_diagram: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram: Option<String>,
}

/// Execute the search command.
pub async fn execute(config_path: Option<&Path>, args: SearchArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(seed) = args.seed {
        config.search.seed = Some(seed);
    }
    if let Some(shots) = args.shots {
        config.search.shots = shots;
    }
    config.validate()?;

    let directory = directory(config.search.seed);
    let driver = SearchDriver::with_simulator(config.search.clone());

    if !args.json {
        print_header("Quantum Friend Finder with Grover's Algorithm");
        print_info(&format!(
            "Using Grover's quantum search among {} possibilities",
            directory.len()
        ));
    }

    let spinner =
        (!args.json).then(|| create_spinner(&format!("🔎 Searching for `{}`...", args.name)));
    let outcome = driver.run(&directory, &args.name).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let outcome = outcome?;

    let report = SearchReport::from_outcome(&outcome, config.search.top_k);
    let diagram = args
        .show_circuit
        .then(|| draw_circuit(&outcome.circuit, args.fold));

    let histogram = match &args.histogram {
        Some(path) => Some(write_histogram(path, &report)?),
        None => None,
    };

    if args.json {
        let output = JsonOutput {
            report: &report,
            probability_lines: report.probability_lines(),
            circuit_diagram: diagram.as_deref(),
            histogram: histogram.as_ref().map(|p| p.display().to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_section(&format!("Top {} Most Probable States", report.top.len()));
    for state in &report.top {
        let bar = "█".repeat((state.probability * 100.0 / 2.0).round() as usize);
        let label = if state.state == report.target_bin {
            style(&state.state).cyan().bold()
        } else {
            style(&state.state).cyan()
        };
        println!("  {}: {:>5} {}", label, state.count, style(bar).green());
    }

    print_section("Probability of Each State:");
    for line in report.probability_lines() {
        println!("  {line}");
    }

    print_section("Result");
    print_result("Friend", &report.friend);
    print_result("Phone Number", &report.phone);
    print_result("Target Binary Index", &report.target_bin);
    print_result(
        "Shots / iterations",
        format!("{} / {}", report.total_shots, report.iterations),
    );
    print_result(
        "Transpiled",
        format!(
            "{} → {} ops, depth {} → {}",
            report.stats.ops_before,
            report.stats.ops_after,
            report.stats.depth_before,
            report.stats.depth_after
        ),
    );
    print_result("Time", format!("{} ms", report.elapsed_ms));

    if let Some(diagram) = &diagram {
        print_section("Quantum Circuit Diagram");
        println!("{diagram}");
    }

    println!();
    if report.found {
        print_success(&format!(
            "Found {} at index {}",
            report.friend, report.target_bin
        ));
    } else {
        print_info("The target was not the most frequent outcome this time");
    }

    if let Some(path) = histogram {
        print_success(&format!("Saved histogram to {}", path.display()));
    }

    Ok(())
}

/// Write the chart to `path`, or to `path/top10_histogram.png` for a directory.
fn write_histogram(path: &Path, report: &SearchReport) -> Result<PathBuf> {
    let path = if path.is_dir() {
        path.join(HISTOGRAM_FILENAME)
    } else {
        path.to_path_buf()
    };
    let png = render_histogram_png(&report.top)?;
    fs::write(&path, png)
        .with_context(|| format!("Failed to write histogram: {}", path.display()))?;
    Ok(path)
}
