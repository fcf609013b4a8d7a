//! crc-sim: inject single-bit errors into a frame and report how the CRC reacts.

mod config;
mod input_gen;
mod render;

use config::Config;
use crc_sim_core::{analyze_errors_with, DetectionMetrics};
use log::info;

/// Exit status for any failure, argument errors included
const EXIT_FAILURE: i32 = 1;

fn run(config: &Config) -> crc_sim_core::Result<()> {
    let report = analyze_errors_with(&config.frame, &config.polynomial, &config.positions, &config.options)?;
    info!(
        "{} of {} requested position(s) injected",
        report.rows.len(),
        config.positions.len()
    );

    render::print_report(&report, config.color);
    if config.print_summary {
        render::print_summary(&DetectionMetrics::from_report(&report), config.color);
    }

    Ok(())
}

fn main() {
    // Initialize logger for RUST_LOG-based debug output
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            std::process::exit(EXIT_FAILURE);
        }
    };

    if !config.color {
        colored::control::set_override(false);
    }
    if config.print_config {
        config.print();
    }

    if let Err(e) = run(&config) {
        eprintln!("error: {e}");
        std::process::exit(EXIT_FAILURE);
    }
}
