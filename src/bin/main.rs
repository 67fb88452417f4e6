use alphabet_corr::{builtin_comparisons, ComparisonReport, RenderOutput, Renderer};
use crossterm::style::Stylize;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &ComparisonReport) {
    let summary = &report.summary;
    let destination = match &report.output {
        RenderOutput::File(path) => path.display().to_string(),
        RenderOutput::Svg(_) => "<svg>".to_string(),
    };
    println!(
        "{} {} vs. {}: ρ={:.3}, p={:.3}, {} pairs -> {}",
        "[ok]".green().bold(),
        summary.source,
        summary.target,
        summary.correlation.statistic,
        summary.correlation.p_value,
        summary.pairs.len(),
        destination.cyan()
    );
    if let Ok(json) = serde_json::to_string(summary) {
        debug!(summary = %json, "Comparison summary");
    }
}

fn main() -> ExitCode {
    init_logging();

    let comparisons = match builtin_comparisons(".") {
        Ok(comparisons) => comparisons,
        Err(e) => {
            error!("Could not load built-in comparisons: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let renderer = Renderer::default();
    let mut failures = 0;
    // Each comparison is independent; a failure must not stop the rest.
    for comparison in &comparisons {
        match comparison.run(&renderer) {
            Ok(report) => print_report(&report),
            Err(e) => {
                failures += 1;
                error!(source = %comparison.source.name, target = %comparison.target.name, "Comparison failed: {}", e);
                println!(
                    "{} {} vs. {}: {}",
                    "[failed]".red().bold(),
                    comparison.source.name,
                    comparison.target.name,
                    e
                );
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
