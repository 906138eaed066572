use crate::cli::RunArgs;
use crate::config::PartialExecutorConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use srimrs::core::io::inputs::PreparedInput;
use srimrs::core::simulation::{Simulation, SimulationKind, SimulationOutput, UnsupportedKind};
use srimrs::engine::progress::ProgressReporter;
use srimrs::workflows;
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let kind: SimulationKind = args
        .kind
        .parse()
        .map_err(|e: UnsupportedKind| CliError::Argument(e.to_string()))?;

    if !args.input.is_file() {
        return Err(CliError::Argument(format!(
            "Input deck does not exist: {}",
            args.input.display()
        )));
    }

    let partial_config = PartialExecutorConfig::load(&args.backend)?;
    info!("Merging configuration from file and CLI arguments...");
    let backend = partial_config.merge_with_cli(&args.backend)?;
    info!("Using the {} backend.", backend.name());

    let inputs = match kind {
        SimulationKind::Sr => PreparedInput::sr(&args.input),
        SimulationKind::Trim => PreparedInput::trim(&args.input),
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting {} simulation...", kind);
    let outcome = workflows::run::run(
        &backend,
        Simulation::new(kind, &inputs),
        args.io_dir.as_deref(),
        &reporter,
    )
    .inspect_err(|_| progress_handler.clear_unfinished())?;

    println!("✓ Outputs are in: {}", outcome.io_directory.display());
    for line in summarize(&outcome.output) {
        println!("  {}", line);
    }
    Ok(())
}

fn summarize(output: &SimulationOutput) -> Vec<String> {
    match output {
        SimulationOutput::Sr(results) => vec![format!(
            "SR_OUTPUT.txt ({} lines)",
            results.report.lines().count()
        )],
        SimulationOutput::Trim(results) => results
            .reports
            .iter()
            .map(|(kind, text)| format!("{} ({} lines)", kind, text.lines().count()))
            .collect(),
    }
}
