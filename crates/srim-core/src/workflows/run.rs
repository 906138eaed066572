use crate::core::fs::cwd::with_current_dir;
use crate::core::io::outputs::{SR_OUTPUT_FILE, SrResults, TrimReport, TrimResults};
use crate::core::pipeline::{Generator, Pipeline};
use crate::core::simulation::{Simulation, SimulationKind, SimulationOutput};
use crate::engine::error::ExecutorError;
use crate::engine::executor::Executor;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const TEMP_DIR_PREFIX: &str = "srim-";

/// A finished simulation and the directory holding its inputs and recovered outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub io_directory: PathBuf,
    pub output: SimulationOutput,
}

/// Generates inputs into `io_directory`, runs the pipeline's command, and parses the result.
///
/// Each step runs once, in order, and the first failure is returned unchanged without running
/// the steps after it.
#[instrument(skip_all, name = "pipeline", fields(command = ?pipeline.command))]
pub fn run_pipeline<E, T>(
    executor: &E,
    io_directory: &Path,
    pipeline: Pipeline<'_, T>,
    reporter: &ProgressReporter,
) -> Result<T, ExecutorError>
where
    E: Executor + ?Sized,
{
    let Pipeline {
        generator,
        parser,
        command,
    } = pipeline;

    reporter.report(Progress::PhaseStart {
        name: "Generating inputs",
    });
    info!("Writing input files into {:?}", io_directory);
    match generator {
        Generator::Directed(write) => write(io_directory).map_err(ExecutorError::InputGeneration)?,
        Generator::Ambient(write) => with_current_dir(io_directory, || {
            write().map_err(ExecutorError::InputGeneration)
        })?,
    }
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Running SRIM",
    });
    executor.run_command(io_directory, command)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Parsing outputs",
    });
    let result = parser(io_directory)?;
    reporter.report(Progress::PhaseFinish);

    Ok(result)
}

/// Runs `simulation` with `executor`.
///
/// Without an `io_directory` a fresh temporary directory is created and left in place for the
/// caller. The directory is created if missing; an existing one is reused as is.
#[instrument(skip_all, name = "simulation_run", fields(kind = %simulation.kind()))]
pub fn run<E>(
    executor: &E,
    simulation: Simulation<'_>,
    io_directory: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<RunOutcome, ExecutorError>
where
    E: Executor + ?Sized,
{
    let pipeline = match simulation {
        Simulation::Sr(inputs) => Pipeline::directed(
            move |dir: &Path| inputs.write_inputs(dir),
            move |dir: &Path| {
                let results = SrResults::from_directory(dir)?;
                reporter.report(Progress::Message(format!(
                    "Recovered {} ({} lines)",
                    SR_OUTPUT_FILE,
                    results.report.lines().count()
                )));
                Ok(SimulationOutput::Sr(results))
            },
            SimulationKind::Sr.command(),
        ),
        Simulation::Trim(inputs) => Pipeline::directed(
            move |dir: &Path| inputs.write_inputs(dir),
            move |dir: &Path| {
                let results = TrimResults::from_directory(dir)?;
                reporter.report(Progress::Message(format!(
                    "Recovered {} of {} TRIM reports",
                    results.reports.len(),
                    TrimReport::ALL.len()
                )));
                Ok(SimulationOutput::Trim(results))
            },
            SimulationKind::Trim.command(),
        ),
    };

    let io_directory = match io_directory {
        Some(dir) => dir.to_path_buf(),
        None => tempfile::Builder::new()
            .prefix(TEMP_DIR_PREFIX)
            .tempdir()
            .map_err(ExecutorError::TempDir)?
            .keep(),
    };
    fs::create_dir_all(&io_directory).map_err(|e| ExecutorError::CreateDir {
        path: io_directory.clone(),
        source: e,
    })?;
    info!("Running {} simulation in {:?}", simulation.kind(), &io_directory);

    let output = run_pipeline(executor, &io_directory, pipeline, reporter)?;
    Ok(RunOutcome {
        io_directory,
        output,
    })
}

/// Like [`run`], but for a simulation kind given by name.
///
/// # Errors
///
/// Returns [`ExecutorError::UnsupportedInput`] for an unknown kind, before touching the
/// filesystem or starting any process.
pub fn run_named<E>(
    executor: &E,
    kind: &str,
    inputs: &dyn crate::core::io::inputs::InputWriter,
    io_directory: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<RunOutcome, ExecutorError>
where
    E: Executor + ?Sized,
{
    let simulation = Simulation::from_kind(kind, inputs)?;
    run(executor, simulation, io_directory, reporter)
}
