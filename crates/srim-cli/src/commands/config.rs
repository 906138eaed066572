use crate::cli::{BackendArgs, ConfigArgs, ConfigCommands};
use crate::config::{PartialExecutorConfig, default_config_path};
use crate::error::{CliError, Result};
use srimrs::engine::executor::Backend;

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Path => handle_path(),
        ConfigCommands::Show(backend_args) => handle_show(&backend_args),
    }
}

fn handle_path() -> Result<()> {
    let path = default_config_path()?;
    let status = if path.is_file() { "" } else { " (not created)" };
    println!("{}{}", path.display(), status);
    Ok(())
}

fn handle_show(args: &BackendArgs) -> Result<()> {
    let backend = PartialExecutorConfig::load(args)?.merge_with_cli(args)?;
    print!("{}", render(&backend)?);
    Ok(())
}

fn render(backend: &Backend) -> Result<String> {
    let body = match backend {
        Backend::Native(executor) => toml::to_string(executor.config()),
        Backend::Docker(executor) => toml::to_string(executor.config()),
    }
    .map_err(|e| CliError::Other(e.into()))?;
    Ok(format!(
        "backend = \"{}\"\n\n[{}]\n{}",
        backend.name(),
        backend.name(),
        body
    ))
}
