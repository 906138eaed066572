use crate::cli::{BackendArgs, BackendKind};
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use srimrs::engine::config::{DockerConfigBuilder, NativeConfigBuilder};
use srimrs::engine::docker::DockerExecutor;
use srimrs::engine::executor::Backend;
use srimrs::engine::native::NativeExecutor;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialNativeConfig {
    srim_directory: Option<PathBuf>,
    compat_layer: Option<String>,
    virtual_display: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDockerConfig {
    image: Option<String>,
    bind_path: Option<String>,
    srim_directory: Option<String>,
    runtime: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialExecutorConfig {
    backend: Option<BackendKind>,
    native: Option<PartialNativeConfig>,
    docker: Option<PartialDockerConfig>,
}

/// Location of the configuration file used when `--config` is not given.
pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("org", "srimrs", "srim")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Could not determine config directory path.".to_string()))
}

impl PartialExecutorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the file named by `--config`, or the default file when it exists.
    pub fn load(args: &BackendArgs) -> Result<Self> {
        if let Some(path) = &args.config {
            return Self::from_file(path);
        }
        match default_config_path() {
            Ok(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli(mut self, args: &BackendArgs) -> Result<Backend> {
        self.apply_set_values(&args.set_values)?;

        let kind = args.backend.or(self.backend).unwrap_or_default();
        debug!("Selected backend: {:?}", kind);

        match kind {
            BackendKind::Native => {
                let file = self.native.take().unwrap_or_default();
                let srim_directory = args
                    .srim_dir
                    .clone()
                    .or(file.srim_directory)
                    .ok_or_else(|| {
                        CliError::Config(
                            "`native.srim-directory` is required for the native backend (or pass --srim-dir)."
                                .to_string(),
                        )
                    })?;

                let mut builder = NativeConfigBuilder::new().srim_directory(srim_directory);
                if let Some(compat_layer) = file.compat_layer {
                    builder = builder.compat_layer(compat_layer);
                }
                if let Some(wrapper) = file.virtual_display {
                    builder = builder.virtual_display(Some(wrapper));
                }
                Ok(Backend::Native(NativeExecutor::new(builder.build()?)))
            }
            BackendKind::Docker => {
                let file = self.docker.take().unwrap_or_default();
                let mut builder = DockerConfigBuilder::new();
                if let Some(image) = args.image.clone().or(file.image) {
                    builder = builder.image(image);
                }
                if let Some(runtime) = args.runtime.clone().or(file.runtime) {
                    builder = builder.runtime(runtime);
                }
                if let Some(bind_path) = file.bind_path {
                    builder = builder.bind_path(bind_path);
                }
                if let Some(srim_directory) = file.srim_directory {
                    builder = builder.srim_directory(srim_directory);
                }
                Ok(Backend::Docker(DockerExecutor::new(builder.build()?)))
            }
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let value = value.to_string();

            match key {
                "backend" => {
                    self.backend = Some(match value.as_str() {
                        "native" => BackendKind::Native,
                        "docker" => BackendKind::Docker,
                        other => {
                            return Err(CliError::Config(format!(
                                "Invalid backend '{}'. Expected 'native' or 'docker'.",
                                other
                            )));
                        }
                    });
                }
                "native.srim-directory" => {
                    self.native_mut().srim_directory = Some(PathBuf::from(value));
                }
                "native.compat-layer" => self.native_mut().compat_layer = Some(value),
                "native.virtual-display" => self.native_mut().virtual_display = Some(value),
                "docker.image" => self.docker_mut().image = Some(value),
                "docker.bind-path" => self.docker_mut().bind_path = Some(value),
                "docker.srim-directory" => self.docker_mut().srim_directory = Some(value),
                "docker.runtime" => self.docker_mut().runtime = Some(value),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn native_mut(&mut self) -> &mut PartialNativeConfig {
        self.native.get_or_insert_with(Default::default)
    }

    fn docker_mut(&mut self) -> &mut PartialDockerConfig {
        self.docker.get_or_insert_with(Default::default)
    }
}
