use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_COMPAT_LAYER: &str = "wine";
pub const DEFAULT_VIRTUAL_DISPLAY: &str = "xvfb-run";
pub const DEFAULT_CONTAINER_IMAGE: &str = "costrouc/srim";
pub const DEFAULT_CONTAINER_BIND_PATH: &str = "/usr/local/src/srim";
pub const DEFAULT_CONTAINER_SRIM_DIRECTORY: &str = "/tmp/srim";
pub const DEFAULT_CONTAINER_RUNTIME: &str = "docker";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Settings of the backend that runs SRIM on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct NativeConfig {
    /// Root of the SRIM installation; executables are resolved beneath it.
    pub srim_directory: PathBuf,
    /// Command that runs Windows executables, looked up on `PATH`.
    pub compat_layer: String,
    /// Wrapper providing a virtual display, used only when it can be found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_display: Option<String>,
}

#[derive(Default)]
pub struct NativeConfigBuilder {
    srim_directory: Option<PathBuf>,
    compat_layer: Option<String>,
    virtual_display: Option<Option<String>>,
}

impl NativeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn srim_directory(mut self, path: PathBuf) -> Self {
        self.srim_directory = Some(path);
        self
    }
    pub fn compat_layer(mut self, command: impl Into<String>) -> Self {
        self.compat_layer = Some(command.into());
        self
    }
    pub fn virtual_display(mut self, wrapper: Option<String>) -> Self {
        self.virtual_display = Some(wrapper);
        self
    }

    pub fn build(self) -> Result<NativeConfig, ConfigError> {
        let compat_layer = self
            .compat_layer
            .unwrap_or_else(|| DEFAULT_COMPAT_LAYER.to_string());
        if compat_layer.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "compat_layer",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(NativeConfig {
            srim_directory: self
                .srim_directory
                .ok_or(ConfigError::MissingParameter("srim_directory"))?,
            compat_layer,
            virtual_display: self
                .virtual_display
                .unwrap_or_else(|| Some(DEFAULT_VIRTUAL_DISPLAY.to_string()))
                .filter(|w| !w.trim().is_empty()),
        })
    }
}

/// Settings of the backend that runs SRIM inside a container.
///
/// `bind_path` and `srim_directory` are paths inside the container and always use `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DockerConfig {
    pub image: String,
    /// Where the host io-directory is mounted.
    pub bind_path: String,
    /// Where the image keeps the SRIM installation.
    pub srim_directory: String,
    /// Container engine binary, e.g. `docker` or `podman`.
    pub runtime: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_CONTAINER_IMAGE.to_string(),
            bind_path: DEFAULT_CONTAINER_BIND_PATH.to_string(),
            srim_directory: DEFAULT_CONTAINER_SRIM_DIRECTORY.to_string(),
            runtime: DEFAULT_CONTAINER_RUNTIME.to_string(),
        }
    }
}

#[derive(Default)]
pub struct DockerConfigBuilder {
    image: Option<String>,
    bind_path: Option<String>,
    srim_directory: Option<String>,
    runtime: Option<String>,
}

impl DockerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
    pub fn bind_path(mut self, path: impl Into<String>) -> Self {
        self.bind_path = Some(path.into());
        self
    }
    pub fn srim_directory(mut self, path: impl Into<String>) -> Self {
        self.srim_directory = Some(path.into());
        self
    }
    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn build(self) -> Result<DockerConfig, ConfigError> {
        let defaults = DockerConfig::default();
        let config = DockerConfig {
            image: self.image.unwrap_or(defaults.image),
            bind_path: self.bind_path.unwrap_or(defaults.bind_path),
            srim_directory: self.srim_directory.unwrap_or(defaults.srim_directory),
            runtime: self.runtime.unwrap_or(defaults.runtime),
        };

        if config.image.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "image",
                reason: "must not be empty".to_string(),
            });
        }
        if config.runtime.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "runtime",
                reason: "must not be empty".to_string(),
            });
        }
        for (name, path) in [
            ("bind_path", &config.bind_path),
            ("srim_directory", &config.srim_directory),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("'{}' must be an absolute container path", path),
                });
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builder_requires_srim_directory() {
        let result = NativeConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("srim_directory")));
    }

    #[test]
    fn native_builder_fills_defaults() {
        let config = NativeConfigBuilder::new()
            .srim_directory(PathBuf::from("/opt/srim"))
            .build()
            .unwrap();
        assert_eq!(config.compat_layer, "wine");
        assert_eq!(config.virtual_display.as_deref(), Some("xvfb-run"));
    }

    #[test]
    fn native_builder_can_disable_virtual_display() {
        let config = NativeConfigBuilder::new()
            .srim_directory(PathBuf::from("/opt/srim"))
            .virtual_display(None)
            .build()
            .unwrap();
        assert_eq!(config.virtual_display, None);

        let blank = NativeConfigBuilder::new()
            .srim_directory(PathBuf::from("/opt/srim"))
            .virtual_display(Some("  ".to_string()))
            .build()
            .unwrap();
        assert_eq!(blank.virtual_display, None);
    }

    #[test]
    fn docker_defaults_match_published_image() {
        let config = DockerConfigBuilder::new().build().unwrap();
        assert_eq!(config, DockerConfig::default());
        assert_eq!(config.image, "costrouc/srim");
        assert_eq!(config.bind_path, "/usr/local/src/srim");
        assert_eq!(config.srim_directory, "/tmp/srim");
        assert_eq!(config.runtime, "docker");
    }

    #[test]
    fn docker_builder_rejects_relative_container_paths() {
        let result = DockerConfigBuilder::new().bind_path("srim").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                name: "bind_path",
                ..
            })
        ));
    }

    #[test]
    fn docker_builder_rejects_empty_image() {
        let result = DockerConfigBuilder::new().image("").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "image", .. })
        ));
    }
}
