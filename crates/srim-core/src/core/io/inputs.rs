use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the stopping-and-range (SR module) input deck.
pub const SR_INPUT_FILE: &str = "SR.IN";
/// File name of the TRIM input deck.
pub const TRIM_INPUT_FILE: &str = "TRIM.IN";

/// Something that can write the input files of a simulation into a directory.
pub trait InputWriter {
    /// Writes every input file the simulation needs into `directory`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if any file cannot be written.
    fn write_inputs(&self, directory: &Path) -> io::Result<()>;
}

impl<F> InputWriter for F
where
    F: Fn(&Path) -> io::Result<()>,
{
    fn write_inputs(&self, directory: &Path) -> io::Result<()> {
        self(directory)
    }
}

/// An input deck prepared ahead of time, copied under the file name SRIM expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput {
    source: PathBuf,
    file_name: &'static str,
}

impl PreparedInput {
    pub fn new(source: impl Into<PathBuf>, file_name: &'static str) -> Self {
        Self {
            source: source.into(),
            file_name,
        }
    }

    pub fn sr(source: impl Into<PathBuf>) -> Self {
        Self::new(source, SR_INPUT_FILE)
    }

    pub fn trim(source: impl Into<PathBuf>) -> Self {
        Self::new(source, TRIM_INPUT_FILE)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

impl InputWriter for PreparedInput {
    fn write_inputs(&self, directory: &Path) -> io::Result<()> {
        let target = directory.join(self.file_name);
        debug!("Writing input deck {:?} to {:?}", &self.source, &target);
        fs::copy(&self.source, &target).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn prepared_input_is_copied_under_canonical_name() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        let deck = src.path().join("my-run.in");
        fs::write(&deck, "==> SRIM-2013.00 This file controls TRIM Calculations.").unwrap();

        PreparedInput::trim(&deck).write_inputs(dst.path()).unwrap();

        let written = fs::read_to_string(dst.path().join(TRIM_INPUT_FILE)).unwrap();
        assert!(written.starts_with("==> SRIM-2013.00"));
    }

    #[test]
    fn missing_prepared_input_is_an_io_error() {
        let dst = tempdir().unwrap();
        let input = PreparedInput::sr(dst.path().join("absent.in"));

        let err = input.write_inputs(dst.path()).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dst.path().join(SR_INPUT_FILE).exists());
    }

    #[test]
    fn closures_act_as_input_writers() {
        let dst = tempdir().unwrap();
        let writer = |dir: &Path| fs::write(dir.join(SR_INPUT_FILE), "deck");

        writer.write_inputs(dst.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dst.path().join(SR_INPUT_FILE)).unwrap(),
            "deck"
        );
    }
}
