use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the report written by the SR module.
pub const SR_OUTPUT_FILE: &str = "SR_OUTPUT.txt";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Expected output file '{path}' was not produced", path = path.display())]
    MissingOutput { path: PathBuf },

    #[error("Output file '{path}' is empty", path = path.display())]
    EmptyOutput { path: PathBuf },

    #[error("No TRIM reports were found in '{directory}'", directory = directory.display())]
    NoOutputs { directory: PathBuf },

    #[error("Failed to read output file '{path}': {source}", path = path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// The reports TRIM can write, depending on which outputs the input deck enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrimReport {
    Ionization,
    Phonons,
    EnergyToRecoils,
    NoVacancies,
    Vacancies,
    Range,
    Lateral,
}

impl TrimReport {
    pub const ALL: [TrimReport; 7] = [
        TrimReport::Ionization,
        TrimReport::Phonons,
        TrimReport::EnergyToRecoils,
        TrimReport::NoVacancies,
        TrimReport::Vacancies,
        TrimReport::Range,
        TrimReport::Lateral,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            TrimReport::Ionization => "IONIZ.txt",
            TrimReport::Phonons => "PHONON.txt",
            TrimReport::EnergyToRecoils => "E2RECOIL.txt",
            TrimReport::NoVacancies => "NOVAC.txt",
            TrimReport::Vacancies => "VACANCY.txt",
            TrimReport::Range => "RANGE.txt",
            TrimReport::Lateral => "LATERAL.txt",
        }
    }
}

impl fmt::Display for TrimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Result of an SR module run: the stopping-power report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrResults {
    pub report: String,
}

impl SrResults {
    /// Reads `SR_OUTPUT.txt` from `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingOutput`] when the report does not exist and
    /// [`ParseError::EmptyOutput`] when it has no content.
    pub fn from_directory(directory: &Path) -> Result<Self, ParseError> {
        let path = directory.join(SR_OUTPUT_FILE);
        if !path.is_file() {
            return Err(ParseError::MissingOutput { path });
        }
        let report = read_report(&path)?;
        Ok(Self { report })
    }
}

/// Result of a TRIM run: every recognised report that was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimResults {
    pub reports: BTreeMap<TrimReport, String>,
}

impl TrimResults {
    /// Collects the recognised TRIM reports present in `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoOutputs`] when none of them exist, and
    /// [`ParseError::EmptyOutput`] when one exists but is empty.
    pub fn from_directory(directory: &Path) -> Result<Self, ParseError> {
        let mut reports = BTreeMap::new();
        for kind in TrimReport::ALL {
            let path = directory.join(kind.file_name());
            if path.is_file() {
                reports.insert(kind, read_report(&path)?);
            }
        }
        if reports.is_empty() {
            return Err(ParseError::NoOutputs {
                directory: directory.to_path_buf(),
            });
        }
        debug!("Collected {} TRIM report(s) from {:?}", reports.len(), directory);
        Ok(Self { reports })
    }

    pub fn get(&self, kind: TrimReport) -> Option<&str> {
        self.reports.get(&kind).map(String::as_str)
    }
}

// SRIM writes reports in the Windows code page, so non-UTF-8 bytes are replaced, not rejected.
fn read_report(path: &Path) -> Result<String, ParseError> {
    let bytes = fs::read(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::EmptyOutput {
            path: path.to_path_buf(),
        });
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sr_results_read_report() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SR_OUTPUT_FILE),
            " Calculation using SRIM-2006\n Ion = Hydrogen [1]\n",
        )
        .unwrap();

        let results = SrResults::from_directory(dir.path()).unwrap();

        assert!(results.report.contains("Ion = Hydrogen"));
    }

    #[test]
    fn sr_results_fail_when_report_missing() {
        let dir = tempdir().unwrap();
        let err = SrResults::from_directory(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::MissingOutput { path } if path.ends_with(SR_OUTPUT_FILE)));
    }

    #[test]
    fn sr_results_fail_when_report_blank() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SR_OUTPUT_FILE), "  \r\n").unwrap();
        let err = SrResults::from_directory(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::EmptyOutput { .. }));
    }

    #[test]
    fn sr_results_tolerate_non_utf8_bytes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(SR_OUTPUT_FILE), b"Density = 2.3 g/cm3 \xb5m").unwrap();
        let results = SrResults::from_directory(dir.path()).unwrap();
        assert!(results.report.starts_with("Density = 2.3"));
    }

    #[test]
    fn trim_results_collect_present_reports_only() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("RANGE.txt"), "range table").unwrap();
        fs::write(dir.path().join("IONIZ.txt"), "ionization table").unwrap();
        fs::write(dir.path().join("TRIM.IN"), "deck").unwrap();

        let results = TrimResults::from_directory(dir.path()).unwrap();

        assert_eq!(results.reports.len(), 2);
        assert_eq!(results.get(TrimReport::Range), Some("range table"));
        assert_eq!(results.get(TrimReport::Ionization), Some("ionization table"));
        assert_eq!(results.get(TrimReport::Vacancies), None);
    }

    #[test]
    fn trim_results_fail_without_any_report() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("TRIM.IN"), "deck").unwrap();
        let err = TrimResults::from_directory(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::NoOutputs { .. }));
    }

    #[test]
    fn trim_report_file_names_are_distinct() {
        let mut names: Vec<&str> = TrimReport::ALL.iter().map(|r| r.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TrimReport::ALL.len());
        assert!(names.iter().all(|n| n.ends_with(".txt")));
    }
}
