use super::io::inputs::InputWriter;
use super::io::outputs::{SrResults, TrimResults};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Executable locator of the SR module, relative to the SRIM installation root.
pub const SR_COMMAND: &[&str] = &["SR Module", "SRModule.exe"];
/// Executable locator of TRIM, relative to the SRIM installation root.
pub const TRIM_COMMAND: &[&str] = &["TRIM.exe"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unsupported simulation kind '{0}'. Expected one of: sr, trim.")]
pub struct UnsupportedKind(pub String);

/// The kinds of simulation SRIM can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationKind {
    /// Stopping and range tables.
    Sr,
    /// Transport of ions in matter (Monte Carlo).
    Trim,
}

impl SimulationKind {
    pub fn name(self) -> &'static str {
        match self {
            SimulationKind::Sr => "sr",
            SimulationKind::Trim => "trim",
        }
    }

    pub fn command(self) -> &'static [&'static str] {
        match self {
            SimulationKind::Sr => SR_COMMAND,
            SimulationKind::Trim => TRIM_COMMAND,
        }
    }
}

impl fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationKind {
    type Err = UnsupportedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sr" => Ok(SimulationKind::Sr),
            "trim" => Ok(SimulationKind::Trim),
            _ => Err(UnsupportedKind(s.to_string())),
        }
    }
}

/// A simulation to run, carrying the writer of its input files.
#[derive(Clone, Copy)]
pub enum Simulation<'a> {
    Sr(&'a dyn InputWriter),
    Trim(&'a dyn InputWriter),
}

impl<'a> Simulation<'a> {
    pub fn new(kind: SimulationKind, inputs: &'a dyn InputWriter) -> Self {
        match kind {
            SimulationKind::Sr => Simulation::Sr(inputs),
            SimulationKind::Trim => Simulation::Trim(inputs),
        }
    }

    /// Builds a simulation from a kind given by name.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedKind`] when `kind` names neither `sr` nor `trim`.
    pub fn from_kind(kind: &str, inputs: &'a dyn InputWriter) -> Result<Self, UnsupportedKind> {
        Ok(Self::new(kind.parse()?, inputs))
    }

    pub fn kind(&self) -> SimulationKind {
        match self {
            Simulation::Sr(_) => SimulationKind::Sr,
            Simulation::Trim(_) => SimulationKind::Trim,
        }
    }
}

impl fmt::Debug for Simulation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Simulation::{:?}", self.kind())
    }
}

/// Parsed result of a simulation, matching the kind that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutput {
    Sr(SrResults),
    Trim(TrimResults),
}

impl SimulationOutput {
    pub fn kind(&self) -> SimulationKind {
        match self {
            SimulationOutput::Sr(_) => SimulationKind::Sr,
            SimulationOutput::Trim(_) => SimulationKind::Trim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn no_inputs(_: &Path) -> std::io::Result<()> {
        Ok(())
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("sr".parse::<SimulationKind>(), Ok(SimulationKind::Sr));
        assert_eq!(" TRIM ".parse::<SimulationKind>(), Ok(SimulationKind::Trim));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Simulation::from_kind("tdata", &no_inputs).unwrap_err();
        assert_eq!(err, UnsupportedKind("tdata".to_string()));
        assert!(err.to_string().contains("tdata"));
    }

    #[test]
    fn each_kind_maps_to_its_executable() {
        assert_eq!(SimulationKind::Sr.command(), ["SR Module", "SRModule.exe"]);
        assert_eq!(SimulationKind::Trim.command(), ["TRIM.exe"]);
        let sim = Simulation::from_kind("trim", &no_inputs).unwrap();
        assert_eq!(sim.kind(), SimulationKind::Trim);
    }
}
