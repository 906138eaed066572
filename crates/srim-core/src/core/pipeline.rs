use super::io::outputs::ParseError;
use std::fmt;
use std::path::Path;

pub type DirectedGenerator<'a> = Box<dyn FnOnce(&Path) -> std::io::Result<()> + 'a>;
pub type AmbientGenerator<'a> = Box<dyn FnOnce() -> std::io::Result<()> + 'a>;
pub type Parser<'a, T> = Box<dyn FnOnce(&Path) -> Result<T, ParseError> + 'a>;

/// Writes the input files of a pipeline.
pub enum Generator<'a> {
    /// Receives the io-directory and writes into it.
    Directed(DirectedGenerator<'a>),
    /// Writes into the process's current directory.
    ///
    /// Runs while the working directory is switched to the io-directory, so pipelines using it
    /// must not run concurrently within one process.
    Ambient(AmbientGenerator<'a>),
}

impl fmt::Debug for Generator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Directed(_) => f.write_str("Generator::Directed"),
            Generator::Ambient(_) => f.write_str("Generator::Ambient"),
        }
    }
}

/// One generate-execute-parse sequence.
///
/// `command` holds the path segments that, joined under a backend's executable root, locate
/// the SRIM executable to invoke.
pub struct Pipeline<'a, T> {
    pub generator: Generator<'a>,
    pub parser: Parser<'a, T>,
    pub command: &'a [&'a str],
}

impl<'a, T> Pipeline<'a, T> {
    pub fn new(
        generator: Generator<'a>,
        parser: impl FnOnce(&Path) -> Result<T, ParseError> + 'a,
        command: &'a [&'a str],
    ) -> Self {
        Self {
            generator,
            parser: Box::new(parser),
            command,
        }
    }

    pub fn directed(
        generator: impl FnOnce(&Path) -> std::io::Result<()> + 'a,
        parser: impl FnOnce(&Path) -> Result<T, ParseError> + 'a,
        command: &'a [&'a str],
    ) -> Self {
        Self::new(Generator::Directed(Box::new(generator)), parser, command)
    }

    pub fn ambient(
        generator: impl FnOnce() -> std::io::Result<()> + 'a,
        parser: impl FnOnce(&Path) -> Result<T, ParseError> + 'a,
        command: &'a [&'a str],
    ) -> Self {
        Self::new(Generator::Ambient(Box::new(generator)), parser, command)
    }
}

impl<T> fmt::Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("generator", &self.generator)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
