use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading structures from a coordinate file format.
///
/// Implementors handle format-specific parsing; path-based helpers are provided
/// on top of the reader-based methods.
pub trait StructureFile {
    /// The error type for parsing and I/O failures.
    type Error: Error + From<io::Error>;

    /// Reads a single structure from a buffered reader.
    ///
    /// For multi-model input only the first model is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error>;

    /// Reads every model of a multi-model file, in file order.
    ///
    /// Input without model delimiters yields exactly one structure.
    ///
    /// # Errors
    ///
    /// Returns an error if any model fails to parse.
    fn read_models_from(reader: &mut impl BufRead) -> Result<Vec<Structure>, Self::Error>;

    /// Reads a single structure from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Structure, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Reads every model from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or any model fails to parse.
    fn read_models_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Structure>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_models_from(&mut reader)
    }
}
