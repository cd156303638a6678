use crate::core::models::fragment::Atom;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for persisting a named, ordered atom list.
///
/// Implementors handle format-specific serialization; atom order is always
/// preserved exactly as given.
pub trait StructureFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes the structure to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(name: &str, atoms: &[Atom], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the structure to a file path with a buffered writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        name: &str,
        atoms: &[Atom],
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(name, atoms, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
