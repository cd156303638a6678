use super::traits::StructureFile;
use crate::core::models::fragment::Atom;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A minimal PDB writer: HEADER, one fixed-column HETATM record per atom with
/// a 1-based sequential serial, and a terminating END.
///
/// The column layout is positional; downstream viewers may be byte-sensitive,
/// so field widths are kept exact.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn write_to(name: &str, atoms: &[Atom], writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "HEADER    {}", name)?;
        for (serial, atom) in atoms.iter().enumerate() {
            writeln!(
                writer,
                "HETATM{serial:>5}{label:>3}  MOL     1     {x:>8.3}{y:>8.3}{z:>8.3}  1.00  0.00          {element:>2}",
                serial = serial + 1,
                label = atom.label,
                x = atom.position.x,
                y = atom.position.y,
                z = atom.position.z,
                element = atom.label,
            )?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}
