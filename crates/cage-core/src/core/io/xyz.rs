use super::traits::StructureFile;
use crate::core::models::fragment::{Atom, Fragment};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Header declares {declared} atoms but the file contains {found}")]
    AtomCountMismatch { declared: usize, found: usize },
}

/// The XYZ format: an atom count, a comment/name line, then one
/// `label x y z` record per atom.
pub struct XyzFile;

impl XyzFile {
    /// Reads a fragment from an XYZ stream.
    ///
    /// # Errors
    ///
    /// Fails on malformed counts or records, and when the declared atom count
    /// disagrees with the number of records found.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Fragment, XyzError> {
        let mut lines = reader.lines().enumerate();

        let (_, count_line) = lines.next().ok_or(XyzError::Parse {
            line: 1,
            message: "missing atom count line".to_string(),
        })?;
        let declared: usize = count_line?.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            message: "invalid atom count".to_string(),
        })?;

        let (_, name_line) = lines.next().ok_or(XyzError::Parse {
            line: 2,
            message: "missing name line".to_string(),
        })?;
        let name = name_line?.trim().to_string();

        let mut atoms = Vec::with_capacity(declared);
        for (index, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let line_num = index + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 4 {
                return Err(XyzError::Parse {
                    line: line_num,
                    message: "expected 'label x y z'".to_string(),
                });
            }
            let mut coords = [0.0f64; 3];
            for (slot, token) in coords.iter_mut().zip(&tokens[1..4]) {
                *slot = token.parse().map_err(|_| XyzError::Parse {
                    line: line_num,
                    message: format!("invalid coordinate '{}'", token),
                })?;
            }
            atoms.push(Atom::new(
                tokens[0],
                Point3::new(coords[0], coords[1], coords[2]),
            ));
        }

        if atoms.len() != declared {
            return Err(XyzError::AtomCountMismatch {
                declared,
                found: atoms.len(),
            });
        }
        Ok(Fragment::new(&name, atoms))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Fragment, XyzError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

impl StructureFile for XyzFile {
    type Error = XyzError;

    fn write_to(name: &str, atoms: &[Atom], writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", atoms.len())?;
        writeln!(writer, "{}", name)?;
        for atom in atoms {
            writeln!(
                writer,
                "{} {:.4} {:.4} {:.4}",
                atom.label, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_atoms() -> Vec<Atom> {
        vec![
            Atom::new("C", Point3::new(0.0, 0.0, 0.0)),
            Atom::new("O", Point3::new(1.5, -0.25, 3.125)),
        ]
    }

    #[test]
    fn write_emits_count_header_and_records() {
        let mut buffer = Vec::new();
        XyzFile::write_to("mol", &sample_atoms(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "2\nmol\nC 0.0000 0.0000 0.0000\nO 1.5000 -0.2500 3.1250\n"
        );
    }

    #[test]
    fn read_round_trips_what_write_produced() {
        let mut buffer = Vec::new();
        XyzFile::write_to("mol", &sample_atoms(), &mut buffer).unwrap();

        let fragment = XyzFile::read_from(&mut buffer.as_slice()).unwrap();
        assert_eq!(fragment.name(), "mol");
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.atoms()[1].label, "O");
        assert!((fragment.atoms()[1].position.z - 3.125).abs() < 1e-12);
    }

    #[test]
    fn read_rejects_count_mismatch() {
        let text = "3\nmol\nC 0 0 0\n";
        let result = XyzFile::read_from(&mut text.as_bytes());
        assert!(matches!(
            result,
            Err(XyzError::AtomCountMismatch {
                declared: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn read_rejects_short_records_with_line_numbers() {
        let text = "1\nmol\nC 0 0\n";
        let result = XyzFile::read_from(&mut text.as_bytes());
        assert!(matches!(result, Err(XyzError::Parse { line: 3, .. })));
    }

    #[test]
    fn read_rejects_non_numeric_coordinates() {
        let text = "1\nmol\nC 0 zero 0\n";
        let result = XyzFile::read_from(&mut text.as_bytes());
        assert!(matches!(result, Err(XyzError::Parse { line: 3, .. })));
    }
}
