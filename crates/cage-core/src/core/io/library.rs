use crate::core::models::library::{FragmentLibrary, LibraryEntry};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Reader for the HostDesigner linker LIBRARY format.
///
/// Each record starts at a line containing `LINK` whose last token is the
/// linker name. The line after the header carries the two connection-atom
/// indices (1-based). The sixth line of the record holds the atom count as its
/// first token, and coordinates follow from the seventh line, one atom per
/// line: `serial label x y z ...`. The placeholder label `X` denotes a
/// connection dummy and is read as `O`.
pub struct LibraryFile;

impl LibraryFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<FragmentLibrary, LibraryFileError> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let mut library = FragmentLibrary::new();

        for (index, line) in lines.iter().enumerate() {
            if !line.contains("LINK") {
                continue;
            }
            let name = line
                .split_whitespace()
                .last()
                .ok_or_else(|| LibraryFileError::Parse {
                    line: index + 1,
                    message: "empty LINK header".to_string(),
                })?
                .to_string();

            let connection = lines
                .get(index + 1)
                .map(|l| Self::parse_connection(l))
                .unwrap_or(None);

            let count_index = index + 5;
            let count_line =
                lines
                    .get(count_index)
                    .ok_or_else(|| LibraryFileError::Parse {
                        line: count_index + 1,
                        message: format!("record '{}' is truncated before its atom count", name),
                    })?;
            let atom_count = count_line
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<f64>().ok())
                .map(|count| count as usize)
                .ok_or_else(|| LibraryFileError::Parse {
                    line: count_index + 1,
                    message: "invalid atom count".to_string(),
                })?;

            let mut labels = Vec::with_capacity(atom_count);
            let mut positions = Vec::with_capacity(atom_count);
            for offset in 0..atom_count {
                let coord_index = index + 6 + offset;
                let coord_line =
                    lines
                        .get(coord_index)
                        .ok_or_else(|| LibraryFileError::Parse {
                            line: coord_index + 1,
                            message: format!(
                                "record '{}' declares {} atoms but ends early",
                                name, atom_count
                            ),
                        })?;
                let (label, position) = Self::parse_atom(coord_line, coord_index + 1)?;
                labels.push(label);
                positions.push(position);
            }

            library.add(LibraryEntry {
                name,
                labels,
                positions,
                connection,
            });
        }

        Ok(library)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<FragmentLibrary, LibraryFileError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// The connectivity line carries the two connection-atom serials; anything
    /// else on the line is HostDesigner metadata we do not consume.
    fn parse_connection(line: &str) -> Option<(usize, usize)> {
        let mut serials = line
            .split_whitespace()
            .filter_map(|token| token.parse::<usize>().ok());
        match (serials.next(), serials.next()) {
            (Some(a), Some(b)) if a >= 1 && b >= 1 => Some((a - 1, b - 1)),
            _ => None,
        }
    }

    fn parse_atom(line: &str, line_num: usize) -> Result<(String, Point3<f64>), LibraryFileError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 5 {
            return Err(LibraryFileError::Parse {
                line: line_num,
                message: "expected 'serial label x y z'".to_string(),
            });
        }
        let label = if tokens[1] == "X" { "O" } else { tokens[1] };
        let mut coords = [0.0f64; 3];
        for (slot, token) in coords.iter_mut().zip(&tokens[2..5]) {
            *slot = token.parse().map_err(|_| LibraryFileError::Parse {
                line: line_num,
                message: format!("invalid coordinate '{}'", token),
            })?;
        }
        Ok((
            label.to_string(),
            Point3::new(coords[0], coords[1], coords[2]),
        ))
    }
}
