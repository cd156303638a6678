use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Which force-field parameter set a table was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForcefieldKind {
    /// Universal Force Field.
    Uff,
    /// DREIDING.
    Dreiding,
}

impl FromStr for ForcefieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uff" => Ok(ForcefieldKind::Uff),
            "dre" | "dreiding" => Ok(ForcefieldKind::Dreiding),
            other => Err(format!(
                "unknown force field '{}', expected 'uff' or 'dre'",
                other
            )),
        }
    }
}

/// Per-atom-type Lennard-Jones parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjParams {
    /// Zero-crossing distance in length units.
    pub sigma: f64,
    /// Well depth in kB units.
    pub epsilon: f64,
}

/// Error raised when an atom-type label has no parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("No force-field parameters for atom type '{0}'")]
    UnknownAtomType(String),
}

/// Errors raised while loading a parameter table from disk.
#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct ParamRecord {
    atom: String,
    uff_sigma: f64,
    uff_epsilon: f64,
    dre_sigma: f64,
    dre_epsilon: f64,
}

/// A force-field parameter table: atom-type label to Lennard-Jones parameters,
/// read-only after construction.
///
/// The table carries no interior mutability, so a shared reference can be used
/// from concurrent energy evaluations without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Forcefield {
    kind: ForcefieldKind,
    params: HashMap<String, LjParams>,
}

impl Forcefield {
    pub fn new(kind: ForcefieldKind, params: HashMap<String, LjParams>) -> Self {
        Self { kind, params }
    }

    /// Loads the table from a CSV file with columns
    /// `atom,uff_sigma,uff_epsilon,dre_sigma,dre_epsilon`, keeping the column
    /// pair selected by `kind`.
    pub fn load_csv(path: &Path, kind: ForcefieldKind) -> Result<Self, ParamLoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ParamLoadError::Csv {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut params = HashMap::new();
        for result in reader.deserialize::<ParamRecord>() {
            let record = result.map_err(|e| ParamLoadError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            let lj = match kind {
                ForcefieldKind::Uff => LjParams {
                    sigma: record.uff_sigma,
                    epsilon: record.uff_epsilon,
                },
                ForcefieldKind::Dreiding => LjParams {
                    sigma: record.dre_sigma,
                    epsilon: record.dre_epsilon,
                },
            };
            params.insert(record.atom, lj);
        }
        Ok(Self { kind, params })
    }

    pub fn kind(&self) -> ForcefieldKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Looks up the parameters for an atom-type label.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::UnknownAtomType`] for labels absent from the
    /// table; there is no silent default.
    pub fn get(&self, label: &str) -> Result<&LjParams, ParamError> {
        self.params
            .get(label)
            .ok_or_else(|| ParamError::UnknownAtomType(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_forcefield() -> Forcefield {
        let mut params = HashMap::new();
        params.insert(
            "C".to_string(),
            LjParams {
                sigma: 3.43,
                epsilon: 52.84,
            },
        );
        Forcefield::new(ForcefieldKind::Uff, params)
    }

    #[test]
    fn kind_parses_expected_names() {
        assert_eq!(ForcefieldKind::from_str("uff"), Ok(ForcefieldKind::Uff));
        assert_eq!(ForcefieldKind::from_str("dre"), Ok(ForcefieldKind::Dreiding));
        assert_eq!(
            ForcefieldKind::from_str("DREIDING"),
            Ok(ForcefieldKind::Dreiding)
        );
        assert!(ForcefieldKind::from_str("amber").is_err());
    }

    #[test]
    fn known_labels_resolve_to_their_parameters() {
        let ff = sample_forcefield();
        let lj = ff.get("C").unwrap();
        assert_eq!(lj.sigma, 3.43);
        assert_eq!(lj.epsilon, 52.84);
    }

    #[test]
    fn unknown_labels_are_an_error_not_a_default() {
        let ff = sample_forcefield();
        assert_eq!(
            ff.get("Xx"),
            Err(ParamError::UnknownAtomType("Xx".to_string()))
        );
    }

    #[test]
    fn load_csv_selects_the_requested_parameter_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.csv");
        std::fs::write(
            &path,
            "atom,uff_sigma,uff_epsilon,dre_sigma,dre_epsilon\n\
             C,3.43,52.84,3.47,47.86\n\
             O,3.12,30.19,3.03,48.16\n",
        )
        .unwrap();

        let uff = Forcefield::load_csv(&path, ForcefieldKind::Uff).unwrap();
        assert_eq!(uff.get("C").unwrap().sigma, 3.43);

        let dre = Forcefield::load_csv(&path, ForcefieldKind::Dreiding).unwrap();
        assert_eq!(dre.get("C").unwrap().sigma, 3.47);
        assert_eq!(dre.len(), 2);
    }

    #[test]
    fn load_csv_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = Forcefield::load_csv(&dir.path().join("absent.csv"), ForcefieldKind::Uff);
        assert!(matches!(result, Err(ParamLoadError::Csv { .. })));
    }

    #[test]
    fn load_csv_fails_for_malformed_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(
            &path,
            "atom,uff_sigma,uff_epsilon,dre_sigma,dre_epsilon\nC,not_a_number,1,1,1\n",
        )
        .unwrap();
        let result = Forcefield::load_csv(&path, ForcefieldKind::Uff);
        assert!(matches!(result, Err(ParamLoadError::Csv { .. })));
    }
}
