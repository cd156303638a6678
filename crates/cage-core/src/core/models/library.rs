use super::fragment::{Fragment, ModelError};
use nalgebra::Point3;
use thiserror::Error;

/// Errors raised when selecting entries from a [`FragmentLibrary`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LibraryError {
    /// The requested fragment index does not exist.
    #[error("Fragment index {index} not found in library of {len} entries")]
    FragmentNotFound { index: usize, len: usize },

    /// A library entry carried inconsistent data.
    #[error("Invalid library entry '{name}': {source}")]
    InvalidEntry {
        name: String,
        #[source]
        source: ModelError,
    },
}

/// One stored fragment template: labels, coordinates, and the optional pair of
/// connection-atom indices that defines the fragment's alignment vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub name: String,
    pub labels: Vec<String>,
    pub positions: Vec<Point3<f64>>,
    pub connection: Option<(usize, usize)>,
}

/// An explicit, in-memory collection of fragment templates.
///
/// The library is a plain value injected into whatever needs it; there is no
/// process-global state and no implicit load-on-import, so engines can be
/// tested against small in-memory fixtures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FragmentLibrary {
    entries: Vec<LibraryEntry>,
}

impl FragmentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LibraryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Looks up an entry by index.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::FragmentNotFound`] for an out-of-range index.
    pub fn get(&self, index: usize) -> Result<&LibraryEntry, LibraryError> {
        self.entries.get(index).ok_or(LibraryError::FragmentNotFound {
            index,
            len: self.entries.len(),
        })
    }

    /// Instantiates a [`Fragment`] from the entry at `index`.
    ///
    /// The fragment owns a fresh copy of the entry's atoms and records the
    /// entry index for informational purposes only.
    ///
    /// # Errors
    ///
    /// Fails for an out-of-range index or an entry whose stored data violates
    /// the fragment invariants (mismatched lengths, bad connection indices).
    pub fn fragment(&self, index: usize) -> Result<Fragment, LibraryError> {
        let entry = self.get(index)?;
        let invalid = |source| LibraryError::InvalidEntry {
            name: entry.name.clone(),
            source,
        };

        let mut fragment =
            Fragment::from_parts(&entry.name, entry.labels.clone(), entry.positions.clone())
                .map_err(invalid)?;
        if let Some((a, b)) = entry.connection {
            fragment = fragment.with_connection(a, b).map_err(invalid)?;
        }
        Ok(fragment.with_source_index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> FragmentLibrary {
        let mut library = FragmentLibrary::new();
        library.add(LibraryEntry {
            name: "L1".to_string(),
            labels: vec!["C".to_string(), "C".to_string()],
            positions: vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            connection: Some((0, 1)),
        });
        library
    }

    #[test]
    fn fragment_is_instantiated_from_the_entry() {
        let library = sample_library();
        let fragment = library.fragment(0).unwrap();
        assert_eq!(fragment.name(), "L1");
        assert_eq!(fragment.len(), 2);
        assert_eq!(fragment.connection(), Some((0, 1)));
        assert_eq!(fragment.source_index(), Some(0));
    }

    #[test]
    fn out_of_range_index_is_a_lookup_error() {
        let library = sample_library();
        assert_eq!(
            library.fragment(3),
            Err(LibraryError::FragmentNotFound { index: 3, len: 1 })
        );
    }

    #[test]
    fn mismatched_entry_data_is_rejected() {
        let mut library = FragmentLibrary::new();
        library.add(LibraryEntry {
            name: "bad".to_string(),
            labels: vec!["C".to_string()],
            positions: vec![],
            connection: None,
        });
        assert!(matches!(
            library.fragment(0),
            Err(LibraryError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn names_iterates_in_insertion_order() {
        let mut library = sample_library();
        library.add(LibraryEntry {
            name: "L2".to_string(),
            labels: vec![],
            positions: vec![],
            connection: None,
        });
        let names: Vec<_> = library.names().collect();
        assert_eq!(names, vec!["L1", "L2"]);
    }
}
