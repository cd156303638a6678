use crate::core::geometry::mirror::Mirror;
use crate::core::geometry::{GeometryError, rotation};
use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// Minimum distance below which two connection atoms count as coincident.
const COINCIDENT_EPSILON: f64 = 1e-12;

/// Errors raised when constructing or transforming fragments.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Atom labels and coordinates must come in matching-length sequences.
    #[error("Label/coordinate length mismatch: {labels} labels vs {coordinates} coordinates")]
    LengthMismatch { labels: usize, coordinates: usize },

    /// The requested operation needs at least one atom.
    #[error("Fragment '{0}' has no atoms")]
    EmptyFragment(String),

    /// A connection-atom index does not reference an atom of the fragment.
    #[error("Connection atom index {index} out of range for fragment with {len} atoms")]
    ConnectionOutOfRange { index: usize, len: usize },

    /// The two connection atoms sit on top of each other, so no reference
    /// direction can be derived from them.
    #[error("Connection atoms {a} and {b} coincide; reference vector is undefined")]
    CoincidentConnection { a: usize, b: usize },
}

/// A labeled atom position; the unit a [`Fragment`] is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Element or force-field type label (e.g. "C", "O").
    pub label: String,
    /// Cartesian position in length units.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(label: &str, position: Point3<f64>) -> Self {
        Self {
            label: label.to_string(),
            position,
        }
    }
}

/// A linker fragment: a named, ordered list of atoms.
///
/// A fragment owns its atom list exclusively; it keeps at most an
/// informational index back to the library entry it was created from.
///
/// Transform discipline (a fixed contract): [`Fragment::translate`] mutates in
/// place, every other transform returns a new fragment and leaves the original
/// untouched, so conformer sets can be branched from a shared template.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    name: String,
    atoms: Vec<Atom>,
    connection: Option<(usize, usize)>,
    source_index: Option<usize>,
}

impl Fragment {
    pub fn new(name: &str, atoms: Vec<Atom>) -> Self {
        Self {
            name: name.to_string(),
            atoms,
            connection: None,
            source_index: None,
        }
    }

    /// Builds a fragment from parallel label and coordinate sequences.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::LengthMismatch`] when the sequences differ in
    /// length; the shorter sequence is never silently used.
    pub fn from_parts(
        name: &str,
        labels: Vec<String>,
        positions: Vec<Point3<f64>>,
    ) -> Result<Self, ModelError> {
        if labels.len() != positions.len() {
            return Err(ModelError::LengthMismatch {
                labels: labels.len(),
                coordinates: positions.len(),
            });
        }
        let atoms = labels
            .into_iter()
            .zip(positions)
            .map(|(label, position)| Atom { label, position })
            .collect();
        Ok(Self::new(name, atoms))
    }

    /// Declares the two connection atoms whose separation defines the
    /// fragment's reference alignment vector.
    ///
    /// # Errors
    ///
    /// Fails when an index is out of range or the two atoms coincide.
    pub fn with_connection(mut self, a: usize, b: usize) -> Result<Self, ModelError> {
        for index in [a, b] {
            if index >= self.atoms.len() {
                return Err(ModelError::ConnectionOutOfRange {
                    index,
                    len: self.atoms.len(),
                });
            }
        }
        let span = self.atoms[b].position - self.atoms[a].position;
        if span.norm() < COINCIDENT_EPSILON {
            return Err(ModelError::CoincidentConnection { a, b });
        }
        self.connection = Some((a, b));
        Ok(self)
    }

    pub(crate) fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Index of the library entry this fragment was created from, if any.
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    pub fn connection(&self) -> Option<(usize, usize)> {
        self.connection
    }

    /// Unit vector from the first to the second connection atom; the x axis
    /// when no connection is declared.
    ///
    /// Rigid transforms preserve the connection-atom separation, so the vector
    /// stays well defined on every fragment derived from a valid one.
    pub fn reference_vector(&self) -> Vector3<f64> {
        match self.connection {
            Some((a, b)) => (self.atoms[b].position - self.atoms[a].position).normalize(),
            None => Vector3::x(),
        }
    }

    /// Characteristic length: the connection-atom separation when declared,
    /// otherwise the maximum pairwise atom distance (0 for fewer than two
    /// atoms).
    pub fn length(&self) -> f64 {
        if let Some((a, b)) = self.connection {
            return (self.atoms[b].position - self.atoms[a].position).norm();
        }
        let mut max = 0.0f64;
        for (i, a) in self.atoms.iter().enumerate() {
            for b in &self.atoms[i + 1..] {
                max = max.max((b.position - a.position).norm());
            }
        }
        max
    }

    /// Arithmetic mean of the atom positions, `None` for an empty fragment.
    pub fn center(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum = self
            .atoms
            .iter()
            .fold(Vector3::zeros(), |acc, atom| acc + atom.position.coords);
        Some(Point3::from(sum / self.atoms.len() as f64))
    }

    /// Shifts every atom by `offset`, in place. The only mutating transform.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += offset;
        }
    }

    /// Returns a copy rotated by `angle` radians about an axis direction
    /// through the origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateAxis`] for a zero-length axis.
    pub fn rotated(&self, angle: f64, axis: Vector3<f64>) -> Result<Fragment, GeometryError> {
        let atoms = self
            .atoms
            .iter()
            .map(|atom| {
                rotation::rotate_about_axis(&atom.position, &axis, angle).map(|position| Atom {
                    label: atom.label.clone(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fragment {
            name: format!("{}_rot", self.name),
            atoms,
            connection: self.connection,
            source_index: self.source_index,
        })
    }

    /// Returns a copy with every atom reflected through `mirror`; when
    /// `offset` is given, the reflected copy is additionally shifted along the
    /// mirror's unit normal by that signed amount.
    pub fn reflected(&self, mirror: &Mirror, offset: Option<f64>) -> Fragment {
        let shift = offset.map_or(Vector3::zeros(), |amount| mirror.unit_normal() * amount);
        let atoms = self
            .atoms
            .iter()
            .map(|atom| Atom {
                label: atom.label.clone(),
                position: mirror.reflect(&atom.position) + shift,
            })
            .collect();
        Fragment {
            name: format!("{}_mir", self.name),
            atoms,
            connection: self.connection,
            source_index: self.source_index,
        }
    }

    /// Improper rotation: rotate by `angle` about `axis`, then reflect through
    /// `mirror`. The composition order is fixed.
    pub fn rotoreflected(
        &self,
        angle: f64,
        axis: Vector3<f64>,
        mirror: &Mirror,
        offset: Option<f64>,
    ) -> Result<Fragment, GeometryError> {
        Ok(self.rotated(angle, axis)?.reflected(mirror, offset))
    }

    /// Returns a copy translated so its centroid lands on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyFragment`] when there is no centroid.
    pub fn centered_at(&self, target: Point3<f64>) -> Result<Fragment, ModelError> {
        let center = self
            .center()
            .ok_or_else(|| ModelError::EmptyFragment(self.name.clone()))?;
        let mut moved = self.clone();
        moved.translate(target - center);
        Ok(moved)
    }

    /// Returns a copy translated so its centroid lands on the mirror's center
    /// offset by `standoff` along the mirror's unit normal.
    pub fn centered_on_mirror(
        &self,
        mirror: &Mirror,
        standoff: f64,
    ) -> Result<Fragment, ModelError> {
        self.centered_at(mirror.center() + mirror.unit_normal() * standoff)
    }

    /// Concatenates this fragment with `others`, preserving atom order: this
    /// fragment's atoms first, then each other fragment's in turn.
    ///
    /// The composite name is the original name suffixed with "JOINED" when all
    /// names are equal, otherwise the underscore-join of the distinct names in
    /// first-occurrence order.
    pub fn join<'a>(&self, others: impl IntoIterator<Item = &'a Fragment>) -> Fragment {
        let mut atoms = self.atoms.clone();
        let mut names = vec![self.name.clone()];
        for other in others {
            atoms.extend(other.atoms.iter().cloned());
            names.push(other.name.clone());
        }

        let name = if names.iter().all(|n| *n == names[0]) {
            format!("{}JOINED", names[0])
        } else {
            let mut distinct: Vec<String> = Vec::new();
            for name in names {
                if !distinct.contains(&name) {
                    distinct.push(name);
                }
            }
            distinct.join("_")
        };

        Fragment {
            name,
            atoms,
            connection: self.connection,
            source_index: self.source_index,
        }
    }
}
