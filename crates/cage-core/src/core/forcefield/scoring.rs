use super::params::{Forcefield, ParamError};
use super::potentials;
use crate::core::models::fragment::Atom;
use thiserror::Error;

/// Floor applied to pairwise distances so coincident atoms do not produce
/// unbounded energies.
pub const MIN_DISTANCE: f64 = 1e-5;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Energy evaluation failed: {source}")]
    Params {
        #[from]
        source: ParamError,
    },
}

/// Evaluates non-bonded Lennard-Jones energies against a read-only parameter
/// table.
pub struct Scorer<'a> {
    forcefield: &'a Forcefield,
}

impl<'a> Scorer<'a> {
    pub fn new(forcefield: &'a Forcefield) -> Self {
        Self { forcefield }
    }

    /// Lennard-Jones energy of a single atom pair, with Lorentz-Berthelot
    /// mixed parameters and the distance floored at [`MIN_DISTANCE`].
    pub fn pair_energy(&self, a: &Atom, b: &Atom) -> Result<f64, ScoringError> {
        let pa = self.forcefield.get(&a.label)?;
        let pb = self.forcefield.get(&b.label)?;
        let dist = (b.position - a.position).norm().max(MIN_DISTANCE);
        let (sigma, eps) = potentials::lb_mix(pa.sigma, pb.sigma, pa.epsilon, pb.epsilon);
        Ok(potentials::lennard_jones(dist, sigma, eps))
    }

    /// Total non-bonded energy: the sum over all unordered atom pairs (i < j).
    ///
    /// # Errors
    ///
    /// Surfaces an unknown atom-type label immediately; no partial sum is
    /// returned.
    pub fn total_energy(&self, atoms: &[Atom]) -> Result<f64, ScoringError> {
        let mut energy = 0.0;
        for (i, a) in atoms.iter().enumerate() {
            for b in &atoms[i + 1..] {
                energy += self.pair_energy(a, b)?;
            }
        }
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{ForcefieldKind, LjParams};
    use crate::core::geometry::rotation;
    use nalgebra::{Point3, Vector3};
    use std::collections::HashMap;

    const TOLERANCE: f64 = 1e-9;

    fn test_forcefield() -> Forcefield {
        let mut params = HashMap::new();
        params.insert(
            "C".to_string(),
            LjParams {
                sigma: 3.4,
                epsilon: 0.25,
            },
        );
        params.insert(
            "O".to_string(),
            LjParams {
                sigma: 3.0,
                epsilon: 0.5,
            },
        );
        Forcefield::new(ForcefieldKind::Uff, params)
    }

    fn atom(label: &str, x: f64, y: f64, z: f64) -> Atom {
        Atom::new(label, Point3::new(x, y, z))
    }

    #[test]
    fn pair_energy_mixes_parameters_before_evaluating() {
        let ff = test_forcefield();
        let scorer = Scorer::new(&ff);
        let energy = scorer
            .pair_energy(&atom("C", 0.0, 0.0, 0.0), &atom("O", 4.0, 0.0, 0.0))
            .unwrap();

        let (sigma, eps) = potentials::lb_mix(3.4, 3.0, 0.25, 0.5);
        let expected = potentials::lennard_jones(4.0, sigma, eps);
        assert!((energy - expected).abs() < TOLERANCE);
    }

    #[test]
    fn coincident_atoms_are_floored_to_the_minimum_distance() {
        let ff = test_forcefield();
        let scorer = Scorer::new(&ff);
        let energy = scorer
            .pair_energy(&atom("C", 0.0, 0.0, 0.0), &atom("C", 0.0, 0.0, 0.0))
            .unwrap();
        let expected = potentials::lennard_jones(MIN_DISTANCE, 3.4, 0.25);
        assert!(energy.is_finite());
        assert!((energy - expected).abs() < expected.abs() * 1e-12);
    }

    #[test]
    fn total_energy_sums_over_unordered_pairs() {
        let ff = test_forcefield();
        let scorer = Scorer::new(&ff);
        let atoms = vec![
            atom("C", 0.0, 0.0, 0.0),
            atom("C", 4.0, 0.0, 0.0),
            atom("C", 8.0, 0.0, 0.0),
        ];
        let total = scorer.total_energy(&atoms).unwrap();
        let expected = scorer.pair_energy(&atoms[0], &atoms[1]).unwrap()
            + scorer.pair_energy(&atoms[0], &atoms[2]).unwrap()
            + scorer.pair_energy(&atoms[1], &atoms[2]).unwrap();
        assert!((total - expected).abs() < TOLERANCE);
    }

    #[test]
    fn unknown_label_fails_without_a_partial_result() {
        let ff = test_forcefield();
        let scorer = Scorer::new(&ff);
        let atoms = vec![atom("C", 0.0, 0.0, 0.0), atom("Zz", 4.0, 0.0, 0.0)];
        assert!(matches!(
            scorer.total_energy(&atoms),
            Err(ScoringError::Params { .. })
        ));
    }

    #[test]
    fn energy_is_invariant_under_rigid_motion() {
        let ff = test_forcefield();
        let scorer = Scorer::new(&ff);
        let atoms = vec![
            atom("C", 0.0, 0.0, 0.0),
            atom("O", 3.5, 0.2, -0.3),
            atom("C", 1.1, 4.0, 2.0),
        ];
        let reference = scorer.total_energy(&atoms).unwrap();

        let axis = Vector3::new(0.3, 1.0, -0.5);
        let shift = Vector3::new(10.0, -4.0, 2.5);
        let moved: Vec<Atom> = atoms
            .iter()
            .map(|a| {
                let rotated = rotation::rotate_about_axis(&a.position, &axis, 1.1).unwrap();
                Atom::new(&a.label, rotated + shift)
            })
            .collect();
        let transformed = scorer.total_energy(&moved).unwrap();
        assert!((reference - transformed).abs() < 1e-9);
    }
}
