//! # Cage Assembly
//!
//! Builds a cage structure by aligning a copy of one linker fragment onto
//! every edge of a polyhedral skeleton, then relaxes the structure with a
//! lockstep discrete rotational scan over the edge axes.

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use super::config::{AssemblyConfig, RelaxConfig, ScaleMode};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::forcefield::scoring::Scorer;
use crate::core::geometry::rotation;
use crate::core::models::fragment::{Atom, Fragment};
use crate::core::models::polyhedron::Polyhedron;

/// Angles below this count as "already aligned" and skip the rotation.
const ALIGNMENT_EPSILON: f64 = 1e-12;

/// A fully built cage: the resized skeleton, one placed fragment per edge, and
/// the flattened atom list. Constructing an [`Assembly`] through
/// [`Assembly::build`] is the only way to obtain one, so every assembly in
/// circulation is complete.
#[derive(Debug, Clone)]
pub struct Assembly {
    name: String,
    skeleton: Polyhedron,
    edge_fragments: Vec<Fragment>,
    edge_directions: Vec<Vector3<f64>>,
    edge_midpoints: Vec<Point3<f64>>,
    metal: Option<String>,
    atoms: Vec<Atom>,
}

/// Result of a relaxation scan: the best lockstep conformer found, its total
/// energy, and the rotation angle (degrees) that produced it.
#[derive(Debug, Clone)]
pub struct RelaxOutcome {
    pub assembly: Assembly,
    pub energy: f64,
    pub angle_degrees: f64,
}

impl Assembly {
    /// Places one copy of `template` on every edge of `skeleton`.
    ///
    /// The skeleton is first resized: under [`ScaleMode::Auto`] the edge
    /// length becomes the fragment's connection length plus one bond length of
    /// clearance at either end. Each copy is rotated so its reference vector
    /// points along the edge, then centered on the edge midpoint.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, a non-positive computed edge length, or an
    /// empty template fragment.
    pub fn build(
        template: &Fragment,
        mut skeleton: Polyhedron,
        config: &AssemblyConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let scale = match config.scale {
            ScaleMode::Auto => template.length() + 2.0 * config.bond_length,
            ScaleMode::Fixed(edge_length) => edge_length,
        };
        skeleton.resize(scale)?;
        info!(
            skeleton = skeleton.name(),
            fragment = template.name(),
            edge_length = scale,
            "Assembling cage"
        );

        let edge_directions = skeleton.edge_directions();
        let edge_midpoints = skeleton.edge_midpoints();
        let reference = template.reference_vector();

        let mut edge_fragments = Vec::with_capacity(skeleton.edge_count());
        for (direction, midpoint) in edge_directions.iter().zip(&edge_midpoints) {
            let oriented = orient_to(template, &reference, direction)?;
            edge_fragments.push(oriented.centered_at(*midpoint)?);
        }

        let name = format!("{}_{}", template.name(), skeleton.name());
        let mut assembly = Self {
            name,
            skeleton,
            edge_fragments,
            edge_directions,
            edge_midpoints,
            metal: config.metal.clone(),
            atoms: Vec::new(),
        };
        assembly.rebuild();
        Ok(assembly)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skeleton(&self) -> &Polyhedron {
        &self.skeleton
    }

    pub fn edge_fragments(&self) -> &[Fragment] {
        &self.edge_fragments
    }

    pub fn edge_count(&self) -> usize {
        self.edge_fragments.len()
    }

    /// The flattened atom list: edge fragments in edge order, then one metal
    /// atom per skeleton vertex when a metal label is set.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Sets (or replaces) the metal label placed at every skeleton vertex.
    pub fn add_metal(&mut self, label: &str) {
        self.metal = Some(label.to_string());
        self.rebuild();
    }

    /// Rotates the fragment on `edge` by `angle` radians about the edge axis,
    /// keeping its centroid pinned to the edge midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EdgeOutOfRange`] for a bad edge index.
    pub fn rotate_edge(&mut self, edge: usize, angle: f64) -> Result<(), EngineError> {
        let count = self.edge_fragments.len();
        if edge >= count {
            return Err(EngineError::EdgeOutOfRange { index: edge, count });
        }
        let rotated = self.edge_fragments[edge]
            .rotated(angle, self.edge_directions[edge])?
            .centered_at(self.edge_midpoints[edge])?;
        self.edge_fragments[edge] = rotated;
        self.rebuild();
        Ok(())
    }

    /// Scans lockstep rotations of all edge fragments and returns the
    /// lowest-energy conformer.
    ///
    /// Every candidate angle from `config` is applied to a fresh copy of this
    /// assembly, rotating every edge fragment by the same angle about its own
    /// edge axis, and the copy's total non-bonded energy is evaluated. The
    /// strict minimum wins; on ties the smallest angle is kept. The original
    /// assembly is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyScan`] when the increment and limit admit
    /// no candidate angles, and surfaces scoring errors immediately.
    pub fn relax_edges(
        &self,
        scorer: &Scorer,
        config: &RelaxConfig,
        reporter: &ProgressReporter,
    ) -> Result<RelaxOutcome, EngineError> {
        config.validate()?;
        let candidates = config.candidate_angles();

        reporter.report(Progress::TaskStart {
            total_steps: candidates.len() as u64,
        });

        let mut best: Option<RelaxOutcome> = None;
        for angle_degrees in candidates {
            let mut conformer = self.clone();
            let angle = angle_degrees.to_radians();
            for edge in 0..conformer.edge_fragments.len() {
                conformer.rotate_edge(edge, angle)?;
            }
            let energy = scorer.total_energy(conformer.atoms())?;
            debug!(angle_degrees, energy, "Scored scan candidate");
            reporter.report(Progress::Candidate {
                angle_degrees,
                energy,
            });
            reporter.report(Progress::TaskIncrement);

            let improved = match &best {
                Some(current) => energy < current.energy,
                None => true,
            };
            if improved {
                best = Some(RelaxOutcome {
                    assembly: conformer,
                    energy,
                    angle_degrees,
                });
            }
        }
        reporter.report(Progress::TaskFinish);

        // No conformer means the increment/limit pair admitted no candidates.
        let Some(outcome) = best else {
            return Err(EngineError::EmptyScan {
                increment: config.increment_degrees,
                limit: config.scan_limit_degrees,
            });
        };
        info!(
            angle_degrees = outcome.angle_degrees,
            energy = outcome.energy,
            "Relaxation scan complete"
        );
        Ok(outcome)
    }

    fn rebuild(&mut self) {
        let mut atoms: Vec<Atom> = self
            .edge_fragments
            .iter()
            .flat_map(|fragment| fragment.atoms().iter().cloned())
            .collect();
        if let Some(label) = &self.metal {
            atoms.extend(
                self.skeleton
                    .vertices()
                    .iter()
                    .map(|vertex| Atom::new(label, *vertex)),
            );
        }
        self.atoms = atoms;
    }
}

/// Returns a copy of `template` rotated so `reference` points along `edge`.
///
/// Parallel vectors skip the rotation; antiparallel vectors have no unique
/// rotation axis, so any direction perpendicular to the reference serves.
fn orient_to(
    template: &Fragment,
    reference: &Vector3<f64>,
    edge: &Vector3<f64>,
) -> Result<Fragment, EngineError> {
    let (axis, angle) = rotation::align(reference, edge);
    if angle.abs() < ALIGNMENT_EPSILON {
        return Ok(template.clone());
    }
    let axis = if axis.norm() < ALIGNMENT_EPSILON {
        perpendicular_to(reference)
    } else {
        axis
    };
    Ok(template.rotated(angle, axis)?)
}

fn perpendicular_to(v: &Vector3<f64>) -> Vector3<f64> {
    let helper = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    v.cross(&helper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{Forcefield, ForcefieldKind, LjParams};
    use std::collections::HashMap;
    use std::f64::consts::PI;
    use std::sync::Mutex;

    const TOLERANCE: f64 = 1e-9;

    fn two_atom_template(length: f64) -> Fragment {
        let half = length / 2.0;
        Fragment::new(
            "L",
            vec![
                Atom::new("C", Point3::new(-half, 0.0, 0.0)),
                Atom::new("C", Point3::new(half, 0.0, 0.0)),
            ],
        )
        .with_connection(0, 1)
        .unwrap()
    }

    fn carbon_forcefield() -> Forcefield {
        let mut params = HashMap::new();
        params.insert(
            "C".to_string(),
            LjParams {
                sigma: 3.4,
                epsilon: 0.105,
            },
        );
        params.insert(
            "Zn".to_string(),
            LjParams {
                sigma: 2.4,
                epsilon: 0.124,
            },
        );
        Forcefield::new(ForcefieldKind::Uff, params)
    }

    fn build_cube_assembly(length: f64) -> Assembly {
        let template = two_atom_template(length);
        let skeleton = Polyhedron::builtin("cube").unwrap();
        let config = AssemblyConfig {
            bond_length: 0.0,
            ..Default::default()
        };
        Assembly::build(&template, skeleton, &config).unwrap()
    }

    #[test]
    fn auto_scale_on_a_cube_places_one_fragment_per_edge() {
        let assembly = build_cube_assembly(3.0);

        assert_eq!(assembly.edge_fragments().len(), 12);
        assert_eq!(assembly.atoms().len(), 24);
        // Auto scale with zero bond length makes edges exactly fragment-long.
        assert!((assembly.skeleton().size() - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn placed_fragments_sit_on_their_edge_midpoints() {
        let assembly = build_cube_assembly(2.0);
        let midpoints = assembly.skeleton().edge_midpoints();

        for (fragment, midpoint) in assembly.edge_fragments().iter().zip(&midpoints) {
            let center = fragment.center().unwrap();
            assert!((center - midpoint).norm() < TOLERANCE);
        }
    }

    #[test]
    fn placed_fragments_point_along_their_edges() {
        let assembly = build_cube_assembly(2.0);
        let directions = assembly.skeleton().edge_directions();

        for (fragment, direction) in assembly.edge_fragments().iter().zip(&directions) {
            let aligned = fragment.reference_vector().dot(direction);
            assert!((aligned - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn auto_scale_adds_bond_clearance_at_both_ends() {
        let template = two_atom_template(3.0);
        let skeleton = Polyhedron::builtin("tetrahedron").unwrap();
        let config = AssemblyConfig {
            bond_length: 1.5,
            ..Default::default()
        };
        let assembly = Assembly::build(&template, skeleton, &config).unwrap();
        assert!((assembly.skeleton().size() - 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn fixed_scale_overrides_the_fragment_length() {
        let template = two_atom_template(3.0);
        let skeleton = Polyhedron::builtin("cube").unwrap();
        let config = AssemblyConfig {
            scale: ScaleMode::Fixed(10.0),
            ..Default::default()
        };
        let assembly = Assembly::build(&template, skeleton, &config).unwrap();
        assert!((assembly.skeleton().size() - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn metal_atoms_are_appended_per_vertex() {
        let mut assembly = build_cube_assembly(2.0);
        assembly.add_metal("Zn");

        assert_eq!(assembly.atoms().len(), 24 + 8);
        let metals: Vec<_> = assembly
            .atoms()
            .iter()
            .filter(|atom| atom.label == "Zn")
            .collect();
        assert_eq!(metals.len(), 8);
        // Metal positions coincide with the resized skeleton vertices.
        for (metal, vertex) in metals.iter().zip(assembly.skeleton().vertices()) {
            assert!((metal.position - vertex).norm() < TOLERANCE);
        }
    }

    #[test]
    fn rotate_edge_keeps_the_centroid_on_the_midpoint() {
        let mut assembly = build_cube_assembly(2.0);
        let midpoint = assembly.skeleton().edge_midpoints()[0];

        assembly.rotate_edge(0, PI / 3.0).unwrap();
        let center = assembly.edge_fragments()[0].center().unwrap();
        assert!((center - midpoint).norm() < TOLERANCE);
    }

    #[test]
    fn rotate_edge_rejects_out_of_range_indices() {
        let mut assembly = build_cube_assembly(2.0);
        let result = assembly.rotate_edge(12, 1.0);
        assert!(matches!(
            result,
            Err(EngineError::EdgeOutOfRange {
                index: 12,
                count: 12
            })
        ));
    }

    #[test]
    fn relax_scans_every_candidate_and_returns_one_of_them() {
        let assembly = build_cube_assembly(2.0);
        let forcefield = carbon_forcefield();
        let scorer = Scorer::new(&forcefield);
        let config = RelaxConfig {
            increment_degrees: 90.0,
            scan_limit_degrees: 180.0,
        };

        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Candidate { angle_degrees, .. } = event {
                seen.lock().unwrap().push(angle_degrees);
            }
        }));

        let outcome = assembly.relax_edges(&scorer, &config, &reporter).unwrap();
        // 90/180 admits exactly one candidate; it wins by default.
        assert_eq!(*seen.lock().unwrap(), vec![90.0]);
        assert!((outcome.angle_degrees - 90.0).abs() < TOLERANCE);
        assert_eq!(outcome.assembly.atoms().len(), 24);
    }

    #[test]
    fn relax_keeps_the_lowest_energy_conformer() {
        let assembly = build_cube_assembly(2.0);
        let forcefield = carbon_forcefield();
        let scorer = Scorer::new(&forcefield);
        let config = RelaxConfig {
            increment_degrees: 30.0,
            scan_limit_degrees: 180.0,
        };
        let reporter = ProgressReporter::new();

        let outcome = assembly.relax_edges(&scorer, &config, &reporter).unwrap();
        for angle_degrees in config.candidate_angles() {
            let mut conformer = assembly.clone();
            for edge in 0..conformer.edge_fragments().len() {
                conformer.rotate_edge(edge, angle_degrees.to_radians()).unwrap();
            }
            let energy = scorer.total_energy(conformer.atoms()).unwrap();
            assert!(outcome.energy <= energy + TOLERANCE);
        }
    }

    #[test]
    fn relax_does_not_modify_the_original_assembly() {
        let assembly = build_cube_assembly(2.0);
        let before: Vec<_> = assembly
            .atoms()
            .iter()
            .map(|atom| atom.position)
            .collect();
        let forcefield = carbon_forcefield();
        let scorer = Scorer::new(&forcefield);

        assembly
            .relax_edges(&scorer, &RelaxConfig::default(), &ProgressReporter::new())
            .unwrap();
        for (atom, position) in assembly.atoms().iter().zip(&before) {
            assert!((atom.position - position).norm() < TOLERANCE);
        }
    }

    #[test]
    fn relax_with_no_candidates_is_an_empty_scan_error() {
        let assembly = build_cube_assembly(2.0);
        let forcefield = carbon_forcefield();
        let scorer = Scorer::new(&forcefield);
        let config = RelaxConfig {
            increment_degrees: 200.0,
            scan_limit_degrees: 180.0,
        };

        let result = assembly.relax_edges(&scorer, &config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::EmptyScan { .. })));
    }

    #[test]
    fn oblique_edges_are_still_oriented() {
        let template = two_atom_template(2.0);
        let skeleton = Polyhedron::builtin("octahedron").unwrap();
        let config = AssemblyConfig {
            bond_length: 0.0,
            ..Default::default()
        };
        let assembly = Assembly::build(&template, skeleton, &config).unwrap();
        let directions = assembly.skeleton().edge_directions();
        for (fragment, direction) in assembly.edge_fragments().iter().zip(&directions) {
            assert!((fragment.reference_vector().dot(direction) - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn antiparallel_edge_uses_a_fallback_axis() {
        // One edge pointing along -x, exactly opposite the reference vector.
        let template = two_atom_template(2.0);
        let skeleton = Polyhedron::new(
            "stick",
            vec![Point3::origin(), Point3::new(-1.0, 0.0, 0.0)],
            vec![[0, 1]],
            vec![],
            1.0,
            1,
        )
        .unwrap();
        let config = AssemblyConfig {
            bond_length: 0.0,
            ..Default::default()
        };
        let assembly = Assembly::build(&template, skeleton, &config).unwrap();
        let direction = assembly.skeleton().edge_directions()[0];
        let aligned = assembly.edge_fragments()[0].reference_vector().dot(&direction);
        assert!((aligned - 1.0).abs() < TOLERANCE);
    }
}
