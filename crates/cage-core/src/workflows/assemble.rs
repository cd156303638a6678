use crate::core::forcefield::params::Forcefield;
use crate::core::forcefield::scoring::Scorer;
use crate::core::models::library::FragmentLibrary;
use crate::core::models::polyhedron::Polyhedron;
use crate::engine::assembly::Assembly;
use crate::engine::config::{AssemblyConfig, RelaxConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Full configuration of an assembly run. When `relax` is `None` the scan is
/// skipped and the as-built structure is returned.
#[derive(Debug, Clone, Default)]
pub struct AssembleConfig {
    pub assembly: AssemblyConfig,
    pub relax: Option<RelaxConfig>,
}

#[derive(Debug, Clone)]
pub struct AssembleResult {
    pub assembly: Assembly,
    /// Total non-bonded energy of the returned structure.
    pub energy: f64,
    /// Winning scan angle in degrees; `None` when relaxation was skipped.
    pub selected_angle: Option<f64>,
}

/// Builds a cage from the library fragment at `fragment_index` and the given
/// skeleton, then optionally relaxes it.
///
/// # Errors
///
/// Surfaces library lookup failures, assembly failures, and scoring errors
/// from the relaxation scan.
#[instrument(skip_all, name = "assemble_workflow")]
pub fn run(
    library: &FragmentLibrary,
    fragment_index: usize,
    skeleton: Polyhedron,
    forcefield: &Forcefield,
    config: &AssembleConfig,
    reporter: &ProgressReporter,
) -> Result<AssembleResult, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Assembly" });
    let template = library.fragment(fragment_index)?;
    info!(
        fragment = template.name(),
        skeleton = skeleton.name(),
        "Starting assembly workflow"
    );

    let assembly = Assembly::build(&template, skeleton, &config.assembly)?;
    reporter.report(Progress::PhaseFinish);

    let scorer = Scorer::new(forcefield);
    match &config.relax {
        Some(relax) => {
            reporter.report(Progress::PhaseStart { name: "Relaxation" });
            let outcome = assembly.relax_edges(&scorer, relax, reporter)?;
            reporter.report(Progress::PhaseFinish);
            Ok(AssembleResult {
                assembly: outcome.assembly,
                energy: outcome.energy,
                selected_angle: Some(outcome.angle_degrees),
            })
        }
        None => {
            let energy = scorer.total_energy(assembly.atoms())?;
            Ok(AssembleResult {
                assembly,
                energy,
                selected_angle: None,
            })
        }
    }
}
