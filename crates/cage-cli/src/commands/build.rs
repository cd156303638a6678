use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use molcage::{
    core::forcefield::params::Forcefield,
    core::io::{library::LibraryFile, pdb::PdbFile, traits::StructureFile, xyz::XyzFile},
    core::models::polyhedron::Polyhedron,
    engine::config::{AssemblyConfig, RelaxConfig, ScaleMode},
    engine::progress::ProgressReporter,
    workflows,
    workflows::assemble::AssembleConfig,
};
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    info!("Loading linker library from {:?}", &args.library);
    let library = LibraryFile::read_from_path(&args.library)?;
    if library.is_empty() {
        return Err(CliError::Argument(format!(
            "library '{}' contains no fragments",
            args.library.display()
        )));
    }

    let skeleton = match (&args.polyhedron, &args.polyhedron_file) {
        (Some(name), None) => Polyhedron::builtin(name)?,
        (None, Some(path)) => Polyhedron::load(path)?,
        (None, None) => {
            return Err(CliError::Argument(
                "either --polyhedron or --polyhedron-file is required".to_string(),
            ));
        }
        (Some(_), Some(_)) => unreachable!("clap rejects conflicting skeleton arguments"),
    };

    info!("Loading force-field parameters from {:?}", &args.forcefield);
    let forcefield = Forcefield::load_csv(&args.forcefield, args.potential)?;

    let config = AssembleConfig {
        assembly: AssemblyConfig {
            scale: args.scale.map_or(ScaleMode::Auto, ScaleMode::Fixed),
            bond_length: args.bond_length,
            metal: args.metal.clone(),
        },
        relax: args.relax.then(|| RelaxConfig {
            increment_degrees: args.increment,
            scan_limit_degrees: args.scan_limit,
        }),
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = workflows::assemble::run(
        &library,
        args.fragment,
        skeleton,
        &forcefield,
        &config,
        &reporter,
    )?;

    match result.selected_angle {
        Some(angle) => println!(
            "Assembled {} ({} atoms), relaxed at {:.1} deg, energy {:.4}",
            result.assembly.name(),
            result.assembly.atoms().len(),
            angle,
            result.energy
        ),
        None => println!(
            "Assembled {} ({} atoms), energy {:.4}",
            result.assembly.name(),
            result.assembly.atoms().len(),
            result.energy
        ),
    }

    let is_pdb = args
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdb"));
    info!("Writing structure to {:?}", &args.output);
    if is_pdb {
        PdbFile::write_to_path(result.assembly.name(), result.assembly.atoms(), &args.output)?;
    } else {
        XyzFile::write_to_path(result.assembly.name(), result.assembly.atoms(), &args.output)?;
    }
    println!("Wrote {}", args.output.display());

    Ok(())
}
