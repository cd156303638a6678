use molcage::core::forcefield::params::ParamLoadError;
use molcage::core::io::library::LibraryFileError;
use molcage::core::io::pdb::PdbError;
use molcage::core::io::xyz::XyzError;
use molcage::core::models::polyhedron::{PolyhedronError, PolyhedronLoadError};
use molcage::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Library(#[from] LibraryFileError),

    #[error(transparent)]
    Forcefield(#[from] ParamLoadError),

    #[error(transparent)]
    Skeleton(#[from] PolyhedronLoadError),

    #[error(transparent)]
    BuiltinSkeleton(#[from] PolyhedronError),

    #[error("Failed to write XYZ output: {0}")]
    Xyz(#[from] XyzError),

    #[error("Failed to write PDB output: {0}")]
    Pdb(#[from] PdbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}
