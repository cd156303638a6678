use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::scoring::ScoringError;
use crate::core::geometry::GeometryError;
use crate::core::models::fragment::ModelError;
use crate::core::models::library::LibraryError;
use crate::core::models::polyhedron::PolyhedronError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Geometry operation failed: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Fragment model error: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Fragment library error: {source}")]
    Library {
        #[from]
        source: LibraryError,
    },

    #[error("Polyhedron error: {source}")]
    Polyhedron {
        #[from]
        source: PolyhedronError,
    },

    #[error("Energy scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Edge index {index} out of range for skeleton with {count} edges")]
    EdgeOutOfRange { index: usize, count: usize },

    #[error(
        "Rotational scan produced no candidate angles \
         (increment {increment} deg, limit {limit} deg)"
    )]
    EmptyScan { increment: f64, limit: f64 },
}
