//! # Geometry Module
//!
//! Stateless 3D geometric primitives: vector alignment and quaternion-based
//! rotation about arbitrary axes, reflection planes (mirrors), and conversions
//! between Cartesian and crystallographic-fractional coordinates.
//!
//! Degenerate inputs (a zero-length rotation axis, collinear mirror points, a
//! singular unit cell) are rejected with a [`GeometryError`] instead of being
//! allowed to propagate NaN coordinates downstream.

pub mod cell;
pub mod mirror;
pub mod rotation;

use thiserror::Error;

/// Errors raised by geometric primitives on degenerate input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The two points defining a rotation axis coincide.
    #[error("Rotation axis has zero length; the two axis points coincide")]
    DegenerateAxis,

    /// The three points defining a mirror plane are collinear, so the plane
    /// normal vanishes and reflection is undefined.
    #[error("Mirror plane points are collinear; the plane normal is undefined")]
    CollinearPlanePoints,

    /// Unit-cell edge lengths must be positive and the cell must have
    /// non-vanishing volume.
    #[error("Degenerate unit cell: {0}")]
    DegenerateCell(String),
}
