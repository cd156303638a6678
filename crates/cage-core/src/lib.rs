//! # Molcage Core Library
//!
//! A library for generating synthetic polyhedral molecular structures by composing
//! rigid-body geometric transforms on linker fragments, and for selecting low-energy
//! conformations with a pairwise Lennard-Jones potential.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless geometric primitives
//!   (quaternion rotation, mirror planes, unit-cell conversions), the fragment and
//!   polyhedron data models, pure force-field mathematics, and file I/O adapters.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer owns the assembly of a
//!   fragment onto every edge of a polyhedron skeleton and the discrete
//!   conformational scan that selects the lowest-energy edge rotation.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer. It
//!   ties the `engine` and `core` together to execute a complete build-and-relax
//!   procedure from a fragment library to a scored structure.

pub mod core;
pub mod engine;
pub mod workflows;
