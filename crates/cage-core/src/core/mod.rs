//! # Core Module
//!
//! This module provides the fundamental building blocks for polyhedral molecular
//! assembly: geometric primitives, the fragment and polyhedron models, force-field
//! energy mathematics, and file I/O adapters.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the problem:
//!
//! - **Geometric Primitives** ([`geometry`]) - Quaternion rotation, vector
//!   alignment, reflection planes, and crystallographic unit-cell conversions
//! - **Molecular Representation** ([`models`]) - Linker fragments, fragment
//!   libraries, and polyhedron skeletons
//! - **Energy Calculations** ([`forcefield`]) - Lennard-Jones parameters, mixing
//!   rules, and pairwise non-bonded scoring
//! - **File I/O** ([`io`]) - Linker library, XYZ, and PDB format adapters
//!
//! All transforms in this layer are value-oriented: apart from the documented
//! in-place `translate`, every operation returns a new value and leaves its
//! input untouched, so callers can branch conformer sets from a shared template.

pub mod forcefield;
pub mod geometry;
pub mod io;
pub mod models;
