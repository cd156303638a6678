//! # Workflows Module
//!
//! High-level entry points that orchestrate a complete cage-generation run:
//! fragment selection, skeleton assembly, and the optional relaxation scan.
//! Callers supply resources (library, forcefield) as values; workflows never
//! load files themselves.

pub mod assemble;
