//! # Models Module
//!
//! Data structures for the objects the assembly engine operates on:
//!
//! - [`fragment`] - A linker fragment: a named, ordered list of labeled atom
//!   positions with rigid-body transform operations
//! - [`library`] - An explicit, injectable collection of fragment templates
//! - [`polyhedron`] - A polyhedron skeleton (vertices, edges, faces) with a
//!   nominal size, the scaffold fragments are aligned onto

pub mod fragment;
pub mod library;
pub mod polyhedron;
