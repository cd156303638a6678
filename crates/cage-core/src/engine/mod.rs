//! # Assembly Engine
//!
//! Orchestrates the construction of cage structures from fragment templates
//! and polyhedral skeletons, and the discrete conformational relaxation that
//! follows. The engine layer owns state and control flow; geometric and
//! energetic primitives live in [`crate::core`].

pub mod assembly;
pub mod config;
pub mod error;
pub mod progress;
