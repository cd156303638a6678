//! # Force Field Module
//!
//! Lennard-Jones non-bonded energy evaluation for assembled structures.
//!
//! - [`potentials`] - The pairwise potential and the Lorentz-Berthelot
//!   combining rule, as pure functions
//! - [`params`] - Per-atom-type sigma/epsilon tables, loaded once per
//!   force-field selection and read-only afterwards
//! - [`scoring`] - Total non-bonded energy over all unordered atom pairs
//!
//! Energies are expressed in Boltzmann-constant-scaled temperature units (kB),
//! a modeling convention of the parameter tables rather than absolute energy.

pub mod params;
pub mod potentials;
pub mod scoring;
