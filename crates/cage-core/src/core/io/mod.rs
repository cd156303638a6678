//! # I/O Module
//!
//! File adapters at the edge of the library: the linker library reader and the
//! XYZ/PDB structure writers. Everything here speaks the in-memory contracts
//! of [`crate::core::models`]; no parsing concern leaks into the engine.

pub mod library;
pub mod pdb;
pub mod traits;
pub mod xyz;
