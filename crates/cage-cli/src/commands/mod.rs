pub mod build;
pub mod library;
