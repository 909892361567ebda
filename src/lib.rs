//! Manifest builder - SHA-256 integrity manifests for distributed file trees

pub mod blacklist;
pub mod commands;
pub mod config;
pub mod error;
pub mod hasher;
pub mod manifest;
pub mod models;
pub mod walk;

pub use error::BuildError;
pub use manifest::{build, write_manifest};
pub use models::{HashEntry, Manifest, OverwritePolicy};
