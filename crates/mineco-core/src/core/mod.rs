//! # Core Module
//!
//! Stateless building blocks: structure models, file I/O, contact graphs and small
//! geometric and naming utilities.
//!
//! - **Structure Representation** ([`models`]) - Chains, residues and atoms of one conformation
//! - **File I/O** ([`io`]) - PDB reading, including multi-model trajectories
//! - **Contact Graphs** ([`graph`]) - Residue contact graphs and path queries
//! - **Utilities** ([`utils`]) - Geometry helpers and residue/atom name tables

pub mod graph;
pub mod io;
pub mod models;
pub mod utils;
