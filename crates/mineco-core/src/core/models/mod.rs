//! # Structure Models
//!
//! Data structures describing one conformation of a protein as read from a
//! coordinate file: chains, residues and atoms.
//!
//! - [`structure`] - The [`structure::Structure`] container and its incremental builder
//! - [`residue`] - Residues and the conformation-independent [`residue::ResidueKey`]
//! - [`chain`] - Chains and their classification
//! - [`atom`] - Atoms with Cartesian positions
//! - [`ids`] - Arena keys for atoms, residues and chains
//!
//! Two structures of the same protein are compared through [`residue::ResidueKey`],
//! never through arena ids, which are local to one structure.

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod structure;
