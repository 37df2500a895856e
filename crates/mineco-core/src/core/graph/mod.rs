//! # Contact Graphs
//!
//! Residue-level contact graphs built from a single conformation.
//!
//! - [`builder`] - Turns a [`crate::core::models::structure::Structure`] into a
//!   [`contact::ContactGraph`] using a granularity, a distance threshold and a
//!   long-interaction threshold
//! - [`contact`] - The graph itself, contacts as unordered residue pairs, and
//!   hop-count shortest paths
//!
//! Graphs of two conformations are compared through
//! [`crate::core::models::residue::ResidueKey`]: the same residue has the same node
//! in both graphs.

pub mod builder;
pub mod contact;
