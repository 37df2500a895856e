//! # MinECO Core Library
//!
//! Computes minimum "effective contact order" (ECO) pathways between two
//! conformational states of a protein.
//!
//! Both states are turned into residue contact graphs. The contacts unique to the
//! contact-rich state are grouped into clusters, and the clusters are formed one at a
//! time, always picking the cluster whose contacts are topologically closest in the
//! evolving open-state graph. The sum of those minimum path lengths is the pathway's
//! total ECO.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Structure models, PDB reading, contact graph
//!   construction and shortest-path queries. Nothing here knows about pathways.
//!
//! - **[`engine`]: The Algorithm.** Configuration, contact diffing and filtering,
//!   residue-index clustering, the greedy formation loop and pathway reports.
//!
//! - **[`workflows`]: The Public API.** Entry points that run a single structure pair,
//!   a multi-frame trajectory, or a directory of systems, and write the text logs and
//!   CSV summaries.

pub mod core;
pub mod engine;
pub mod workflows;
