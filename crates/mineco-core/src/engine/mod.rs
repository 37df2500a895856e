//! # Engine Module
//!
//! The pathway algorithm proper, operating on contact graphs from [`crate::core::graph`].
//!
//! ## Pipeline
//!
//! For one pair of conformations the stages run in this order, each taking the
//! previous stage's output by value:
//!
//! 1. **Diffing** ([`differ`]) - Chooses the contact-rich and open graphs and extracts
//!    the filtered set of contacts unique to the contact-rich state
//! 2. **Clustering** ([`clustering`]) - Partitions those contacts with DBSCAN in
//!    residue-index space
//! 3. **Formation** ([`formation`]) - Greedily forms clusters in order of minimum
//!    shortest-path length, mutating the open graph as it goes
//! 4. **Reporting** ([`report`]) - Collects the formation steps into a pathway report
//!    and renders or parses the text log
//!
//! Supporting modules:
//!
//! - **Configuration** ([`config`]) - Parameters for every stage and their validation
//! - **Error Handling** ([`error`]) - The crate-wide [`error::EcoError`]
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Time Budgets** ([`deadline`]) - Per-pair timeouts checked between iterations

pub mod clustering;
pub mod config;
pub mod deadline;
pub mod differ;
pub mod error;
pub mod formation;
pub mod progress;
pub mod report;
