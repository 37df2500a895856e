//! # Workflows Module
//!
//! Entry points that run the full pipeline on structures or files.
//!
//! - **Pair Workflow** ([`pair`]) - One structure pair: contact graphs, diffing,
//!   clustering and formation, producing a [`crate::engine::report::PathwayReport`]
//! - **Trajectory Workflow** ([`trajectory`]) - Walks consecutive frames of a
//!   multi-model file, skipping frame pairs that fail or score zero
//! - **Batch Workflow** ([`batch`]) - Runs the trajectory workflow for every system
//!   directory under a root and writes one summary CSV per system
//! - **Summaries** ([`summary`]) - The `name,total_eco,min_eco_contacts` CSV records

pub mod batch;
pub mod pair;
pub mod summary;
pub mod trajectory;

#[cfg(test)]
pub(crate) mod fixtures;
