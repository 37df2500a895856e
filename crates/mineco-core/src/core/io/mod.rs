//! Reading protein structures from coordinate files.
//!
//! [`traits::StructureFile`] is the format-independent interface; [`pdb::PdbFile`]
//! implements it for fixed-column PDB files, including multi-model trajectories.

pub mod pdb;
pub mod traits;
