use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers::is_amino_acid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identity of a residue that is stable across conformations of the same protein.
///
/// Two structures of one protein are compared node-by-node through this key. Atom
/// serials, coordinates and the residue name are not part of it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ResidueKey {
    pub chain_id: char,
    pub residue_number: isize,
}

impl ResidueKey {
    pub const fn new(chain_id: char, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub key: ResidueKey,                    // Chain label and sequence number
    pub name: String,                       // Three-letter residue name (e.g., "ALA")
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(key: ResidueKey, name: &str, chain_id: ChainId) -> Self {
        Self {
            key,
            name: name.trim().to_string(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        // Alternate locations share a name; the first one wins.
        self.atom_name_map
            .entry(atom_name.trim().to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_amino_acid(&self) -> bool {
        is_amino_acid(&self.name)
    }

    /// Node label in the `<chain>:<name>:<number>` form used by pathway logs.
    pub fn label(&self) -> String {
        format!(
            "{}:{}:{}",
            self.key.chain_id, self.name, self.key.residue_number
        )
    }
}
