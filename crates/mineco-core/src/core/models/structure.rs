use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::{Residue, ResidueKey};
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Cannot add a residue before a chain has been started")]
    NoActiveChain,
    #[error("Cannot add an atom before a residue has been started")]
    NoActiveResidue,
    #[error("Duplicate atom serial: {0}")]
    DuplicateSerial(usize),
}

/// One conformation of a protein: chains of residues, each holding its atoms.
///
/// Chains and residues are kept in the order they were added, which for parsed files
/// is file order. Residues are addressable through their [`ResidueKey`] so that two
/// conformations of the same protein can be matched residue by residue.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    residue_key_map: HashMap<ResidueKey, ResidueId>,
    chain_id_map: HashMap<char, ChainId>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Returns the chains in the order they were added.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(move |&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns every residue, chain by chain, in insertion order.
    pub fn residues(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains().flat_map(move |(_, chain)| {
            chain
                .residues()
                .iter()
                .filter_map(move |&id| self.residues.get(id).map(|residue| (id, residue)))
        })
    }

    pub fn find_residue(&self, key: ResidueKey) -> Option<ResidueId> {
        self.residue_key_map.get(&key).copied()
    }

    /// Looks up the position of a named atom within a residue.
    pub fn atom_position(&self, residue_id: ResidueId, atom_name: &str) -> Option<Point3<f64>> {
        let residue = self.residues.get(residue_id)?;
        let atom_id = residue.get_atom_id_by_name(atom_name)?;
        self.atoms.get(atom_id).map(|atom| atom.position)
    }

    /// Returns the atoms of a residue in insertion order.
    pub fn residue_atoms(&self, residue_id: ResidueId) -> impl Iterator<Item = &Atom> {
        self.residues
            .get(residue_id)
            .map(|residue| residue.atoms())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&id| self.atoms.get(id))
    }

    /// Adds a new chain or returns the existing one with the same identifier.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a residue to a chain, or returns the existing residue with the same key.
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = ResidueKey::new(chain.id, residue_number);

        let residue_id = *self.residue_key_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(key, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }
        Some(residue_id)
    }

    /// Adds an atom to an existing residue.
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(
        &mut self,
        residue_id: ResidueId,
        serial: usize,
        name: &str,
        position: Point3<f64>,
    ) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        let atom = Atom::new(serial, name, residue_id, position);
        let atom_name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&atom_name, atom_id);
        Some(atom_id)
    }
}

/// Incrementally assembles a [`Structure`] from a stream of atom records.
#[derive(Debug, Default)]
pub struct StructureBuilder {
    structure: Structure,
    seen_serials: HashSet<usize>,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_chain(&mut self, id: char) -> &mut Self {
        self.current_chain = Some(self.structure.add_chain(id));
        self.current_residue = None;
        self
    }

    pub fn start_residue(
        &mut self,
        residue_number: isize,
        name: &str,
    ) -> Result<&mut Self, StructureError> {
        let chain_id = self.current_chain.ok_or(StructureError::NoActiveChain)?;
        let residue_id = self
            .structure
            .add_residue(chain_id, residue_number, name)
            .ok_or(StructureError::NoActiveChain)?;
        self.current_residue = Some(residue_id);
        Ok(self)
    }

    pub fn add_atom(
        &mut self,
        serial: usize,
        name: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, StructureError> {
        let residue_id = self.current_residue.ok_or(StructureError::NoActiveResidue)?;
        if !self.seen_serials.insert(serial) {
            return Err(StructureError::DuplicateSerial(serial));
        }
        self.structure
            .add_atom_to_residue(residue_id, serial, name, position)
            .ok_or(StructureError::NoActiveResidue)?;
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.structure.atom_count() == 0
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_chain_structure() -> Structure {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        builder.start_residue(1, "ALA").unwrap();
        builder.add_atom(1, "N", Point3::new(0.0, 0.0, 0.0)).unwrap();
        builder.add_atom(2, "CA", Point3::new(1.0, 0.0, 0.0)).unwrap();
        builder.start_residue(2, "GLY").unwrap();
        builder.add_atom(3, "CA", Point3::new(4.8, 0.0, 0.0)).unwrap();
        builder.start_chain('B');
        builder.start_residue(1, "SER").unwrap();
        builder.add_atom(4, "CA", Point3::new(0.0, 5.0, 0.0)).unwrap();
        builder.build()
    }

    #[test]
    fn residues_are_iterated_chain_by_chain_in_file_order() {
        let structure = two_chain_structure();
        let keys: Vec<_> = structure.residues().map(|(_, r)| r.key).collect();
        assert_eq!(
            keys,
            vec![
                ResidueKey::new('A', 1),
                ResidueKey::new('A', 2),
                ResidueKey::new('B', 1)
            ]
        );
        assert_eq!(structure.residue_count(), 3);
        assert_eq!(structure.atom_count(), 4);
    }

    #[test]
    fn atom_position_is_found_by_residue_and_name() {
        let structure = two_chain_structure();
        let residue_id = structure.find_residue(ResidueKey::new('A', 1)).unwrap();
        assert_eq!(
            structure.atom_position(residue_id, "CA"),
            Some(Point3::new(1.0, 0.0, 0.0))
        );
        assert_eq!(structure.atom_position(residue_id, "CB"), None);
        assert_eq!(structure.residue_atoms(residue_id).count(), 2);
    }

    #[test]
    fn add_chain_is_idempotent() {
        let mut structure = Structure::new();
        let first = structure.add_chain('A');
        let second = structure.add_chain('A');
        assert_eq!(first, second);
        assert_eq!(structure.chains().count(), 1);
    }

    #[test]
    fn builder_rejects_atoms_without_residue() {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        let result = builder.add_atom(1, "CA", Point3::origin());
        assert_eq!(result.err(), Some(StructureError::NoActiveResidue));
    }

    #[test]
    fn builder_rejects_residues_without_chain() {
        let mut builder = StructureBuilder::new();
        assert_eq!(
            builder.start_residue(1, "ALA").err(),
            Some(StructureError::NoActiveChain)
        );
    }

    #[test]
    fn builder_rejects_duplicate_serials() {
        let mut builder = StructureBuilder::new();
        builder.start_chain('A');
        builder.start_residue(1, "ALA").unwrap();
        builder.add_atom(7, "N", Point3::origin()).unwrap();
        let result = builder.add_atom(7, "CA", Point3::origin());
        assert_eq!(result.err(), Some(StructureError::DuplicateSerial(7)));
    }
}
