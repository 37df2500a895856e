use crate::core::models::residue::ResidueKey;
use crate::core::utils::geometry::distance;
use nalgebra::Point3;
use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactGraphError {
    #[error("Residue {0} is not a node of the contact graph")]
    UnknownResidue(ResidueKey),
    #[error("A residue cannot be in contact with itself ({0})")]
    SelfContact(ResidueKey),
}

/// An unordered residue pair, stored with the smaller key first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Contact {
    pub first: ResidueKey,
    pub second: ResidueKey,
}

impl Contact {
    pub fn new(a: ResidueKey, b: ResidueKey) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GraphResidue {
    name: String,
    position: Point3<f64>,
}

/// Residue contact graph of one conformation.
///
/// Nodes are residues with their representative position; edges are contacts
/// weighted by the Euclidean distance between the two representative positions.
#[derive(Debug, Clone, Default)]
pub struct ContactGraph {
    graph: UnGraphMap<ResidueKey, f64>,
    residues: BTreeMap<ResidueKey, GraphResidue>,
}

impl ContactGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_residue(&mut self, key: ResidueKey, name: &str, position: Point3<f64>) {
        self.graph.add_node(key);
        self.residues.insert(
            key,
            GraphResidue {
                name: name.to_string(),
                position,
            },
        );
    }

    pub fn contains_residue(&self, key: ResidueKey) -> bool {
        self.residues.contains_key(&key)
    }

    pub fn position(&self, key: ResidueKey) -> Option<Point3<f64>> {
        self.residues.get(&key).map(|r| r.position)
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn contact_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_contact(&self, contact: Contact) -> bool {
        self.graph.contains_edge(contact.first, contact.second)
    }

    /// Distance stored on a contact edge.
    pub fn contact_distance(&self, contact: Contact) -> Option<f64> {
        self.graph
            .edge_weight(contact.first, contact.second)
            .copied()
    }

    /// Distance between the representative positions of two residues, whether or
    /// not they are in contact.
    pub fn residue_distance(&self, a: ResidueKey, b: ResidueKey) -> Result<f64, ContactGraphError> {
        let pa = self
            .position(a)
            .ok_or(ContactGraphError::UnknownResidue(a))?;
        let pb = self
            .position(b)
            .ok_or(ContactGraphError::UnknownResidue(b))?;
        Ok(distance(&pa, &pb))
    }

    /// Adds a contact weighted by the distance between the two residues.
    ///
    /// Returns the stored distance.
    pub fn add_contact(&mut self, a: ResidueKey, b: ResidueKey) -> Result<f64, ContactGraphError> {
        if a == b {
            return Err(ContactGraphError::SelfContact(a));
        }
        let d = self.residue_distance(a, b)?;
        self.graph.add_edge(a, b, d);
        Ok(d)
    }

    /// Links two residues that are already nodes of this graph.
    pub(crate) fn connect(&mut self, a: ResidueKey, b: ResidueKey, weight: f64) {
        debug_assert!(a != b && self.contains_residue(a) && self.contains_residue(b));
        self.graph.add_edge(a, b, weight);
    }

    /// Adds a contact with an explicit weight, as done while a pathway forms.
    ///
    /// Both residues must already be nodes. Returns `true` if the contact is new.
    pub fn insert_contact(
        &mut self,
        contact: Contact,
        weight: f64,
    ) -> Result<bool, ContactGraphError> {
        if contact.first == contact.second {
            return Err(ContactGraphError::SelfContact(contact.first));
        }
        for key in [contact.first, contact.second] {
            if !self.contains_residue(key) {
                return Err(ContactGraphError::UnknownResidue(key));
            }
        }
        Ok(self
            .graph
            .add_edge(contact.first, contact.second, weight)
            .is_none())
    }

    /// All contacts with their distances, in canonical (sorted) order.
    pub fn contacts(&self) -> Vec<(Contact, f64)> {
        let mut contacts: Vec<_> = self
            .graph
            .all_edges()
            .map(|(a, b, &d)| (Contact::new(a, b), d))
            .collect();
        contacts.sort_by(|x, y| x.0.cmp(&y.0));
        contacts
    }

    /// Number of edges on the shortest path between two residues, ignoring weights.
    ///
    /// Returns `None` when the residues lie in different connected components or
    /// either one is not a node.
    pub fn shortest_path_length(&self, from: ResidueKey, to: ResidueKey) -> Option<usize> {
        if !self.graph.contains_node(from) || !self.graph.contains_node(to) {
            return None;
        }
        astar(&self.graph, from, |node| node == to, |_| 1usize, |_| 0usize)
            .map(|(hops, _)| hops)
    }

    /// Node label in the `<chain>:<name>:<number>` form used by pathway logs.
    pub fn label(&self, key: ResidueKey) -> String {
        let name = self.residues.get(&key).map_or("UNK", |r| r.name.as_str());
        format!("{}:{}:{}", key.chain_id, name, key.residue_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: isize) -> ResidueKey {
        ResidueKey::new('A', n)
    }

    /// Residues 1..=n on the x axis, 3.8 Å apart, linked as a chain.
    fn backbone(n: isize) -> ContactGraph {
        let mut graph = ContactGraph::new();
        for i in 1..=n {
            graph.add_residue(key(i), "ALA", Point3::new(3.8 * i as f64, 0.0, 0.0));
        }
        for i in 1..n {
            graph.add_contact(key(i), key(i + 1)).unwrap();
        }
        graph
    }

    #[test]
    fn contact_new_orders_residues() {
        let c = Contact::new(key(9), key(2));
        assert_eq!(c.first, key(2));
        assert_eq!(c.second, key(9));
        assert_eq!(c, Contact::new(key(2), key(9)));
    }

    #[test]
    fn add_contact_stores_euclidean_distance() {
        let mut graph = ContactGraph::new();
        graph.add_residue(key(1), "ALA", Point3::new(0.0, 0.0, 0.0));
        graph.add_residue(key(2), "GLY", Point3::new(3.0, 4.0, 0.0));
        let d = graph.add_contact(key(1), key(2)).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(graph.contact_distance(Contact::new(key(2), key(1))), Some(d));
        assert_eq!(graph.contact_count(), 1);
    }

    #[test]
    fn add_contact_rejects_self_and_unknown_residues() {
        let mut graph = backbone(2);
        assert_eq!(
            graph.add_contact(key(1), key(1)),
            Err(ContactGraphError::SelfContact(key(1)))
        );
        assert_eq!(
            graph.add_contact(key(1), key(7)),
            Err(ContactGraphError::UnknownResidue(key(7)))
        );
    }

    #[test]
    fn insert_contact_reports_whether_edge_is_new() {
        let mut graph = backbone(4);
        assert!(graph.insert_contact(Contact::new(key(1), key(4)), 6.0).unwrap());
        assert!(!graph.insert_contact(Contact::new(key(4), key(1)), 6.0).unwrap());
        assert_eq!(graph.contact_count(), 4);
    }

    #[test]
    fn contacts_are_listed_in_canonical_order() {
        let mut graph = backbone(3);
        graph.add_contact(key(3), key(1)).unwrap();
        let listed: Vec<_> = graph.contacts().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            listed,
            vec![
                Contact::new(key(1), key(2)),
                Contact::new(key(1), key(3)),
                Contact::new(key(2), key(3)),
            ]
        );
    }

    #[test]
    fn shortest_path_counts_hops_not_distance() {
        let mut graph = backbone(6);
        assert_eq!(graph.shortest_path_length(key(1), key(6)), Some(5));
        graph.insert_contact(Contact::new(key(2), key(5)), 100.0).unwrap();
        assert_eq!(graph.shortest_path_length(key(1), key(6)), Some(3));
    }

    #[test]
    fn shortest_path_is_none_across_components() {
        let mut graph = backbone(2);
        graph.add_residue(key(10), "LYS", Point3::new(50.0, 0.0, 0.0));
        assert_eq!(graph.shortest_path_length(key(1), key(10)), None);
        assert_eq!(graph.shortest_path_length(key(1), key(99)), None);
    }

    #[test]
    fn label_includes_residue_name() {
        let graph = backbone(1);
        assert_eq!(graph.label(key(1)), "A:ALA:1");
        assert_eq!(graph.label(key(5)), "A:UNK:5");
    }
}
