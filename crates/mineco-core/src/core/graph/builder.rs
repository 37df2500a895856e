use super::contact::ContactGraph;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::{Residue, ResidueKey};
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{centroid, distance};
use crate::core::utils::identifiers::{ALPHA_CARBON, BETA_CARBON, is_heavy_atom};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, instrument};

/// Which position represents a residue in the contact graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    /// Alpha carbon.
    #[default]
    #[serde(rename = "CA", alias = "ca")]
    CA,
    /// Beta carbon; glycine falls back to its alpha carbon.
    #[serde(rename = "CB", alias = "cb")]
    CB,
    /// Mean position of the residue's heavy atoms.
    #[serde(rename = "centroid", alias = "centroids")]
    Centroid,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown granularity '{0}'. Expected 'CA', 'CB' or 'centroid'.")]
pub struct ParseGranularityError(pub String);

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ca" => Ok(Granularity::CA),
            "cb" => Ok(Granularity::CB),
            "centroid" | "centroids" => Ok(Granularity::Centroid),
            _ => Err(ParseGranularityError(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::CA => write!(f, "CA"),
            Granularity::CB => write!(f, "CB"),
            Granularity::Centroid => write!(f, "centroid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphParams {
    pub granularity: Granularity,
    /// Maximum distance (Å) between representative positions for a contact.
    pub distance_threshold: f64,
    /// Same-chain pairs at most this far apart in sequence never get a distance edge.
    pub long_interaction_threshold: usize,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            granularity: Granularity::CA,
            distance_threshold: 5.0,
            long_interaction_threshold: 1,
        }
    }
}

fn representative_position(
    structure: &Structure,
    residue_id: ResidueId,
    residue: &Residue,
    granularity: Granularity,
) -> Option<Point3<f64>> {
    match granularity {
        Granularity::CA => structure.atom_position(residue_id, ALPHA_CARBON),
        Granularity::CB => structure
            .atom_position(residue_id, BETA_CARBON)
            .or_else(|| {
                (residue.name == "GLY")
                    .then(|| structure.atom_position(residue_id, ALPHA_CARBON))
                    .flatten()
            }),
        Granularity::Centroid => centroid(
            structure
                .residue_atoms(residue_id)
                .filter(|atom| is_heavy_atom(&atom.name))
                .map(|atom| &atom.position),
        ),
    }
}

/// Builds the residue contact graph of a structure.
///
/// Nodes are the amino-acid residues that have a representative position. Edges are
/// the union of
/// - peptide bonds: consecutive residues of a chain whose numbers differ by one, and
/// - distance contacts: pairs within `distance_threshold`, except same-chain pairs
///   whose sequence separation is at most `long_interaction_threshold`.
///
/// Every edge is weighted by the distance between representative positions.
#[instrument(skip_all, name = "contact_graph_builder")]
pub fn build_contact_graph(structure: &Structure, params: &GraphParams) -> ContactGraph {
    let mut graph = ContactGraph::new();
    let mut nodes: Vec<(ResidueKey, Point3<f64>)> = Vec::new();

    for (residue_id, residue) in structure.residues() {
        if !residue.is_amino_acid() {
            continue;
        }
        match representative_position(structure, residue_id, residue, params.granularity) {
            Some(position) => {
                graph.add_residue(residue.key, &residue.name, position);
                nodes.push((residue.key, position));
            }
            None => debug!(
                residue = %residue.label(),
                granularity = %params.granularity,
                "Residue has no representative position; skipping."
            ),
        }
    }

    let mut peptide_bonds = 0usize;
    for pair in nodes.windows(2) {
        let (a, pa) = pair[0];
        let (b, pb) = pair[1];
        if a.chain_id == b.chain_id && b.residue_number - a.residue_number == 1 {
            graph.connect(a, b, distance(&pa, &pb));
            peptide_bonds += 1;
        }
    }

    let long_threshold = params.long_interaction_threshold;
    let mut distance_contacts = 0usize;
    for (i, &(a, pa)) in nodes.iter().enumerate() {
        for &(b, pb) in &nodes[i + 1..] {
            let same_chain = a.chain_id == b.chain_id;
            let separation = a.residue_number.abs_diff(b.residue_number);
            if same_chain && separation <= long_threshold {
                continue;
            }
            let d = distance(&pa, &pb);
            if d <= params.distance_threshold {
                graph.connect(a, b, d);
                distance_contacts += 1;
            }
        }
    }

    debug!(
        residues = graph.residue_count(),
        contacts = graph.contact_count(),
        peptide_bonds,
        distance_contacts,
        "Contact graph built."
    );
    graph
}
