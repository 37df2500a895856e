use super::config::ClusteringParams;
use crate::core::graph::contact::Contact;
use serde::Serialize;
use tracing::{debug, instrument};

/// Unique contacts that are formed together in one pathway step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactCluster {
    pub id: usize,
    pub contacts: Vec<Contact>,
}

/// Position of a contact in residue-index space.
fn index_point(contact: &Contact) -> (f64, f64) {
    (
        contact.first.residue_number as f64,
        contact.second.residue_number as f64,
    )
}

/// Partitions contacts with DBSCAN on their `(first, second)` residue numbers.
///
/// A contact's neighbourhood is every contact (itself included) within `eps` under
/// the configured metric. Cluster ids follow the order in which each cluster's first
/// core point appears in `contacts`. Points that end up as noise get singleton
/// clusters numbered after the dense ones, so every contact belongs to exactly one
/// cluster.
#[instrument(skip_all, name = "contact_clustering")]
pub fn cluster_contacts(contacts: &[Contact], params: &ClusteringParams) -> Vec<ContactCluster> {
    let points: Vec<(f64, f64)> = contacts.iter().map(index_point).collect();
    let neighbourhoods: Vec<Vec<usize>> = points
        .iter()
        .map(|&p| {
            points
                .iter()
                .enumerate()
                .filter(|&(_, &q)| params.metric.distance(p, q) <= params.eps)
                .map(|(j, _)| j)
                .collect()
        })
        .collect();
    let is_core = |i: usize| neighbourhoods[i].len() >= params.min_samples;

    let mut labels: Vec<Option<usize>> = vec![None; contacts.len()];
    let mut next_id = 0;
    for seed in 0..contacts.len() {
        if labels[seed].is_some() || !is_core(seed) {
            continue;
        }
        let id = next_id;
        next_id += 1;
        labels[seed] = Some(id);
        let mut frontier = vec![seed];
        while let Some(point) = frontier.pop() {
            if !is_core(point) {
                continue;
            }
            for &neighbour in &neighbourhoods[point] {
                if labels[neighbour].is_none() {
                    labels[neighbour] = Some(id);
                    frontier.push(neighbour);
                }
            }
        }
    }

    let dense = next_id;
    for label in labels.iter_mut().filter(|label| label.is_none()) {
        *label = Some(next_id);
        next_id += 1;
    }

    let mut clusters: Vec<ContactCluster> = (0..next_id)
        .map(|id| ContactCluster {
            id,
            contacts: Vec::new(),
        })
        .collect();
    for (contact, label) in contacts.iter().zip(labels) {
        if let Some(id) = label {
            clusters[id].contacts.push(*contact);
        }
    }

    debug!(
        contacts = contacts.len(),
        clusters = clusters.len(),
        noise = next_id - dense,
        eps = params.eps,
        metric = %params.metric,
        "Clustered unique contacts."
    );
    clusters
}
