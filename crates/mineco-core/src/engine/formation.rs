use super::clustering::ContactCluster;
use super::deadline::Deadline;
use super::error::EcoError;
use crate::core::graph::contact::{Contact, ContactGraph, ContactGraphError};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// A contact and its ECO: the hop count between its residues in the open graph at
/// the moment its cluster was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactEco {
    pub contact: Contact,
    pub eco: usize,
}

/// One iteration of the greedy loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormationStep {
    pub cluster_id: usize,
    pub contacts: Vec<ContactEco>,
    pub min_eco: usize,
}

#[derive(Debug, Clone)]
pub struct Formation {
    /// The open graph with every formed contact added.
    pub open: ContactGraph,
    pub steps: Vec<FormationStep>,
    pub total_eco: usize,
}

fn contact_eco(open: &ContactGraph, contact: Contact) -> Result<usize, EcoError> {
    open.shortest_path_length(contact.first, contact.second)
        .ok_or(EcoError::DisconnectedResidues {
            from: contact.first,
            to: contact.second,
        })
}

fn evaluate_cluster(
    open: &ContactGraph,
    cluster: &ContactCluster,
) -> Result<FormationStep, EcoError> {
    let contacts = cluster
        .contacts
        .iter()
        .map(|&contact| {
            contact_eco(open, contact).map(|eco| ContactEco { contact, eco })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let min_eco = contacts
        .iter()
        .map(|c| c.eco)
        .min()
        .ok_or_else(|| EcoError::Internal(format!("cluster {} has no contacts", cluster.id)))?;
    Ok(FormationStep {
        cluster_id: cluster.id,
        contacts,
        min_eco,
    })
}

/// Forms clusters one at a time, always choosing the cluster whose closest contact
/// has the smallest hop count in the current open graph.
///
/// Ties go to the lowest cluster id. The chosen cluster's contacts are added to
/// `open` with their contact-rich distance before the next iteration, so later
/// clusters see the shortcuts created by earlier ones. The deadline is checked
/// before every iteration.
#[instrument(skip_all, name = "cluster_formation")]
pub fn form_clusters(
    mut open: ContactGraph,
    contact_rich: &ContactGraph,
    mut clusters: Vec<ContactCluster>,
    deadline: &Deadline,
) -> Result<Formation, EcoError> {
    clusters.sort_by_key(|cluster| cluster.id);
    let mut steps = Vec::with_capacity(clusters.len());
    let mut total_eco = 0;

    while !clusters.is_empty() {
        deadline.check()?;

        let mut best: Option<(usize, FormationStep)> = None;
        for (index, cluster) in clusters.iter().enumerate() {
            let step = evaluate_cluster(&open, cluster)?;
            if best
                .as_ref()
                .is_none_or(|(_, current)| step.min_eco < current.min_eco)
            {
                best = Some((index, step));
            }
        }
        let (index, step) = best.ok_or_else(|| {
            EcoError::Internal("no cluster could be selected".to_string())
        })?;
        let chosen = clusters.remove(index);

        for &contact in &chosen.contacts {
            let weight = contact_rich.contact_distance(contact).ok_or_else(|| {
                EcoError::Internal(format!("contact {contact} is not an edge of the target graph"))
            })?;
            open.insert_contact(contact, weight).map_err(|e| match e {
                ContactGraphError::UnknownResidue(residue) => EcoError::MissingResidue { residue },
                ContactGraphError::SelfContact(residue) => {
                    EcoError::Internal(format!("self contact on residue {residue}"))
                }
            })?;
        }

        debug!(
            cluster = step.cluster_id,
            contacts = step.contacts.len(),
            min_eco = step.min_eco,
            remaining = clusters.len(),
            "Formed cluster."
        );
        total_eco += step.min_eco;
        steps.push(step);
    }

    info!(
        steps = steps.len(),
        total_eco, "Pathway formation complete."
    );
    Ok(Formation {
        open,
        steps,
        total_eco,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::ResidueKey;
    use nalgebra::Point3;
    use std::time::Duration;

    fn key(n: isize) -> ResidueKey {
        ResidueKey::new('A', n)
    }

    fn contact(a: isize, b: isize) -> Contact {
        Contact::new(key(a), key(b))
    }

    fn extended(n: isize) -> ContactGraph {
        let mut graph = ContactGraph::new();
        for i in 1..=n {
            graph.add_residue(key(i), "ALA", Point3::new(3.8 * i as f64, 0.0, 0.0));
        }
        for i in 1..n {
            graph.add_contact(key(i), key(i + 1)).unwrap();
        }
        graph
    }

    /// The open graph plus the given contacts, each 5 Å long.
    fn target(open: &ContactGraph, contacts: &[Contact]) -> ContactGraph {
        let mut graph = open.clone();
        for &c in contacts {
            graph.insert_contact(c, 5.0).unwrap();
        }
        graph
    }

    fn cluster(id: usize, contacts: &[Contact]) -> ContactCluster {
        ContactCluster {
            id,
            contacts: contacts.to_vec(),
        }
    }

    #[test]
    fn cluster_contributes_its_smallest_eco() {
        let open = extended(10);
        let contacts = [contact(1, 3), contact(1, 6)];
        let rich = target(&open, &contacts);
        let formation =
            form_clusters(open, &rich, vec![cluster(0, &contacts)], &Deadline::unlimited()).unwrap();

        assert_eq!(formation.total_eco, 2);
        assert_eq!(formation.steps.len(), 1);
        let ecos: Vec<_> = formation.steps[0].contacts.iter().map(|c| c.eco).collect();
        assert_eq!(ecos, vec![2, 5]);
        assert_eq!(formation.steps[0].min_eco, 2);
    }

    #[test]
    fn earlier_clusters_shorten_later_paths() {
        let open = extended(9);
        let clusters = vec![
            cluster(0, &[contact(1, 9)]),
            cluster(1, &[contact(1, 5)]),
            cluster(2, &[contact(5, 9)]),
        ];
        let rich = target(&open, &[contact(1, 9), contact(1, 5), contact(5, 9)]);
        let formation = form_clusters(open, &rich, clusters, &Deadline::unlimited()).unwrap();

        let order: Vec<_> = formation.steps.iter().map(|s| s.cluster_id).collect();
        assert_eq!(order, vec![1, 2, 0]);
        let minima: Vec<_> = formation.steps.iter().map(|s| s.min_eco).collect();
        assert_eq!(minima, vec![4, 4, 2]);
        assert_eq!(formation.total_eco, 10);
        assert_eq!(formation.total_eco, minima.iter().sum::<usize>());
    }

    #[test]
    fn ties_go_to_the_lowest_cluster_id() {
        let open = extended(12);
        let clusters = vec![cluster(4, &[contact(8, 11)]), cluster(2, &[contact(1, 4)])];
        let rich = target(&open, &[contact(8, 11), contact(1, 4)]);
        let formation = form_clusters(open, &rich, clusters, &Deadline::unlimited()).unwrap();
        assert_eq!(formation.steps[0].cluster_id, 2);
        assert_eq!(formation.steps[1].cluster_id, 4);
    }

    #[test]
    fn one_iteration_per_cluster_and_every_contact_ends_up_in_open() {
        let open = extended(20);
        let unique = [contact(1, 5), contact(2, 6), contact(10, 18), contact(3, 15)];
        let rich = target(&open, &unique);
        let clusters = vec![
            cluster(0, &unique[..2]),
            cluster(1, &unique[2..3]),
            cluster(2, &unique[3..]),
        ];
        let formation = form_clusters(open, &rich, clusters, &Deadline::unlimited()).unwrap();

        assert_eq!(formation.steps.len(), 3);
        for c in unique {
            assert!(formation.open.contains_contact(c));
            assert_eq!(formation.open.contact_distance(c), Some(5.0));
        }
        let rich_contacts: Vec<_> = rich.contacts().into_iter().map(|(c, _)| c).collect();
        let open_contacts: Vec<_> = formation.open.contacts().into_iter().map(|(c, _)| c).collect();
        assert_eq!(open_contacts, rich_contacts);
    }

    #[test]
    fn disconnected_residues_abort_formation() {
        let mut open = extended(3);
        open.add_residue(key(20), "TRP", Point3::new(100.0, 0.0, 0.0));
        let mut rich = open.clone();
        rich.insert_contact(contact(1, 20), 4.0).unwrap();
        let result = form_clusters(
            open,
            &rich,
            vec![cluster(0, &[contact(1, 20)])],
            &Deadline::unlimited(),
        );
        assert!(matches!(
            result,
            Err(EcoError::DisconnectedResidues { from, to }) if from == key(1) && to == key(20)
        ));
    }

    #[test]
    fn expired_deadline_stops_formation() {
        let open = extended(5);
        let rich = target(&open, &[contact(1, 4)]);
        let deadline = Deadline::start(Some(Duration::from_nanos(1)));
        std::thread::sleep(Duration::from_millis(2));
        let result = form_clusters(open, &rich, vec![cluster(0, &[contact(1, 4)])], &deadline);
        assert!(matches!(result, Err(EcoError::Timeout { .. })));
    }
}
