use super::config::DirectionOverride;
use super::error::EcoError;
use crate::core::graph::contact::{Contact, ContactGraph, ContactGraphError};
use tracing::{debug, info, instrument};

/// The two graphs of a pair with their roles assigned, and the contacts that
/// separate them.
#[derive(Debug, Clone)]
pub struct ContactDiff {
    /// Target state (C).
    pub contact_rich: ContactGraph,
    /// Starting state (O), not yet modified.
    pub open: ContactGraph,
    /// Contacts of C absent from O whose distance changes meaningfully, in
    /// canonical order.
    pub unique: Vec<Contact>,
    /// Size of the unique contact set before the distance filter.
    pub candidates: usize,
}

/// Assigns the contact-rich and open roles, returned as `(C, O)`.
///
/// | direction | `first` has more contacts | `second` has more contacts |
/// |-----------|---------------------------|----------------------------|
/// | `Auto`    | C = first, O = second     | C = second, O = first      |
/// | `Reverse` | C = second, O = first     | C = first, O = second      |
pub fn select_roles(
    first: ContactGraph,
    second: ContactGraph,
    direction: DirectionOverride,
) -> Result<(ContactGraph, ContactGraph), EcoError> {
    let (e1, e2) = (first.contact_count(), second.contact_count());
    if e1 == e2 {
        return Err(EcoError::AmbiguousContactCount { contacts: e1 });
    }
    let first_is_richer = e1 > e2;
    let first_is_target = match direction {
        DirectionOverride::Auto => first_is_richer,
        DirectionOverride::Reverse => !first_is_richer,
    };
    debug!(
        first_contacts = e1,
        second_contacts = e2,
        ?direction,
        first_is_target,
        "Assigned structure roles."
    );
    if first_is_target {
        Ok((first, second))
    } else {
        Ok((second, first))
    }
}

/// Contacts of `contact_rich` that `open` lacks, compared by residue pair only.
pub fn unique_contacts(contact_rich: &ContactGraph, open: &ContactGraph) -> Vec<Contact> {
    contact_rich
        .contacts()
        .into_iter()
        .map(|(contact, _)| contact)
        .filter(|&contact| !open.contains_contact(contact))
        .collect()
}

/// Keeps the contacts whose residue distance differs by at least `tolerance`
/// between the open coordinates and the contact-rich edge.
///
/// Neither graph is modified, so applying the filter to its own output returns
/// the same contacts.
pub fn filter_by_distance_change(
    contacts: &[Contact],
    contact_rich: &ContactGraph,
    open: &ContactGraph,
    tolerance: f64,
) -> Result<Vec<Contact>, EcoError> {
    let mut kept = Vec::with_capacity(contacts.len());
    for &contact in contacts {
        let rich_distance = contact_rich.contact_distance(contact).ok_or_else(|| {
            EcoError::Internal(format!("contact {contact} is not an edge of the target graph"))
        })?;
        let open_distance = open
            .residue_distance(contact.first, contact.second)
            .map_err(missing_residue)?;
        if (open_distance - rich_distance).abs() >= tolerance {
            kept.push(contact);
        }
    }
    Ok(kept)
}

fn missing_residue(error: ContactGraphError) -> EcoError {
    match error {
        ContactGraphError::UnknownResidue(residue) => EcoError::MissingResidue { residue },
        ContactGraphError::SelfContact(residue) => {
            EcoError::Internal(format!("self contact on residue {residue}"))
        }
    }
}

/// Assigns roles to two contact graphs and extracts the filtered unique contacts.
#[instrument(skip_all, name = "contact_differ")]
pub fn diff_contacts(
    first: ContactGraph,
    second: ContactGraph,
    direction: DirectionOverride,
    distance_change_tol: f64,
) -> Result<ContactDiff, EcoError> {
    let (contact_rich, open) = select_roles(first, second, direction)?;
    let candidates = unique_contacts(&contact_rich, &open);
    let unique =
        filter_by_distance_change(&candidates, &contact_rich, &open, distance_change_tol)?;

    info!(
        contact_rich = contact_rich.contact_count(),
        open = open.contact_count(),
        candidates = candidates.len(),
        unique = unique.len(),
        "Unique contacts identified."
    );

    if unique.is_empty() {
        return Err(EcoError::EmptyUniqueContactSet {
            candidates: candidates.len(),
        });
    }

    Ok(ContactDiff {
        contact_rich,
        open,
        candidates: candidates.len(),
        unique,
    })
}
