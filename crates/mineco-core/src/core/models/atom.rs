use super::ids::ResidueId;
use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub serial: usize,            // Serial number from the source file
    pub name: String,             // Atom name (e.g., "CA", "CB")
    pub residue_id: ResidueId,    // ID of the parent residue
    pub position: Point3<f64>,    // Cartesian coordinates in Angstroms
}

impl Atom {
    pub fn new(serial: usize, name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.trim().to_string(),
            residue_id,
            position,
        }
    }
}
