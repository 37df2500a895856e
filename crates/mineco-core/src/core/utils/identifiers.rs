use phf::{Set, phf_set};

static AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // Protonation and modification variants seen in prepared structures
    "HSD", "HSE", "HSP", "HID", "HIE", "HIP", "CYX", "MSE", "SEC", "PYL",
};

pub const ALPHA_CARBON: &str = "CA";
pub const BETA_CARBON: &str = "CB";

pub fn is_amino_acid(residue_name: &str) -> bool {
    AMINO_ACID_NAMES.contains(residue_name.trim())
}

pub fn is_heavy_atom(atom_name: &str) -> bool {
    let first_char = atom_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase());
    !matches!(first_char, Some('H') | Some('D'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_amino_acid_recognizes_standard_residues() {
        assert!(is_amino_acid("ALA"));
        assert!(is_amino_acid("GLY"));
        assert!(is_amino_acid("TRP"));
    }

    #[test]
    fn is_amino_acid_recognizes_protonation_variants() {
        assert!(is_amino_acid("HSE"));
        assert!(is_amino_acid("HIP"));
        assert!(is_amino_acid("MSE"));
    }

    #[test]
    fn is_amino_acid_trims_whitespace_and_is_case_sensitive() {
        assert!(is_amino_acid(" LYS "));
        assert!(!is_amino_acid("lys"));
    }

    #[test]
    fn is_amino_acid_rejects_ligands_and_water() {
        assert!(!is_amino_acid("HOH"));
        assert!(!is_amino_acid("HEM"));
        assert!(!is_amino_acid(""));
    }

    #[test]
    fn is_heavy_atom_returns_false_for_hydrogen_and_deuterium() {
        assert!(!is_heavy_atom("H"));
        assert!(!is_heavy_atom("HA"));
        assert!(!is_heavy_atom("D2"));
    }

    #[test]
    fn is_heavy_atom_returns_true_for_non_hydrogen_atoms() {
        assert!(is_heavy_atom("CA"));
        assert!(is_heavy_atom(" N "));
        assert!(is_heavy_atom("SG"));
    }
}
