//! PDB text for two conformations of a 12-residue hairpin.
//!
//! The extended state is a straight line of alpha carbons 3.8 Å apart with only its
//! 11 peptide bonds as contacts. The folded state turns after residue 6 so that
//! residue `i` sits 4.5 Å from residue `13 - i`, adding the five cross-strand
//! contacts (1,12), (2,11), (3,10), (4,9) and (5,8).

pub(crate) const HAIRPIN_LENGTH: isize = 12;

pub(crate) fn atom_line(serial: usize, res: &str, chain: char, num: isize, xyz: [f64; 3]) -> String {
    format!(
        "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C",
        serial, "CA", res, chain, num, xyz[0], xyz[1], xyz[2]
    )
}

fn model_lines(coords: impl Fn(isize) -> [f64; 3]) -> Vec<String> {
    (1..=HAIRPIN_LENGTH)
        .map(|i| atom_line(i as usize, "ALA", 'A', i, coords(i)))
        .collect()
}

fn extended_coords(i: isize) -> [f64; 3] {
    [3.8 * i as f64, 0.0, 0.0]
}

fn folded_coords(i: isize) -> [f64; 3] {
    if i <= 6 {
        [3.8 * i as f64, 0.0, 0.0]
    } else {
        [3.8 * (13 - i) as f64, 4.5, 0.0]
    }
}

pub(crate) fn extended_pdb() -> String {
    let mut lines = model_lines(extended_coords);
    lines.push("END".to_string());
    lines.join("\n")
}

pub(crate) fn folded_pdb() -> String {
    let mut lines = model_lines(folded_coords);
    lines.push("END".to_string());
    lines.join("\n")
}

/// A multi-model file with one model per entry: `true` for folded, `false` for
/// extended.
pub(crate) fn trajectory_pdb(folded: &[bool]) -> String {
    let mut lines = Vec::new();
    for (index, &is_folded) in folded.iter().enumerate() {
        lines.push(format!("MODEL     {:>4}", index + 1));
        if is_folded {
            lines.extend(model_lines(folded_coords));
        } else {
            lines.extend(model_lines(extended_coords));
        }
        lines.push("ENDMDL".to_string());
    }
    lines.push("END".to_string());
    lines.join("\n")
}
