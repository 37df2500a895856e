use crate::core::graph::builder::build_contact_graph;
use crate::core::graph::contact::ContactGraph;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::clustering::cluster_contacts;
use crate::engine::config::EcoConfig;
use crate::engine::deadline::Deadline;
use crate::engine::differ::diff_contacts;
use crate::engine::error::EcoError;
use crate::engine::formation::form_clusters;
use crate::engine::report::{PathwayLog, PathwayReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

pub fn read_structure(path: &Path) -> Result<Structure, EcoError> {
    PdbFile::read_from_path(path).map_err(|source| EcoError::StructureParse {
        path: path.to_path_buf(),
        source,
    })
}

fn contact_graph(structure: &Structure, config: &EcoConfig) -> Result<ContactGraph, EcoError> {
    let graph = build_contact_graph(structure, &config.graph);
    if graph.residue_count() == 0 {
        return Err(EcoError::EmptyStructure {
            granularity: config.graph.granularity,
        });
    }
    Ok(graph)
}

/// Computes the minimum-ECO pathway between two conformations.
#[instrument(skip_all, name = "pair_workflow")]
pub fn run(
    first: &Structure,
    second: &Structure,
    config: &EcoConfig,
) -> Result<PathwayReport, EcoError> {
    let deadline = Deadline::start(config.pair_timeout);

    let first_graph = contact_graph(first, config)?;
    let second_graph = contact_graph(second, config)?;

    let diff = diff_contacts(
        first_graph,
        second_graph,
        config.direction,
        config.distance_change_tol,
    )?;
    deadline.check()?;

    let clusters = cluster_contacts(&diff.unique, &config.clustering);
    info!(
        unique = diff.unique.len(),
        clusters = clusters.len(),
        "Forming contact clusters."
    );

    let formation = form_clusters(diff.open, &diff.contact_rich, clusters, &deadline)?;
    let report = PathwayReport::from_formation(&formation, &formation.open);

    info!(total_eco = report.total_eco, "Pathway computed.");
    Ok(report)
}

/// Reads two PDB files and computes their pathway.
pub fn run_files(first: &Path, second: &Path, config: &EcoConfig) -> Result<PathwayReport, EcoError> {
    let first = read_structure(first)?;
    let second = read_structure(second)?;
    run(&first, &second, config)
}

/// Writes the text log of a pathway to `path`, replacing any existing file.
pub fn write_log(report: &PathwayReport, path: &Path) -> Result<(), EcoError> {
    let file = File::create(path).map_err(|e| EcoError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    PathwayLog::write_to(report, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(|e| EcoError::io(path, e))
}

/// Log file name for a pair, `eco_<first>_<second>.log`.
pub fn log_file_name(first: &str, second: &str) -> String {
    format!("eco_{first}_{second}.log")
}
