use super::summary::{SummaryRecord, write_summary};
use super::trajectory::{self, TrajectoryOptions};
use crate::engine::config::EcoConfig;
use crate::engine::error::EcoError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::PathwayLog;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

const PATHWAY_DIR: &str = "step5";
const PATHWAY_FILE: &str = "pathway.pdb";
const END_TO_END_LOG: &str = "eco.log";

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Root for per-pair text logs; each system gets its own sub-directory.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSummary {
    pub csv_path: PathBuf,
    /// Whether the first row came from the system's end-to-end log.
    pub has_end_to_end: bool,
    pub frame_pairs: usize,
}

#[derive(Debug)]
pub struct SystemOutcome {
    pub name: String,
    pub result: Result<SystemSummary, EcoError>,
}

/// System directories under `root` that contain `step5/pathway.pdb`, sorted by name.
pub fn discover_systems(root: &Path) -> Result<Vec<(String, PathBuf)>, EcoError> {
    let entries = std::fs::read_dir(root).map_err(|e| EcoError::io(root, e))?;
    let mut systems = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EcoError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.join(PATHWAY_DIR).join(PATHWAY_FILE).is_file() {
            systems.push((name, path));
        } else {
            warn!(system = %name, "No {PATHWAY_DIR}/{PATHWAY_FILE}; skipping directory.");
        }
    }
    systems.sort();
    Ok(systems)
}

/// Reads the end-to-end row from a system's `eco.log`, if there is one.
pub fn end_to_end_record(
    name: &str,
    system_dir: &Path,
) -> Result<Option<SummaryRecord>, EcoError> {
    let path = system_dir.join(END_TO_END_LOG);
    if !path.is_file() {
        return Ok(None);
    }
    let file = File::open(&path).map_err(|e| EcoError::io(&path, e))?;
    let summary = PathwayLog::read_summary(BufReader::new(file))?;
    Ok(Some(SummaryRecord {
        name: name.to_string(),
        total_eco: summary.total_eco,
        min_eco_contacts: summary.min_eco_contacts,
    }))
}

/// Runs one system and writes `step5/anm_eco_<name>.csv`.
pub fn run_system(
    name: &str,
    system_dir: &Path,
    config: &EcoConfig,
    options: &BatchOptions,
    reporter: &ProgressReporter,
) -> Result<SystemSummary, EcoError> {
    let pathway_dir = system_dir.join(PATHWAY_DIR);
    let mut records = Vec::new();

    let end_to_end = end_to_end_record(name, system_dir)?;
    let has_end_to_end = end_to_end.is_some();
    match end_to_end {
        Some(record) => records.push(record),
        None => warn!(system = %name, "No {END_TO_END_LOG}; summary starts with the frame pairs."),
    }

    let log_dir = match &options.log_dir {
        Some(root) => {
            let dir = root.join(name);
            std::fs::create_dir_all(&dir).map_err(|e| EcoError::io(&dir, e))?;
            Some(dir)
        }
        None => None,
    };

    let frame_records = trajectory::run_file(
        &pathway_dir.join(PATHWAY_FILE),
        config,
        &TrajectoryOptions { log_dir },
        reporter,
    )?;
    let frame_pairs = frame_records.len();
    records.extend(frame_records);

    let csv_path = pathway_dir.join(format!("anm_eco_{name}.csv"));
    write_summary(&csv_path, &records)?;
    info!(system = %name, csv = %csv_path.display(), frame_pairs, "Wrote system summary.");

    Ok(SystemSummary {
        csv_path,
        has_end_to_end,
        frame_pairs,
    })
}

/// Runs every system under `root`. A failing system is logged and does not stop
/// the others.
#[instrument(skip_all, name = "batch_workflow", fields(root = %root.display()))]
pub fn run(
    root: &Path,
    config: &EcoConfig,
    options: &BatchOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<SystemOutcome>, EcoError> {
    let systems = discover_systems(root)?;
    info!(systems = systems.len(), "Starting batch.");

    let mut outcomes = Vec::with_capacity(systems.len());
    for (name, dir) in systems {
        reporter.report(Progress::SystemStart { name: name.clone() });
        let result = run_system(&name, &dir, config, options, reporter);
        if let Err(e) = &result {
            error!(system = %name, error = %e, "System failed.");
        }
        reporter.report(Progress::SystemFinish);
        outcomes.push(SystemOutcome { name, result });
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fixtures::trajectory_pdb;
    use std::fs;

    fn make_system(root: &Path, name: &str, models: &[bool], eco_log: Option<&str>) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join(PATHWAY_DIR)).unwrap();
        fs::write(dir.join(PATHWAY_DIR).join(PATHWAY_FILE), trajectory_pdb(models)).unwrap();
        if let Some(log) = eco_log {
            fs::write(dir.join(END_TO_END_LOG), log).unwrap();
        }
        dir
    }

    const END_TO_END: &str = "formed cluster 0 with contacts \n\
                              A:ALA:1 A:ALA:12 11\n\
                              total ECO for this pathway:9\n\
                              the minECO pathway (by cluster):[0]\n\
                              the minECO pathway (by contact):[[['A:ALA:1', 'A:ALA:12']]]\n";

    #[test]
    fn systems_are_discovered_in_name_order() {
        let root = tempfile::tempdir().unwrap();
        make_system(root.path(), "beta", &[false], None);
        make_system(root.path(), "alpha", &[false], None);
        fs::create_dir(root.path().join("no_pathway")).unwrap();
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        let names: Vec<_> = discover_systems(root.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn summary_starts_with_the_end_to_end_row() {
        let root = tempfile::tempdir().unwrap();
        make_system(root.path(), "hairpin", &[false, true], Some(END_TO_END));

        let outcomes = run(
            root.path(),
            &EcoConfig::default(),
            &BatchOptions::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(outcomes.len(), 1);
        let summary = outcomes[0].result.as_ref().unwrap();
        assert!(summary.has_end_to_end);
        assert_eq!(summary.frame_pairs, 1);
        assert_eq!(
            summary.csv_path,
            root.path().join("hairpin/step5/anm_eco_hairpin.csv")
        );

        let mut reader = csv::Reader::from_path(&summary.csv_path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "hairpin");
        assert_eq!(&rows[0][1], "9");
        assert_eq!(&rows[0][2], "[[['A:ALA:1', 'A:ALA:12']]]");
        assert_eq!(&rows[1][0], "pathway_1.pdb_pathway_2.pdb");
        assert_eq!(&rows[1][1], "3");
    }

    #[test]
    fn failing_system_does_not_stop_the_batch() {
        let root = tempfile::tempdir().unwrap();
        make_system(root.path(), "a_broken", &[false, true], Some("garbage\n"));
        make_system(root.path(), "b_good", &[false, true], None);
        let logs = root.path().join("logs");

        let outcomes = run(
            root.path(),
            &EcoConfig::default(),
            &BatchOptions {
                log_dir: Some(logs.clone()),
            },
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].result,
            Err(EcoError::LogFormat { .. })
        ));
        let good = outcomes[1].result.as_ref().unwrap();
        assert!(!good.has_end_to_end);
        assert_eq!(good.frame_pairs, 1);
        assert!(
            logs.join("b_good")
                .join("eco_pathway_1.pdb_pathway_2.pdb.log")
                .exists()
        );
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let result = run(
            &root.path().join("absent"),
            &EcoConfig::default(),
            &BatchOptions::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EcoError::Io { .. })));
    }
}
