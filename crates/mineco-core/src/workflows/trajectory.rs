use super::pair;
use super::summary::SummaryRecord;
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::structure::Structure;
use crate::engine::config::EcoConfig;
use crate::engine::error::EcoError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::report::PathwayReport;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// One model of a trajectory file.
#[derive(Debug, Clone)]
pub struct Frame {
    pub name: String,
    pub structure: Structure,
}

#[derive(Debug, Clone, Default)]
pub struct TrajectoryOptions {
    /// When set, the text log of every evaluated pair is written here.
    pub log_dir: Option<PathBuf>,
}

/// Reads every model of a multi-model PDB file as a frame.
///
/// Frames are named `<stem>_<k>.pdb` with `k` counting from 1, so the models of
/// `pathway.pdb` become `pathway_1.pdb`, `pathway_2.pdb`, ...
pub fn read_frames(path: &Path) -> Result<Vec<Frame>, EcoError> {
    let models =
        PdbFile::read_models_from_path(path).map_err(|source| EcoError::StructureParse {
            path: path.to_path_buf(),
            source,
        })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    Ok(models
        .into_iter()
        .enumerate()
        .map(|(index, structure)| Frame {
            name: format!("{stem}_{}.pdb", index + 1),
            structure,
        })
        .collect())
}

/// Walks a frame sequence, recording the first scoring successor of each base frame.
///
/// Starting from base `i = 0`, candidates `j = i + 1, i + 2, ...` are evaluated in
/// turn. A candidate that fails or scores zero is skipped. The first candidate with
/// a non-zero total is recorded as `<name_i>_<name_j>` and becomes the new base.
/// When no candidate scores, the base advances by one.
pub fn drive<F>(
    names: &[String],
    mut evaluate: F,
    reporter: &ProgressReporter,
) -> Vec<SummaryRecord>
where
    F: FnMut(usize, usize) -> Result<PathwayReport, EcoError>,
{
    let mut records = Vec::new();
    reporter.report(Progress::FramesStart {
        total_frames: names.len() as u64,
    });

    let mut base = 0;
    while base + 1 < names.len() {
        let mut next_base = None;
        for candidate in base + 1..names.len() {
            let name = format!("{}_{}", names[base], names[candidate]);
            match evaluate(base, candidate) {
                Ok(report) if report.total_eco != 0 => {
                    info!(pair = %name, total_eco = report.total_eco, "Recorded frame pair.");
                    reporter.report(Progress::PairEvaluated {
                        name: name.clone(),
                        total_eco: Some(report.total_eco),
                    });
                    records.push(SummaryRecord::from_report(name, &report));
                    next_base = Some(candidate);
                    break;
                }
                Ok(_) => {
                    info!(pair = %name, "Frame pair scored zero; trying the next frame.");
                    reporter.report(Progress::PairEvaluated {
                        name,
                        total_eco: Some(0),
                    });
                }
                Err(e) => {
                    warn!(pair = %name, error = %e, "Frame pair failed; trying the next frame.");
                    reporter.report(Progress::PairEvaluated {
                        name,
                        total_eco: None,
                    });
                }
            }
        }
        base = next_base.unwrap_or(base + 1);
        reporter.report(Progress::BaseAdvanced { base: base as u64 });
    }

    reporter.report(Progress::FramesFinish);
    records
}

/// Runs the pair workflow over consecutive frames.
#[instrument(skip_all, name = "trajectory_workflow", fields(frames = frames.len()))]
pub fn run(
    frames: &[Frame],
    config: &EcoConfig,
    options: &TrajectoryOptions,
    reporter: &ProgressReporter,
) -> Vec<SummaryRecord> {
    let names: Vec<String> = frames.iter().map(|f| f.name.clone()).collect();
    let records = drive(
        &names,
        |i, j| {
            let report = pair::run(&frames[i].structure, &frames[j].structure, config)?;
            if let Some(dir) = &options.log_dir {
                let path = dir.join(pair::log_file_name(&frames[i].name, &frames[j].name));
                pair::write_log(&report, &path)?;
            }
            Ok(report)
        },
        reporter,
    );
    info!(records = records.len(), "Trajectory complete.");
    records
}

/// Reads a multi-model file and runs the trajectory workflow over its models.
pub fn run_file(
    path: &Path,
    config: &EcoConfig,
    options: &TrajectoryOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<SummaryRecord>, EcoError> {
    let frames = read_frames(path)?;
    info!(path = %path.display(), frames = frames.len(), "Read trajectory.");
    Ok(run(&frames, config, options, reporter))
}
