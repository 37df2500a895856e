use crate::cli::PairArgs;
use crate::config;
use crate::error::{CliError, Result};
use mineco::core::models::structure::Structure;
use mineco::engine::error::EcoError;
use mineco::workflows::pair;
use std::path::{Path, PathBuf};
use tracing::info;

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn default_log_path(first: &Path, second: &Path) -> PathBuf {
    PathBuf::from(pair::log_file_name(&file_label(first), &file_label(second)))
}

fn read(path: &Path) -> Result<Structure> {
    pair::read_structure(path).map_err(|e| match e {
        EcoError::StructureParse { path, source } => CliError::FileParsing {
            path,
            source: source.into(),
        },
        other => CliError::Core(other),
    })
}

pub fn run(args: PairArgs) -> Result<()> {
    let final_config = config::resolve(&args.config, args.reverse_override())?;
    info!("Resolved configuration: {:?}", final_config);

    info!("Loading structures {:?} and {:?}", &args.first, &args.second);
    let first = read(&args.first)?;
    let second = read(&args.second)?;

    let report = pair::run(&first, &second, &final_config)?;

    let log_path = args
        .output
        .unwrap_or_else(|| default_log_path(&args.first, &args.second));
    pair::write_log(&report, &log_path)?;
    info!("Pathway log written to {:?}", &log_path);

    println!("total ECO for this pathway: {}", report.total_eco);
    println!("the minECO pathway (by cluster): {}", report.clusters_literal());
    println!("Pathway log written to: {}", log_path.display());
    Ok(())
}
