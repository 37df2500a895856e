use crate::cli::TrajectoryArgs;
use crate::config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use mineco::engine::progress::ProgressReporter;
use mineco::workflows::summary::write_summary;
use mineco::workflows::trajectory::{self, TrajectoryOptions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn default_summary_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pathway".to_string());
    input.with_file_name(format!("anm_eco_{stem}.csv"))
}

pub fn run(args: TrajectoryArgs) -> Result<()> {
    let final_config = config::resolve(&args.config, None)?;
    info!("Resolved configuration: {:?}", final_config);

    if let Some(dir) = &args.log_dir {
        std::fs::create_dir_all(dir)?;
    }
    let options = TrajectoryOptions {
        log_dir: args.log_dir.clone(),
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Evaluating frame pairs of {}...", args.input.display());
    let records = trajectory::run_file(&args.input, &final_config, &options, &reporter)?;

    let output = args
        .output
        .unwrap_or_else(|| default_summary_path(&args.input));
    write_summary(&output, &records)?;

    if records.is_empty() {
        warn!("No frame pair produced a pathway.");
        println!("Warning: no frame pair produced a pathway.");
    }
    println!(
        "Recorded {} frame pair(s); summary written to: {}",
        records.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_summary_sits_next_to_the_input() {
        assert_eq!(
            default_summary_path(Path::new("sys/step5/pathway.pdb")),
            PathBuf::from("sys/step5/anm_eco_pathway.csv")
        );
    }
}
