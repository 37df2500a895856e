use crate::cli::BatchArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use mineco::engine::progress::ProgressReporter;
use mineco::workflows::batch::{self, BatchOptions};
use tracing::{info, warn};

pub fn run(args: BatchArgs) -> Result<()> {
    let final_config = config::resolve(&args.config, None)?;
    info!("Resolved configuration: {:?}", final_config);

    let options = BatchOptions {
        log_dir: args.log_dir.clone(),
    };
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let outcomes = batch::run(&args.root, &final_config, &options, &reporter)?;
    if outcomes.is_empty() {
        warn!("No system directories found under {:?}", &args.root);
        println!("Warning: no systems with step5/pathway.pdb under {}", args.root.display());
        return Ok(());
    }

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(summary) => println!(
                "✓ {}: {} frame pair(s) -> {}",
                outcome.name,
                summary.frame_pairs,
                summary.csv_path.display()
            ),
            Err(e) => {
                failed += 1;
                println!("✗ {}: {}", outcome.name, e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::BatchFailures {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
