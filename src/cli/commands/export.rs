//! Export command implementation
//!
//! This module implements the `export` command, which packages one patient's
//! records into a zip archive in the configured output directory.

use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportReport};
use crate::domain::{MedirecordError, SubjectId};
use clap::Args;
use std::io::Write;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Identifier of the patient whose records are exported
    #[arg(short, long)]
    pub subject: String,

    /// Override the directory the archive is written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Print the export report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(subject_id = %self.subject, "Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.export.output_dir = output_dir.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let subject = match SubjectId::new(self.subject.as_str()) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Invalid subject id: {e}");
                return Ok(2);
            }
        };

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Exporting records for {subject}...");

        let progress = |percent: u8| {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\r  Progress: {percent:>3}%");
            let _ = stderr.flush();
        };

        let outcome = coordinator
            .export_records_until(&subject, &progress, wait_for_shutdown(shutdown_signal))
            .await;
        eprintln!();

        match outcome {
            Ok(report) => Ok(self.print_report(&report)),
            Err(MedirecordError::Cancelled) => {
                println!("⚠️  Export interrupted. No archive was written.");
                tracing::info!("Export interrupted by user signal");
                Ok(130)
            }
            Err(MedirecordError::BundleUnavailable(e)) => {
                eprintln!("❌ Could not retrieve records: {e}");
                Ok(4)
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("❌ Export failed: {e}");
                Ok(5)
            }
        }
    }

    fn print_report(&self, report: &ExportReport) -> i32 {
        if self.json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize export report"),
            }
        } else {
            println!();
            println!("📊 Export Summary:");
            println!("  Archive: {}", report.location.display());
            println!("  Size: {} bytes", report.archive_size);
            println!("  SHA-256: {}", report.sha256);
            println!("  Records: {}", report.record_count);
            println!("  Files included: {}", report.asset_count());
            println!("  Duration: {:.2}s", report.duration.as_secs_f64());
            println!();
        }

        if report.is_complete() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed, but some files could not be included:");
            for skipped in &report.skipped {
                println!(
                    "  - {} {} ({}): {}",
                    skipped.category, skipped.record_id, skipped.locator, skipped.reason
                );
            }
            1
        }
    }
}

/// Resolves once shutdown is requested; never resolves if the sender is gone
async fn wait_for_shutdown(mut signal: watch::Receiver<bool>) {
    loop {
        if *signal.borrow() {
            return;
        }
        if signal.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
