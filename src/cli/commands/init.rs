//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medirecord.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing MediRecord configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [provider] at your records API or a fixture directory");
                println!("  3. Set MEDIRECORD_PROVIDER_API_TOKEN if the API needs a token");
                println!("  4. Validate configuration: medirecord validate-config");
                println!("  5. Run export: medirecord export --subject <ID>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# MediRecord Configuration File
# Patient data export pipeline

[application]
log_level = "info"

[provider]
kind = "fixture"
fixture_dir = "./fixtures"

[assets]
source = "local"
local_root = "./assets"
fetch_timeout_seconds = 15
max_concurrent_fetches = 4

[export]
output_dir = "./exports"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# MediRecord Configuration File
# Patient data export pipeline
#
# This file contains all configuration options with examples and explanations.
# Any value may reference an environment variable as ${VAR_NAME}, and any
# key may be overridden with MEDIRECORD_<SECTION>_<KEY>.

# Runtime environment (development, staging, production)
# TLS verification cannot be disabled in production.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Record Bundle Provider
# ============================================================================
[provider]
# Provider implementation: "http" or "fixture"
kind = "http"

# Base URL of the records API; bundles are read from
# <base_url>/patients/<subject-id>/records
base_url = "https://records.example.com/api"

# Bearer token (prefer the MEDIRECORD_PROVIDER_API_TOKEN environment variable)
# api_token = "${MEDIRECORD_API_TOKEN}"

# Directory of <subject-id>.json bundles, used when kind = "fixture"
# fixture_dir = "./fixtures"

# Request timeout in seconds
timeout_seconds = 30

[provider.retry]
# Attempts for transient failures (1 = no retry)
max_attempts = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# ============================================================================
# Asset Fetching
# ============================================================================
[assets]
# Asset source: "http" or "local"
source = "http"

# Relative asset locators are resolved against this URL
base_url = "https://records.example.com"

# Root directory for source = "local"
# local_root = "./assets"

# Time budget for one asset; slower assets are skipped
fetch_timeout_seconds = 15

# Asset fetches in flight at once (1-32)
max_concurrent_fetches = 4

# TLS certificate verification
tls_verify = true

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Directory finished archives are written to
output_dir = "./exports"

# Progress tick interval while assets are archived
progress_tick_ms = 500

# Delay before progress returns to 0 after a successful export
reset_delay_ms = 1000

# Render a section page even when a category has no records
render_empty_sections = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
