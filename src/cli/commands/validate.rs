//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the MediRecord configuration file.

use crate::config::load_config;
use crate::config::schema::{AssetSource, ProviderKind};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading runs validation as its last step
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Environment: {:?}", config.environment);

        match config.provider.kind {
            ProviderKind::Http => {
                println!("  Provider: http");
                println!(
                    "  Records API: {}",
                    config.provider.base_url.as_deref().unwrap_or("-")
                );
                println!(
                    "  API Token: {}",
                    if config.provider.api_token.is_some() {
                        "configured"
                    } else {
                        "none"
                    }
                );
                println!("  Max Attempts: {}", config.provider.retry.max_attempts);
            }
            ProviderKind::Fixture => {
                println!("  Provider: fixture");
                println!(
                    "  Fixture Directory: {}",
                    config.provider.fixture_dir.as_deref().unwrap_or("-")
                );
            }
        }

        match config.assets.source {
            AssetSource::Http => {
                println!("  Assets: http");
                if let Some(base_url) = &config.assets.base_url {
                    println!("  Asset Base URL: {base_url}");
                }
                println!("  TLS Verify: {}", config.assets.tls_verify);
            }
            AssetSource::Local => {
                println!("  Assets: local");
                println!(
                    "  Asset Root: {}",
                    config.assets.local_root.as_deref().unwrap_or("-")
                );
            }
        }
        println!(
            "  Fetch Timeout: {}s",
            config.assets.fetch_timeout_seconds
        );
        println!(
            "  Concurrent Fetches: {}",
            config.assets.max_concurrent_fetches
        );
        println!("  Output Directory: {}", config.export.output_dir);
        println!(
            "  Empty Sections Rendered: {}",
            config.export.render_empty_sections
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[provider]
kind = "fixture"
fixture_dir = "./fixtures"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[provider]
kind = "fixture"
"#
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
