//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AssetSource, MedirecordConfig, ProviderKind};
use super::secret::secret_string;
use crate::domain::errors::MedirecordError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedirecordConfig
/// 4. Applies environment variable overrides (MEDIRECORD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use medirecord::config::loader::load_config;
///
/// let config = load_config("medirecord.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedirecordConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedirecordError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedirecordError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<MedirecordConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MedirecordConfig = toml::from_str(&contents)
        .map_err(|e| MedirecordError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MedirecordError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MedirecordError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MedirecordError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using MEDIRECORD_* prefix
///
/// Environment variables follow the pattern: MEDIRECORD_<SECTION>_<KEY>
/// For example: MEDIRECORD_PROVIDER_BASE_URL, MEDIRECORD_EXPORT_OUTPUT_DIR
fn apply_env_overrides(config: &mut MedirecordConfig) -> Result<()> {
    if let Ok(val) = std::env::var("MEDIRECORD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Provider overrides
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_KIND") {
        config.provider.kind = match val.to_lowercase().as_str() {
            "http" => ProviderKind::Http,
            "fixture" => ProviderKind::Fixture,
            other => {
                return Err(MedirecordError::Configuration(format!(
                    "Invalid MEDIRECORD_PROVIDER_KIND '{other}'. Must be one of: http, fixture"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_BASE_URL") {
        config.provider.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_FIXTURE_DIR") {
        config.provider.fixture_dir = Some(val);
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_API_TOKEN") {
        config.provider.api_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.provider.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_RETRY_MAX_ATTEMPTS") {
        if let Ok(n) = val.parse() {
            config.provider.retry.max_attempts = n;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_PROVIDER_RETRY_INITIAL_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.provider.retry.initial_delay_ms = ms;
        }
    }

    // Asset overrides
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_SOURCE") {
        config.assets.source = match val.to_lowercase().as_str() {
            "http" => AssetSource::Http,
            "local" => AssetSource::Local,
            other => {
                return Err(MedirecordError::Configuration(format!(
                    "Invalid MEDIRECORD_ASSETS_SOURCE '{other}'. Must be one of: http, local"
                )))
            }
        };
    }
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_BASE_URL") {
        config.assets.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_LOCAL_ROOT") {
        config.assets.local_root = Some(val);
    }
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_FETCH_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.assets.fetch_timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_MAX_CONCURRENT_FETCHES") {
        if let Ok(n) = val.parse() {
            config.assets.max_concurrent_fetches = n;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_ASSETS_TLS_VERIFY") {
        config.assets.tls_verify = val.parse().unwrap_or(true);
    }

    // Export overrides
    if let Ok(val) = std::env::var("MEDIRECORD_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("MEDIRECORD_EXPORT_PROGRESS_TICK_MS") {
        if let Ok(ms) = val.parse() {
            config.export.progress_tick_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_EXPORT_RESET_DELAY_MS") {
        if let Ok(ms) = val.parse() {
            config.export.reset_delay_ms = ms;
        }
    }
    if let Ok(val) = std::env::var("MEDIRECORD_EXPORT_RENDER_EMPTY_SECTIONS") {
        config.export.render_empty_sections = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDIRECORD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDIRECORD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDIRECORD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
