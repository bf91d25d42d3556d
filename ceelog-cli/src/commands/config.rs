//! `ceelog config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use ceelog_core::config::CeeConfig;

use super::{ConfigSource, load_config};
use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Sections accepted by `config show --section`.
pub const SECTIONS: [&str; 3] = ["general", "context", "codec"];

/// Execute the `config` command.
pub fn execute(
    args: ConfigArgs,
    config_path: Option<&Path>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer),
        ConfigAction::Show { section } => execute_show(config_path, section, writer),
    }
}

/// Execute the config validate subcommand.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (parse errors, invalid values, missing file).
fn execute_validate(config_path: Option<&Path>, writer: &OutputWriter) -> Result<(), CliError> {
    let report = validation_report(config_path);
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Load the configuration and describe the outcome.
pub fn validation_report(config_path: Option<&Path>) -> ConfigValidationReport {
    let source = config_path.map_or_else(
        || ConfigSource::Defaults.describe(),
        |p| p.display().to_string(),
    );
    info!(source = %source, "validating configuration");

    match load_config(config_path) {
        Ok((_, source)) => ConfigValidationReport {
            source: source.describe(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source,
            valid: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Execute the config show subcommand.
///
/// # Errors
///
/// Returns `CliError::Config` if loading fails or `CliError::Command` if section name is invalid.
fn execute_show(
    config_path: Option<&Path>,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let (config, source) = load_config(config_path)?;
    info!(source = %source.describe(), "showing configuration");

    let report = config_report(&config, &source, section)?;
    writer.render(&report)?;
    Ok(())
}

/// Serialize the whole configuration or one section of it.
pub fn config_report(
    config: &CeeConfig,
    source: &ConfigSource,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let rendered = match section.as_deref() {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("context") => toml::to_string_pretty(&config.context),
        Some("codec") => toml::to_string_pretty(&config.codec),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: {})",
                other,
                SECTIONS.join(", ")
            )));
        }
    };

    Ok(ConfigReport {
        source: source.describe(),
        section,
        config_toml: rendered.unwrap_or_else(|e| format!("(serialization error: {})", e)),
    })
}

/// Configuration display report.
///
/// The `config_toml` field is skipped during JSON serialization (only used for text rendering).
#[derive(Serialize)]
pub struct ConfigReport {
    /// Configuration file path or `(defaults)`
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Serialized TOML configuration
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    /// Configuration file path or `(defaults)`
    pub source: String,
    /// Whether the configuration is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
