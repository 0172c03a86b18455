use crate::config::toml_config::TomlConfig;
use crate::domain::model::{DocumentKind, FormData, PayloadStyle};
use crate::utils::error::{DocError, Result};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "docgen-client")]
#[command(about = "Submit document forms to the PDF generation API and save the result")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Host the client runs on; loopback hosts talk to the local API
    #[arg(long)]
    pub host: Option<String>,

    /// Directory downloaded documents are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// How document data is sent to the API
    #[arg(long, value_enum)]
    pub style: Option<PayloadStyle>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit a document form and save the returned file
    Submit {
        #[arg(value_enum)]
        kind: DocumentKind,

        /// Form field as name=value; repeat for itemized fields (servico, valor)
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Show the request that would be sent without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Check that the document service is up
    Health,
}

impl CliConfig {
    /// Loads the file configuration (or defaults) and layers the flags on top.
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(host) = &self.host {
            config.api.host = host.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.download.output_dir = output_dir.clone();
        }
        if let Some(style) = self.style {
            config.request.style = style;
        }
    }
}

pub fn parse_field(input: &str) -> Result<(String, String)> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| DocError::InvalidFieldError {
            input: input.to_string(),
            reason: "expected name=value".to_string(),
        })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(DocError::InvalidFieldError {
            input: input.to_string(),
            reason: "field name cannot be empty".to_string(),
        });
    }

    Ok((name.to_string(), value.to_string()))
}

pub fn form_from_fields(fields: &[(String, String)]) -> FormData {
    FormData::from_pairs(fields.iter().cloned())
}
