mod config;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wam_core::{convert_to, detect, loader, ManifestFormat};
use wam_validate::{
    validate_and_normalize_start_url, Finding, Level, RuleRegistry, Validator,
};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "wam", version, about = "Web app manifest tools")]
struct Cli {
    /// Path to a wam.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect the schema of a manifest file
    Detect {
        path: PathBuf,
    },

    /// Convert a manifest to another schema (w3c when omitted)
    Convert {
        path: PathBuf,
        #[arg(long, short = 'f')]
        format: Option<String>,
        /// Write the converted manifest here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate a manifest for the requested platforms
    Validate {
        path: PathBuf,
        #[arg(long = "platform", short = 'p')]
        platforms: Vec<String>,
        /// Hosted site URL; enables start_url normalization
        #[arg(long)]
        site_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };

    match cli.cmd {
        Command::Detect { path } => {
            let data = std::fs::read(&path)?;
            let content: serde_json::Value = serde_json::from_slice(&data)?;
            match detect(&content) {
                Some(format) => println!("{format}"),
                None => bail!("unable to detect the manifest format"),
            }
        }
        Command::Convert { path, format, output } => {
            let target = format.as_deref().map(ManifestFormat::from_str).transpose()?;
            let document = loader::from_file(&path, None)?;
            let converted = convert_to(document, target)?;
            match output {
                Some(out) => loader::write_to_file(&converted, &out)?,
                None => println!("{}", serde_json::to_string_pretty(&converted.content)?),
            }
        }
        Command::Validate { path, platforms, site_url } => {
            let platforms = if platforms.is_empty() {
                cfg.validation.platforms.clone()
            } else {
                platforms
            };

            let mut document = loader::from_file(&path, None)?;
            validate_and_normalize_start_url(site_url.as_deref(), &mut document)?;

            let validator = Validator::new(RuleRegistry::with_general_rules())
                .with_options(cfg.runner_options());
            let findings = validator.validate(&document, &platforms).await?;

            let mut invalid = false;
            for finding in &findings {
                render(finding);
                invalid = invalid || finding.level == Level::Error;
            }

            if invalid {
                bail!("The manifest is not valid. Review the validation messages above for additional information.");
            }
            info!("the manifest is valid");
        }
    }

    Ok(())
}

fn render(finding: &Finding) {
    let message = format!(
        "manifest validation: {} (member: {}, platform: {})",
        finding.description, finding.member, finding.platform
    );
    match finding.level {
        Level::Error => error!("{message}"),
        Level::Warning | Level::Suggestion => warn!("{message}"),
    }
}
