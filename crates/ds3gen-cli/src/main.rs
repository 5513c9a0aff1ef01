//! ds3gen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::{Parser, ValueEnum};
use ds3gen_core::{contract::Contract, generate, Config, Engine, GenerationUnit, TargetLanguage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ds3gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate SDK sources for one target language
    Generate {
        /// Path to the contract (JSON or YAML)
        #[arg(long)]
        contract: Option<PathBuf>,
        /// Target language (java, net, python, go, c)
        #[arg(long)]
        target: Option<String>,
        /// Output directory for generated code (default: sdk)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Directory holding per-target template sets
        #[arg(long)]
        template_dir: Option<PathBuf>,
        /// YAML config file; command-line flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the generation units for a contract without rendering them
    Inspect {
        /// Path to the contract (JSON or YAML)
        #[arg(long)]
        contract: PathBuf,
        /// Target language (java, net, python, go, c)
        #[arg(long, default_value = "java")]
        target: String,
        /// Only print the unit with this generated name
        #[arg(long)]
        unit: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List the supported target languages
    Targets,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

fn parse_target(target: &str) -> anyhow::Result<TargetLanguage> {
    target
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid target '{target}': {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            contract,
            target,
            output_dir,
            template_dir,
            config,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => {
                    let contract = contract.as_ref().ok_or_else(|| {
                        anyhow::anyhow!("Either --contract or --config is required")
                    })?;
                    Config::new(contract.to_string_lossy(), "sdk")
                }
            };
            if let Some(contract) = contract {
                config.contract_path = contract.to_string_lossy().to_string();
            }
            if let Some(target) = target {
                parse_target(&target)?;
                config.target = target;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir.to_string_lossy().to_string();
            }
            if let Some(template_dir) = template_dir {
                config.template_dir = Some(template_dir.to_string_lossy().to_string());
            }

            tracing::info!(
                language = %config.target,
                contract = %config.contract_path,
                "Generating SDK sources"
            );
            let written = generate(&config)
                .await
                .context("Failed to generate SDK sources")?;
            println!(
                "Generated {} file(s) in: {}",
                written.len(),
                config.output_dir
            );
        }
        Commands::Inspect {
            contract,
            target,
            unit,
            format,
        } => {
            let target = parse_target(&target)?;
            let contract = Contract::from_file(&contract)
                .await
                .with_context(|| format!("Failed to load contract {}", contract.display()))?;
            let units = Engine::new(&contract, target)?.run().into_result()?;

            let selected: Vec<&GenerationUnit> = match &unit {
                Some(name) => units.iter().filter(|u| u.name() == name.as_str()).collect(),
                None => units.iter().collect(),
            };
            if let Some(name) = &unit {
                if selected.is_empty() {
                    anyhow::bail!("No unit named '{name}' for target {target}");
                }
            }

            let output = match format {
                Format::Json => serde_json::to_string_pretty(&selected)?,
                Format::Yaml => serde_yaml::to_string(&selected)?,
            };
            println!("{output}");
        }
        Commands::Targets => {
            for target in TargetLanguage::all() {
                let profile = target.profile();
                println!(
                    "{:<8} .{:<5} requests: {}  types: {}",
                    target.as_str(),
                    profile.extension,
                    profile.request_dir,
                    profile.type_dir
                );
            }
        }
    }
    Ok(())
}
