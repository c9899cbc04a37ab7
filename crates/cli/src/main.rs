//! swagger-import CLI
//!
//! Command-line interface for loading Swagger 1.2 descriptions and
//! translating them into the canonical API definition.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use swagger_import_common::{Definition, ImportConfig};
use swagger_import_parser::{Credentials, LocatorKind, SwaggerTypeFormat, TypeMapper};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-import")]
#[command(version, about = "Import Swagger 1.2 descriptions into a canonical API definition", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a resource listing and its declarations and print the definition
    #[command(after_help = "EXAMPLES:\n  \
        # Import from a remote listing\n  \
        swagger-import import --source http://petstore.example.com/api/api-docs\n\n  \
        # Import from a local listing, with basic auth and YAML output\n  \
        swagger-import import \\\n    \
        --source ./api-docs/api.json \\\n    \
        --format yaml \\\n    \
        --output petstore.yaml\n\n  \
        # Authenticated remote import with retry settings\n  \
        swagger-import import \\\n    \
        --source https://api.example.com/api-docs \\\n    \
        --username admin --password secret \\\n    \
        --config import.yaml")]
    Import {
        /// Listing URL or path to a local listing file
        #[arg(short, long)]
        source: String,

        /// Username for HTTP Basic authentication
        #[arg(short, long)]
        username: Option<String>,

        /// Password for HTTP Basic authentication
        #[arg(short, long)]
        password: Option<String>,

        /// YAML configuration file (timeouts, retry policy)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Write the definition to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tell whether a source locator is remote or local
    Classify {
        /// Source locator
        source: String,
    },

    /// Map a scalar type between the canonical vocabulary and Swagger
    #[command(after_help = "EXAMPLES:\n  \
        # Canonical name to Swagger type/format\n  \
        swagger-import map-type long\n\n  \
        # Swagger type/format to canonical name\n  \
        swagger-import map-type --reverse number float")]
    MapType {
        /// Canonical type name, or Swagger type with --reverse
        name: String,

        /// Swagger format (with --reverse)
        #[arg(requires = "reverse")]
        format: Option<String>,

        /// Map from Swagger to the canonical vocabulary
        #[arg(short, long)]
        reverse: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Import {
            source,
            username,
            password,
            config,
            format,
            output,
        } => {
            let credentials = Credentials { username, password };
            import_command(
                &source,
                &credentials,
                config.as_deref(),
                format,
                output.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Classify { source } => {
            let kind = LocatorKind::classify(&source);
            let label = if kind.is_remote() {
                "remote".cyan()
            } else {
                "local".yellow()
            };
            println!("{} {} is {}", "→".cyan(), source, label);
        }
        Commands::MapType {
            name,
            format,
            reverse,
        } => map_type_command(&name, format, reverse),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn import_command(
    source: &str,
    credentials: &Credentials,
    config_path: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ImportConfig::load(path).context("Failed to load configuration")?,
        None => ImportConfig::default(),
    };

    eprintln!("{} Importing Swagger description: {}", "→".cyan(), source);
    if verbose {
        eprintln!("  Locator: {:?}", LocatorKind::classify(source));
        eprintln!("  Accept: {}", config.accept);
        eprintln!("  Retries: {}", config.retry.max_retries);
    }

    let definition = swagger_import_parser::get_definition(source, credentials, &config)
        .with_context(|| format!("Failed to import {}", source))?;

    print_summary(&definition, verbose);

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&definition)
            .context("Failed to serialize definition as JSON")?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(&definition).context("Failed to serialize definition as YAML")?
        }
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Definition written to {}", "✓".green(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn print_summary(definition: &Definition, verbose: bool) {
    let contract = &definition.contract;
    eprintln!("\n{}", "✓ Import successful!".green().bold());
    eprintln!("  Name: {}", contract.name.yellow());
    if let Some(ref version) = definition.version {
        eprintln!("  Version: {}", version.yellow());
    }
    eprintln!("  Resources: {}", contract.resources.len());
    eprintln!("  Representations: {}", contract.representations.len());

    if verbose {
        eprintln!("\n{}", "Resources:".bold());
        for resource in &contract.resources {
            let methods: Vec<&str> = resource
                .operations
                .iter()
                .map(|op| op.method.as_str())
                .collect();
            eprintln!("  • {} ({})", resource.path.cyan(), methods.join(", "));
        }
    }
}

fn map_type_command(name: &str, format: Option<String>, reverse: bool) {
    if reverse {
        let pair = SwaggerTypeFormat {
            type_name: name.to_string(),
            format,
        };
        println!("{}", TypeMapper::to_definition_type(&pair));
    } else {
        let pair = TypeMapper::to_swagger_type(name);
        match pair.format {
            Some(format) => println!("type: {}, format: {}", pair.type_name, format),
            None => println!("type: {}", pair.type_name),
        }
    }
}
