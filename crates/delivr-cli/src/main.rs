//! Delivr - CDN URL converter
//!
//! Usage:
//!   delivr resolve <INPUT>...     # Convert URLs or shorthands to CDN URLs
//!   delivr migrate <FILE>         # Rewrite upstream URLs inside a document
//!   delivr config                 # Show effective configuration

mod snippet;

use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delivr_core::config::schema::validate_cdn_host;
use delivr_core::config::{ConfigScope, ConfigStore, default_global_dir};
use delivr_core::error::ResolutionError;
use delivr_core::migrate::{Migration, rewrite_document};
use delivr_core::source::{ResolutionResult, ResolveOptions, SourceResolver};

#[derive(Parser)]
#[command(name = "delivr")]
#[command(about = "Convert GitHub, npm and Google Fonts URLs to CDN URLs", long_about = None)]
struct Cli {
    /// Target CDN host (overrides delivr.toml)
    #[arg(long, global = true)]
    cdn_host: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve URLs or shorthands to CDN URLs
    ///
    /// Accepts GitHub blob/raw URLs, jsDelivr and unpkg URLs, npmjs.com and
    /// registry URLs, Google Fonts CSS URLs, `owner/repo/ref/path` and
    /// `package@version/path` shorthands. Pass `-` to read one input per line
    /// from stdin.
    Resolve {
        /// Inputs to resolve
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Show the detected format and extracted components
        #[arg(short = 'v', long)]
        verbose: bool,
    },

    /// Rewrite upstream URLs inside an HTML, CSS or JavaScript document
    Migrate {
        /// Document to rewrite (`-` for stdin)
        file: PathBuf,

        /// Write the result back to the file instead of stdout
        #[arg(long)]
        in_place: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show or change configuration
    Config(ConfigArgs),
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Plain URLs
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// HTML `<script>`/`<link>` tags
    Html,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: Option<ConfigSubcommand>,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Show config file locations and the effective CDN host
    Show,

    /// Set the CDN host in a config file
    SetCdnHost {
        /// Host name, e.g. cdn.staticdelivr.com
        host: String,

        /// Configuration scope (global, project)
        #[arg(long, default_value = "project")]
        scope: String,
    },

    /// Remove the CDN host from a config file
    UnsetCdnHost {
        /// Configuration scope (global, project)
        #[arg(long, default_value = "project")]
        scope: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delivr=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let exit_code = run_cli(cli)?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run_cli(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Resolve {
            inputs,
            format,
            verbose,
        } => {
            let resolver = build_resolver(cli.cdn_host)?;
            run_resolve(&resolver, inputs, format, verbose)
        }
        Commands::Migrate {
            file,
            in_place,
            format,
        } => {
            let resolver = build_resolver(cli.cdn_host)?;
            run_migrate(&resolver, &file, in_place, format)
        }
        Commands::Config(args) => {
            run_config(args.command.unwrap_or(ConfigSubcommand::Show), cli.cdn_host)?;
            Ok(0)
        }
    }
}

// =============================================================================
// Resolve
// =============================================================================

fn run_resolve(
    resolver: &SourceResolver,
    inputs: Vec<String>,
    format: OutputFormat,
    verbose: bool,
) -> Result<i32> {
    let inputs = expand_stdin_inputs(inputs)?;
    let results: Vec<(String, ResolutionResult)> = inputs
        .into_iter()
        .map(|input| {
            let result = resolver.resolve(&input);
            (input, result)
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Text | OutputFormat::Html => print_results(&results, format, verbose),
    }

    let failures = results.iter().filter(|(_, r)| r.is_err()).count();
    Ok(if failures > 0 { 1 } else { 0 })
}

/// Replace a lone `-` argument with the non-blank lines of stdin.
fn expand_stdin_inputs(inputs: Vec<String>) -> Result<Vec<String>> {
    if inputs.len() != 1 || inputs[0] != "-" {
        return Ok(inputs);
    }

    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read inputs from stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

fn print_results(results: &[(String, ResolutionResult)], format: OutputFormat, verbose: bool) {
    for (input, result) in results {
        match result {
            Ok(resolution) => {
                if format == OutputFormat::Html {
                    println!("{}", snippet::html_tag(resolution));
                } else {
                    println!("{}", resolution.canonical_url);
                }
                if verbose {
                    print_components(resolution);
                }
            }
            Err(err) => {
                eprintln!(
                    "{} {}: {}",
                    style("error:").red().bold(),
                    input.trim(),
                    error_message(err)
                );
            }
        }
    }
}

fn print_components(resolution: &delivr_core::source::Resolution) {
    let reference = &resolution.reference;
    println!("  Kind:     {}", style(resolution.kind).green());
    let fields = [
        ("Owner", &reference.owner),
        ("Repo", &reference.repo),
        ("Ref", &reference.git_ref),
        ("Package", &reference.package_name),
        ("Version", &reference.package_version),
        ("Path", &reference.file_path),
        ("Query", &reference.query),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {:<9} {}", format!("{}:", label), value);
        }
    }
}

fn print_json(results: &[(String, ResolutionResult)]) -> Result<()> {
    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|(input, result)| match result {
            Ok(resolution) => serde_json::json!({
                "input": input,
                "ok": true,
                "kind": resolution.kind,
                "canonical_url": resolution.canonical_url,
                "reference": resolution.reference,
            }),
            Err(err) => serde_json::json!({
                "input": input,
                "ok": false,
                "error": {
                    "kind": err.kind(),
                    "message": error_message(err),
                },
            }),
        })
        .collect();

    // Wrap in versioned output
    let output = serde_json::json!({
        "schema_version": 1,
        "results": entries,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn error_message(err: &ResolutionError) -> String {
    match err {
        ResolutionError::EmptyInput => "input is empty".to_string(),
        ResolutionError::UnrecognizedFormat { .. } => {
            "not a recognized GitHub, npm or Google Fonts reference".to_string()
        }
        ResolutionError::IncompleteReference { kind, missing } => {
            format!("{} reference is missing its {}", kind, missing)
        }
    }
}

// =============================================================================
// Migrate
// =============================================================================

fn run_migrate(
    resolver: &SourceResolver,
    file: &Path,
    in_place: bool,
    format: OutputFormat,
) -> Result<i32> {
    let from_stdin = file == Path::new("-");
    if in_place && from_stdin {
        anyhow::bail!("--in-place cannot be used when reading from stdin");
    }

    let text = if from_stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        text
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read document: {}", file.display()))?
    };

    let migration = rewrite_document(&text, resolver);

    if in_place {
        if migration.is_changed() {
            std::fs::write(file, &migration.output)
                .with_context(|| format!("Failed to write document: {}", file.display()))?;
        }
    } else if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&migration)?);
    } else {
        print!("{}", migration.output);
    }

    print_migration_summary(&migration);
    Ok(0)
}

fn print_migration_summary(migration: &Migration) {
    for skipped in &migration.skipped {
        eprintln!(
            "{} {}: {}",
            style("skipped:").yellow(),
            skipped.original,
            skipped.reason
        );
    }
    eprintln!(
        "{} rewritten, {} skipped",
        style(migration.rewrites.len()).green(),
        migration.skipped.len()
    );
}

// =============================================================================
// Config
// =============================================================================

fn build_resolver(cdn_host: Option<String>) -> Result<SourceResolver> {
    let global_dir = default_global_dir()?;
    let project_root = std::env::current_dir()?;
    let config = ConfigStore::load_merged(&global_dir, &project_root)?;

    let options = match cdn_host {
        Some(host) => {
            validate_cdn_host(&host).context("Invalid --cdn-host")?;
            ResolveOptions::with_cdn_host(host)
        }
        None => config.resolve_options(),
    };
    tracing::debug!(cdn_host = options.cdn_host(), "using CDN host");
    Ok(SourceResolver::new(options))
}

fn run_config(command: ConfigSubcommand, cdn_host_flag: Option<String>) -> Result<()> {
    match command {
        ConfigSubcommand::Show => {
            let global = ConfigStore::from_scope(ConfigScope::Global)?;
            let project = ConfigStore::from_scope(ConfigScope::Project)?;
            let resolver = build_resolver(cdn_host_flag)?;

            println!("Global:   {}", global.config_path().display());
            println!("Project:  {}", project.config_path().display());
            println!("CDN host: {}", style(resolver.cdn_host()).green());
        }
        ConfigSubcommand::SetCdnHost { host, scope } => {
            validate_cdn_host(&host)?;
            let store = ConfigStore::from_scope(parse_scope(&scope)?)?;
            let config = store.load()?.with_cdn_host(host);
            store.save(&config)?;
            println!("Updated {}", store.config_path().display());
        }
        ConfigSubcommand::UnsetCdnHost { scope } => {
            let store = ConfigStore::from_scope(parse_scope(&scope)?)?;
            let mut config = store.load()?;
            config.cdn_host = None;
            store.save(&config)?;
            println!("Updated {}", store.config_path().display());
        }
    }
    Ok(())
}

fn parse_scope(s: &str) -> Result<ConfigScope> {
    match s.to_lowercase().as_str() {
        "global" | "g" => Ok(ConfigScope::Global),
        "project" | "p" => Ok(ConfigScope::Project),
        _ => anyhow::bail!("Unknown scope: {}. Use 'global' or 'project'", s),
    }
}
