//! create-c-t CLI

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use create_c_t::{
    observability, Framework, Invocation, Language, NewCommand, NewOptions, Outcome, Presets,
    ScaffolderConfig, TemplateRegistry, TerminalPrompter,
};

#[derive(Parser)]
#[command(name = "create-c-t")]
#[command(version)]
#[command(about = "Scaffold a React or Vue 3 project from a template", long_about = None)]
struct Cli {
    /// Project directory name (seeds the prompt default)
    project_name: Option<String>,

    /// Language, skips the language prompt
    #[arg(short, long, value_enum)]
    lang: Option<Language>,

    /// Framework, skips the framework prompt
    #[arg(short, long, value_enum)]
    framework: Option<Framework>,

    /// Name written to package.json (defaults to the project name)
    #[arg(long)]
    package_name: Option<String>,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    yes: bool,

    /// Directory searched for templates before the built-in ones
    #[arg(long, value_name = "DIR")]
    templates_dir: Option<PathBuf>,

    /// Load configuration from this file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List the templates that can be found and exit
    #[arg(long)]
    list_templates: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => ScaffolderConfig::load_from(path),
        None => ScaffolderConfig::load(),
    }
    .context("Failed to load configuration")?;

    let templates_dir = cli.templates_dir.as_deref().or(config.templates_dir.as_deref());
    let registry = TemplateRegistry::discover(templates_dir);

    if cli.list_templates {
        for key in registry.available() {
            println!("  {:<10} {}", key.to_string(), style(key.dir_name()).dim());
        }
        return Ok(());
    }

    let invocation = Invocation::capture(&config.user_agent_var)?;
    let options = NewOptions {
        presets: Presets {
            project_name: cli.project_name,
            language: cli.lang,
            framework: cli.framework,
            accept_defaults: cli.yes,
        },
        package_name: cli.package_name,
    };

    let cmd = NewCommand::new(options, invocation, config, registry);
    match cmd.execute(&mut TerminalPrompter::new())? {
        Outcome::Created(summary) => {
            tracing::info!(root = %summary.root.display(), template = %summary.template, "project created");
        }
        Outcome::Cancelled => NewCommand::print_cancelled(),
    }

    Ok(())
}
