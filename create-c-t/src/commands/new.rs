//! Project scaffolding command

use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ScaffolderConfig;
use crate::error::{Result, ScaffoldError};
use crate::materialize::{copy_tree, create_root, Manifest};
use crate::package::patch_descriptor;
use crate::prompt::{self, Presets, Prompter, Selection};
use crate::report::{next_steps, print_next_steps, PackageManager};
use crate::templates::{TemplateKey, TemplateRegistry};

/// Process state the command depends on, captured once at startup
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Directory the scaffolder was started from
    pub cwd: PathBuf,
    /// Package manager user-agent hint, if the environment carried one
    pub user_agent: Option<String>,
}

impl Invocation {
    /// Read the working directory and the `user_agent_var` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn capture(user_agent_var: &str) -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|err| ScaffoldError::io("read current directory", ".", err))?;
        let user_agent = std::env::var(user_agent_var).ok();

        Ok(Self { cwd, user_agent })
    }
}

/// Command-line options for a new project
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    /// Answers known before prompting
    pub presets: Presets,
    /// Package name to write instead of the project name
    pub package_name: Option<String>,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct Summary {
    /// Answers used
    pub selection: Selection,
    /// Template key the answers resolved to
    pub template: TemplateKey,
    /// Template directory that was copied
    pub template_dir: PathBuf,
    /// Root of the new project
    pub root: PathBuf,
    /// Entries copied from the template
    pub manifest: Manifest,
    /// Path of the patched package descriptor
    pub descriptor: PathBuf,
    /// Instruction lines printed at the end
    pub next_steps: Vec<String>,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Project was written
    Created(Box<Summary>),
    /// The user cancelled a prompt; nothing was written
    Cancelled,
}

/// Create a new project from a template
pub struct NewCommand {
    options: NewOptions,
    invocation: Invocation,
    config: ScaffolderConfig,
    registry: TemplateRegistry,
}

impl NewCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(
        options: NewOptions,
        invocation: Invocation,
        config: ScaffolderConfig,
        registry: TemplateRegistry,
    ) -> Self {
        Self {
            options,
            invocation,
            config,
            registry,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The prompt fails for a reason other than cancellation
    /// - No template directory exists for the chosen key
    /// - The target directory already exists
    /// - Copying the template or patching `package.json` fails
    pub fn execute<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<Outcome> {
        let Some(selection) = prompt::collect(
            prompter,
            &self.options.presets,
            &self.config.default_project_name,
        )?
        else {
            tracing::info!("scaffolding cancelled by user");
            return Ok(Outcome::Cancelled);
        };

        let template = TemplateKey::resolve(selection.framework, selection.language);
        let template_dir = self.registry.locate(&template)?;
        let root = self.invocation.cwd.join(&selection.project_name);

        create_root(&root)?;
        println!();
        println!(
            "{} {}...",
            style("Scaffolding project in").bold(),
            style(root.display()).cyan()
        );

        let manifest = Self::copy_template(&template_dir, &root)?;

        let package_name = self
            .options
            .package_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(selection.project_name.as_str());
        let descriptor = patch_descriptor(&template_dir, &root, package_name)?;

        let manager = PackageManager::detect(
            self.invocation.user_agent.as_deref(),
            &self.config.default_package_manager,
        );
        let next_steps = next_steps(&self.invocation.cwd, &root, &manager);
        print_next_steps(&next_steps);

        Ok(Outcome::Created(Box::new(Summary {
            selection,
            template,
            template_dir,
            root,
            manifest,
            descriptor,
            next_steps,
        })))
    }

    /// Print the message shown when the user cancels
    pub fn print_cancelled() {
        println!("{} Operation cancelled", style("✖").red());
    }

    fn copy_template(template_dir: &Path, root: &Path) -> Result<Manifest> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Copying template files...");

        let result = copy_tree(template_dir, root);
        spinner.finish_and_clear();

        let manifest = result?;
        tracing::info!(files = manifest.file_count(), root = %root.display(), "copied template");
        Ok(manifest)
    }
}
