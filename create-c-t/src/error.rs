//! Error types for scaffolding

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Everything that can abort a scaffolding run
///
/// User cancellation is not an error; see [`crate::commands::Outcome::Cancelled`].
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The target project directory is already present
    #[error("Target directory already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// No search root contains the requested template directory
    #[error("Template not found: {name} (searched: {})", display_paths(.searched))]
    TemplateNotFound {
        /// Directory name that was looked up
        name: String,
        /// Roots that were searched, in priority order
        searched: Vec<PathBuf>,
    },

    /// A filesystem operation failed
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted ("read", "write", ...)
        action: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Copying the template tree stopped part way through
    #[error(
        "Failed to copy {} ({} entries already written): {source}",
        .path.display(),
        .written.len()
    )]
    Materialize {
        /// Entry that could not be copied
        path: PathBuf,
        /// Target paths created before the failure
        written: Vec<PathBuf>,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The template's package descriptor is not valid JSON
    #[error("Malformed package descriptor {}: {source}", .path.display())]
    MalformedDescriptor {
        /// Descriptor path
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// The template's package descriptor parsed but is not a JSON object
    #[error("Package descriptor {} is not a JSON object", .0.display())]
    DescriptorNotObject(PathBuf),

    /// The terminal prompt failed for a reason other than cancellation
    #[error("Prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl ScaffoldError {
    /// Wrap an I/O error with the attempted action and path
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no template roots".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
