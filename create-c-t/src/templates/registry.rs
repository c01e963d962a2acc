//! Template directory lookup
//!
//! Templates are plain directories. Several roots may provide them and the
//! first root that contains the requested directory wins:
//!
//! 1. An explicit directory (`--templates-dir` or `templates_dir` in config)
//! 2. User overrides in `$XDG_CONFIG_HOME/create-c-t/templates/`
//! 3. A `templates/` directory next to the executable
//! 4. The templates bundled with this crate

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::TemplateKey;
use crate::error::{Result, ScaffoldError};

/// Application directory name under the XDG config directory
const APP_DIR: &str = "create-c-t";

/// Ordered set of directories that may contain template directories
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    roots: Vec<PathBuf>,
}

impl TemplateRegistry {
    /// Build the standard search path, with `explicit` taking priority
    #[must_use]
    pub fn discover(explicit: Option<&Path>) -> Self {
        let mut roots = Vec::new();

        if let Some(dir) = explicit {
            roots.push(dir.to_path_buf());
        }

        if let Some(config_dir) = dirs::config_dir() {
            roots.push(config_dir.join(APP_DIR).join("templates"));
        }

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir.join("templates"));
        }

        roots.push(Self::bundled_root());

        tracing::debug!(?roots, "template search roots");
        Self { roots }
    }

    /// Registry that searches exactly the given roots
    #[must_use]
    pub const fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Templates shipped in this crate's source tree
    #[must_use]
    pub fn bundled_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    /// Search roots in priority order
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the directory for `key`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if no root contains it.
    pub fn locate(&self, key: &TemplateKey) -> Result<PathBuf> {
        let dir_name = key.dir_name();

        for root in &self.roots {
            let candidate = root.join(&dir_name);
            if candidate.is_dir() {
                tracing::info!(template = %dir_name, path = %candidate.display(), "resolved template");
                return Ok(candidate);
            }
        }

        Err(ScaffoldError::TemplateNotFound {
            name: dir_name,
            searched: self.roots.clone(),
        })
    }

    /// Keys with a template directory in at least one root
    #[must_use]
    pub fn available(&self) -> Vec<TemplateKey> {
        let mut found = BTreeSet::new();

        for root in &self.roots {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            for entry in entries.flatten() {
                if !entry.path().is_dir() {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    if TemplateKey::from_dir_name(name).is_some() {
                        found.insert(name.to_string());
                    }
                }
            }
        }

        TemplateKey::all()
            .into_iter()
            .filter(|key| found.contains(&key.dir_name()))
            .collect()
    }
}
