//! Copy a template tree into a new project directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};
use crate::package::PACKAGE_DESCRIPTOR;

/// Files stored under a placeholder name in templates, with their real name.
///
/// Dot-files are dropped by some packaging tools, so templates ship them
/// without the leading dot.
pub const RENAMED_FILES: &[(&str, &str)] = &[("_gitignore", ".gitignore")];

/// Kind of a copied entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory that was created
    Directory,
    /// A file whose bytes were copied
    File,
}

/// One entry written into the target tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedEntry {
    /// Path inside the template
    pub source: PathBuf,
    /// Path inside the new project
    pub target: PathBuf,
    /// Directory or file
    pub kind: EntryKind,
    /// Whether the name came from [`RENAMED_FILES`]
    pub renamed: bool,
}

/// Everything written by [`materialize`]
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Entries in the order they were written
    pub entries: Vec<CopiedEntry>,
}

impl Manifest {
    /// Number of files copied
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::File)
            .count()
    }

    fn written(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.target.clone()).collect()
    }
}

/// Real name for a file stored in a template
#[must_use]
pub fn target_file_name(name: &str) -> &str {
    RENAMED_FILES
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map_or(name, |(_, real)| real)
}

/// Create `target_root` and copy the template tree into it
///
/// The top-level package descriptor is left out; it is written separately by
/// [`crate::package::patch_descriptor`]. A failure part way through leaves the
/// entries written so far in place.
///
/// # Errors
///
/// - [`ScaffoldError::TargetExists`] if `target_root` already exists
/// - [`ScaffoldError::Io`] if `target_root` cannot be created
/// - [`ScaffoldError::Materialize`] if walking or copying fails
pub fn materialize(template_dir: &Path, target_root: &Path) -> Result<Manifest> {
    create_root(target_root)?;
    copy_tree(template_dir, target_root)
}

/// Copy the template tree into an existing `target_root`
///
/// # Errors
///
/// Returns [`ScaffoldError::Materialize`] if walking or copying fails. The
/// error lists every target written before the failure.
pub fn copy_tree(template_dir: &Path, target_root: &Path) -> Result<Manifest> {
    let mut manifest = Manifest::default();

    let walker = WalkDir::new(template_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map_or_else(|| template_dir.to_path_buf(), Path::to_path_buf);
                return Err(ScaffoldError::Materialize {
                    path,
                    written: manifest.written(),
                    source: io::Error::from(err),
                });
            }
        };

        let source = entry.path();
        let Ok(relative) = source.strip_prefix(template_dir) else {
            continue;
        };

        if entry.depth() == 1
            && entry.file_type().is_file()
            && entry.file_name() == PACKAGE_DESCRIPTOR
        {
            continue;
        }

        let copied = copy_entry(source, relative, entry.file_type().is_dir(), target_root)
            .map_err(|source_err| ScaffoldError::Materialize {
                path: source.to_path_buf(),
                written: manifest.written(),
                source: source_err,
            })?;

        tracing::debug!(
            source = %copied.source.display(),
            target = %copied.target.display(),
            renamed = copied.renamed,
            "copied template entry"
        );
        manifest.entries.push(copied);
    }

    Ok(manifest)
}

/// Create the project root, refusing to reuse an existing directory
///
/// # Errors
///
/// - [`ScaffoldError::TargetExists`] if `target_root` already exists
/// - [`ScaffoldError::Io`] if it cannot be created
pub fn create_root(target_root: &Path) -> Result<()> {
    match fs::create_dir(target_root) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(ScaffoldError::TargetExists(target_root.to_path_buf()))
        }
        Err(err) => Err(ScaffoldError::io("create directory", target_root, err)),
    }
}

fn copy_entry(
    source: &Path,
    relative: &Path,
    is_dir: bool,
    target_root: &Path,
) -> io::Result<CopiedEntry> {
    if is_dir {
        let target = target_root.join(relative);
        fs::create_dir_all(&target)?;
        return Ok(CopiedEntry {
            source: source.to_path_buf(),
            target,
            kind: EntryKind::Directory,
            renamed: false,
        });
    }

    let stored_name = relative
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let real_name = target_file_name(stored_name);
    let renamed = real_name != stored_name;

    let target = if renamed {
        target_root.join(relative.with_file_name(real_name))
    } else {
        target_root.join(relative)
    };

    fs::copy(source, &target)?;

    Ok(CopiedEntry {
        source: source.to_path_buf(),
        target,
        kind: EntryKind::File,
        renamed,
    })
}
