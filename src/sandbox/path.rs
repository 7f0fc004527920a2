//! Project-root path resolution
//!
//! Every per-file tool goes through [`PathSandbox::resolve`]. The check runs
//! twice:
//!
//! ```text
//! "a/../b/c.txt" ──fold . and ..──► <root>/b/c.txt ──under root?──┐
//!                                                                  │
//!     <canonical root>/b/c.txt ◄──canonicalize deepest existing ◄──┘
//!            │                    ancestor, re-join the rest
//!            └──under canonical root?──► Ok
//! ```
//!
//! The second pass follows symlinks, so a link inside the project that
//! points outside it cannot be used to read or write there.

use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::tools::ToolError;

/// Resolves model-supplied paths against a fixed project root
#[derive(Debug, Clone)]
pub struct PathSandbox {
    /// Absolute, captured once at startup
    root: PathBuf,
}

impl PathSandbox {
    /// Create a sandbox rooted at `root`.
    ///
    /// A relative root is anchored at the current directory so that every
    /// resolved path is absolute. An existing root is canonicalized.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };
        let root = normalize(&root);
        let root = root.canonicalize().unwrap_or(root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a project-relative path.
    ///
    /// Symlinks along the existing part of the path are followed and the
    /// returned path is the physical one.
    ///
    /// # Errors
    /// * `InvalidPath` - the input is empty or absolute
    /// * `PathEscape` - the normalized path, or the path with symlinks
    ///   followed, is not the root or below it. A dangling symlink counts as
    ///   an escape since its target cannot be checked.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ToolError> {
        if relative.is_empty() {
            return Err(ToolError::InvalidPath("`path` is required".to_string()));
        }

        let rel = Path::new(relative);
        let has_prefix = matches!(rel.components().next(), Some(Component::Prefix(_)));
        if rel.is_absolute() || rel.has_root() || has_prefix {
            return Err(ToolError::InvalidPath(format!(
                "absolute paths are not allowed: {}",
                relative
            )));
        }

        let candidate = normalize(&self.root.join(rel));
        if !candidate.starts_with(&self.root) {
            return Err(ToolError::PathEscape(relative.to_string()));
        }

        let root = physical(&self.root)?;
        let resolved =
            physical(&candidate).map_err(|_| ToolError::PathEscape(relative.to_string()))?;
        if !resolved.starts_with(&root) {
            return Err(ToolError::PathEscape(relative.to_string()));
        }

        Ok(resolved)
    }

    /// Locate an existing directory for browsing.
    ///
    /// Unlike [`resolve`](Self::resolve) this performs no containment check:
    /// absolute paths are accepted and `..` may leave the root. Only
    /// existence is required. Relative paths are anchored at the root.
    pub fn locate(&self, path: &str) -> Result<PathBuf, ToolError> {
        let target = self.root.join(path);
        let target = normalize(&target);
        if !target.exists() {
            return Err(ToolError::NotFound(format!(
                "'{}' does not exist",
                target.display()
            )));
        }
        Ok(target)
    }
}

/// Canonicalize the deepest ancestor of `path` that exists (a dangling
/// symlink counts as existing) and re-join the components below it.
///
/// `path` must already be normalized.
fn physical(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<&OsStr> = Vec::new();
    while std::fs::symlink_metadata(existing).is_err() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing.canonicalize()?;
    for name in missing.iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` at the root stays at the root, as the OS would treat it.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
