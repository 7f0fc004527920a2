//! Gitignore-aware path filtering
//!
//! Patterns are collected from three sources and compiled into one matcher,
//! in this order (later patterns override earlier ones, `!` re-includes):
//!
//! 1. `<root>/.gitignore`
//! 2. `<root>/.git/info/exclude`
//! 3. the global excludes file, see [`GlobalExcludes`]
//!
//! A missing source is skipped silently.
//!
//! The global file is looked up in the user's git configuration only
//! (`~/.gitconfig`, `$XDG_CONFIG_HOME/git/config`), falling back to
//! `$XDG_CONFIG_HOME/git/ignore`. A `core.excludesFile` set in the system or
//! repository config is not consulted.

use std::path::{Path, PathBuf};

use ignore::gitignore::{gitconfig_excludes_path, Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

/// Repository-local ignore files, relative to the scanned root
const LOCAL_SOURCES: [&str; 2] = [".gitignore", ".git/info/exclude"];

/// Where the third ignore source comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GlobalExcludes {
    /// `core.excludesFile` from the user's git config, re-read on every build
    #[default]
    GitConfig,
    /// A fixed file
    File(PathBuf),
    /// No global source
    Disabled,
}

impl GlobalExcludes {
    /// The file to read, if any
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            GlobalExcludes::GitConfig => gitconfig_excludes_path(),
            GlobalExcludes::File(path) => Some(path.clone()),
            GlobalExcludes::Disabled => None,
        }
    }
}

/// Compiled ignore rules for one directory root
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
    /// Files that actually contributed patterns, in precedence order
    sources: Vec<PathBuf>,
}

impl IgnoreMatcher {
    /// Build from the root's ignore files plus the configured global source
    pub fn build(root: &Path, global: &GlobalExcludes) -> Self {
        Self::build_with_global(root, global.path())
    }

    /// Build with an explicit global excludes file (or none)
    pub fn build_with_global(root: &Path, global: Option<PathBuf>) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        let mut sources = Vec::new();

        let candidates = LOCAL_SOURCES
            .iter()
            .map(|name| root.join(name))
            .chain(global);

        for path in candidates {
            if !path.is_file() {
                continue;
            }
            let content = match std::fs::read(&path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable ignore file");
                    continue;
                }
            };
            for line in content.lines() {
                if let Err(e) = builder.add_line(Some(path.clone()), line) {
                    warn!(path = %path.display(), line, error = %e, "Skipping invalid ignore pattern");
                }
            }
            sources.push(path);
        }

        let gitignore = match builder.build() {
            Ok(gitignore) => gitignore,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Failed to compile ignore rules");
                Gitignore::empty()
            }
        };

        debug!(
            root = %root.display(),
            patterns = gitignore.num_ignores() + gitignore.num_whitelists(),
            sources = sources.len(),
            "Ignore matcher built"
        );

        Self { gitignore, sources }
    }

    /// Whether `relative` (relative to the matcher root) is ignored.
    ///
    /// `is_dir` lets directory-only patterns such as `target/` apply, so a
    /// whole subtree can be pruned at its top directory.
    pub fn matches(&self, relative: impl AsRef<Path>, is_dir: bool) -> bool {
        self.gitignore.matched(relative, is_dir).is_ignore()
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}
