//! Filesystem guards for the tool layer
//!
//! ```text
//!   model-supplied path ──► PathSandbox::resolve ──► absolute path under root
//!                                  │
//!                                  └─ absolute / empty ─► InvalidPath
//!                                  └─ escapes via ".." ─► PathEscape
//!                                  └─ symlink leads out ─► PathEscape
//!
//!   scanned directory ──► IgnoreMatcher::build(dir, GlobalExcludes) ──► matches(rel, is_dir)
//!        .gitignore → .git/info/exclude → global excludes (last match wins)
//! ```

pub mod gitignore;
pub mod path;

pub use gitignore::{GlobalExcludes, IgnoreMatcher};
pub use path::PathSandbox;
