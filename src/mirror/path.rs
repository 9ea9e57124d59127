// src/mirror/path.rs
// =============================================================================
// This module translates URL paths into local file paths and writes files.
//
// Layout:
//   https://site.example/a/b/image.png  ->  <output root>/a/b/image.png
//
// The URL path is split on '/', each segment is percent-decoded, and the
// segments are joined under the output root in the same order. Segments
// that could climb out of the output root ("..", ".", or anything that
// still contains a separator after decoding) are rejected.
//
// Directories are created one level at a time with mode 0750 on Unix
// (owner and group get rwx, everyone else gets nothing). A directory that
// already exists is fine; any other error is reported to the caller.
//
// Rust concepts:
// - PathBuf vs &Path: owned vs borrowed filesystem paths (like String/&str)
// - thiserror: derive Display/Error for our own error enum
// - #[cfg(unix)]: code that only compiles on Unix-like systems
// =============================================================================

use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

// rwxr-x--- : owner/group may enter and list, no world access
#[cfg(unix)]
const DIR_MODE: u32 = 0o750;

// Everything that can go wrong while mirroring a file to disk
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A URL path segment would escape the output root
    #[error("unsafe path segment '{segment}' in {url_path}")]
    UnsafeSegment { url_path: String, segment: String },

    /// Creating a directory failed for a reason other than "already exists"
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Writing the response body failed
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

// The local directory under which the mirrored site lives
#[derive(Debug, Clone)]
pub struct OutputRoot {
    root: PathBuf,
}

impl OutputRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates the output root if it is missing.
    ///
    /// Only the root itself is created (not its parents). An existing
    /// directory is accepted; an existing non-directory is an error.
    pub fn ensure_exists(&self) -> Result<(), MirrorError> {
        create_dir(&self.root)
    }

    /// Converts a URL path into a path relative to the output root.
    ///
    /// Examples:
    ///   "/x/y/z.jpg"        -> "x/y/z.jpg"
    ///   "/a%20b/c.png"      -> "a b/c.png"
    ///   "/"                 -> ""   (the root itself)
    ///   "/../etc/passwd"    -> error (never produced by the url crate,
    ///                          but "%2e%2e" and "%2F" can be)
    pub fn relative_path(url_path: &str) -> Result<PathBuf, MirrorError> {
        let mut relative = PathBuf::new();

        for raw in url_path.split('/').filter(|s| !s.is_empty()) {
            // Keep the raw segment if it isn't valid UTF-8 once decoded
            let segment = urlencoding::decode(raw)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string());

            if !is_safe_segment(&segment) {
                return Err(MirrorError::UnsafeSegment {
                    url_path: url_path.to_string(),
                    segment,
                });
            }

            relative.push(segment);
        }

        Ok(relative)
    }

    /// Where the resource at `url_path` lives (or would live) on disk.
    pub fn local_path(&self, url_path: &str) -> Result<PathBuf, MirrorError> {
        Ok(self.root.join(Self::relative_path(url_path)?))
    }

    /// The dedup gate: true if something already exists at the mirrored path.
    pub fn is_downloaded(&self, url_path: &str) -> Result<bool, MirrorError> {
        Ok(self.local_path(url_path)?.exists())
    }

    /// Creates every directory of `relative` under the output root,
    /// one segment at a time.
    pub fn ensure_dir(&self, relative: &Path) -> Result<(), MirrorError> {
        let mut rebuilt = self.root.clone();

        for component in relative.components() {
            // relative_path() only ever produces Normal components
            if let Component::Normal(segment) = component {
                rebuilt.push(segment);
                create_dir(&rebuilt)?;
            }
        }

        Ok(())
    }

    /// Writes `body` to the mirrored location of `url_path`, creating
    /// parent directories first. Returns the path that was written.
    ///
    /// A failed write may leave a truncated file behind.
    pub fn save(&self, url_path: &str, body: &[u8]) -> Result<PathBuf, MirrorError> {
        let relative = Self::relative_path(url_path)?;

        if let Some(parent) = relative.parent() {
            self.ensure_dir(parent)?;
        }

        let path = self.root.join(&relative);
        fs::write(&path, body).map_err(|source| MirrorError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

fn is_safe_segment(segment: &str) -> bool {
    segment != "."
        && segment != ".."
        && !segment.contains('/')
        && !segment.contains('\\')
        && !segment.contains('\0')
}

// Creates a single directory, treating "already exists as a directory" as success
fn create_dir(path: &Path) -> Result<(), MirrorError> {
    let mut builder = DirBuilder::new();

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    match builder.create(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(MirrorError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not fs::create_dir_all?
//    - create_dir_all uses default permissions for every level
//    - We want each level created with 0750, so we walk the path ourselves
//    - It also lets us report exactly which directory failed
//
// 2. What does `Err(e) if ... => Ok(())` mean?
//    - It's a match guard: the arm only matches when the condition is true
//    - Here: "an error, but only the harmless already-exists kind"
//
// 3. Why percent-decode segments?
//    - URLs escape spaces and other characters: "a%20b.png"
//    - The file on disk should be called "a b.png", like a browser would save it
// -----------------------------------------------------------------------------
