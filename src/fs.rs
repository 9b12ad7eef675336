// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Filesystem access used by the renamer
//!
//! The renamer only needs three things from the host: list the regular files
//! of a directory, check whether a path exists, and rename. `OsFileSystem`
//! does this with `std::fs`; `MemoryFileSystem` keeps everything in a map.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use crate::Result;

/// Trait for the filesystem the renamer operates on
pub trait FileSystem {
    /// Names of the regular files directly inside `dir`, in listing order
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Check if any directory entry exists at `path`, dangling symlinks included
    fn exists(&self, path: &Path) -> bool;

    /// Rename `from` to `to`, replacing `to` if the host allows it
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            // Follows symlinks: a link to a file counts, a link to a directory does not
            if !path.is_file() {
                trace!("Not a regular file: {:?}", path);
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(raw) => warn!("Skipping non UTF-8 filename: {:?}", raw),
            }
        }

        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        std::fs::rename(from, to)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MemoryEntry {
    File(String),
    Dir(String),
}

impl MemoryEntry {
    fn name(&self) -> &str {
        match self {
            Self::File(name) | Self::Dir(name) => name,
        }
    }
}

/// In-memory filesystem, one flat listing per directory
///
/// Listing order is insertion order. Renames follow POSIX semantics: an
/// existing file at the target is replaced, a directory is not.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: RefCell<BTreeMap<PathBuf, Vec<MemoryEntry>>>,
    read_only: RefCell<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filesystem with one directory holding `files`
    pub fn with_files(dir: impl Into<PathBuf>, files: &[&str]) -> Self {
        let fs = Self::new();
        let dir = dir.into();
        fs.add_dir(&dir);
        for name in files {
            fs.add_file(&dir, name);
        }
        fs
    }

    /// Create an empty directory (no-op if it exists)
    pub fn add_dir(&self, dir: &Path) {
        self.dirs.borrow_mut().entry(dir.to_path_buf()).or_default();
    }

    /// Add a regular file to `dir`, creating the directory if needed
    pub fn add_file(&self, dir: &Path, name: &str) {
        self.dirs
            .borrow_mut()
            .entry(dir.to_path_buf())
            .or_default()
            .push(MemoryEntry::File(name.to_string()));
    }

    /// Add a subdirectory entry to `dir`
    pub fn add_subdir(&self, dir: &Path, name: &str) {
        let mut dirs = self.dirs.borrow_mut();
        dirs.entry(dir.to_path_buf())
            .or_default()
            .push(MemoryEntry::Dir(name.to_string()));
        dirs.entry(dir.join(name)).or_default();
    }

    /// Make renames of `path` fail with `PermissionDenied`
    pub fn deny_rename(&self, path: impl Into<PathBuf>) {
        self.read_only.borrow_mut().push(path.into());
    }

    /// Names of the regular files in `dir`, in listing order
    pub fn files(&self, dir: &Path) -> Vec<String> {
        self.dirs
            .borrow()
            .get(dir)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| match e {
                        MemoryEntry::File(name) => Some(name.clone()),
                        MemoryEntry::Dir(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn split(path: &Path) -> io::Result<(PathBuf, String)> {
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("Invalid path: {:?}", path)))?;
        Ok((parent, name.to_string()))
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("No such file or directory: {:?}", path))
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        if !self.dirs.borrow().contains_key(dir) {
            return Err(Self::not_found(dir).into());
        }
        Ok(self.files(dir))
    }

    fn exists(&self, path: &Path) -> bool {
        if self.dirs.borrow().contains_key(path) {
            return true;
        }
        match Self::split(path) {
            Ok((parent, name)) => self
                .dirs
                .borrow()
                .get(&parent)
                .is_some_and(|entries| entries.iter().any(|e| e.name() == name)),
            Err(_) => false,
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        if self.read_only.borrow().iter().any(|p| p == from) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Permission denied: {:?}", from),
            )
            .into());
        }

        let (from_dir, from_name) = Self::split(from)?;
        let (to_dir, to_name) = Self::split(to)?;

        let mut dirs = self.dirs.borrow_mut();

        let source = dirs
            .get(&from_dir)
            .and_then(|entries| entries.iter().position(|e| *e == MemoryEntry::File(from_name.clone())))
            .ok_or_else(|| Self::not_found(from))?;

        let target_entries = dirs.get(&to_dir).ok_or_else(|| Self::not_found(to))?;
        if target_entries.contains(&MemoryEntry::Dir(to_name.clone())) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Is a directory: {:?}", to),
            )
            .into());
        }

        if let Some(entries) = dirs.get_mut(&from_dir) {
            entries.remove(source);
        }
        if let Some(entries) = dirs.get_mut(&to_dir) {
            entries.retain(|e| *e != MemoryEntry::File(to_name.clone()));
            entries.push(MemoryEntry::File(to_name));
        }

        Ok(())
    }
}
