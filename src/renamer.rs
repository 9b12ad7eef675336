// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! One-shot bulk rename of a directory
//!
//! Every regular file directly inside the directory is given its normalized
//! name (see [`crate::naming`]). Files are visited once, in listing order,
//! and each one ends up renamed, unchanged, skipped or ignored. A failure
//! stops the pass; renames already done stay done.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{CollisionPolicy, RuleConfig};
use crate::fs::FileSystem;
use crate::naming::{is_normalized, normalized_name};
use crate::{ImgtrimError, Result};

/// A single rename within one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOp {
    pub from: String,
    pub to: String,
}

impl fmt::Display for RenameOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.from, self.to)
    }
}

/// A rename left out because its target was taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRename {
    pub from: String,
    pub to: String,
    pub reason: String,
}

/// Outcome of one pass over a directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    /// Renames performed (or, for a dry run, planned), in order
    pub renamed: Vec<RenameOp>,
    /// Files that already had their normalized name
    pub unchanged: Vec<String>,
    /// Renames not performed under the `skip` collision policy
    pub skipped: Vec<SkippedRename>,
    /// Hidden files left alone because of `skip_hidden`
    pub ignored: Vec<String>,
    pub dry_run: bool,
}

impl RenameReport {
    /// Number of files visited
    pub fn total(&self) -> usize {
        self.renamed.len() + self.unchanged.len() + self.skipped.len() + self.ignored.len()
    }
}

/// Renames the files of a directory on a [`FileSystem`]
pub struct Renamer<'a> {
    fs: &'a dyn FileSystem,
    rules: RuleConfig,
}

impl<'a> Renamer<'a> {
    pub fn new(fs: &'a dyn FileSystem, rules: RuleConfig) -> Self {
        Self { fs, rules }
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Work out what a pass would do without touching the filesystem
    pub fn plan(&self, dir: &Path) -> Result<RenameReport> {
        self.pass(dir, true, &mut |_| Ok(()))
    }

    /// Rename every file in `dir` that is not already normalized
    pub fn run(&self, dir: &Path) -> Result<RenameReport> {
        self.run_with(dir, |_| Ok(()))
    }

    /// Like [`Renamer::run`], calling `on_rename` right before each rename.
    ///
    /// Honors `dry_run` from the rules, in which case `on_rename` still sees
    /// every planned rename.
    pub fn run_with<F>(&self, dir: &Path, mut on_rename: F) -> Result<RenameReport>
    where
        F: FnMut(&RenameOp) -> Result<()>,
    {
        self.pass(dir, self.rules.dry_run, &mut on_rename)
    }

    fn pass(
        &self,
        dir: &Path,
        dry_run: bool,
        on_rename: &mut dyn FnMut(&RenameOp) -> Result<()>,
    ) -> Result<RenameReport> {
        let files = self.fs.list_files(dir)?;
        info!("Found {} files in {:?}", files.len(), dir);

        let mut report = RenameReport {
            dry_run,
            ..Default::default()
        };

        // Names this pass has created or vacated, so a dry run sees the
        // directory as it would be at each step
        let mut created: HashSet<String> = HashSet::new();
        let mut vacated: HashSet<String> = HashSet::new();

        for name in files {
            if self.rules.skip_hidden && name.starts_with('.') {
                debug!("Ignoring hidden file: {}", name);
                report.ignored.push(name);
                continue;
            }

            if is_normalized(&name) {
                debug!("Already normalized: {}", name);
                report.unchanged.push(name);
                continue;
            }

            let to = normalized_name(&name);
            let op = RenameOp { from: name, to };
            let target = dir.join(&op.to);

            let taken = created.contains(&op.to)
                || (!vacated.contains(&op.to) && self.fs.exists(&target));

            if taken {
                match self.rules.on_collision {
                    CollisionPolicy::Error => {
                        return Err(ImgtrimError::NameCollision {
                            from: op.from,
                            to: op.to,
                        });
                    }
                    CollisionPolicy::Skip => {
                        warn!(
                            "Skipping {}: {} already exists (on_collision = {})",
                            op.from, op.to, self.rules.on_collision
                        );
                        report.skipped.push(SkippedRename {
                            from: op.from,
                            to: op.to,
                            reason: "target already exists".to_string(),
                        });
                        continue;
                    }
                    CollisionPolicy::Overwrite => {
                        warn!(
                            "Overwriting existing {} with {} (on_collision = {})",
                            op.to,
                            op.from,
                            self.rules.on_collision.as_str()
                        );
                    }
                }
            }

            on_rename(&op)?;

            if !dry_run {
                self.fs.rename(&dir.join(&op.from), &target)?;
            }
            debug!("Renamed {}", op);

            vacated.insert(op.from.clone());
            vacated.remove(&op.to);
            created.remove(&op.from);
            created.insert(op.to.clone());
            report.renamed.push(op);
        }

        info!(
            "{}{} renamed, {} unchanged, {} skipped",
            if dry_run { "DRY RUN: " } else { "" },
            report.renamed.len(),
            report.unchanged.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}
