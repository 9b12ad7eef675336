// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! imgtrim: strip trailing name segments from image files
//!
//! Renames every regular file in a directory to its normalized name,
//! turning `name_suffix.jpg` into `name.jpg`.

pub mod config;
pub mod error;
pub mod fs;
pub mod naming;
pub mod renamer;

pub use config::AppConfig;
pub use error::{ImgtrimError, Result};
pub use renamer::{RenameOp, RenameReport, Renamer};
