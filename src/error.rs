// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for imgtrim

use thiserror::Error;

/// Result type alias for imgtrim operations
pub type Result<T> = std::result::Result<T, ImgtrimError>;

/// imgtrim error types
#[derive(Error, Debug)]
pub enum ImgtrimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Name collision: cannot rename {from} to {to}, target already exists")]
    NameCollision { from: String, to: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
