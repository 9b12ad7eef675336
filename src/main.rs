// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! imgtrim: strip trailing name segments from image files
//!
//! `imgtrim <DIR>` renames `name_suffix.jpg` to `name.jpg` for every regular
//! file in DIR and prints one `old --> new` line per rename.

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use imgtrim::config::{AppConfig, CollisionPolicy, OutputFormat};
use imgtrim::fs::OsFileSystem;
use imgtrim::{RenameReport, Renamer, Result};

/// imgtrim CLI - strip `_suffix` segments from .jpg filenames
#[derive(Parser, Debug)]
#[command(name = "imgtrim")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version)]
#[command(about = "Rename name_suffix.jpg to name.jpg for every file in a directory", long_about = None)]
struct Cli {
    /// Directory whose files are renamed (not recursive)
    dir: PathBuf,

    /// Path to configuration file (JSON format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dry run mode (show renames without performing them)
    #[arg(long)]
    dry_run: bool,

    /// What to do when the new name already exists
    #[arg(long, value_parser = ["error", "skip", "overwrite"])]
    on_collision: Option<String>,

    /// Output format for renames
    #[arg(long, value_parser = ["text", "json", "jsonl"])]
    format: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long)]
    trace: bool,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for renames
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli)?;
    debug!("Effective configuration: {:?}", config);

    let fs = OsFileSystem::new();
    let renamer = Renamer::new(&fs, config.rules.clone());

    if renamer.rules().dry_run {
        warn!("DRY RUN MODE - files will not be renamed");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&renamer, &cli.dir, config.output.format, &mut out)?;

    Ok(())
}

/// Command line flags win over the config file
fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> Result<()> {
    if cli.dry_run {
        config.rules.dry_run = true;
    }
    if let Some(ref policy) = cli.on_collision {
        config.rules.on_collision = policy.parse::<CollisionPolicy>()?;
    }
    if let Some(ref format) = cli.format {
        config.output.format = format.parse::<OutputFormat>()?;
    }
    Ok(())
}

/// Run the renamer over `dir`, reporting renames to `out` in `format`
fn run(renamer: &Renamer<'_>, dir: &Path, format: OutputFormat, out: &mut dyn Write) -> Result<RenameReport> {
    let report = renamer.run_with(dir, |op| {
        match format {
            OutputFormat::Text => writeln!(out, "{}", op)?,
            OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(op)?)?,
            OutputFormat::Json => {}
        }
        Ok(())
    })?;

    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgtrim::config::RuleConfig;
    use imgtrim::ImgtrimError;

    fn run_to_string(dir: &Path, rules: RuleConfig, format: OutputFormat) -> Result<String> {
        let fs = OsFileSystem::new();
        let renamer = Renamer::new(&fs, rules);
        let mut out = Vec::new();
        run(&renamer, dir, format, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["imgtrim", "/tmp/pics"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("/tmp/pics"));
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_directory() {
        assert!(Cli::try_parse_from(["imgtrim"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["imgtrim", "--on-collision", "clobber", "/tmp"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "imgtrim", "--dry-run", "--on-collision", "skip", "--format", "jsonl", "/tmp/pics",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        apply_overrides(&mut config, &cli).unwrap();

        assert!(config.rules.dry_run);
        assert_eq!(config.rules.on_collision, CollisionPolicy::Skip);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let cli = Cli::try_parse_from(["imgtrim", "/tmp/pics"]).unwrap();
        let mut config = AppConfig::default();
        config.rules.on_collision = CollisionPolicy::Overwrite;
        apply_overrides(&mut config, &cli).unwrap();
        assert_eq!(config.rules.on_collision, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_text_output_one_line_per_rename() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo_001.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("landscape.jpg"), b"x").unwrap();

        let output = run_to_string(dir.path(), RuleConfig::default(), OutputFormat::Text).unwrap();
        assert_eq!(output, "photo_001.jpg --> photo.jpg\n");

        let again = run_to_string(dir.path(), RuleConfig::default(), OutputFormat::Text).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn test_jsonl_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_b_c.jpg"), b"x").unwrap();

        let output = run_to_string(dir.path(), RuleConfig::default(), OutputFormat::Jsonl).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["from"], "a_b_c.jpg");
        assert_eq!(line["to"], "a.jpg");
    }

    #[test]
    fn test_json_output_is_full_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a_1.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"x").unwrap();

        let output = run_to_string(dir.path(), RuleConfig::default(), OutputFormat::Json).unwrap();
        let report: RenameReport = serde_json::from_str(&output).unwrap();
        assert_eq!(report.renamed.len(), 1);
        assert_eq!(report.unchanged, vec!["b.jpg"]);
    }

    #[test]
    fn test_dry_run_prints_but_keeps_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("photo_001.jpg"), b"x").unwrap();

        let rules = RuleConfig {
            dry_run: true,
            ..Default::default()
        };
        let output = run_to_string(dir.path(), rules, OutputFormat::Text).unwrap();

        assert_eq!(output, "photo_001.jpg --> photo.jpg\n");
        assert!(dir.path().join("photo_001.jpg").exists());
        assert!(!dir.path().join("photo.jpg").exists());
    }

    #[test]
    fn test_missing_directory_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFileSystem::new();
        let renamer = Renamer::new(&fs, RuleConfig::default());
        let mut out = Vec::new();

        let err = run(&renamer, &dir.path().join("missing"), OutputFormat::Text, &mut out).unwrap_err();
        assert!(matches!(err, ImgtrimError::FileSystem(ref e) if e.kind() == io::ErrorKind::NotFound));
        assert!(out.is_empty());
    }
}
