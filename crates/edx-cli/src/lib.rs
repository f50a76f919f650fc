//! edX version tooling
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Two release helpers that edit the version macros in
//! `edX/config/resource.h`:
//!
//! - `increment-edx-build` bumps `EDX_BUILD` and refreshes the derived
//!   `EDX_VERSION_STRING` / `EDX_VERSION` macros (wide 8/8/8/16 packing).
//! - `set-edx-version X.Y.Z[.W]` writes all four numeric macros and the
//!   derived ones (narrow 8/8/8/8 packing).
//!
//! # Locating the header
//!
//! ```text
//! --file <PATH>   use this header as-is
//! --root <DIR>    use <DIR>/edX/config/resource.h
//! (neither)       walk up from the current directory to the first
//!                 ancestor containing edX/config/resource.h, then
//!                 do the same from the directory holding the binary
//! ```

pub mod cmd;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use edx_schema::Version;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Where the resource header lives.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Path to resource.h (skips repository discovery)
    #[arg(long, value_name = "PATH", conflicts_with = "root")]
    pub file: Option<PathBuf>,

    /// Repository root containing edX/config/resource.h
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl TargetArgs {
    /// Resolve the header path against the current directory, then the
    /// running binary's location.
    pub fn resolve(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let exe = std::env::current_exe().ok();
        Ok(edx_core::resolve_target(
            self.file.as_deref(),
            self.root.as_deref(),
            &cwd,
            exe.as_deref(),
        ))
    }
}

/// Flags shared by both tools.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Show what would change without writing the header
    #[arg(long)]
    pub dry_run: bool,

    /// Log each step to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Parser)]
#[command(name = "increment-edx-build")]
#[command(version, about = "Increment the build number in edX/config/resource.h")]
pub struct IncrementCli {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Parser)]
#[command(name = "set-edx-version")]
#[command(version, about = "Update edX/config/resource.h version macros to match a release")]
pub struct SetCli {
    /// Release version, optionally prefixed with 'v' (e.g. 1.2.3 or v1.2.3.4)
    #[arg(value_name = "X.Y.Z[.W]", value_parser = Version::parse_release)]
    pub release: Version,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or everything from
/// `debug` up with `--verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
