//! `increment-edx-build`

use anyhow::{Context, Result};
use edx_core::ops::increment_build;

use crate::CommonArgs;

/// Bump the build counter and print the new version string.
pub fn run(args: &CommonArgs) -> Result<()> {
    let file = super::open_target(&args.target)?;
    let bump = increment_build(&file, args.dry_run)
        .with_context(|| format!("Failed to update {}", file.path().display()))?;

    if args.dry_run {
        println!("Would update version to {}", bump.display);
    } else {
        println!("Updated version to {}", bump.display);
    }
    Ok(())
}
