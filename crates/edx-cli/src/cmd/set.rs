//! `set-edx-version`

use anyhow::{Context, Result};
use edx_core::ops::set_release;
use edx_schema::Version;

use crate::CommonArgs;

/// Write `version` into the header and print the string and hex forms.
pub fn run(version: &Version, args: &CommonArgs) -> Result<()> {
    let file = super::open_target(&args.target)?;
    let release = set_release(&file, version, args.dry_run)
        .with_context(|| format!("Failed to update {}", file.path().display()))?;

    let verb = if args.dry_run { "Would update" } else { "Updated" };
    println!(
        "{verb} resource.h version to {} ({})",
        release.display, release.hex
    );
    Ok(())
}
