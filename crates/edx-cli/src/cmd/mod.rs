//! Command implementations, one per binary.

pub mod increment;
pub mod set;

use anyhow::Result;
use edx_core::ResourceFile;

use crate::TargetArgs;

/// Resolve and open the header named by `target`.
fn open_target(target: &TargetArgs) -> Result<ResourceFile> {
    let path = target.resolve()?;
    tracing::debug!(path = %path.display(), "Resolved resource header");
    Ok(ResourceFile::open(path)?)
}
