//! Build-counter increment (wide scheme, line rewrite).

use super::OpError;
use crate::macros::MacroSet;
use crate::patch::{self, Patched, Rule};
use crate::resource::ResourceFile;
use edx_schema::{Scheme, Version, names};
use tracing::{debug, info};

/// Outcome of bumping the build counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildBump {
    /// Version decoded from the header before the bump.
    pub previous: Version,
    /// Version after the bump.
    pub version: Version,
    /// True when the build rolled over into patch.
    pub carried: bool,
    /// Display string written to `EDX_VERSION_STRING`.
    pub display: String,
    /// Hex literal written to `EDX_VERSION`.
    pub hex: String,
    /// The rewritten header.
    pub patched: Patched,
}

/// Compute the bumped header text without touching the filesystem.
///
/// Only `EDX_BUILD`, `EDX_VERSION_STRING` and `EDX_VERSION` are rewritten. On
/// a carry the new patch level shows up in the string and hex values but the
/// `EDX_PATCH` line is left as it was.
///
/// # Errors
///
/// Returns [`OpError::Decode`] if any of the four numeric macros is missing,
/// and [`OpError::Overflow`] if a build rollover would overflow the patch.
pub fn plan_increment(text: &str) -> Result<BuildBump, OpError> {
    let previous = MacroSet::scan(text).decode_version()?;
    let step = previous.next_build()?;
    let version = step.version;

    let display = Scheme::Wide.display(&version);
    let hex = Scheme::Wide.hex_literal(&version);

    let rules = [
        Rule::decimal(names::BUILD, version.build),
        Rule::quoted(names::VERSION_STRING, display.as_str()),
        Rule::hex(names::VERSION, hex.as_str()),
    ];
    let patched = patch::rewrite_lines(text, &rules)?;

    for outcome in &patched.outcomes {
        debug!(macro_name = %outcome.name, matched = outcome.matched, "Applied rule");
    }

    Ok(BuildBump {
        previous,
        version,
        carried: step.carried,
        display,
        hex,
        patched,
    })
}

/// Bump the build counter in `file`.
///
/// With `dry_run` the plan is returned but the header is not written.
///
/// # Errors
///
/// Returns [`OpError::Resource`] on IO failure and [`OpError::Decode`] if
/// the header lacks a numeric version macro; in both cases the header is
/// left untouched.
pub fn increment_build(file: &ResourceFile, dry_run: bool) -> Result<BuildBump, OpError> {
    let text = file.read()?;
    let bump = plan_increment(&text)?;

    info!(
        from = %bump.previous,
        to = %bump.version,
        carried = bump.carried,
        "Incrementing build"
    );

    if dry_run {
        info!(path = %file.path().display(), "Dry run, header not written");
    } else {
        file.replace(&bump.patched.text)?;
    }
    Ok(bump)
}
