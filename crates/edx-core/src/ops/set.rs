//! Explicit release version (narrow scheme, value splice).

use super::OpError;
use crate::patch::{self, Patched, Rule};
use crate::resource::ResourceFile;
use edx_schema::{Scheme, Version, names};
use tracing::{debug, info, warn};

/// Outcome of setting an explicit version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// The version that was set.
    pub version: Version,
    /// Display string written to `EDX_VERSION_STRING`.
    pub display: String,
    /// Hex literal written to `EDX_VERSION`.
    pub hex: String,
    /// The rewritten header.
    pub patched: Patched,
}

impl Release {
    /// Numeric macros that had no definition and were appended.
    pub fn appended(&self) -> impl Iterator<Item = &str> {
        self.patched
            .outcomes
            .iter()
            .filter(|o| o.appended)
            .map(|o| o.name.as_str())
    }

    /// Macros that were neither found nor appended.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.patched
            .outcomes
            .iter()
            .filter(|o| o.skipped())
            .map(|o| o.name.as_str())
    }
}

/// The six substitutions for `version`, in application order.
///
/// Numeric macros are appended when missing; the string and hex macros are
/// only updated in place.
pub fn release_rules(version: &Version) -> Vec<Rule> {
    vec![
        Rule::decimal(names::MAJOR, version.major).or_append(),
        Rule::decimal(names::MINOR, version.minor).or_append(),
        Rule::decimal(names::PATCH, version.patch).or_append(),
        Rule::decimal(names::BUILD, version.build).or_append(),
        Rule::quoted(names::VERSION_STRING, Scheme::Narrow.display(version)),
        Rule::hex(names::VERSION, Scheme::Narrow.hex_literal(version)),
    ]
}

/// Compute the header text for `version` without touching the filesystem.
///
/// # Errors
///
/// Returns [`OpError::Patch`] if a rule cannot be compiled.
pub fn plan_release(text: &str, version: &Version) -> Result<Release, OpError> {
    let patched = patch::splice_values(text, &release_rules(version))?;

    for outcome in &patched.outcomes {
        debug!(macro_name = %outcome.name, matched = outcome.matched, appended = outcome.appended, "Applied rule");
    }

    Ok(Release {
        version: *version,
        display: Scheme::Narrow.display(version),
        hex: Scheme::Narrow.hex_literal(version),
        patched,
    })
}

/// Set `version` in `file`.
///
/// With `dry_run` the plan is returned but the header is not written.
///
/// # Errors
///
/// Returns [`OpError::Resource`] if the header cannot be read or written.
pub fn set_release(file: &ResourceFile, version: &Version, dry_run: bool) -> Result<Release, OpError> {
    let text = file.read()?;
    let release = plan_release(&text, version)?;

    for name in release.appended() {
        info!(macro_name = name, "Appended missing definition");
    }
    for name in release.skipped() {
        warn!(macro_name = name, "No single-line definition found, left unchanged");
    }

    if dry_run {
        info!(path = %file.path().display(), "Dry run, header not written");
    } else {
        file.replace(&release.patched.text)?;
    }
    Ok(release)
}
