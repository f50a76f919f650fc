//! The four-field edX version and release-string parsing.

use std::fmt;
use std::str::FromStr;

/// Largest build number the increment driver stores before rolling over.
pub const BUILD_MAX: u32 = 0xFFFF;

/// A four-field version: `major.minor.patch.build`.
///
/// The struct itself carries no width limits; each [`Scheme`](crate::Scheme)
/// decides how the fields are packed and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    /// Major release number.
    pub major: u32,
    /// Minor release number.
    pub minor: u32,
    /// Patch level.
    pub patch: u32,
    /// Build counter.
    pub build: u32,
}

/// Errors produced while parsing a release string such as `v1.2.3`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseParseError {
    /// The string did not split into three or four dot-separated fields.
    #[error("Version must be X.Y.Z or X.Y.Z.W, got: {input}")]
    Arity {
        /// The rejected input, as given.
        input: String,
        /// Number of fields found.
        fields: usize,
    },

    /// One of the fields is not a non-negative integer.
    #[error("Invalid {field} field '{value}' in version {input}")]
    Field {
        /// The rejected input, as given.
        input: String,
        /// Which field failed (`major`, `minor`, `patch`, `build`).
        field: &'static str,
        /// The offending text.
        value: String,
    },
}

/// The build counter rolled over but patch has no room for the carry.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Cannot roll build over into patch: EDX_PATCH {patch} is at its maximum")]
pub struct BuildOverflow {
    /// Patch level found in the header.
    pub patch: u32,
}

/// Result of bumping the build counter with [`Version::next_build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStep {
    /// The version after the bump.
    pub version: Version,
    /// True when the build counter rolled over into patch.
    pub carried: bool,
}

impl Version {
    /// Field names in packing order.
    pub const FIELDS: [&'static str; 4] = ["major", "minor", "patch", "build"];

    /// Create a version from its four fields.
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Parse a release string of the form `[v]X.Y.Z` or `[v]X.Y.Z.W`.
    ///
    /// Surrounding whitespace and any number of leading `v` characters are
    /// ignored. A missing fourth field means a build of zero.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseParseError::Arity`] unless there are exactly three or
    /// four fields, and [`ReleaseParseError::Field`] when a field is not a
    /// non-negative integer that fits in a `u32`.
    pub fn parse_release(input: &str) -> Result<Self, ReleaseParseError> {
        let trimmed = input.trim().trim_start_matches('v');
        let parts: Vec<&str> = trimmed.split('.').collect();

        if !(3..=4).contains(&parts.len()) {
            return Err(ReleaseParseError::Arity {
                input: input.to_string(),
                fields: parts.len(),
            });
        }

        let mut fields = [0u32; 4];
        for (slot, (name, part)) in fields.iter_mut().zip(Self::FIELDS.iter().zip(&parts)) {
            *slot = parse_field(part).ok_or_else(|| ReleaseParseError::Field {
                input: input.to_string(),
                field: *name,
                value: (*part).to_string(),
            })?;
        }

        let [major, minor, patch, build] = fields;
        Ok(Self::new(major, minor, patch, build))
    }

    /// Bump the build counter by one.
    ///
    /// A build that would exceed [`BUILD_MAX`] wraps to zero and carries one
    /// into patch. Nothing carries further into minor.
    ///
    /// # Errors
    ///
    /// Returns [`BuildOverflow`] when the carry would push patch past
    /// `u32::MAX`.
    pub fn next_build(self) -> Result<BuildStep, BuildOverflow> {
        if let Some(build) = self.build.checked_add(1).filter(|b| *b <= BUILD_MAX) {
            return Ok(BuildStep {
                version: Self { build, ..self },
                carried: false,
            });
        }

        let patch = self
            .patch
            .checked_add(1)
            .ok_or(BuildOverflow { patch: self.patch })?;
        Ok(BuildStep {
            version: Self {
                build: 0,
                patch,
                ..self
            },
            carried: true,
        })
    }
}

/// Decimal digits only; no signs, no whitespace inside the field.
fn parse_field(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for Version {
    type Err = ReleaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_release(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}
