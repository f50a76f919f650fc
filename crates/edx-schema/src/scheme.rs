//! Packing schemes for the `EDX_VERSION` hex macro and the display string.
//!
//! Two layouts are in use and they do not agree:
//!
//! | Scheme     | Used by               | Layout (bits)            | Hex digits | Zero build shown |
//! |------------|-----------------------|--------------------------|------------|------------------|
//! | [`Wide`]   | `increment-edx-build` | major 8, minor 8, patch 8, build 16 | 10 | yes |
//! | [`Narrow`] | `set-edx-version`     | major 8, minor 8, patch 8, build 8  | 8  | no  |
//!
//! Running one tool after the other rewrites `EDX_VERSION` in a different
//! layout. Keep them separate until the header has a single owner.
//!
//! [`Wide`]: Scheme::Wide
//! [`Narrow`]: Scheme::Narrow

use crate::Version;

/// A packing and display convention for [`Version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `major<<32 | minor<<24 | patch<<16 | build`, rendered as ten hex
    /// digits. The display string always has four fields.
    Wide,
    /// `major<<24 | minor<<16 | patch<<8 | (build & 0xFF)`, rendered as eight
    /// hex digits. Builds above 255 are truncated in the packed value but
    /// shown in full in the display string, which drops a zero build.
    Narrow,
}

impl Scheme {
    /// Number of hex digits in the rendered literal (excluding `0x`).
    pub const fn hex_digits(self) -> usize {
        match self {
            Self::Wide => 10,
            Self::Narrow => 8,
        }
    }

    /// Pack a version into a single integer.
    ///
    /// Only the narrow scheme masks anything (the build byte); other fields
    /// are shifted and OR-ed as-is.
    pub fn pack(self, v: &Version) -> u64 {
        let (major, minor, patch, build) = (
            u64::from(v.major),
            u64::from(v.minor),
            u64::from(v.patch),
            u64::from(v.build),
        );
        match self {
            Self::Wide => (major << 32) | (minor << 24) | (patch << 16) | build,
            Self::Narrow => (major << 24) | (minor << 16) | (patch << 8) | (build & 0xFF),
        }
    }

    /// Render the packed value as an uppercase, zero-padded `0x` literal.
    pub fn hex_literal(self, v: &Version) -> String {
        format!(
            "0x{:0width$X}",
            self.pack(v),
            width = self.hex_digits()
        )
    }

    /// Render the human-readable version string.
    pub fn display(self, v: &Version) -> String {
        match self {
            Self::Narrow if v.build == 0 => format!("{}.{}.{}", v.major, v.minor, v.patch),
            _ => v.to_string(),
        }
    }
}
