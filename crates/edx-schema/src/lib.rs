//! Shared version types for the edX resource header tooling.
//!
//! The header `edX/config/resource.h` carries the file-format version as a
//! handful of preprocessor macros. This crate owns the value side of those
//! macros: the [`Version`] tuple, release-string parsing, and the two
//! [`Scheme`]s used to pack it into `EDX_VERSION`.

pub mod scheme;
pub mod version;

// Re-exports
pub use scheme::Scheme;
pub use version::{BUILD_MAX, BuildOverflow, BuildStep, ReleaseParseError, Version};

/// Macro names the tooling reads and writes.
pub mod names {
    /// Major version number macro.
    pub const MAJOR: &str = "EDX_MAJOR";
    /// Minor version number macro.
    pub const MINOR: &str = "EDX_MINOR";
    /// Patch level macro.
    pub const PATCH: &str = "EDX_PATCH";
    /// Build counter macro.
    pub const BUILD: &str = "EDX_BUILD";
    /// Quoted display string macro.
    pub const VERSION_STRING: &str = "EDX_VERSION_STRING";
    /// Packed hex version macro.
    pub const VERSION: &str = "EDX_VERSION";

    /// The four numeric fields, in `Version` field order.
    pub const NUMERIC: [&str; 4] = [MAJOR, MINOR, PATCH, BUILD];
}

/// Location of the resource header relative to the repository root.
pub const RESOURCE_HEADER: &str = "edX/config/resource.h";
