//! Core library for the edX version tooling.
//!
//! - [`macros`]: scan `#define` lines and decode the version fields.
//! - [`patch`]: rule-driven rewriting of macro values (pure, no IO).
//! - [`resource`]: read and atomically replace the header on disk.
//! - [`ops`]: the increment and explicit-set operations.

pub mod macros;
pub mod ops;
pub mod patch;
/// Locating the resource header inside a repository.
pub mod paths;
pub mod resource;

pub use macros::{DecodeError, MacroSet};
pub use ops::OpError;
pub use paths::*;
pub use resource::{ResourceError, ResourceFile};
