//! The two header operations.
//!
//! Each operation is split into a pure planning step over the header text
//! and a thin wrapper that reads the file, plans, and writes the result back
//! once. A failed plan never reaches the write.

pub mod increment;
pub mod set;

use crate::macros::DecodeError;
use crate::patch::PatchError;
use crate::resource::ResourceError;
use edx_schema::BuildOverflow;
use thiserror::Error;

pub use increment::{BuildBump, increment_build, plan_increment};
pub use set::{Release, plan_release, release_rules, set_release};

/// Errors produced by a header operation.
#[derive(Error, Debug)]
pub enum OpError {
    /// The header could not be read or written.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The header lacks version fields the operation needs.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The build counter cannot be bumped any further.
    #[error(transparent)]
    Overflow(#[from] BuildOverflow),

    /// A substitution rule could not be compiled.
    #[error(transparent)]
    Patch(#[from] PatchError),
}
