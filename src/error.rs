//! Error taxonomy for SID decoding and domain mapping.
//!
//! Every failure in this crate is one of the kinds below so that callers
//! can branch on cause without inspecting message strings.

use thiserror::Error;

/// Failure kinds surfaced by the SID codec and the mapping context.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A SID string (domain or queried) does not match the canonical
    /// `S-<revision>-<authority>-<sub-authorities...>` form.
    #[error("invalid SID format: {0}")]
    InvalidSid(String),

    /// A binary SID buffer does not follow the wire layout.
    #[error("malformed binary SID: {0}")]
    MalformedSid(&'static str),

    /// A Unix ID range whose minimum does not lie strictly below its maximum.
    #[error("invalid ID range: min ({min}) must be less than max ({max})")]
    InvalidRange {
        /// Lower bound supplied at registration.
        min: u32,
        /// Upper bound supplied at registration.
        max: u32,
    },

    /// A domain registration conflicting with an existing one, by name,
    /// by domain SID, or by range overlap.
    #[error("domain {0} already exists or its range conflicts")]
    Collision(String),

    /// A syntactically valid SID whose domain prefix has no registered binding.
    #[error("SID not found in idmap: {0}")]
    NotFound(String),

    /// A failure not attributable to caller input.
    #[error("internal idmap error: {0}")]
    Internal(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;
