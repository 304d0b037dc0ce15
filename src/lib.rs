//! # Offline Active Directory SID to Unix ID mapping
//!
//! Deterministic, per-domain mapping of Windows **SIDs** to Unix numeric
//! identifiers (UID/GID), computed without contacting a directory server.
//! The crate provides:
//! - [`Sid`]: an owned, validated Security Identifier with string and
//!   binary codecs ([`decode_sid`] / [`encode_sid`] for the raw wire
//!   form).
//! - [`IdmapContext`]: a registry of domain bindings ([`DomainConfig`]),
//!   each reserving an inclusive [`IdRange`] of Unix IDs, plus the
//!   resolution algorithm `min + (RID mod range width)`.
//! - [`Error`]: a typed failure taxonomy callers can branch on.
//!
//! ## Overview
//! - **Deterministic**: the same SID against the same binding always
//!   yields the same Unix ID, across calls and restarts. RIDs exactly one
//!   range width apart alias to the same ID by design; size ranges beyond
//!   the domain's maximum RID if uniqueness is required.
//! - **Offline**: no LDAP, no Kerberos, no I/O. Every operation is pure,
//!   CPU-bound, and bounded by input size.
//! - **No panics**: all failures are returned as [`Error`] values.
//!
//! ## Examples
//! ### Map a domain user to a UID
//! ```rust
//! use sid_idmap::{DomainConfig, IdRange, IdmapContext};
//!
//! let ctx = IdmapContext::with_domain(DomainConfig::new(
//!     "EXAMPLE",
//!     "S-1-5-21-3623811015-3361044348-30300820",
//!     IdRange::new(10_000, 20_000),
//! ))?;
//! assert_eq!(
//!     ctx.sid_to_unix_id("S-1-5-21-3623811015-3361044348-30300820-1013")?,
//!     11_013,
//! );
//! # Ok::<(), sid_idmap::Error>(())
//! ```
//!
//! ### Decode a binary SID
//! ```rust
//! let raw = [1u8, 1, 0, 0, 0, 0, 0, 5, 18, 0, 0, 0];
//! assert_eq!(sid_idmap::decode_sid(&raw)?, "S-1-5-18"); // Local System
//! # Ok::<(), sid_idmap::Error>(())
//! ```

#![warn(missing_docs)]

mod error;
mod idmap;
mod sid;

pub use error::{Error, Result};
pub use idmap::{DomainConfig, IdRange, IdmapContext};
pub use sid::{Sid, decode_sid, encode_sid};

/// Error type returned when parsing a SID string fails due to an invalid format.
pub use parsing::InvalidSidFormat;
