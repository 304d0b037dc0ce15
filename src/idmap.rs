//! Domain-scoped deterministic SID to Unix ID mapping.
//!
//! A [`IdmapContext`] holds domain bindings, each reserving an inclusive
//! window of Unix IDs for one domain's RID space. Resolution is pure
//! arithmetic: the RID is reduced modulo the window width and offset from
//! the window minimum, so identical inputs always yield identical IDs,
//! across calls and across process restarts. Two RIDs exactly one window
//! width apart alias to the same Unix ID; callers needing guaranteed
//! uniqueness must size ranges to exceed their domains' maximum RID.

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;

use crate::sid::Sid;
use crate::{Error, Result};

/// Inclusive window of Unix IDs reserved for one domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdRange {
    /// Lowest Unix ID of the window.
    pub min: u32,
    /// Highest Unix ID of the window.
    pub max: u32,
}

impl IdRange {
    /// Creates a range without validating it; [`IdmapContext::add_domain`]
    /// rejects non-increasing ranges.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Number of IDs in the window. At least 2 for a valid range, and
    /// computed in `u64` so the full `u32` window is representable.
    const fn span(self) -> u64 {
        (self.max as u64) - (self.min as u64) + 1
    }

    /// Inclusive overlap: windows that merely touch still share an ID.
    const fn overlaps(self, other: Self) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Deterministically folds a RID into the window.
    fn map_rid(self, rid: u32) -> Result<u32> {
        let unix_id = u64::from(self.min) + u64::from(rid) % self.span();
        u32::try_from(unix_id).map_err(|_| Error::Internal("mapped ID exceeds u32"))
    }
}

/// Configuration of one domain's ID mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// Short name of the domain, e.g. `EXAMPLE`.
    pub domain_name: String,
    /// SID of the domain itself (no trailing RID), e.g.
    /// `S-1-5-21-3623811015-3361044348-30300820`.
    pub domain_sid: String,
    /// Unix ID window reserved for the domain.
    pub id_range: IdRange,
}

impl DomainConfig {
    /// Convenience constructor.
    pub fn new(domain_name: impl Into<String>, domain_sid: impl Into<String>, id_range: IdRange) -> Self {
        Self {
            domain_name: domain_name.into(),
            domain_sid: domain_sid.into(),
            id_range,
        }
    }
}

/// Registry of domain bindings plus the resolution algorithm.
///
/// Mutation goes through `&mut self` and resolution through `&self`, so
/// the single-writer / multiple-reader discipline is enforced by the
/// borrow checker; wrap the context in a lock to share it across threads
/// during registration.
///
/// # Examples
/// ```rust
/// use sid_idmap::{DomainConfig, IdRange, IdmapContext};
///
/// let ctx = IdmapContext::with_domain(DomainConfig::new(
///     "EXAMPLE",
///     "S-1-5-21-3623811015-3361044348-30300820",
///     IdRange::new(10_000, 20_000),
/// ))?;
/// let uid = ctx.sid_to_unix_id("S-1-5-21-3623811015-3361044348-30300820-1013")?;
/// assert_eq!(uid, 11_013);
/// # Ok::<(), sid_idmap::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct IdmapContext {
    /// Keyed by the canonical string of the domain SID.
    domains: BTreeMap<String, DomainConfig>,
    closed: bool,
}

impl IdmapContext {
    /// Creates an empty mapping context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mapping context with one preconfigured domain.
    ///
    /// # Errors
    /// Same conditions as [`IdmapContext::add_domain`].
    pub fn with_domain(config: DomainConfig) -> Result<Self> {
        let mut ctx = Self::new();
        ctx.add_domain(config)?;
        Ok(ctx)
    }

    /// Registers a domain binding.
    ///
    /// On failure the registry is left unchanged.
    ///
    /// # Errors
    /// - [`Error::Internal`] if the context has been closed.
    /// - [`Error::InvalidRange`] unless `min < max` strictly.
    /// - [`Error::InvalidSid`] if the domain SID is not canonical.
    /// - [`Error::Collision`] if the domain name, the domain SID, or the
    ///   ID range conflicts with an existing registration. Ranges are
    ///   inclusive windows, so touching bounds count as a conflict.
    pub fn add_domain(&mut self, config: DomainConfig) -> Result<()> {
        if self.closed {
            return Err(Error::Internal("context is closed"));
        }
        let IdRange { min, max } = config.id_range;
        if min >= max {
            return Err(Error::InvalidRange { min, max });
        }
        let domain_sid = Sid::from_str(&config.domain_sid)
            .map_err(|_| Error::InvalidSid(config.domain_sid.clone()))?;
        let key = domain_sid.to_string();

        if self.domains.contains_key(&key) {
            return Err(Error::Collision(config.domain_name));
        }
        for existing in self.domains.values() {
            if existing.domain_name == config.domain_name
                || existing.id_range.overlaps(config.id_range)
            {
                return Err(Error::Collision(config.domain_name));
            }
        }

        debug!(
            domain = %config.domain_name,
            sid = %key,
            range_min = min,
            range_max = max,
            "registered domain"
        );
        self.domains.insert(key, config);
        Ok(())
    }

    /// Resolves a SID string to a Unix UID or GID.
    ///
    /// Pure and side-effect-free: the result depends only on the matched
    /// binding and the RID.
    ///
    /// # Errors
    /// - [`Error::Internal`] if the context has been closed.
    /// - [`Error::InvalidSid`] if `sid` is not a canonical SID string.
    /// - [`Error::NotFound`] if no registered domain covers its prefix.
    pub fn sid_to_unix_id(&self, sid: &str) -> Result<u32> {
        if self.closed {
            return Err(Error::Internal("context is closed"));
        }
        let parsed = Sid::from_str(sid).map_err(|_| Error::InvalidSid(sid.to_owned()))?;
        let (prefix, rid) = parsed
            .split_rid()
            .ok_or_else(|| Error::InvalidSid(sid.to_owned()))?;

        let config = self
            .domains
            .get(&prefix.to_string())
            .ok_or_else(|| Error::NotFound(sid.to_owned()))?;
        let unix_id = config.id_range.map_rid(rid)?;
        debug!(sid = %sid, domain = %config.domain_name, rid, unix_id, "mapped SID");
        Ok(unix_id)
    }

    /// Number of registered domains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Whether the registry holds no domains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Releases all bindings. Safe to call any number of times; calls
    /// after the first are no-ops. Subsequent registration or resolution
    /// attempts report [`Error::Internal`].
    pub fn close(&mut self) {
        self.domains.clear();
        self.closed = true;
    }
}
