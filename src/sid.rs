//! Owned Windows Security Identifier (SID) value and its binary codec.
//!
//! The wire layout is the Windows one: byte 0 holds the revision (always
//! 1), byte 1 the sub-authority count `N`, bytes 2..8 the 48-bit
//! identifier authority in big-endian order, followed by `N` little-endian
//! 32-bit sub-authorities. A valid buffer is at least `8 + 4 * N` bytes;
//! trailing padding past that is ignored.

use core::fmt::{self, Display};
use core::str::FromStr;

use arrayvec::ArrayVec;
use parsing::{
    InvalidSidFormat, MAX_AUTHORITY, MAX_SUB_AUTHORITY_COUNT, MIN_SUB_AUTHORITY_COUNT, REVISION,
    SidComponents,
};

use crate::{Error, Result};

/// Size of the fixed SID header: revision, count, 6-byte authority.
const HEADER_LEN: usize = 8;

/// An owned, structurally valid Security Identifier.
///
/// Instances always hold an authority within 48 bits and between one and
/// 255 sub-authorities, so [`Display`] and [`Sid::to_bytes`] can never
/// produce something the parsers of this crate would refuse (except for a
/// non-1 revision, which [`Sid::to_bytes`] reports).
///
/// # Examples
/// ```rust
/// use sid_idmap::Sid;
///
/// let sid: Sid = "S-1-5-21-3623811015-3361044348-30300820-1013".parse().unwrap();
/// assert_eq!(sid.rid(), Some(1013));
/// assert_eq!(sid.to_string(), "S-1-5-21-3623811015-3361044348-30300820-1013");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sid {
    revision: u8,
    authority: u64,
    sub_authorities: ArrayVec<u32, MAX_SUB_AUTHORITY_COUNT>,
}

impl Sid {
    /// Creates a revision-1 SID from parts, validating input.
    ///
    /// Returns `None` if the authority exceeds 48 bits or the number of
    /// sub-authorities is not in `1..=255`.
    #[must_use]
    pub fn try_new(authority: u64, sub_authorities: &[u32]) -> Option<Self> {
        if authority > MAX_AUTHORITY
            || sub_authorities.len() < MIN_SUB_AUTHORITY_COUNT
            || sub_authorities.len() > MAX_SUB_AUTHORITY_COUNT
        {
            return None;
        }
        let mut subs = ArrayVec::new();
        subs.extend(sub_authorities.iter().copied());
        Some(Self {
            revision: REVISION,
            authority,
            sub_authorities: subs,
        })
    }

    /// The SID revision value.
    #[must_use]
    pub const fn revision(&self) -> u8 {
        self.revision
    }

    /// The 48-bit identifier authority value.
    #[must_use]
    pub const fn authority(&self) -> u64 {
        self.authority
    }

    /// The sub-authority values, in order.
    #[must_use]
    pub fn sub_authorities(&self) -> &[u32] {
        self.sub_authorities.as_slice()
    }

    /// The relative identifier: the final sub-authority.
    ///
    /// `None` only for a domain prefix that has been stripped down to zero
    /// sub-authorities via [`Sid::split_rid`].
    #[must_use]
    pub fn rid(&self) -> Option<u32> {
        self.sub_authorities.last().copied()
    }

    /// Splits into the domain prefix (everything but the final
    /// sub-authority) and the RID.
    #[must_use]
    pub fn split_rid(&self) -> Option<(Self, u32)> {
        let mut prefix = self.clone();
        let rid = prefix.sub_authorities.pop()?;
        Some((prefix, rid))
    }

    /// Decodes a SID from its binary representation.
    ///
    /// Bytes past the declared `8 + 4 * count` structure are ignored.
    ///
    /// # Errors
    /// [`Error::MalformedSid`] if the buffer is shorter than the header,
    /// declares more sub-authorities than it supplies, declares none at
    /// all, or carries an unsupported revision.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(Error::MalformedSid("buffer too short for SID header"))?;
        if header[0] != REVISION {
            return Err(Error::MalformedSid("unsupported SID revision"));
        }
        let count = usize::from(header[1]);
        if count < MIN_SUB_AUTHORITY_COUNT {
            return Err(Error::MalformedSid("SID declares no sub-authorities"));
        }
        let body = bytes
            .get(HEADER_LEN..HEADER_LEN + 4 * count)
            .ok_or(Error::MalformedSid(
                "declared sub-authority count exceeds buffer",
            ))?;

        // Authority is the 6 trailing bytes of the header, big-endian.
        let mut be_bytes = [0u8; 8];
        be_bytes[2..].copy_from_slice(&header[2..]);
        let authority = u64::from_be_bytes(be_bytes);

        let mut sub_authorities = ArrayVec::new();
        for chunk in body.chunks_exact(4) {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(chunk);
            sub_authorities.push(u32::from_le_bytes(raw));
        }

        Ok(Self {
            revision: REVISION,
            authority,
            sub_authorities,
        })
    }

    /// Encodes this SID into its binary representation.
    ///
    /// # Errors
    /// [`Error::MalformedSid`] if the revision is not 1 or the SID holds
    /// no sub-authority (a stripped domain prefix has no wire form).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.revision != REVISION {
            return Err(Error::MalformedSid("unsupported SID revision"));
        }
        let count = u8::try_from(self.sub_authorities.len())
            .map_err(|_| Error::MalformedSid("too many sub-authorities"))?;
        if count == 0 {
            return Err(Error::MalformedSid("SID declares no sub-authorities"));
        }

        let mut data = Vec::with_capacity(HEADER_LEN + 4 * self.sub_authorities.len());
        // The authority occupies the 6 low bytes in big-endian order; the
        // 2 high bytes are zero (authority <= 2^48 - 1) and are overwritten
        // with revision and count.
        data.extend_from_slice(&self.authority.to_be_bytes());
        data[0] = self.revision;
        data[1] = count;
        for sub_authority in &self.sub_authorities {
            data.extend_from_slice(&sub_authority.to_le_bytes());
        }
        Ok(data)
    }
}

impl FromStr for Sid {
    type Err = InvalidSidFormat;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        SidComponents::from_str(s).map(Self::from)
    }
}

impl From<SidComponents> for Sid {
    fn from(components: SidComponents) -> Self {
        Self {
            revision: components.revision,
            authority: components.authority,
            sub_authorities: components.sub_authorities,
        }
    }
}

impl Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for sub_authority in &self.sub_authorities {
            write!(f, "-{sub_authority}")?;
        }
        Ok(())
    }
}

/// Decodes a raw SID buffer into its canonical string form.
///
/// # Errors
/// [`Error::MalformedSid`] under the conditions of [`Sid::from_bytes`].
///
/// # Examples
/// ```rust
/// let bytes = [1u8, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0];
/// assert_eq!(sid_idmap::decode_sid(&bytes).unwrap(), "S-1-1-0"); // Everyone
/// ```
pub fn decode_sid(bytes: &[u8]) -> Result<String> {
    Ok(Sid::from_bytes(bytes)?.to_string())
}

/// Encodes a canonical SID string into its binary representation.
///
/// The inverse of [`decode_sid`].
///
/// # Errors
/// [`Error::MalformedSid`] if the string is not a canonical revision-1 SID.
pub fn encode_sid(sid: &str) -> Result<Vec<u8>> {
    let sid = Sid::from_str(sid).map_err(|_| Error::MalformedSid("not a canonical SID string"))?;
    sid.to_bytes()
}
