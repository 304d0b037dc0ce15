//! Canonical SID string parsing for the `sid-idmap` project.
//!
//! A SID string looks like `S-1-5-21-3623811015-3361044348-30300820-1013`:
//! revision, 48-bit identifier authority, then one or more 32-bit
//! sub-authorities, all unsigned decimal. This crate turns such strings
//! into [`SidComponents`] and back; everything richer (binary codec,
//! domain mapping) lives in the `sid-idmap` crate.

use core::fmt::{self, Display};
use core::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// A SID carries at least one sub-authority.
pub const MIN_SUB_AUTHORITY_COUNT: usize = 1;

/// The sub-authority count is stored in a single byte on the wire.
pub const MAX_SUB_AUTHORITY_COUNT: usize = 255;

/// The identifier authority is a 48-bit value.
pub const MAX_AUTHORITY: u64 = (1 << 48) - 1;

/// The only SID revision in use.
pub const REVISION: u8 = 1;

/// Decomposition of a canonical SID string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SidComponents {
    /// The SID revision value, generally 1.
    pub revision: u8,
    /// The SID identifier authority value (at most 48 bits).
    pub authority: u64,
    /// The SID sub-authority values.
    pub sub_authorities: ArrayVec<u32, MAX_SUB_AUTHORITY_COUNT>,
}

/// Error type returned when parsing a SID string fails due to an invalid format.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid format for SID")]
pub struct InvalidSidFormat;

/// Unsigned decimal with no sign, whitespace, or radix prefix.
fn parse_decimal<T: FromStr>(part: &str) -> Result<T, InvalidSidFormat> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidSidFormat);
    }
    part.parse().map_err(|_| InvalidSidFormat)
}

impl FromStr for SidComponents {
    type Err = InvalidSidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        if !parts
            .next()
            .map(|head| head.eq_ignore_ascii_case("s"))
            .unwrap_or(false)
        {
            return Err(InvalidSidFormat);
        }
        let revision = parse_decimal::<u8>(parts.next().ok_or(InvalidSidFormat)?)?;
        let authority = parse_decimal::<u64>(parts.next().ok_or(InvalidSidFormat)?)?;
        if authority > MAX_AUTHORITY {
            return Err(InvalidSidFormat);
        }

        let mut sub_authorities = ArrayVec::new();
        for part in parts {
            let sub_authority = parse_decimal::<u32>(part)?;
            sub_authorities
                .try_push(sub_authority)
                .map_err(|_| InvalidSidFormat)?;
        }
        if sub_authorities.len() < MIN_SUB_AUTHORITY_COUNT {
            return Err(InvalidSidFormat);
        }

        Ok(Self {
            revision,
            authority,
            sub_authorities,
        })
    }
}

impl Display for SidComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.authority)?;
        for sub_authority in &self.sub_authorities {
            write!(f, "-{sub_authority}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_domain_sid() {
        let sid: SidComponents = "S-1-5-21-3623811015-3361044348-30300820-1013"
            .parse()
            .unwrap();
        assert_eq!(sid.revision, 1);
        assert_eq!(sid.authority, 5);
        assert_eq!(
            sid.sub_authorities.as_slice(),
            &[21, 3_623_811_015, 3_361_044_348, 30_300_820, 1013]
        );
    }

    #[test]
    fn accepts_lowercase_head() {
        assert!("s-1-5-18".parse::<SidComponents>().is_ok());
    }

    #[test]
    fn rejects_malformed_strings() {
        let cases = [
            "",
            "S",
            "S-",
            "S-1",
            "S-1-5",
            "not-a-sid",
            "X-1-5-21",
            "S-1-5-",
            "S--5-21",
            "S-1-5-21-",
            "S-1-+5-21",
            "S-1-5-0x15",
            "S-1-5--21",
            "S-1-5-21-abc",
            "S-256-5-21",
            "S-1-5-4294967296",
            "S 1 5 21",
        ];
        for case in cases {
            assert_eq!(
                case.parse::<SidComponents>(),
                Err(InvalidSidFormat),
                "expected rejection of {case:?}"
            );
        }
    }

    #[test]
    fn rejects_authority_above_48_bits() {
        // 2^48 - 1 is the last valid authority.
        assert!("S-1-281474976710655-1".parse::<SidComponents>().is_ok());
        assert_eq!(
            "S-1-281474976710656-1".parse::<SidComponents>(),
            Err(InvalidSidFormat)
        );
    }

    #[test]
    fn rejects_more_than_255_sub_authorities() {
        let mut sid = String::from("S-1-5");
        for _ in 0..MAX_SUB_AUTHORITY_COUNT {
            sid.push_str("-1");
        }
        assert!(sid.parse::<SidComponents>().is_ok());
        sid.push_str("-1");
        assert_eq!(sid.parse::<SidComponents>(), Err(InvalidSidFormat));
    }

    fn arb_components() -> impl Strategy<Value = SidComponents> {
        (
            any::<u8>(),
            0..=MAX_AUTHORITY,
            proptest::collection::vec(any::<u32>(), 1..=15),
        )
            .prop_map(|(revision, authority, subs)| {
                let mut sub_authorities = ArrayVec::new();
                sub_authorities.extend(subs);
                SidComponents {
                    revision,
                    authority,
                    sub_authorities,
                }
            })
    }

    proptest! {
        #[test]
        fn display_parse_round_trip(components in arb_components()) {
            let rendered = components.to_string();
            prop_assert!(rendered.starts_with("S-"), "bad head: {}", rendered);
            let reparsed: SidComponents = rendered.parse().unwrap();
            prop_assert_eq!(reparsed, components);
        }
    }
}
