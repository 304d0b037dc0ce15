//! End-to-end checks of the public surface: binary decode feeding the
//! mapping context, the way a resolver front-end would use the crate.

#![allow(clippy::unwrap_used, reason = "Unwrap is not an issue in tests")]

use sid_idmap::{DomainConfig, Error, IdRange, IdmapContext, decode_sid, encode_sid};

const EXAMPLE_SID: &str = "S-1-5-21-3623811015-3361044348-30300820";

#[test]
fn decoded_binary_sid_resolves_through_the_context() {
    let ctx = IdmapContext::with_domain(DomainConfig::new(
        "EXAMPLE",
        EXAMPLE_SID,
        IdRange::new(10_000, 20_000),
    ))
    .unwrap();

    // EXAMPLE domain user 1013, straight off the wire.
    let raw = hex::decode("010500000000000515000000c7f7fed77c7755c8945ace01f5030000").unwrap();
    let sid = decode_sid(&raw).unwrap();
    assert_eq!(sid, format!("{EXAMPLE_SID}-1013"));
    assert_eq!(ctx.sid_to_unix_id(&sid).unwrap(), 11_013);

    // And back out to bytes unchanged.
    assert_eq!(encode_sid(&sid).unwrap(), raw);
}

#[test]
fn multiple_domains_resolve_independently() {
    let mut ctx = IdmapContext::new();
    ctx.add_domain(DomainConfig::new(
        "EXAMPLE",
        EXAMPLE_SID,
        IdRange::new(10_000, 20_000),
    ))
    .unwrap();
    ctx.add_domain(DomainConfig::new(
        "CONTOSO",
        "S-1-5-21-1111111111-2222222222-3333333333",
        IdRange::new(100_000, 200_000),
    ))
    .unwrap();

    assert_eq!(
        ctx.sid_to_unix_id("S-1-5-21-1111111111-2222222222-3333333333-500")
            .unwrap(),
        100_500
    );
    assert_eq!(
        ctx.sid_to_unix_id("S-1-5-21-1111111111-2222222222-3333333333-501")
            .unwrap(),
        100_501
    );
    assert_eq!(ctx.sid_to_unix_id(&format!("{EXAMPLE_SID}-500")).unwrap(), 10_500);

    // A well-known SID belongs to neither domain.
    let everyone = decode_sid(&hex::decode("010100000000000100000000").unwrap()).unwrap();
    assert_eq!(everyone, "S-1-1-0");
    assert!(matches!(
        ctx.sid_to_unix_id(&everyone),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn errors_carry_matchable_kinds() {
    let mut ctx = IdmapContext::new();

    let err = ctx
        .add_domain(DomainConfig::new("BAD", EXAMPLE_SID, IdRange::new(5, 5)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRange { min: 5, max: 5 }));

    let err = ctx
        .add_domain(DomainConfig::new("BAD", "garbage", IdRange::new(1, 2)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSid(_)));

    assert!(matches!(decode_sid(&[1, 5, 0]), Err(Error::MalformedSid(_))));
    assert!(matches!(encode_sid("garbage"), Err(Error::MalformedSid(_))));
}
