//! Tests for tier ordering and parsing.

use availability_engine::Tier;

#[test]
fn ordering_follows_rank() {
    assert!(Tier::No < Tier::Maybe);
    assert!(Tier::Maybe < Tier::Yes);
    assert_eq!(Tier::ALL.iter().map(|t| t.rank()).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn tokens_are_case_sensitive() {
    assert_eq!(Tier::from_token("Maybe"), Some(Tier::Maybe));
    assert_eq!(Tier::from_token("maybe"), None);
    assert_eq!(Tier::from_token(""), None);
}

#[test]
fn only_no_is_unavailable() {
    assert!(!Tier::No.is_available());
    assert!(Tier::Maybe.is_available());
    assert!(Tier::Yes.is_available());
    assert_eq!(Tier::default(), Tier::No);
}
