//! Tests for submission ids.

use rstest::rstest;

use crate::contest::domain::{ContestDomainError, SubmissionId};

#[rstest]
#[case("000000", 0)]
#[case("004217", 4217)]
#[case(" 999999 ", 999_999)]
#[case("42", 42)]
fn parses_ids(#[case] raw: &str, #[case] expected: u32) {
    let id: SubmissionId = raw.parse().expect("valid id");
    assert_eq!(id.get(), expected);
}

#[rstest]
#[case("")]
#[case("1000000")]
#[case("-1")]
#[case("12a")]
#[case("+5")]
fn rejects_invalid_ids(#[case] raw: &str) {
    assert!(matches!(
        raw.parse::<SubmissionId>(),
        Err(ContestDomainError::InvalidSubmissionId(_))
    ));
}

#[rstest]
fn displays_six_digits() {
    let id = SubmissionId::new(7).expect("valid id");
    assert_eq!(id.to_string(), "000007");
}

#[rstest]
fn deserialization_enforces_the_range() {
    assert!(serde_json::from_str::<SubmissionId>("1000000").is_err());
    let id: SubmissionId = serde_json::from_str("12").expect("valid id");
    assert_eq!(serde_json::to_string(&id).expect("serialize"), "12");
}
