//! Validation coverage for user components.

use super::*;
use chrono::TimeZone;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_serde() {
    let id = UserId::random();
    let json = serde_json::to_string(&id).expect("serialise id");
    let decoded: UserId = serde_json::from_str(&json).expect("deserialise id");
    assert_eq!(decoded, id);
}

#[rstest]
#[case("1a@gmail.com", "1a@gmail.com")]
#[case("  Ada@Example.COM  ", "ada@example.com")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("plainaddress", UserValidationError::InvalidEmail)]
#[case("missing@tld", UserValidationError::InvalidEmail)]
#[case("two words@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Email::new(raw).expect_err("invalid email"), expected);
}

#[rstest]
fn email_rejects_overlong_input() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        Email::new(raw).expect_err("too long"),
        UserValidationError::EmailTooLong { max: EMAIL_MAX }
    );
}

#[rstest]
#[case("x", "x")]
#[case("  privet ya test ", "privet ya test")]
fn full_name_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(FullName::new(raw).expect("valid name").as_ref(), expected);
}

#[rstest]
fn full_name_rejects_blank_and_overlong() {
    assert_eq!(
        FullName::new("  ").expect_err("blank"),
        UserValidationError::EmptyFullName
    );
    assert_eq!(
        FullName::new("n".repeat(FULL_NAME_MAX + 1)).expect_err("overlong"),
        UserValidationError::FullNameTooLong { max: FULL_NAME_MAX }
    );
}

#[rstest]
fn with_timestamps_never_moves_updated_before_created() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid time");
    let earlier = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).single().expect("valid time");
    let user = User::new(
        UserId::random(),
        Email::new("ada@example.com").expect("email"),
        FullName::new("Ada").expect("name"),
        None,
        created,
    )
    .with_timestamps(created, earlier);

    assert_eq!(user.updated_at(), created);
}
