use docsense::domain::{UserField, UserInfo};

fn error_message(field: UserField, value: &str) -> String {
    field.validate(value).unwrap_err().to_string()
}

#[test]
fn given_field_names_when_parsing_then_round_trips_through_as_str() {
    for field in UserField::ALL {
        assert_eq!(field.as_str().parse::<UserField>(), Ok(field));
    }
    assert!("favourite_color".parse::<UserField>().is_err());
}

#[test]
fn given_blank_value_when_validating_then_reports_empty_field() {
    assert_eq!(
        error_message(UserField::FirstName, "   "),
        "First name cannot be empty."
    );
}

#[test]
fn given_names_when_validating_then_accepts_hebrew_and_rejects_digits() {
    assert!(UserField::FirstName.validate("דנה").is_ok());
    assert!(UserField::LastName.validate("Levi").is_ok());
    assert_eq!(
        error_message(UserField::LastName, "Levi2"),
        "Last name must contain only alphabetic characters."
    );
}

#[test]
fn given_id_and_card_numbers_when_validating_then_require_nine_digits() {
    assert!(UserField::IdNumber.validate("123456789").is_ok());
    assert_eq!(
        error_message(UserField::IdNumber, "12345678"),
        "ID number must be exactly 9 digits."
    );
    assert_eq!(
        error_message(UserField::HmoCardNumber, "12345678a"),
        "HMO card number must be exactly 9 digits."
    );
}

#[test]
fn given_gender_when_validating_then_accepts_english_and_hebrew_case_insensitively() {
    assert!(UserField::Gender.validate("Female").is_ok());
    assert!(UserField::Gender.validate("זכר").is_ok());
    assert_eq!(
        error_message(UserField::Gender, "unknown"),
        "Gender must be male, female, or other."
    );
}

#[test]
fn given_age_when_validating_then_enforces_numeric_range() {
    assert!(UserField::Age.validate("0").is_ok());
    assert!(UserField::Age.validate("120").is_ok());
    assert_eq!(
        error_message(UserField::Age, "121"),
        "Age must be a number between 0 and 120."
    );
    assert_eq!(error_message(UserField::Age, "old"), "Age must be a valid number.");
}

#[test]
fn given_hmo_name_when_validating_then_accepts_known_funds_only() {
    assert!(UserField::HmoName.validate("Maccabi").is_ok());
    assert!(UserField::HmoName.validate("כללית").is_ok());
    assert_eq!(
        error_message(UserField::HmoName, "Kaiser"),
        "HMO name must be one of: Maccabi, Meuhedet, Clalit."
    );
}

#[test]
fn given_membership_tier_when_validating_then_accepts_listed_spellings() {
    assert!(UserField::InsuranceMembershipTier.validate("Gold").is_ok());
    assert!(UserField::InsuranceMembershipTier.validate("ארד").is_ok());
    assert_eq!(
        error_message(UserField::InsuranceMembershipTier, "GOLD"),
        "Insurance membership tier must be gold, silver, or bronze."
    );
}

#[test]
fn given_partial_user_info_when_listing_missing_then_returns_canonical_order() {
    let mut info = UserInfo::new();
    info.set(UserField::FirstName, "Dana");
    info.set(UserField::Age, " ");

    let missing = info.missing_fields();

    assert_eq!(missing.first(), Some(&UserField::LastName));
    assert!(missing.contains(&UserField::Age));
    assert!(!missing.contains(&UserField::FirstName));
    assert_eq!(missing.len(), 7);
    assert!(!info.is_complete());
}

#[test]
fn given_two_user_infos_when_merging_then_other_values_win() {
    let mut info = UserInfo::new();
    info.set(UserField::FirstName, "Dana");
    let mut update = UserInfo::new();
    update.set(UserField::FirstName, "Noa");
    update.set(UserField::HmoName, "Clalit");

    info.merge(&update);

    assert_eq!(info.get(UserField::FirstName), Some("Noa"));
    assert_eq!(info.get(UserField::HmoName), Some("Clalit"));
}
