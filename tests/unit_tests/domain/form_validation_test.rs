use serde_json::json;

use docsense::domain::{
    FormLanguage, contains_hebrew, flatten_json, normalize_keys, validate_dynamic,
    validate_with_ground_truth,
};

#[test]
fn given_keys_with_gershayim_when_normalizing_then_uses_plain_double_quote() {
    let value = json!({ "כתובת": { "מס׳ בית": "12", "ת״ד": "5" }, "it's": 1 });

    let normalized = normalize_keys(&value);

    assert_eq!(normalized["כתובת"]["ת\"ד"], json!("5"));
    assert_eq!(normalized["it\"s"], json!(1));
}

#[test]
fn given_nested_object_when_flattening_then_uses_dotted_keys() {
    let flat = flatten_json(&json!({ "a": { "b": { "c": 1 } }, "d": "x" }));

    assert_eq!(flat.get("a.b.c"), Some(&json!(1)));
    assert_eq!(flat.get("d"), Some(&json!("x")));
    assert_eq!(flat.len(), 2);
}

#[test]
fn given_hebrew_keys_when_detecting_language_then_returns_hebrew() {
    assert_eq!(FormLanguage::detect(&json!({ "שם משפחה": "" })), FormLanguage::Hebrew);
    assert_eq!(FormLanguage::detect(&json!({ "lastName": "" })), FormLanguage::English);
    assert!(contains_hebrew("abc ש"));
    assert!(!contains_hebrew("abc"));
}

#[test]
fn given_bundled_templates_when_loading_then_both_are_objects() {
    assert!(FormLanguage::English.template().is_object());
    assert!(FormLanguage::Hebrew.template().is_object());
}

#[test]
fn given_ground_truth_when_validating_then_counts_matches_and_missing_keys() {
    let truth = json!({ "lastName": "Levi", "firstName": "Dana", "address": { "city": "Haifa" } });
    let extracted = json!({ "lastName": "Levi", "firstName": "Dina" });

    let report = validate_with_ground_truth(&extracted, &truth);

    assert!((report.accuracy - 100.0 / 3.0).abs() < 1e-9);
    assert!((report.completeness - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.missing_fields, vec!["address.city".to_string()]);
    assert_eq!(report.mismatched_fields["firstName"].expected, json!("Dana"));
    assert_eq!(report.mismatched_fields["firstName"].actual, json!("Dina"));
    assert_eq!(report.mismatched_fields["address.city"].actual, json!(""));
}

#[test]
fn given_empty_ground_truth_when_validating_then_reports_zero_percent() {
    let report = validate_with_ground_truth(&json!({ "a": "1" }), &json!({}));
    assert_eq!(report.accuracy, 0.0);
    assert_eq!(report.completeness, 0.0);
}

#[test]
fn given_implausible_values_when_validating_dynamically_then_flags_them() {
    let template = json!({
        "idNumber": "",
        "mobilePhone": "",
        "dateOfBirth": { "day": "", "month": "", "year": "" }
    });
    let extracted = json!({
        "idNumber": "12345",
        "mobilePhone": "0501234567",
        "dateOfBirth": { "day": "0", "month": "13", "year": "99" }
    });

    let report = validate_dynamic(&extracted, &template);

    assert_eq!(report.completeness, 100.0);
    assert!(report.missing_fields.is_empty());
    assert_eq!(report.invalid_fields["idNumber"], "Invalid ID number");
    assert_eq!(report.invalid_fields["dateOfBirth.day"], "Invalid day or month value");
    assert_eq!(report.invalid_fields["dateOfBirth.month"], "Invalid month value");
    assert_eq!(report.invalid_fields["dateOfBirth.year"], "Invalid year value");
    assert!(!report.invalid_fields.contains_key("mobilePhone"));
}

#[test]
fn given_partial_form_when_validating_dynamically_then_lists_missing_template_keys() {
    let template = json!({ "lastName": "", "firstName": "", "address": { "city": "" } });
    let extracted = json!({ "lastName": "", "firstName": "Dana" });

    let report = validate_dynamic(&extracted, &template);

    assert_eq!(report.missing_fields, vec!["address.city".to_string()]);
    assert!((report.completeness - 200.0 / 3.0).abs() < 1e-9);
    assert!(report.invalid_fields.is_empty());
}
