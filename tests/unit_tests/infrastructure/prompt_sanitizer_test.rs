use docsense::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returns_trimmed_input() {
    assert_eq!(sanitize_prompt("  Is dental covered?  "), "Is dental covered?");
}

#[test]
fn given_long_hebrew_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "ש".repeat(150);

    let result = sanitize_prompt(&prompt);

    assert!(result.starts_with(&"ש".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz");
    assert!(result.contains("Bearer [REDACTED]"));
    assert!(!result.contains("sk-abc123xyz"));
}

#[test]
fn given_azure_keys_when_sanitizing_then_redacts_every_occurrence() {
    let result = sanitize_prompt("api-key: one Ocp-Apim-Subscription-Key: two api-key: three");

    assert!(!result.contains("one"));
    assert!(!result.contains("two"));
    assert!(!result.contains("three"));
    assert_eq!(result.matches("[REDACTED]").count(), 3);
}
