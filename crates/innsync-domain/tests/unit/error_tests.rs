//! Unit tests for domain error types

use innsync_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("hotel 42");
    match error {
        Error::NotFound { resource } => assert_eq!(resource, "hotel 42"),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_validation_error() {
    let error = Error::validation("no fields to update");
    assert!(error.to_string().contains("no fields to update"));
    assert!(!error.durable_committed());
}

#[test]
fn test_tier_failure_names_operation_and_tier() {
    let error = Error::tier_failure("create", "primary", Error::cache("full"));

    let display = error.to_string();
    assert!(display.contains("create"));
    assert!(display.contains("primary"));
    assert!(display.contains("full"));
    assert_eq!(error.tier(), Some("primary"));
    assert!(error.durable_committed());
}

#[test]
fn test_aggregate_without_failures_is_ok() {
    assert!(Error::aggregate("delete", Vec::new()).is_ok());
}

#[test]
fn test_aggregate_joins_messages_with_semicolons() {
    let failures = vec![
        Error::tier_failure("delete", "primary", Error::cache("down")),
        Error::tier_failure("delete", "events", Error::network("refused")),
    ];

    let error = Error::aggregate("delete", failures).unwrap_err();

    assert!(error.durable_committed());
    assert_eq!(error.failures().len(), 2);
    let display = error.to_string();
    assert!(display.contains("; "), "got {display}");
    assert!(display.contains("down"));
    assert!(display.contains("refused"));
}

#[test]
fn test_durable_errors_are_not_committed() {
    assert!(!Error::not_found("x").durable_committed());
    assert!(!Error::database("timeout").durable_committed());
    assert!(Error::not_found("x").is_not_found());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(matches!(error, Error::Json { .. }));
}
