use chronoguard_core::errors::*;

#[test]
fn only_policy_and_request_errors_are_user_visible() {
    let policy: ChronoError = PolicyError::ParseFailed {
        reason: "bad".into(),
    }
    .into();
    assert!(policy.is_user_visible());
    assert!(ChronoError::invalid_request("empty").is_user_visible());

    let backend: ChronoError = BackendError::Timeout {
        backend: "ollama".into(),
        timeout_ms: 10,
    }
    .into();
    assert!(!backend.is_user_visible());

    let schema: ChronoError = SchemaError::NoJsonObject.into();
    assert!(!schema.is_user_visible());
}

#[test]
fn error_messages_carry_context() {
    let err = BackendError::ScoreCountMismatch {
        backend: "ce".into(),
        expected: 4,
        actual: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("ce"));
    assert!(msg.contains('4'));
    assert_eq!(err.backend(), "ce");
}
