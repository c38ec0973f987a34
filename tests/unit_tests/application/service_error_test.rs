use docsense::application::ports::ServiceError;

#[test]
fn given_auth_statuses_when_mapping_then_returns_authentication() {
    assert!(matches!(
        ServiceError::from_status(401, "bad key"),
        ServiceError::Authentication(ref d) if d == "HTTP 401: bad key"
    ));
    assert!(matches!(
        ServiceError::from_status(403, ""),
        ServiceError::Authentication(_)
    ));
}

#[test]
fn given_rate_limit_when_mapping_then_counts_as_unavailable() {
    let error = ServiceError::from_status(429, "slow down");
    assert_eq!(error, ServiceError::RateLimited);
    assert!(error.is_unavailable());
}

#[test]
fn given_client_errors_when_mapping_then_returns_malformed_input() {
    for status in [400, 413, 415, 422] {
        assert!(matches!(
            ServiceError::from_status(status, ""),
            ServiceError::MalformedInput(_)
        ));
    }
}

#[test]
fn given_server_error_when_mapping_then_returns_unavailable() {
    let error = ServiceError::from_status(500, "boom");
    assert!(matches!(error, ServiceError::Unavailable(_)));
    assert!(error.is_unavailable());
}
