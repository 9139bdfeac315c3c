use std::error::Error;
use newsletter_digest::errors::DigestError;

#[test]
fn test_digest_error_implements_error_trait() {
    // Verify DigestError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = DigestError::Validation("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_digest_error_display() {
    let error = DigestError::Validation("No newsletters provided".to_string());
    assert_eq!(format!("{error}"), "Invalid request: No newsletters provided");

    let error = DigestError::UpstreamAuth {
        status: 401,
        body: "invalid_grant".to_string(),
    };
    assert_eq!(
        format!("{error}"),
        "Failed to obtain Gmail access token (status 401): invalid_grant"
    );

    let error = DigestError::OpenAIError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access OpenAI API: Model unavailable"
    );

    let error = DigestError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_only_validation_is_a_client_error() {
    assert!(DigestError::Validation(String::new()).is_client_error());
    assert!(!DigestError::UpstreamFetch(String::new()).is_client_error());
    assert!(!DigestError::UpstreamParse(String::new()).is_client_error());
    assert!(
        !DigestError::UpstreamAuth {
            status: 400,
            body: String::new()
        }
        .is_client_error()
    );
}

#[test]
fn test_digest_error_from_conversions() {
    // serde_json failures surface as parse errors with the parser's message
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let expected = parse_err.to_string();
    let digest_err: DigestError = parse_err.into();

    match digest_err {
        DigestError::UpstreamParse(msg) => assert_eq!(msg, expected),
        _ => panic!("Unexpected error type"),
    }

    // We can't easily build a reqwest::Error directly, but we can verify
    // that the From<reqwest::Error> conversion exists
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> DigestError {
        DigestError::from(err)
    }
}
