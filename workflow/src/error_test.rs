use super::*;

#[test]
fn message_prefers_json_error_field() {
    let body = r#"{"error":"Abstract not found","message":"ignored"}"#;
    assert_eq!(error_message_from_body(404, body), "Abstract not found");
}

#[test]
fn message_falls_back_to_message_then_detail() {
    assert_eq!(error_message_from_body(400, r#"{"message":"bad title"}"#), "bad title");
    assert_eq!(error_message_from_body(422, r#"{"detail":"too long"}"#), "too long");
}

#[test]
fn message_reads_nested_error_object() {
    let body = r#"{"error":{"code":"E_LOCKED","message":"review closed"}}"#;
    assert_eq!(error_message_from_body(409, body), "review closed");
}

#[test]
fn message_uses_raw_text_when_not_json() {
    assert_eq!(error_message_from_body(502, "  Bad Gateway \n"), "Bad Gateway");
}

#[test]
fn message_falls_back_to_status_for_empty_or_unhelpful_json() {
    assert_eq!(error_message_from_body(500, ""), "Request failed with status 500");
    assert_eq!(error_message_from_body(500, r#"{"ok":false}"#), "Request failed with status 500");
}

#[test]
fn from_response_keeps_status() {
    let err = ApiError::from_response(403, r#"{"error":"forbidden"}"#);
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "forbidden");
    assert_eq!(ApiError::Network("offline".into()).status(), None);
}

#[test]
fn validation_errors_point_at_fields() {
    assert_eq!(ValidationError::TitleMissing.field(), Field::Title);
    assert_eq!(ValidationError::PresenterCount { count: 0 }.field(), Field::Authors);
    assert_eq!(ValidationError::ContentTooLong { words: 501, limit: 500 }.field(), Field::Content);
    assert_eq!(ValidationError::PdfTooLarge { size_bytes: 1, max_mb: 5 }.field(), Field::Attachment);
}

#[test]
fn content_limit_message_names_the_limit() {
    let msg = ValidationError::ContentTooLong { words: 501, limit: 500 }.to_string();
    assert!(msg.contains("500"));
    assert!(msg.contains("501"));
}
