use super::*;

#[test]
fn optional_text_trims_and_drops_blank() {
    assert_eq!(optional_text("  Uni Bonn "), Some("Uni Bonn".to_owned()));
    assert_eq!(optional_text("   "), None);
    assert_eq!(optional_text(""), None);
}

#[test]
fn blank_email_is_not_flagged() {
    assert!(!email_flagged(None));
    assert!(!email_flagged(Some("  ")));
}

#[test]
fn malformed_email_is_flagged() {
    assert!(email_flagged(Some("ana@")));
    assert!(!email_flagged(Some("ana@example.org")));
}
