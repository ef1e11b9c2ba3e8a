use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_set() {
    let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base, "/api");
    assert_eq!(cfg.token_key, "token");
    assert_eq!(cfg.max_pdf_mb, 5);
    assert_eq!(cfg.max_pdf_bytes(), 5 * 1024 * 1024);
}

#[test]
fn overrides_are_applied() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("REVIEW_API_BASE", "https://conf.example.org/api/"),
        ("REVIEW_PAGE_SIZE", "50"),
        ("REVIEW_MAX_PDF_MB", "10"),
        ("REVIEW_REDIRECT_DELAY_MS", "300"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base, "https://conf.example.org/api");
    assert_eq!(cfg.default_page_size.get(), 50);
    assert_eq!(cfg.max_pdf_mb, 10);
    assert_eq!(cfg.redirect_delay_ms, 300);
}

#[test]
fn invalid_numbers_are_rejected() {
    let err = ClientConfig::from_lookup(lookup(&[("REVIEW_MAX_PDF_MB", "lots")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: "REVIEW_MAX_PDF_MB", value: "lots".to_owned() });
    assert!(ClientConfig::from_lookup(lookup(&[("REVIEW_MAX_PDF_MB", "0")])).is_err());
}

#[test]
fn page_size_outside_fixed_set_is_rejected() {
    let err = ClientConfig::from_lookup(lookup(&[("REVIEW_PAGE_SIZE", "25")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPageSize { value: 25, .. }));
}
