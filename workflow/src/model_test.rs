use super::*;

#[test]
fn submission_accepts_numeric_id_and_object_category() {
    let json = serde_json::json!({
        "id": 42,
        "title": "Study of X",
        "category": { "id": 3, "name": "Oncology" },
        "status": "ACCEPTED",
        "submitter_name": "Dr. Rao",
        "review_phase": 2
    });
    let sub: Submission = serde_json::from_value(json).unwrap();
    assert_eq!(sub.id, "42");
    assert_eq!(sub.category.as_deref(), Some("Oncology"));
    assert_eq!(sub.status, ReviewStatus::Accepted);
    assert_eq!(sub.submitter.as_deref(), Some("Dr. Rao"));
    assert_eq!(sub.review_phase, Some(2));
}

#[test]
fn submission_accepts_plain_category_and_missing_fields() {
    let sub: Submission = serde_json::from_value(serde_json::json!({
        "id": "a-1",
        "category": "Cardiology"
    }))
    .unwrap();
    assert_eq!(sub.category.as_deref(), Some("Cardiology"));
    assert_eq!(sub.status, ReviewStatus::Unknown);
    assert!(sub.authors.is_empty());
}

#[test]
fn unknown_status_does_not_fail_decoding() {
    let status: ReviewStatus = serde_json::from_value(serde_json::json!("WITHDRAWN")).unwrap();
    assert_eq!(status, ReviewStatus::Unknown);
}

#[test]
fn status_round_trips_wire_names() {
    for status in [ReviewStatus::Draft, ReviewStatus::Pending, ReviewStatus::Accepted, ReviewStatus::Rejected] {
        let json = serde_json::to_value(status).unwrap();
        assert_eq!(json, serde_json::json!(status.as_str()));
    }
}

#[test]
fn content_sections_get_set_follow_kind() {
    let mut sections = ContentSections::default();
    sections.set(SectionKind::Results, "It worked.");
    assert_eq!(sections.get(SectionKind::Results), "It worked.");
    let labels: Vec<_> = sections.iter().map(|(kind, _)| kind.label()).collect();
    assert_eq!(labels, ["Introduction", "Aims & Objectives", "Materials & Methods", "Results", "Conclusion"]);
}

#[test]
fn verifier_accepts_username_alias() {
    let v: Verifier = serde_json::from_value(serde_json::json!({ "id": 7, "username": "rev1" })).unwrap();
    assert_eq!(v.id, "7");
    assert_eq!(v.name, "rev1");
    assert_eq!(Entity::id(&v), "7");
}
