use super::*;

#[test]
fn endpoints_trim_trailing_slash() {
    let endpoints = Endpoints::new("https://api.example.org/v1/");
    assert_eq!(endpoints.base(), "https://api.example.org/v1");
    assert_eq!(endpoints.list(Resource::Abstracts), "https://api.example.org/v1/abstracts");
}

#[test]
fn entity_endpoints_follow_contract() {
    let endpoints = Endpoints::new("/api");
    assert_eq!(endpoints.entity(Resource::BestPapers, "7"), "/api/best-papers/7");
    assert_eq!(endpoints.verifier_link(Resource::Abstracts, "3", "u9"), "/api/abstracts/3/verifiers/u9");
    assert_eq!(endpoints.bulk_assign(Resource::Abstracts), "/api/abstracts/bulk-assign-verifiers");
    assert_eq!(endpoints.bulk_unassign(Resource::BestPapers), "/api/best-papers/bulk-unassign-verifiers");
    assert_eq!(endpoints.pdf(Resource::Abstracts, "3"), "/api/abstracts/3/pdf");
    assert_eq!(endpoints.gradings(Resource::Abstracts, "3"), "/api/abstracts/3/gradings");
    assert_eq!(endpoints.grading_types(), "/api/grading-types");
}

#[test]
fn bulk_body_uses_resource_id_field() {
    let body = bulk_assign_body(Resource::BestPapers, &["1".to_owned(), "2".to_owned()], &["u1".to_owned()]);
    assert_eq!(body, serde_json::json!({ "best_paper_ids": ["1", "2"], "user_ids": ["u1"] }));
}

#[test]
fn status_update_serializes_wire_status() {
    let body = serde_json::to_value(StatusUpdate { status: ReviewStatus::Rejected }).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "REJECTED" }));
}

#[test]
fn bulk_response_defaults_missing_counters() {
    let resp: BulkAssignResponse = serde_json::from_value(serde_json::json!({ "assignments_created": 4 })).unwrap();
    assert_eq!(resp.assignments_created, 4);
    assert_eq!(resp.assignments_deleted, 0);
}

#[test]
fn resource_parses_cli_spellings() {
    assert_eq!("abstracts".parse::<Resource>(), Ok(Resource::Abstracts));
    assert_eq!("Best-Papers".parse::<Resource>(), Ok(Resource::BestPapers));
    assert!("posters".parse::<Resource>().is_err());
}
