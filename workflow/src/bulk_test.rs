use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;

use super::*;
use crate::model::Submission;
use crate::selection::DualSelection;

#[derive(Default)]
struct FakeApi {
    statuses: RefCell<HashMap<String, ReviewStatus>>,
    failing_updates: Vec<String>,
    calls: RefCell<Vec<String>>,
    assign_result: Option<Result<u32, ApiError>>,
}

impl FakeApi {
    fn with(statuses: &[(&str, ReviewStatus)]) -> Self {
        Self {
            statuses: RefCell::new(statuses.iter().map(|(id, s)| ((*id).to_owned(), *s)).collect()),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl ReviewApi for FakeApi {
    async fn fetch_submission(&self, _resource: Resource, id: &str) -> Result<Submission, ApiError> {
        self.calls.borrow_mut().push(format!("GET {id}"));
        let status = self
            .statuses
            .borrow()
            .get(id)
            .copied()
            .ok_or_else(|| ApiError::from_response(404, r#"{"error":"not found"}"#))?;
        Ok(Submission { id: id.to_owned(), status, ..Submission::default() })
    }

    async fn update_status(&self, _resource: Resource, id: &str, status: ReviewStatus) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("PUT {id} {}", status.as_str()));
        if self.failing_updates.iter().any(|f| f == id) {
            return Err(ApiError::from_response(500, "boom"));
        }
        self.statuses.borrow_mut().insert(id.to_owned(), status);
        Ok(())
    }
}

#[async_trait(?Send)]
impl AssignmentApi for FakeApi {
    async fn bulk_assign(&self, _resource: Resource, ids: &[String], verifier_ids: &[String]) -> Result<u32, ApiError> {
        self.calls.borrow_mut().push(format!("ASSIGN {} -> {}", ids.join(","), verifier_ids.join(",")));
        self.assign_result.clone().unwrap_or(Ok(0))
    }

    async fn bulk_unassign(
        &self,
        _resource: Resource,
        ids: &[String],
        verifier_ids: &[String],
    ) -> Result<u32, ApiError> {
        self.calls.borrow_mut().push(format!("UNASSIGN {} -> {}", ids.join(","), verifier_ids.join(",")));
        self.assign_result.clone().unwrap_or(Ok(0))
    }

    async fn link_verifier(&self, _resource: Resource, _id: &str, _verifier_id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn unlink_verifier(&self, _resource: Resource, _id: &str, _verifier_id: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

fn selected(ids: &[&str]) -> SelectionSet {
    let mut set = SelectionSet::new();
    set.sync_visible(ids.iter().map(|id| (*id).to_owned()));
    set.select_all_visible();
    set
}

fn verifier() -> Verifier {
    Verifier { id: "u7".to_owned(), name: "Dr. Okafor".to_owned(), ..Verifier::default() }
}

// =============================================================
// accept / reject
// =============================================================

#[tokio::test]
async fn bulk_accept_skips_non_pending_and_runs_sequentially() {
    let api = FakeApi::with(&[
        ("1", ReviewStatus::Pending),
        ("2", ReviewStatus::Accepted),
        ("3", ReviewStatus::Pending),
    ]);
    let mut set = selected(&["1", "2", "3"]);

    let report = transition(&api, Resource::Abstracts, &mut set, Transition::Accept).await.unwrap();

    assert_eq!(report.succeeded, vec!["1", "3"]);
    assert_eq!(report.skipped, vec!["2"]);
    assert_eq!(report.message(Transition::Accept, "abstract"), "Successfully accepted 2 abstract(s)");
    assert_eq!(report.notice("abstract").as_deref(), Some("1 abstract(s) not processed: 1 skipped (not pending)"));
    assert_eq!(set.ids(), vec!["2"]);
    assert_eq!(
        *api.calls.borrow(),
        vec!["GET 1", "PUT 1 ACCEPTED", "GET 2", "GET 3", "PUT 3 ACCEPTED"]
    );
}

#[tokio::test]
async fn entity_without_status_is_skipped_not_transitioned() {
    let decoded: Submission = serde_json::from_value(serde_json::json!({ "id": 7, "title": "x" })).unwrap();
    let api = FakeApi::with(&[("7", decoded.status)]);
    let mut set = selected(&["7"]);

    let report = transition(&api, Resource::Abstracts, &mut set, Transition::Accept).await.unwrap();

    assert!(report.succeeded.is_empty());
    assert_eq!(report.skipped, vec!["7"]);
    assert_eq!(set.ids(), vec!["7"]);
    assert_eq!(*api.calls.borrow(), vec!["GET 7"]);
}

#[tokio::test]
async fn failed_updates_stay_selected_and_do_not_abort() {
    let mut api = FakeApi::with(&[("1", ReviewStatus::Pending), ("2", ReviewStatus::Pending)]);
    api.failing_updates = vec!["1".to_owned()];
    let mut set = selected(&["1", "2"]);

    let report = transition(&api, Resource::Abstracts, &mut set, Transition::Reject).await.unwrap();

    assert_eq!(report.succeeded, vec!["2"]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(set.ids(), vec!["1"]);
    assert_eq!(report.message(Transition::Reject, "abstract"), "Successfully rejected 1 abstract(s)");
}

#[tokio::test]
async fn zero_successes_reports_failure() {
    let mut api = FakeApi::with(&[("1", ReviewStatus::Pending)]);
    api.failing_updates = vec!["1".to_owned()];
    let mut set = selected(&["1"]);

    let report = transition(&api, Resource::BestPapers, &mut set, Transition::Accept).await.unwrap();

    assert!(!report.is_success());
    assert_eq!(report.message(Transition::Accept, "best paper"), "Failed to accept any best paper(s)");
}

#[tokio::test]
async fn all_skipped_reports_nothing_pending() {
    let api = FakeApi::with(&[("1", ReviewStatus::Rejected)]);
    let mut set = selected(&["1"]);

    let report = transition(&api, Resource::Abstracts, &mut set, Transition::Accept).await.unwrap();

    assert_eq!(report.message(Transition::Accept, "abstract"), "No pending abstract(s) to accept");
    assert_eq!(set.ids(), vec!["1"]);
}

#[tokio::test]
async fn missing_entity_counts_as_failed() {
    let api = FakeApi::with(&[]);
    let mut set = selected(&["ghost"]);

    let report = transition(&api, Resource::Abstracts, &mut set, Transition::Accept).await.unwrap();

    assert_eq!(report.failed, vec![("ghost".to_owned(), "not found".to_owned())]);
}

#[tokio::test]
async fn empty_selection_is_refused() {
    let api = FakeApi::default();
    let mut set = SelectionSet::new();
    let err = transition(&api, Resource::Abstracts, &mut set, Transition::Accept).await.unwrap_err();
    assert_eq!(err, BulkError::EmptySelection);
    assert!(api.calls.borrow().is_empty());
}

#[test]
fn confirm_prompt_names_count_and_noun() {
    assert_eq!(Transition::Reject.confirm_prompt(3, "abstract"), "Are you sure you want to reject 3 abstract(s)?");
}

// =============================================================
// assign / unassign
// =============================================================

#[tokio::test]
async fn bulk_assign_sends_one_batched_request_and_clears() {
    let api = FakeApi { assign_result: Some(Ok(2)), ..FakeApi::default() };
    let mut set = selected(&["1", "2"]);
    let v = verifier();

    let report = link(&api, Resource::Abstracts, &mut set, Some(&v), LinkAction::Assign).await.unwrap();

    assert_eq!(*api.calls.borrow(), vec!["ASSIGN 1,2 -> u7"]);
    assert!(set.is_empty());
    assert_eq!(report.message("abstract"), "Assigned 2 abstract(s) to Dr. Okafor (2 new link(s))");
}

#[tokio::test]
async fn assign_without_verifier_is_refused() {
    let api = FakeApi::default();
    let mut set = selected(&["1"]);

    let err = link(&api, Resource::Abstracts, &mut set, None, LinkAction::Assign).await.unwrap_err();

    assert_eq!(err, BulkError::MissingVerifier);
    assert!(api.calls.borrow().is_empty());
    assert_eq!(set.len(), 1);
}

#[tokio::test]
async fn assign_failure_keeps_selection() {
    let api = FakeApi { assign_result: Some(Err(ApiError::Network("offline".into()))), ..FakeApi::default() };
    let mut set = selected(&["1"]);
    let v = verifier();

    let err = link(&api, Resource::Abstracts, &mut set, Some(&v), LinkAction::Unassign).await.unwrap_err();

    assert!(matches!(err, BulkError::Api(ApiError::Network(_))));
    assert_eq!(set.len(), 1);
}

#[tokio::test]
async fn unassign_reports_removed_links() {
    let api = FakeApi { assign_result: Some(Ok(1)), ..FakeApi::default() };
    let mut set = selected(&["9"]);
    let v = verifier();

    let report = link(&api, Resource::BestPapers, &mut set, Some(&v), LinkAction::Unassign).await.unwrap();

    assert_eq!(report.message("best paper"), "Unassigned 1 best paper(s) from Dr. Okafor (1 link(s) removed)");
}

#[tokio::test]
async fn cleared_verifier_is_refused_at_click_time() {
    let api = FakeApi::default();
    let mut dual = DualSelection::<Submission, Verifier>::default();
    dual.select_secondary(verifier());
    dual.clear_secondary();
    let mut set = selected(&["1", "2"]);

    let err = link(&api, Resource::Abstracts, &mut set, dual.secondary(), LinkAction::Unassign).await.unwrap_err();

    assert_eq!(err, BulkError::MissingVerifier);
    assert!(api.calls.borrow().is_empty());
    assert_eq!(set.ids(), vec!["1", "2"]);
}
