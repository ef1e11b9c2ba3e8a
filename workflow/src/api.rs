//! REST contract: resources, endpoint paths, request bodies and the async
//! traits the controllers call through.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client implements these traits over `gloo-net`, the CLI over
//! `reqwest`, and tests over in-memory fakes. Traits are `?Send` because
//! browser futures are not `Send`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::ListPage;
use crate::error::ApiError;
use crate::grading::{Criterion, ScoreRecord};
use crate::model::{Category, ReviewStatus, Submission};
use crate::query::ListQueryState;
use crate::wizard::SubmissionRequest;

/// Submission collections exposed by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Abstracts,
    BestPapers,
}

impl Resource {
    /// URL path segment.
    pub fn path(self) -> &'static str {
        match self {
            Self::Abstracts => "abstracts",
            Self::BestPapers => "best-papers",
        }
    }

    /// Field carrying the id list in bulk assign bodies.
    pub fn bulk_ids_field(self) -> &'static str {
        match self {
            Self::Abstracts => "abstract_ids",
            Self::BestPapers => "best_paper_ids",
        }
    }

    /// Singular noun for user-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Abstracts => "abstract",
            Self::BestPapers => "best paper",
        }
    }

    /// `kind` parameter of the grading-types endpoint.
    pub fn grading_kind(self) -> &'static str {
        match self {
            Self::Abstracts => "abstract",
            Self::BestPapers => "best_paper",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "abstracts" | "abstract" => Ok(Self::Abstracts),
            "best-papers" | "best-paper" | "best_papers" | "awards" => Ok(Self::BestPapers),
            other => Err(format!("unknown resource: {other}")),
        }
    }
}

/// Endpoint path builder rooted at the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_owned() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `GET` list endpoint; query pairs come from [`ListQueryState::to_query_pairs`].
    pub fn list(&self, resource: Resource) -> String {
        format!("{}/{}", self.base, resource.path())
    }

    pub fn entity(&self, resource: Resource, id: &str) -> String {
        format!("{}/{}/{id}", self.base, resource.path())
    }

    pub fn verifier_link(&self, resource: Resource, id: &str, verifier_id: &str) -> String {
        format!("{}/{}/{id}/verifiers/{verifier_id}", self.base, resource.path())
    }

    pub fn bulk_assign(&self, resource: Resource) -> String {
        format!("{}/{}/bulk-assign-verifiers", self.base, resource.path())
    }

    pub fn bulk_unassign(&self, resource: Resource) -> String {
        format!("{}/{}/bulk-unassign-verifiers", self.base, resource.path())
    }

    pub fn pdf(&self, resource: Resource, id: &str) -> String {
        format!("{}/{}/{id}/pdf", self.base, resource.path())
    }

    pub fn gradings(&self, resource: Resource, id: &str) -> String {
        format!("{}/{}/{id}/gradings", self.base, resource.path())
    }

    pub fn grading_types(&self) -> String {
        format!("{}/grading-types", self.base)
    }

    pub fn categories(&self) -> String {
        format!("{}/categories", self.base)
    }

    pub fn verifiers(&self) -> String {
        format!("{}/verifiers", self.base)
    }
}

/// `PUT <resource>/<id>` body for accept/reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: ReviewStatus,
}

/// Body of `bulk-assign-verifiers` / `bulk-unassign-verifiers`.
pub fn bulk_assign_body(resource: Resource, ids: &[String], verifier_ids: &[String]) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(resource.bulk_ids_field().to_owned(), serde_json::json!(ids));
    body.insert("user_ids".to_owned(), serde_json::json!(verifier_ids));
    Value::Object(body)
}

/// Response of the bulk link endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct BulkAssignResponse {
    #[serde(default)]
    pub assignments_created: u32,
    #[serde(default)]
    pub assignments_deleted: u32,
}

/// Paged list source handed to a list controller.
#[async_trait(?Send)]
pub trait PageSource<T> {
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request fails or answers non-2xx.
    async fn fetch_page(&self, query: &ListQueryState) -> Result<ListPage<T>, ApiError>;
}

/// Single-submission reads and status transitions.
#[async_trait(?Send)]
pub trait ReviewApi {
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the submission cannot be fetched.
    async fn fetch_submission(&self, resource: Resource, id: &str) -> Result<Submission, ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] when the server rejects the transition.
    async fn update_status(&self, resource: Resource, id: &str, status: ReviewStatus) -> Result<(), ApiError>;
}

/// Verifier to submission linking.
#[async_trait(?Send)]
pub trait AssignmentApi {
    /// Link every id to every verifier in one request. Returns links created.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the batch request fails.
    async fn bulk_assign(&self, resource: Resource, ids: &[String], verifier_ids: &[String]) -> Result<u32, ApiError>;

    /// Remove links in one request. Returns links deleted.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the batch request fails.
    async fn bulk_unassign(
        &self,
        resource: Resource,
        ids: &[String],
        verifier_ids: &[String],
    ) -> Result<u32, ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] when the link cannot be created.
    async fn link_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] when the link cannot be removed.
    async fn unlink_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError>;
}

/// Rubric criteria and score submission.
#[async_trait(?Send)]
pub trait GradingApi {
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the criteria cannot be loaded.
    async fn fetch_criteria(&self, resource: Resource) -> Result<Vec<Criterion>, ApiError>;

    /// # Errors
    ///
    /// Returns an [`ApiError`] when the score is rejected.
    async fn post_score(&self, resource: Resource, id: &str, record: &ScoreRecord) -> Result<(), ApiError>;
}

/// Submission creation. `File` is the platform's handle for the attached PDF.
#[async_trait(?Send)]
pub trait SubmissionApi {
    type File;

    /// # Errors
    ///
    /// Returns an [`ApiError`] when categories cannot be loaded.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Send JSON or multipart depending on `request.encoding`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] carrying the server's message on failure.
    async fn submit(&self, request: &SubmissionRequest, file: Option<&Self::File>) -> Result<Value, ApiError>;
}
