//! `reqwest` implementation of the workflow API traits.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `ApiError::Network`; non-2xx answers go through
//! `ApiError::from_response` so the server's message reaches the terminal.

#[cfg(test)]
#[path = "rest_test.rs"]
mod rest_test;

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use workflow::api::{
    AssignmentApi, BulkAssignResponse, Endpoints, GradingApi, PageSource, Resource, ReviewApi, StatusUpdate,
    SubmissionApi, bulk_assign_body,
};
use workflow::envelope::{ListPage, decode_value, parse_body, unwrap_data};
use workflow::error::ApiError;
use workflow::grading::{Criterion, ScoreRecord};
use workflow::model::{Category, ReviewStatus, Submission};
use workflow::query::ListQueryState;
use workflow::wizard::{Encoding, MULTIPART_DATA_FIELD, MULTIPART_FILE_FIELD, SubmissionRequest};

use crate::error::CliError;

/// PDF read from disk for a multipart submission.
#[derive(Clone, Debug)]
pub struct PdfUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct RestClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

fn network(error: reqwest::Error) -> ApiError {
    ApiError::Network(error.to_string())
}

async fn read_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(network)?;
    if !status.is_success() {
        return Err(ApiError::from_response(status.as_u16(), &text));
    }
    Ok(parse_body(&text))
}

impl RestClient {
    /// Client sending `Authorization: Bearer <token>` on every request.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidHeader`] for a token that is not a valid
    /// header value, or [`CliError::Client`] if the TLS backend fails to load.
    pub fn new(base: &str, token: &str) -> Result<Self, CliError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http, endpoints: Endpoints::new(base) })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        tracing::debug!(%method, url, "request");
        let request = self.http.request(method, url).query(query);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };
        let response = request.send().await.map_err(network)?;
        read_response(response).await
    }

    /// Raw PDF bytes of one submission.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the download fails or answers non-2xx.
    pub async fn fetch_pdf(&self, resource: Resource, id: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(self.endpoints.pdf(resource, id)).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &text));
        }
        Ok(response.bytes().await.map_err(network)?.to_vec())
    }

    /// Pageable source over one list endpoint.
    pub fn listing<T>(&self, url: String, filter_param: &'static str) -> Listing<'_, T> {
        Listing { client: self, url, filter_param, _item: PhantomData }
    }
}

/// [`PageSource`] over a list endpoint; `filter_param` names the filter query key.
pub struct Listing<'a, T> {
    client: &'a RestClient,
    url: String,
    filter_param: &'static str,
    _item: PhantomData<fn() -> T>,
}

#[async_trait(?Send)]
impl<T: DeserializeOwned> PageSource<T> for Listing<'_, T> {
    async fn fetch_page(&self, query: &ListQueryState) -> Result<ListPage<T>, ApiError> {
        let pairs = query.to_query_pairs(self.filter_param);
        let value = self.client.send(Method::GET, &self.url, &pairs, None).await?;
        Ok(ListPage::normalize(value))
    }
}

#[async_trait(?Send)]
impl ReviewApi for RestClient {
    async fn fetch_submission(&self, resource: Resource, id: &str) -> Result<Submission, ApiError> {
        let value = self.send(Method::GET, &self.endpoints.entity(resource, id), &[], None).await?;
        decode_value(unwrap_data(value))
    }

    async fn update_status(&self, resource: Resource, id: &str, status: ReviewStatus) -> Result<(), ApiError> {
        let body = serde_json::to_value(StatusUpdate { status }).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::PUT, &self.endpoints.entity(resource, id), &[], Some(&body)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AssignmentApi for RestClient {
    async fn bulk_assign(&self, resource: Resource, ids: &[String], verifier_ids: &[String]) -> Result<u32, ApiError> {
        let body = bulk_assign_body(resource, ids, verifier_ids);
        let value = self.send(Method::POST, &self.endpoints.bulk_assign(resource), &[], Some(&body)).await?;
        Ok(decode_value::<BulkAssignResponse>(value).unwrap_or_default().assignments_created)
    }

    async fn bulk_unassign(
        &self,
        resource: Resource,
        ids: &[String],
        verifier_ids: &[String],
    ) -> Result<u32, ApiError> {
        let body = bulk_assign_body(resource, ids, verifier_ids);
        let value = self.send(Method::POST, &self.endpoints.bulk_unassign(resource), &[], Some(&body)).await?;
        Ok(decode_value::<BulkAssignResponse>(value).unwrap_or_default().assignments_deleted)
    }

    async fn link_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError> {
        let url = self.endpoints.verifier_link(resource, id, verifier_id);
        self.send(Method::POST, &url, &[], None).await?;
        Ok(())
    }

    async fn unlink_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError> {
        let url = self.endpoints.verifier_link(resource, id, verifier_id);
        self.send(Method::DELETE, &url, &[], None).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl GradingApi for RestClient {
    async fn fetch_criteria(&self, resource: Resource) -> Result<Vec<Criterion>, ApiError> {
        let query = [("kind".to_owned(), resource.grading_kind().to_owned())];
        let value = self.send(Method::GET, &self.endpoints.grading_types(), &query, None).await?;
        Ok(ListPage::<Criterion>::normalize(value).items)
    }

    async fn post_score(&self, resource: Resource, id: &str, record: &ScoreRecord) -> Result<(), ApiError> {
        let body = serde_json::to_value(record).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::POST, &self.endpoints.gradings(resource, id), &[], Some(&body)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl SubmissionApi for RestClient {
    type File = PdfUpload;

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let value = self.send(Method::GET, &self.endpoints.categories(), &[], None).await?;
        Ok(ListPage::<Category>::normalize(value).items)
    }

    async fn submit(&self, request: &SubmissionRequest, file: Option<&PdfUpload>) -> Result<Value, ApiError> {
        let url = self.endpoints.list(Resource::Abstracts);
        let payload = request.payload_json();
        match (request.encoding, file) {
            (Encoding::Multipart, Some(file)) => {
                let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                    .file_name(file.name.clone())
                    .mime_str("application/pdf")
                    .map_err(network)?;
                let form = reqwest::multipart::Form::new()
                    .text(MULTIPART_DATA_FIELD, payload.to_string())
                    .part(MULTIPART_FILE_FIELD, part);
                let response = self.http.post(&url).multipart(form).send().await.map_err(network)?;
                read_response(response).await
            }
            _ => self.send(Method::POST, &url, &[], Some(&payload)).await,
        }
    }
}
