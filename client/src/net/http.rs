//! REST client implementing the `workflow` API traits.
//!
//! Client-side (csr): real HTTP calls via `gloo-net` with the stored bearer
//! token attached. Native builds: every call fails with
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx answers become [`ApiError::from_response`] so the server's
//! `error`/`message` text reaches the toast. Transport failures become
//! [`ApiError::Network`]. Nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use workflow::api::{
    AssignmentApi, BulkAssignResponse, Endpoints, GradingApi, PageSource, Resource, ReviewApi, StatusUpdate,
    SubmissionApi, bulk_assign_body,
};
use workflow::config::ClientConfig;
use workflow::envelope::{ListPage, decode_value, unwrap_data};
use workflow::error::ApiError;
use workflow::grading::{Criterion, ScoreRecord};
use workflow::model::{Category, ReviewStatus, Submission};
use workflow::query::ListQueryState;
use workflow::store::bearer_token;
use workflow::wizard::{Encoding, MULTIPART_DATA_FIELD, MULTIPART_FILE_FIELD, SubmissionRequest};

#[cfg(feature = "csr")]
use workflow::envelope::parse_body;

use crate::util::storage::BrowserStore;

/// Browser handle of a picked or dropped file.
#[cfg(feature = "csr")]
pub type FileHandle = web_sys::File;

/// Stand-in file handle for native builds.
#[cfg(not(feature = "csr"))]
#[derive(Clone, Debug)]
pub struct FileHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

/// `Authorization` header value for the token stored under `key`, if any.
fn authorization(store: &BrowserStore, key: &str) -> Option<String> {
    bearer_token(store, key).map(|token| format!("Bearer {token}"))
}

#[cfg(feature = "csr")]
fn network(error: impl std::fmt::Display) -> ApiError {
    ApiError::Network(error.to_string())
}

#[cfg(feature = "csr")]
async fn read_response(response: gloo_net::http::Response) -> Result<Value, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.map_err(network)?;
    if !ok {
        return Err(ApiError::from_response(status, &text));
    }
    Ok(parse_body(&text))
}

/// HTTP implementation of every `workflow` API trait.
#[derive(Clone, Debug)]
pub struct HttpApi {
    endpoints: Endpoints,
    store: BrowserStore,
    token_key: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self { endpoints: Endpoints::new(&config.api_base), store: BrowserStore, token_key: config.token_key.clone() }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, verb: Verb, url: &str, query: &[(String, String)], body: Option<&Value>) -> Result<Value, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let builder = match verb {
                Verb::Get => Request::get(url),
                Verb::Post => Request::post(url),
                Verb::Put => Request::put(url),
                Verb::Delete => Request::delete(url),
            }
            .query(query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
            let builder = match authorization(&self.store, &self.token_key) {
                Some(header) => builder.header("Authorization", &header),
                None => builder,
            };
            let response = match body {
                Some(body) => builder.json(body).map_err(network)?.send().await,
                None => builder.send().await,
            }
            .map_err(network)?;
            read_response(response).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (verb, url, query, body, authorization(&self.store, &self.token_key));
            Err(ApiError::Unavailable)
        }
    }

    /// Raw PDF bytes of one submission.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the download fails or answers non-2xx.
    pub async fn fetch_pdf(&self, resource: Resource, id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoints.pdf(resource, id);
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let builder = Request::get(&url);
            let builder = match authorization(&self.store, &self.token_key) {
                Some(header) => builder.header("Authorization", &header),
                None => builder,
            };
            let response = builder.send().await.map_err(network)?;
            if !response.ok() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(ApiError::from_response(status, &text));
            }
            response.binary().await.map_err(network)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = url;
            Err(ApiError::Unavailable)
        }
    }

    async fn send_multipart(&self, url: &str, data: &str, file: &FileHandle) -> Result<Value, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let form = web_sys::FormData::new().map_err(|e| network(format!("{e:?}")))?;
            form.append_with_str(MULTIPART_DATA_FIELD, data).map_err(|e| network(format!("{e:?}")))?;
            form.append_with_blob_and_filename(MULTIPART_FILE_FIELD, file, &file.name())
                .map_err(|e| network(format!("{e:?}")))?;

            let builder = Request::post(url);
            let builder = match authorization(&self.store, &self.token_key) {
                Some(header) => builder.header("Authorization", &header),
                None => builder,
            };
            let response = builder.body(form).map_err(network)?.send().await.map_err(network)?;
            read_response(response).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, data, file, MULTIPART_DATA_FIELD, MULTIPART_FILE_FIELD);
            Err(ApiError::Unavailable)
        }
    }

    /// Pageable source over one list endpoint.
    pub fn list_source<T>(&self, url: String, filter_param: &'static str) -> ListSource<T> {
        ListSource { api: self.clone(), url, filter_param, _item: PhantomData }
    }
}

/// [`PageSource`] over a list endpoint; `filter_param` names the filter query key.
#[derive(Clone, Debug)]
pub struct ListSource<T> {
    api: HttpApi,
    url: String,
    filter_param: &'static str,
    _item: PhantomData<fn() -> T>,
}

#[async_trait(?Send)]
impl<T: DeserializeOwned> PageSource<T> for ListSource<T> {
    async fn fetch_page(&self, query: &ListQueryState) -> Result<ListPage<T>, ApiError> {
        let pairs = query.to_query_pairs(self.filter_param);
        let value = self.api.send(Verb::Get, &self.url, &pairs, None).await?;
        Ok(ListPage::normalize(value))
    }
}

#[async_trait(?Send)]
impl ReviewApi for HttpApi {
    async fn fetch_submission(&self, resource: Resource, id: &str) -> Result<Submission, ApiError> {
        let value = self.send(Verb::Get, &self.endpoints.entity(resource, id), &[], None).await?;
        decode_value(unwrap_data(value))
    }

    async fn update_status(&self, resource: Resource, id: &str, status: ReviewStatus) -> Result<(), ApiError> {
        let body = serde_json::to_value(StatusUpdate { status }).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Verb::Put, &self.endpoints.entity(resource, id), &[], Some(&body)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AssignmentApi for HttpApi {
    async fn bulk_assign(&self, resource: Resource, ids: &[String], verifier_ids: &[String]) -> Result<u32, ApiError> {
        let body = bulk_assign_body(resource, ids, verifier_ids);
        let value = self.send(Verb::Post, &self.endpoints.bulk_assign(resource), &[], Some(&body)).await?;
        Ok(decode_value::<BulkAssignResponse>(value).unwrap_or_default().assignments_created)
    }

    async fn bulk_unassign(
        &self,
        resource: Resource,
        ids: &[String],
        verifier_ids: &[String],
    ) -> Result<u32, ApiError> {
        let body = bulk_assign_body(resource, ids, verifier_ids);
        let value = self.send(Verb::Post, &self.endpoints.bulk_unassign(resource), &[], Some(&body)).await?;
        Ok(decode_value::<BulkAssignResponse>(value).unwrap_or_default().assignments_deleted)
    }

    async fn link_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError> {
        let url = self.endpoints.verifier_link(resource, id, verifier_id);
        self.send(Verb::Post, &url, &[], None).await?;
        Ok(())
    }

    async fn unlink_verifier(&self, resource: Resource, id: &str, verifier_id: &str) -> Result<(), ApiError> {
        let url = self.endpoints.verifier_link(resource, id, verifier_id);
        self.send(Verb::Delete, &url, &[], None).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl GradingApi for HttpApi {
    async fn fetch_criteria(&self, resource: Resource) -> Result<Vec<Criterion>, ApiError> {
        let query = [("kind".to_owned(), resource.grading_kind().to_owned())];
        let value = self.send(Verb::Get, &self.endpoints.grading_types(), &query, None).await?;
        Ok(ListPage::<Criterion>::normalize(value).items)
    }

    async fn post_score(&self, resource: Resource, id: &str, record: &ScoreRecord) -> Result<(), ApiError> {
        let body = serde_json::to_value(record).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Verb::Post, &self.endpoints.gradings(resource, id), &[], Some(&body)).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl SubmissionApi for HttpApi {
    type File = FileHandle;

    async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let value = self.send(Verb::Get, &self.endpoints.categories(), &[], None).await?;
        Ok(ListPage::<Category>::normalize(value).items)
    }

    async fn submit(&self, request: &SubmissionRequest, file: Option<&FileHandle>) -> Result<Value, ApiError> {
        let url = self.endpoints.list(Resource::Abstracts);
        let payload = request.payload_json();
        match (request.encoding, file) {
            (Encoding::Multipart, Some(file)) => self.send_multipart(&url, &payload.to_string(), file).await,
            _ => self.send(Verb::Post, &url, &[], Some(&payload)).await,
        }
    }
}
