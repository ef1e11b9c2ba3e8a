//! # workflow
//!
//! DOM-free core of the review desk: list querying and pagination, page
//! selection and bulk actions, the submission wizard, the grading form, and
//! the detail/preview model.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `client` crate binds these types to Leptos signals and `gloo-net`;
//! the `cli` crate drives the same state machines over `reqwest`. Nothing in
//! here touches the browser, so every rule is unit-testable natively.

pub mod api;
pub mod bulk;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod grading;
pub mod model;
pub mod preview;
pub mod query;
pub mod selection;
pub mod store;
pub mod text;
pub mod wizard;

pub use error::{ApiError, ValidationError};
