//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render review-desk surfaces while reading/writing shared state
//! from Leptos context providers. Business rules stay in the `workflow` crate.

pub mod author_editor;
pub mod bulk_toolbar;
pub mod detail_panel;
pub mod grading_modal;
pub mod list_controls;
pub mod pdf_drop_zone;
pub mod pdf_preview;
pub mod submission_table;
pub mod toast_stack;
