//! Detail panel model and the PDF preview lifecycle.
//!
//! The summary is a pure projection of a [`Submission`]. The PDF preview is
//! a small state machine driven by an injected [`PdfRenderer`]; every failure
//! stays inside [`PdfPreviewState::Failed`] so the rest of the panel keeps
//! working.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::model::{ReviewStatus, Submission};
use crate::text::render_markdown_html;

const PLACEHOLDER: &str = "—";

/// Colour family of the status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTone {
    Warning,
    Success,
    Danger,
    Secondary,
    Neutral,
}

impl BadgeTone {
    pub fn for_status(status: ReviewStatus) -> Self {
        match status {
            ReviewStatus::Pending => Self::Warning,
            ReviewStatus::Accepted => Self::Success,
            ReviewStatus::Rejected => Self::Danger,
            ReviewStatus::Draft => Self::Secondary,
            ReviewStatus::UnderReview | ReviewStatus::Unknown => Self::Neutral,
        }
    }

    /// CSS modifier used by the badge component.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Warning => "badge badge--warning",
            Self::Success => "badge badge--success",
            Self::Danger => "badge badge--danger",
            Self::Secondary => "badge badge--secondary",
            Self::Neutral => "badge",
        }
    }
}

/// Everything the detail panel shows for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub status: ReviewStatus,
    pub tone: BadgeTone,
    pub submitter: String,
    pub submitted_on: String,
    pub review_phase: String,
    /// Sanitized HTML of the body.
    pub content_html: String,
    pub has_pdf: bool,
}

impl DetailSummary {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            title: non_empty(Some(&submission.title)),
            category: non_empty(submission.category.as_deref()),
            status: submission.status,
            tone: BadgeTone::for_status(submission.status),
            submitter: non_empty(submission.submitter.as_deref()),
            submitted_on: submission.submitted_at.as_deref().map_or_else(|| PLACEHOLDER.to_owned(), format_date),
            review_phase: submission.review_phase.map_or_else(|| PLACEHOLDER.to_owned(), |p| format!("Phase {p}")),
            content_html: content_html(submission),
            has_pdf: submission.pdf_path.as_deref().is_some_and(|p| !p.trim().is_empty()),
        }
    }

    /// Label/value rows for the side panel.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Title", self.title.clone()),
            ("Category", self.category.clone()),
            ("Status", self.status.label().to_owned()),
            ("Submitted by", self.submitter.clone()),
            ("Submitted on", self.submitted_on.clone()),
            ("Review phase", self.review_phase.clone()),
        ]
    }
}

fn non_empty(value: Option<&str>) -> String {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER).to_owned()
}

/// `2024-03-01T10:00:00Z` reads as `2024-03-01`; anything else is shown as sent.
fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    match raw.split_once('T') {
        Some((date, _)) if date.len() == 10 => date.to_owned(),
        _ if raw.is_empty() => PLACEHOLDER.to_owned(),
        _ => raw.to_owned(),
    }
}

fn content_html(submission: &Submission) -> String {
    if let Some(sections) = &submission.sections {
        let html: String = sections
            .iter()
            .filter(|(_, body)| !body.trim().is_empty())
            .map(|(kind, body)| format!("<h4>{}</h4>{}", kind.label(), render_markdown_html(body)))
            .collect();
        if !html.is_empty() {
            return html;
        }
    }
    submission.content.as_deref().map(render_markdown_html).unwrap_or_default()
}

/// Why a PDF could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PdfError {
    #[error("This PDF is password-protected and cannot be previewed.")]
    PasswordProtected,

    #[error("The attached file is not a valid PDF.")]
    Invalid,

    #[error("The PDF file could not be found.")]
    Missing,

    #[error("Could not download the PDF (status {0}).")]
    Fetch(u16),

    #[error("Could not render the PDF: {0}")]
    Render(String),
}

impl PdfError {
    /// Map a PDF.js exception name onto a tailored error.
    pub fn classify(name: &str, message: &str) -> Self {
        match name {
            "PasswordException" => Self::PasswordProtected,
            "InvalidPDFException" => Self::Invalid,
            "MissingPDFException" => Self::Missing,
            _ => Self::Render(if message.is_empty() { name.to_owned() } else { message.to_owned() }),
        }
    }
}

/// Lifecycle of the preview region.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PdfPreviewState<P> {
    #[default]
    Idle,
    Loading,
    Rendered { pages: Vec<P> },
    Failed(PdfError),
}

impl<P> PdfPreviewState<P> {
    pub fn from_result(result: Result<Vec<P>, PdfError>) -> Self {
        match result {
            Ok(pages) => Self::Rendered { pages },
            Err(error) => Self::Failed(error),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Failed(error) => Some(error.to_string()),
            _ => None,
        }
    }
}

/// PDF engine seam. The browser wires PDF.js behind it.
#[async_trait(?Send)]
pub trait PdfRenderer {
    type Document;
    type Page;

    async fn open(&self, bytes: Vec<u8>) -> Result<Self::Document, PdfError>;

    fn page_count(&self, document: &Self::Document) -> u32;

    /// Render one 1-based page.
    async fn render_page(&self, document: &Self::Document, number: u32) -> Result<Self::Page, PdfError>;
}

/// Open `bytes` and render every page concurrently. One failed page fails the preview.
///
/// # Errors
///
/// Returns the open error or the first page error.
pub async fn render_all_pages<R>(renderer: &R, bytes: Vec<u8>) -> Result<Vec<R::Page>, PdfError>
where
    R: PdfRenderer + ?Sized,
{
    let document = renderer.open(bytes).await?;
    let count = renderer.page_count(&document);
    tracing::debug!(pages = count, "rendering pdf preview");
    try_join_all((1..=count).map(|number| renderer.render_page(&document, number))).await
}
