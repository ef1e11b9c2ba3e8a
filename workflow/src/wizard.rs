//! Five-step submission wizard with per-step validation gates.
//!
//! STATE MACHINE
//! =============
//! `Basics -> Authors -> Content -> Attachment -> Preview`, strictly linear.
//! `next` runs the gate of the current step and only then advances; `prev`
//! never validates. Which panel is visible is a pure function of the step.
//!
//! The validation functions take plain data so they can be reused outside the
//! wizard (the CLI validates JSON input through them).

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ValidationError;
use crate::model::{Author, Category, ContentSections, ReviewStatus};
use crate::text::{count_words, markdown_word_count, render_markdown_html};

/// Multipart field carrying the JSON payload.
pub const MULTIPART_DATA_FIELD: &str = "data";
/// Multipart field carrying the PDF.
pub const MULTIPART_FILE_FIELD: &str = "file";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern compiles"));

/// Wizard steps in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WizardStep {
    #[default]
    Basics,
    Authors,
    Content,
    Attachment,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] =
        [WizardStep::Basics, WizardStep::Authors, WizardStep::Content, WizardStep::Attachment, WizardStep::Preview];

    /// 1-based step number for the stepper header.
    pub fn number(self) -> usize {
        match self {
            Self::Basics => 1,
            Self::Authors => 2,
            Self::Content => 3,
            Self::Attachment => 4,
            Self::Preview => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Basics => "Basic information",
            Self::Authors => "Authors",
            Self::Content => "Abstract content",
            Self::Attachment => "Attachment",
            Self::Preview => "Preview",
        }
    }

    /// Transition table: the step after this one, if any.
    pub fn following(self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Authors),
            Self::Authors => Some(Self::Content),
            Self::Content => Some(Self::Attachment),
            Self::Attachment => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    pub fn preceding(self) -> Option<Self> {
        match self {
            Self::Basics => None,
            Self::Authors => Some(Self::Basics),
            Self::Content => Some(Self::Authors),
            Self::Attachment => Some(Self::Content),
            Self::Preview => Some(Self::Attachment),
        }
    }
}

/// Author role enforced as exactly-one across rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorRole {
    Presenter,
    Corresponding,
}

/// Metadata of a picked or dropped file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfAttachment {
    pub name: String,
    pub mime: String,
    pub size_bytes: u64,
}

/// Accept a file iff it looks like a PDF and fits in `max_mb`.
///
/// # Errors
///
/// Returns [`ValidationError::PdfType`] or [`ValidationError::PdfTooLarge`].
pub fn validate_pdf(file: &PdfAttachment, max_mb: u32) -> Result<(), ValidationError> {
    let is_pdf = file.mime == "application/pdf" || file.name.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(ValidationError::PdfType { name: file.name.clone() });
    }
    if file.size_bytes > u64::from(max_mb) * 1024 * 1024 {
        return Err(ValidationError::PdfTooLarge { size_bytes: file.size_bytes, max_mb });
    }
    Ok(())
}

/// Step 1 gate.
///
/// # Errors
///
/// Returns the first failing title/category rule.
pub fn validate_basics(title: &str, category: Option<&Category>, word_limit: usize) -> Result<(), ValidationError> {
    let words = count_words(title);
    if words == 0 {
        return Err(ValidationError::TitleMissing);
    }
    if words > word_limit {
        return Err(ValidationError::TitleTooLong { words, limit: word_limit });
    }
    if category.is_none() {
        return Err(ValidationError::CategoryMissing);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Step 2 gate: a named author, well-formed emails, one presenter, one corresponding author.
///
/// # Errors
///
/// Returns the first failing author rule.
pub fn validate_authors(authors: &[Author]) -> Result<(), ValidationError> {
    if !authors.iter().any(|a| !a.name.trim().is_empty()) {
        return Err(ValidationError::NoNamedAuthor);
    }
    for (index, author) in authors.iter().enumerate() {
        let Some(email) = author.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
            continue;
        };
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail { row: index + 1, email: email.to_owned() });
        }
    }
    // Unnamed rows are dropped from the payload, so their roles do not count.
    let named = || authors.iter().filter(|a| !a.name.trim().is_empty());
    let presenters = named().filter(|a| a.is_presenter).count();
    if presenters != 1 {
        return Err(ValidationError::PresenterCount { count: presenters });
    }
    let corresponding = named().filter(|a| a.is_corresponding).count();
    if corresponding != 1 {
        return Err(ValidationError::CorrespondingCount { count: corresponding });
    }
    Ok(())
}

/// Combined reader-visible word count of the five sections.
pub fn content_word_count(sections: &ContentSections) -> usize {
    sections.iter().map(|(_, body)| markdown_word_count(body)).sum()
}

/// Step 3 gate. Returns the word count on success.
///
/// # Errors
///
/// Returns [`ValidationError::ContentEmpty`] or [`ValidationError::ContentTooLong`].
pub fn validate_content(sections: &ContentSections, word_limit: usize) -> Result<usize, ValidationError> {
    let words = content_word_count(sections);
    if words == 0 {
        return Err(ValidationError::ContentEmpty);
    }
    if words > word_limit {
        return Err(ValidationError::ContentTooLong { words, limit: word_limit });
    }
    Ok(words)
}

/// Everything the wizard collects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub title: String,
    pub category: Option<Category>,
    pub authors: Vec<Author>,
    pub sections: ContentSections,
    pub attachment: Option<PdfAttachment>,
}

impl Default for SubmissionDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: None,
            authors: vec![Author::default()],
            sections: ContentSections::default(),
            attachment: None,
        }
    }
}

/// Final submit or save-as-draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    Final,
    Draft,
}

impl SubmitMode {
    pub fn status(self) -> ReviewStatus {
        match self {
            Self::Final => ReviewStatus::Pending,
            Self::Draft => ReviewStatus::Draft,
        }
    }
}

/// Request body encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// `application/json`.
    Json,
    /// `multipart/form-data` with [`MULTIPART_DATA_FIELD`] and [`MULTIPART_FILE_FIELD`].
    Multipart,
}

/// JSON payload of a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub title: String,
    pub category_id: Option<String>,
    pub authors: Vec<Author>,
    #[serde(flatten)]
    pub sections: ContentSections,
    pub status: ReviewStatus,
}

/// A validated, encoded-ready submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub mode: SubmitMode,
    pub encoding: Encoding,
    pub payload: SubmissionPayload,
    pub file_name: Option<String>,
}

impl SubmissionRequest {
    pub fn payload_json(&self) -> Value {
        serde_json::to_value(&self.payload).unwrap_or(Value::Null)
    }
}

/// One author row in the preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewAuthor {
    pub name: String,
    pub email: Option<String>,
    pub affiliation: Option<String>,
    pub badges: Vec<&'static str>,
}

/// Read-only summary shown on the last step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPreview {
    pub title: String,
    pub category: String,
    pub authors: Vec<PreviewAuthor>,
    /// Section label and sanitized HTML, empty sections omitted.
    pub sections: Vec<(&'static str, String)>,
    pub word_count: usize,
    pub attachment_name: Option<String>,
}

impl SubmissionPreview {
    pub fn from_draft(draft: &SubmissionDraft) -> Self {
        let authors = draft
            .authors
            .iter()
            .filter(|a| !a.name.trim().is_empty())
            .map(|a| {
                let mut badges = Vec::new();
                if a.is_presenter {
                    badges.push("Presenter");
                }
                if a.is_corresponding {
                    badges.push("Corresponding");
                }
                PreviewAuthor {
                    name: a.name.trim().to_owned(),
                    email: a.email.clone().filter(|e| !e.trim().is_empty()),
                    affiliation: a.affiliation.clone().filter(|e| !e.trim().is_empty()),
                    badges,
                }
            })
            .collect();
        let sections = draft
            .sections
            .iter()
            .filter(|(_, body)| !body.trim().is_empty())
            .map(|(kind, body)| (kind.label(), render_markdown_html(body)))
            .collect();
        Self {
            title: draft.title.trim().to_owned(),
            category: draft.category.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            authors,
            sections,
            word_count: content_word_count(&draft.sections),
            attachment_name: draft.attachment.as_ref().map(|f| f.name.clone()),
        }
    }
}

/// Wizard state: current step, collected draft and limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: SubmissionDraft,
    preview: Option<SubmissionPreview>,
    max_pdf_mb: u32,
    title_word_limit: usize,
    content_word_limit: usize,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Wizard {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            step: WizardStep::Basics,
            draft: SubmissionDraft::default(),
            preview: None,
            max_pdf_mb: config.max_pdf_mb,
            title_word_limit: config.title_word_limit,
            content_word_limit: config.content_word_limit,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_visible(&self, step: WizardStep) -> bool {
        self.step == step
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubmissionDraft {
        &mut self.draft
    }

    pub fn preview(&self) -> Option<&SubmissionPreview> {
        self.preview.as_ref()
    }

    pub fn max_pdf_mb(&self) -> u32 {
        self.max_pdf_mb
    }

    pub fn content_word_limit(&self) -> usize {
        self.content_word_limit
    }

    /// Live count for the content step's counter.
    pub fn content_word_count(&self) -> usize {
        content_word_count(&self.draft.sections)
    }

    /// Run the current step's gate and advance. Stays put on failure.
    ///
    /// # Errors
    ///
    /// Returns the gate's [`ValidationError`].
    pub fn next(&mut self) -> Result<WizardStep, ValidationError> {
        self.gate(self.step)?;
        if let Some(next) = self.step.following() {
            if next == WizardStep::Preview {
                self.preview = Some(SubmissionPreview::from_draft(&self.draft));
            }
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn prev(&mut self) -> WizardStep {
        if let Some(prev) = self.step.preceding() {
            self.step = prev;
        }
        self.step
    }

    fn gate(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::Basics => {
                validate_basics(&self.draft.title, self.draft.category.as_ref(), self.title_word_limit)
            }
            WizardStep::Authors => validate_authors(&self.draft.authors),
            WizardStep::Content => validate_content(&self.draft.sections, self.content_word_limit).map(|_| ()),
            WizardStep::Attachment | WizardStep::Preview => Ok(()),
        }
    }

    pub fn set_presenter(&mut self, index: usize) {
        self.set_role(index, AuthorRole::Presenter, true);
    }

    pub fn set_corresponding(&mut self, index: usize) {
        self.set_role(index, AuthorRole::Corresponding, true);
    }

    pub fn add_author(&mut self) {
        self.draft.authors.push(Author::default());
    }

    pub fn remove_author(&mut self, index: usize) {
        if index < self.draft.authors.len() {
            self.draft.authors.remove(index);
        }
    }

    /// Role checkbox change. Checking one row unchecks the role on every other row.
    pub fn set_role(&mut self, index: usize, role: AuthorRole, checked: bool) {
        for (i, author) in self.draft.authors.iter_mut().enumerate() {
            let flag = match role {
                AuthorRole::Presenter => &mut author.is_presenter,
                AuthorRole::Corresponding => &mut author.is_corresponding,
            };
            if i == index {
                *flag = checked;
            } else if checked {
                *flag = false;
            }
        }
    }

    /// Shared path for file-picker and drag-and-drop. A rejected file clears the attachment.
    ///
    /// # Errors
    ///
    /// Returns the PDF validation error for the inline message and toast.
    pub fn attach_pdf(&mut self, file: PdfAttachment) -> Result<(), ValidationError> {
        let result = validate_pdf(&file, self.max_pdf_mb);
        self.draft.attachment = result.is_ok().then_some(file);
        self.refresh_preview();
        result
    }

    pub fn clear_pdf(&mut self) {
        self.draft.attachment = None;
        self.refresh_preview();
    }

    // A file may be attached or removed while the preview is already built.
    fn refresh_preview(&mut self) {
        if self.preview.is_some() {
            self.preview = Some(SubmissionPreview::from_draft(&self.draft));
        }
    }

    /// Re-validate authors, roles and the attachment, then pick the encoding.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule; nothing should be sent in that case.
    pub fn prepare_submission(&self, mode: SubmitMode) -> Result<SubmissionRequest, ValidationError> {
        validate_authors(&self.draft.authors)?;
        if let Some(file) = &self.draft.attachment {
            validate_pdf(file, self.max_pdf_mb)?;
        }

        let payload = SubmissionPayload {
            title: self.draft.title.trim().to_owned(),
            category_id: self.draft.category.as_ref().map(|c| c.id.clone()),
            authors: self.draft.authors.iter().filter(|a| !a.name.trim().is_empty()).cloned().collect(),
            sections: self.draft.sections.clone(),
            status: mode.status(),
        };
        let encoding = if self.draft.attachment.is_some() { Encoding::Multipart } else { Encoding::Json };
        Ok(SubmissionRequest {
            mode,
            encoding,
            payload,
            file_name: self.draft.attachment.as_ref().map(|f| f.name.clone()),
        })
    }
}
