//! JSON input files: grading scores and new submissions.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::BTreeMap;

use serde::Deserialize;
use workflow::config::ClientConfig;
use workflow::error::ValidationError;
use workflow::grading::{GradingForm, format_score};
use workflow::model::{Author, Category, ContentSections, deserialize_id};
use workflow::store::KeyValueStore;
use workflow::wizard::{PdfAttachment, Wizard, WizardStep};

use crate::error::CliError;

/// One entry of a scores file: a bare number or `{score, comment}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScoreInput {
    Plain(f64),
    Detailed {
        score: f64,
        #[serde(default)]
        comment: Option<String>,
    },
}

impl ScoreInput {
    pub fn score(&self) -> f64 {
        match self {
            Self::Plain(score) | Self::Detailed { score, .. } => *score,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Detailed { comment, .. } => comment.as_deref(),
        }
    }
}

/// Parse `{"<criterion id>": 4, "<id>": {"score": 3, "comment": "..."}}`.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] for malformed input.
pub fn parse_scores(text: &str) -> Result<BTreeMap<String, ScoreInput>, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Type every score into its field the way the modal's number input does.
///
/// # Errors
///
/// Returns [`CliError::UnknownCriterion`] for ids the form does not have.
pub fn apply_scores<S>(form: &mut GradingForm, store: &S, scores: &BTreeMap<String, ScoreInput>) -> Result<(), CliError>
where
    S: KeyValueStore + ?Sized,
{
    for (id, input) in scores {
        if form.field(id).is_none() {
            return Err(CliError::UnknownCriterion(id.clone()));
        }
        form.set_input(store, id, &format_score(input.score()));
        if let Some(comment) = input.comment() {
            form.set_comment(store, id, comment);
        }
    }
    Ok(())
}

/// New submission as read from `--input`.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmissionFile {
    pub title: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub authors: Vec<Author>,
    #[serde(default)]
    pub sections: ContentSections,
}

/// Parse a submission file.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] for malformed input.
pub fn parse_submission(text: &str) -> Result<SubmissionFile, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Attachment metadata for a file on disk.
pub fn pdf_attachment(name: &str, size_bytes: u64) -> PdfAttachment {
    let mime = if name.to_lowercase().ends_with(".pdf") { "application/pdf" } else { "application/octet-stream" };
    PdfAttachment { name: name.to_owned(), mime: mime.to_owned(), size_bytes }
}

/// Fill a wizard from the file and walk it to the preview step, so every
/// gate the browser enforces runs here too.
///
/// # Errors
///
/// Returns the first failing gate.
pub fn walk_wizard(
    config: &ClientConfig,
    file: SubmissionFile,
    pdf: Option<PdfAttachment>,
) -> Result<Wizard, ValidationError> {
    let mut wizard = Wizard::new(config);
    {
        let draft = wizard.draft_mut();
        draft.title = file.title;
        draft.category = Some(Category {
            name: file.category_name.unwrap_or_else(|| file.category_id.clone()),
            id: file.category_id,
        });
        draft.authors = file.authors;
        draft.sections = file.sections;
    }
    if let Some(pdf) = pdf {
        wizard.attach_pdf(pdf)?;
    }
    while wizard.step() != WizardStep::Preview {
        wizard.next()?;
    }
    Ok(wizard)
}
