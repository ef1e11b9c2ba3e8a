//! Grading form: one paired number/slider field per criterion, live
//! aggregates, a persisted draft, and sequential score submission.
//!
//! PERSISTENCE
//! ===========
//! Every score or comment change writes the whole draft to
//! `grading_state_<entityId>`. Building a form restores it. Submitting or
//! resetting removes it. Tabs are not coordinated; the last write wins.
//!
//! SUBMISSION ORDER
//! ================
//! All fields are validated first. Scores are then posted one criterion at a
//! time, the entity is moved to `ACCEPTED`, and only then is the draft
//! cleared. The first failing request stops the sequence and keeps the draft.

#[cfg(test)]
#[path = "grading_test.rs"]
mod grading_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{GradingApi, Resource, ReviewApi};
use crate::error::{ApiError, ValidationError};
use crate::model::{ReviewStatus, deserialize_id};
use crate::store::{KeyValueStore, grading_draft_key, load_json, save_json};

/// One scoring criterion as served by `grading-types`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub criteria: String,
    #[serde(default)]
    pub description: Option<String>,
    pub min_score: f64,
    pub max_score: f64,
}

/// Body of one posted grading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub grading_type_id: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Per-field indicator next to the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
    Empty,
}

/// Arrow-key step direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDir {
    Up,
    Down,
}

/// Stored value of one field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftEntry {
    pub score: Option<f64>,
    pub comment: String,
}

/// Persisted form state keyed by criterion id.
pub type GradingDraft = BTreeMap<String, DraftEntry>;

/// Render a score without a trailing `.0` for whole numbers.
pub fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Number input and slider for one criterion.
///
/// `raw` is what the number input shows. `value` is its parse, which may sit
/// outside the bounds until the field is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreField {
    criterion: Criterion,
    raw: String,
    value: Option<f64>,
    comment: String,
    comment_open: bool,
}

impl ScoreField {
    pub fn new(criterion: Criterion) -> Self {
        Self { criterion, raw: String::new(), value: None, comment: String::new(), comment_open: false }
    }

    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    pub fn id(&self) -> &str {
        &self.criterion.id
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn comment_open(&self) -> bool {
        self.comment_open
    }

    pub fn toggle_comment(&mut self) {
        self.comment_open = !self.comment_open;
    }

    fn clamp(&self, value: f64) -> f64 {
        let (min, max) = (self.criterion.min_score, self.criterion.max_score);
        if max < min { min } else { value.clamp(min, max) }
    }

    fn store_value(&mut self, value: Option<f64>) {
        self.value = value;
        self.raw = value.map(format_score).unwrap_or_default();
    }

    /// Typed input. Kept as entered so an out-of-range value can be flagged.
    pub fn set_from_input(&mut self, raw: &str) {
        self.raw = raw.trim().to_owned();
        self.value = if self.raw.is_empty() { None } else { self.raw.parse::<f64>().ok().filter(|v| v.is_finite()) };
    }

    pub fn set_from_slider(&mut self, value: f64) {
        let clamped = self.clamp(value);
        self.store_value(Some(clamped));
    }

    /// Clamp the typed value into bounds, as on change/blur.
    pub fn commit(&mut self) {
        if let Some(value) = self.value {
            let clamped = self.clamp(value);
            self.store_value(Some(clamped));
        }
    }

    /// Arrow keys move by one within bounds. An empty field starts at the minimum.
    pub fn step(&mut self, dir: StepDir) {
        let next = match (self.value, dir) {
            (None, _) => self.criterion.min_score,
            (Some(v), StepDir::Up) => v + 1.0,
            (Some(v), StepDir::Down) => v - 1.0,
        };
        let clamped = self.clamp(next);
        self.store_value(Some(clamped));
    }

    pub fn set_comment(&mut self, text: &str) {
        self.comment = text.to_owned();
    }

    /// Position the slider shows: the clamped value, or the minimum when empty.
    pub fn slider_value(&self) -> f64 {
        self.value.map_or(self.criterion.min_score, |v| self.clamp(v))
    }

    /// Fill fraction in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let Some(value) = self.value else {
            return 0.0;
        };
        let (min, max) = (self.criterion.min_score, self.criterion.max_score);
        if max <= min {
            return 1.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }

    pub fn validity(&self) -> Validity {
        if self.raw.is_empty() {
            return Validity::Empty;
        }
        match self.value {
            Some(v) if v >= self.criterion.min_score && v <= self.criterion.max_score => Validity::Valid,
            _ => Validity::Invalid,
        }
    }

    fn draft_entry(&self) -> DraftEntry {
        DraftEntry { score: self.value, comment: self.comment.clone() }
    }

    fn restore(&mut self, entry: &DraftEntry) {
        self.store_value(entry.score.filter(|v| v.is_finite()));
        self.comment.clone_from(&entry.comment);
        self.comment_open = !self.comment.is_empty();
    }
}

/// Aggregates driving the progress bar and live region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GradingStats {
    pub filled: usize,
    pub criteria: usize,
    pub total: f64,
    pub average: f64,
    pub fill_ratio: f64,
}

impl GradingStats {
    /// Screen-reader announcement.
    pub fn live_text(&self) -> String {
        if self.filled == 0 {
            return format!("0 of {} criteria scored.", self.criteria);
        }
        format!(
            "{} of {} criteria scored. Total {}, average {:.2}.",
            self.filled,
            self.criteria,
            format_score(self.total),
            self.average
        )
    }
}

/// Failures of [`GradingForm::submit`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GradingError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Grading modal state for one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct GradingForm {
    resource: Resource,
    entity_id: String,
    fields: Vec<ScoreField>,
}

impl GradingForm {
    /// One field per criterion, restored from any stored draft.
    pub fn build<S>(resource: Resource, entity_id: &str, criteria: Vec<Criterion>, store: &S) -> Self
    where
        S: KeyValueStore + ?Sized,
    {
        let draft: GradingDraft = load_json(store, &grading_draft_key(entity_id)).unwrap_or_default();
        let fields = criteria
            .into_iter()
            .map(|criterion| {
                let mut field = ScoreField::new(criterion);
                if let Some(entry) = draft.get(field.id()) {
                    field.restore(entry);
                }
                field
            })
            .collect();
        Self { resource, entity_id: entity_id.to_owned(), fields }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn fields(&self) -> &[ScoreField] {
        &self.fields
    }

    pub fn field(&self, criterion_id: &str) -> Option<&ScoreField> {
        self.fields.iter().find(|f| f.id() == criterion_id)
    }

    /// Apply `edit` to one field and persist the draft. Unknown ids are ignored.
    fn edit<S, F>(&mut self, store: &S, criterion_id: &str, edit: F)
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&mut ScoreField),
    {
        let Some(field) = self.fields.iter_mut().find(|f| f.id() == criterion_id) else {
            return;
        };
        edit(field);
        self.persist(store);
    }

    pub fn set_input<S: KeyValueStore + ?Sized>(&mut self, store: &S, criterion_id: &str, raw: &str) {
        self.edit(store, criterion_id, |f| f.set_from_input(raw));
    }

    pub fn commit<S: KeyValueStore + ?Sized>(&mut self, store: &S, criterion_id: &str) {
        self.edit(store, criterion_id, ScoreField::commit);
    }

    pub fn set_slider<S: KeyValueStore + ?Sized>(&mut self, store: &S, criterion_id: &str, value: f64) {
        self.edit(store, criterion_id, |f| f.set_from_slider(value));
    }

    pub fn step<S: KeyValueStore + ?Sized>(&mut self, store: &S, criterion_id: &str, dir: StepDir) {
        self.edit(store, criterion_id, |f| f.step(dir));
    }

    pub fn set_comment<S: KeyValueStore + ?Sized>(&mut self, store: &S, criterion_id: &str, text: &str) {
        self.edit(store, criterion_id, |f| f.set_comment(text));
    }

    pub fn toggle_comment(&mut self, criterion_id: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.id() == criterion_id) {
            field.toggle_comment();
        }
    }

    fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) {
        let draft: GradingDraft = self.fields.iter().map(|f| (f.id().to_owned(), f.draft_entry())).collect();
        save_json(store, &grading_draft_key(&self.entity_id), &draft);
    }

    pub fn aggregate(&self) -> GradingStats {
        let values: Vec<f64> = self.fields.iter().filter_map(ScoreField::value).collect();
        let filled = values.len();
        let criteria = self.fields.len();
        let total: f64 = values.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let (average, fill_ratio) = (
            if filled == 0 { 0.0 } else { total / filled as f64 },
            if criteria == 0 { 0.0 } else { filled as f64 / criteria as f64 },
        );
        GradingStats { filled, criteria, total, average, fill_ratio }
    }

    /// Every field must hold an in-range number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ScoresOutOfRange`] naming the offending criterion ids.
    pub fn validate(&self) -> Result<Vec<ScoreRecord>, ValidationError> {
        let offending: Vec<String> =
            self.fields.iter().filter(|f| f.validity() != Validity::Valid).map(|f| f.id().to_owned()).collect();
        if !offending.is_empty() {
            return Err(ValidationError::ScoresOutOfRange { criteria: offending });
        }
        Ok(self
            .fields
            .iter()
            .filter_map(|f| {
                f.value().map(|score| ScoreRecord {
                    grading_type_id: f.id().to_owned(),
                    score,
                    comments: Some(f.comment().trim().to_owned()).filter(|c| !c.is_empty()),
                })
            })
            .collect())
    }

    /// Post every score, accept the entity, then drop the stored draft.
    ///
    /// # Errors
    ///
    /// Returns the validation failure before any request, or the first API
    /// failure. The draft survives either way.
    pub async fn submit<A, S>(&self, api: &A, store: &S) -> Result<usize, GradingError>
    where
        A: GradingApi + ReviewApi + ?Sized,
        S: KeyValueStore + ?Sized,
    {
        let records = self.validate()?;
        for record in &records {
            tracing::debug!(entity = %self.entity_id, criterion = %record.grading_type_id, "posting score");
            api.post_score(self.resource, &self.entity_id, record).await?;
        }
        api.update_status(self.resource, &self.entity_id, ReviewStatus::Accepted).await?;
        store.remove(&grading_draft_key(&self.entity_id));
        tracing::info!(entity = %self.entity_id, scores = records.len(), "grading submitted");
        Ok(records.len())
    }

    /// Clear every input and comment plus the stored draft. Server state is untouched.
    pub fn reset<S: KeyValueStore + ?Sized>(&mut self, store: &S) {
        for field in &mut self.fields {
            field.store_value(None);
            field.comment.clear();
            field.comment_open = false;
        }
        store.remove(&grading_draft_key(&self.entity_id));
    }
}

/// What a key press inside the modal should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusAction {
    /// Move focus to the focusable element at this index.
    Focus(usize),
    Close,
    /// Let the browser handle the key.
    Pass,
}

/// Focus trap of a modal: `Closed -> open -> trapped -> close -> restore`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalFocus {
    open: bool,
    restore_to: Option<String>,
    current: usize,
}

impl ModalFocus {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Remember the element that had focus and put focus on the first control.
    pub fn open(&mut self, previously_focused: Option<String>) -> FocusAction {
        self.open = true;
        self.restore_to = previously_focused;
        self.current = 0;
        FocusAction::Focus(0)
    }

    /// Keyboard handling while open. `focusable` is the current control count.
    pub fn on_key(&mut self, key: &str, shift: bool, focusable: usize) -> FocusAction {
        if !self.open {
            return FocusAction::Pass;
        }
        match key {
            "Escape" => FocusAction::Close,
            "Tab" if focusable > 0 => {
                let current = self.current.min(focusable - 1);
                self.current = if shift { (current + focusable - 1) % focusable } else { (current + 1) % focusable };
                FocusAction::Focus(self.current)
            }
            _ => FocusAction::Pass,
        }
    }

    /// Track focus moved by mouse clicks inside the modal.
    pub fn focused(&mut self, index: usize) {
        self.current = index;
    }

    /// Close the trap and hand back the element id to refocus.
    pub fn close(&mut self) -> Option<String> {
        self.open = false;
        self.current = 0;
        self.restore_to.take()
    }
}
