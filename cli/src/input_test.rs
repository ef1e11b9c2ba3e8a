use serde_json::json;
use workflow::api::Resource;
use workflow::grading::Criterion;
use workflow::store::MemoryStore;
use workflow::wizard::{Encoding, SubmitMode};

use super::*;

fn criterion(id: &str) -> Criterion {
    Criterion { id: id.to_owned(), criteria: format!("C{id}"), description: None, min_score: 0.0, max_score: 10.0 }
}

fn submission_json() -> serde_json::Value {
    json!({
        "title": "Tidal energy in estuaries",
        "category_id": 4,
        "authors": [
            { "name": "Ana Ruiz", "email": "ana@example.org", "is_presenter": true, "is_corresponding": true },
            { "name": "Li Wei" }
        ],
        "sections": { "introduction": "Estuaries are shallow.", "results": "Output doubled." }
    })
}

// =============================================================
// Scores
// =============================================================

#[test]
fn scores_accept_plain_and_detailed_entries() {
    let scores = parse_scores(r#"{"1": 7, "2": {"score": 4.5, "comment": "thin methods"}}"#).unwrap();
    assert_eq!(scores["1"], ScoreInput::Plain(7.0));
    assert_eq!(scores["2"].score(), 4.5);
    assert_eq!(scores["2"].comment(), Some("thin methods"));
}

#[test]
fn applied_scores_validate() {
    let store = MemoryStore::new();
    let mut form = GradingForm::build(Resource::Abstracts, "9", vec![criterion("1"), criterion("2")], &store);
    let scores = parse_scores(r#"{"1": 7, "2": {"score": 3, "comment": "ok"}}"#).unwrap();

    apply_scores(&mut form, &store, &scores).unwrap();

    let records = form.validate().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].comments.as_deref(), Some("ok"));
}

#[test]
fn unknown_criterion_is_rejected() {
    let store = MemoryStore::new();
    let mut form = GradingForm::build(Resource::Abstracts, "9", vec![criterion("1")], &store);
    let scores = parse_scores(r#"{"5": 1}"#).unwrap();

    let result = apply_scores(&mut form, &store, &scores);

    assert!(matches!(result, Err(CliError::UnknownCriterion(id)) if id == "5"));
}

#[test]
fn out_of_range_score_fails_validation() {
    let store = MemoryStore::new();
    let mut form = GradingForm::build(Resource::Abstracts, "9", vec![criterion("1")], &store);
    apply_scores(&mut form, &store, &parse_scores(r#"{"1": 12}"#).unwrap()).unwrap();

    assert!(matches!(form.validate(), Err(ValidationError::ScoresOutOfRange { .. })));
}

// =============================================================
// Submissions
// =============================================================

#[test]
fn submission_file_walks_to_preview() {
    let file = parse_submission(&submission_json().to_string()).unwrap();

    let wizard = walk_wizard(&ClientConfig::default(), file, None).unwrap();

    assert_eq!(wizard.step(), WizardStep::Preview);
    let request = wizard.prepare_submission(SubmitMode::Final).unwrap();
    assert_eq!(request.encoding, Encoding::Json);
    assert_eq!(request.payload_json()["category_id"], "4");
}

#[test]
fn missing_presenter_stops_the_walk() {
    let mut value = submission_json();
    value["authors"][0]["is_presenter"] = json!(false);
    let file = parse_submission(&value.to_string()).unwrap();

    let result = walk_wizard(&ClientConfig::default(), file, None);

    assert_eq!(result.unwrap_err(), ValidationError::PresenterCount { count: 0 });
}

#[test]
fn attached_pdf_switches_to_multipart() {
    let file = parse_submission(&submission_json().to_string()).unwrap();
    let pdf = pdf_attachment("poster.PDF", 1024);

    let wizard = walk_wizard(&ClientConfig::default(), file, Some(pdf)).unwrap();

    let request = wizard.prepare_submission(SubmitMode::Draft).unwrap();
    assert_eq!(request.encoding, Encoding::Multipart);
}

#[test]
fn non_pdf_attachment_is_rejected_up_front() {
    let file = parse_submission(&submission_json().to_string()).unwrap();

    let result = walk_wizard(&ClientConfig::default(), file, Some(pdf_attachment("notes.docx", 10)));

    assert!(matches!(result, Err(ValidationError::PdfType { .. })));
}
