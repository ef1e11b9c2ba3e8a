use workflow::model::VerifierRef;

use super::*;

fn submission_with(verifier_ids: &[&str]) -> Submission {
    Submission {
        id: "7".to_owned(),
        verifiers: verifier_ids.iter().map(|id| VerifierRef { id: (*id).to_owned(), name: format!("V{id}") }).collect(),
        ..Submission::default()
    }
}

#[test]
fn linked_verifier_is_detected() {
    let submission = submission_with(&["1", "4"]);
    assert!(is_linked(&submission, "4"));
    assert!(!is_linked(&submission, "2"));
}

#[test]
fn verifier_label_falls_back_to_id() {
    let named = Verifier { id: "3".to_owned(), name: "Dr. Ruiz".to_owned(), email: None, assigned_count: 2 };
    assert_eq!(verifier_label(&named), "Dr. Ruiz (2 assigned)");

    let unnamed = Verifier { id: "9".to_owned(), ..Verifier::default() };
    assert_eq!(verifier_label(&unnamed), "9 (0 assigned)");
}

#[test]
fn cleared_verifier_reads_as_none() {
    let mut dual = DualSelection::<Submission, Verifier>::default();
    dual.select_secondary(Verifier { id: "3".to_owned(), name: "Dr. Ruiz".to_owned(), ..Verifier::default() });
    assert_eq!(verifier_status(dual.secondary()), "Verifier: Dr. Ruiz");
    dual.clear_secondary();
    assert_eq!(verifier_status(dual.secondary()), "No verifier selected");
}
