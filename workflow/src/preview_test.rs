use std::cell::RefCell;

use super::*;
use crate::model::ContentSections;

fn submission() -> Submission {
    Submission {
        id: "9".into(),
        title: "Study of X".into(),
        category: Some("Cardiology".into()),
        status: ReviewStatus::Pending,
        submitter: Some("A. Singh".into()),
        submitted_at: Some("2024-03-01T10:00:00Z".into()),
        review_phase: Some(2),
        content: Some("Plain *body*".into()),
        pdf_path: Some("uploads/9.pdf".into()),
        ..Submission::default()
    }
}

// =============================================================================
// Summary
// =============================================================================

#[test]
fn summary_projects_fields() {
    let summary = DetailSummary::from_submission(&submission());
    assert_eq!(summary.title, "Study of X");
    assert_eq!(summary.tone, BadgeTone::Warning);
    assert_eq!(summary.submitted_on, "2024-03-01");
    assert_eq!(summary.review_phase, "Phase 2");
    assert!(summary.has_pdf);
    assert!(summary.content_html.contains("<em>body</em>"));
    assert_eq!(summary.rows()[2], ("Status", "Pending".to_owned()));
}

#[test]
fn missing_fields_show_placeholder() {
    let summary = DetailSummary::from_submission(&Submission { id: "1".into(), ..Submission::default() });
    assert_eq!(summary.title, "—");
    assert_eq!(summary.category, "—");
    assert_eq!(summary.submitted_on, "—");
    assert_eq!(summary.review_phase, "—");
    assert!(!summary.has_pdf);
    assert!(summary.content_html.is_empty());
}

#[test]
fn sections_take_precedence_over_content() {
    let mut sections = ContentSections::default();
    sections.set(crate::model::SectionKind::Results, "It worked.");
    let summary = DetailSummary::from_submission(&Submission { sections: Some(sections), ..submission() });
    assert!(summary.content_html.starts_with("<h4>Results</h4>"));
    assert!(!summary.content_html.contains("body"));
}

#[test]
fn badge_tones_follow_status() {
    assert_eq!(BadgeTone::for_status(ReviewStatus::Accepted), BadgeTone::Success);
    assert_eq!(BadgeTone::for_status(ReviewStatus::Rejected), BadgeTone::Danger);
    assert_eq!(BadgeTone::for_status(ReviewStatus::Draft), BadgeTone::Secondary);
    assert_eq!(BadgeTone::for_status(ReviewStatus::UnderReview), BadgeTone::Neutral);
}

#[test]
fn raw_html_in_content_is_dropped() {
    let summary = DetailSummary::from_submission(&Submission {
        content: Some("ok <script>alert(1)</script>".into()),
        ..submission()
    });
    assert!(!summary.content_html.contains("<script>"));
}

// =============================================================================
// PDF
// =============================================================================

#[test]
fn classify_known_pdfjs_errors() {
    assert_eq!(PdfError::classify("PasswordException", "No password given"), PdfError::PasswordProtected);
    assert_eq!(PdfError::classify("InvalidPDFException", ""), PdfError::Invalid);
    assert_eq!(PdfError::classify("MissingPDFException", ""), PdfError::Missing);
    assert_eq!(PdfError::classify("UnknownErrorException", "bad xref"), PdfError::Render("bad xref".into()));
    assert_eq!(PdfError::classify("Weird", ""), PdfError::Render("Weird".into()));
}

#[test]
fn preview_state_from_result() {
    let ok: PdfPreviewState<u32> = PdfPreviewState::from_result(Ok(vec![1, 2]));
    assert_eq!(ok, PdfPreviewState::Rendered { pages: vec![1, 2] });
    let failed: PdfPreviewState<u32> = PdfPreviewState::from_result(Err(PdfError::Fetch(404)));
    assert_eq!(failed.error_message().as_deref(), Some("Could not download the PDF (status 404)."));
    assert!(PdfPreviewState::<u32>::Loading.is_loading());
}

struct FakeRenderer {
    pages: u32,
    broken_page: Option<u32>,
    rendered: RefCell<Vec<u32>>,
}

#[async_trait(?Send)]
impl PdfRenderer for FakeRenderer {
    type Document = usize;
    type Page = String;

    async fn open(&self, bytes: Vec<u8>) -> Result<usize, PdfError> {
        if bytes.starts_with(b"%PDF") { Ok(bytes.len()) } else { Err(PdfError::Invalid) }
    }

    fn page_count(&self, _document: &usize) -> u32 {
        self.pages
    }

    async fn render_page(&self, _document: &usize, number: u32) -> Result<String, PdfError> {
        if self.broken_page == Some(number) {
            return Err(PdfError::Render(format!("page {number}")));
        }
        self.rendered.borrow_mut().push(number);
        Ok(format!("canvas-{number}"))
    }
}

#[tokio::test]
async fn renders_every_page_in_order() {
    let renderer = FakeRenderer { pages: 3, broken_page: None, rendered: RefCell::new(Vec::new()) };
    let pages = render_all_pages(&renderer, b"%PDF-1.7".to_vec()).await.unwrap();
    assert_eq!(pages, vec!["canvas-1", "canvas-2", "canvas-3"]);
}

#[tokio::test]
async fn one_bad_page_fails_the_preview() {
    let renderer = FakeRenderer { pages: 3, broken_page: Some(2), rendered: RefCell::new(Vec::new()) };
    let result = render_all_pages(&renderer, b"%PDF-1.7".to_vec()).await;
    assert_eq!(result, Err(PdfError::Render("page 2".into())));
}

#[tokio::test]
async fn invalid_bytes_fail_before_rendering() {
    let renderer = FakeRenderer { pages: 3, broken_page: None, rendered: RefCell::new(Vec::new()) };
    let result = render_all_pages(&renderer, b"hello".to_vec()).await;
    assert_eq!(result, Err(PdfError::Invalid));
    assert!(renderer.rendered.borrow().is_empty());
}
