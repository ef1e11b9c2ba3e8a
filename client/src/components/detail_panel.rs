//! Side panel describing the selected submission.

use leptos::prelude::*;
use workflow::preview::{DetailSummary, PdfPreviewState};

use crate::components::pdf_preview::PdfPreview;

/// Summary rows, status badge, content body and PDF preview.
#[component]
pub fn DetailPanel(
    summary: RwSignal<Option<DetailSummary>>,
    pdf: RwSignal<PdfPreviewState<String>>,
    #[prop(optional)] on_grade: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <aside class="detail-panel">
            {move || match summary.get() {
                None => view! { <p class="detail-panel__empty">"Select a submission to see its details."</p> }.into_any(),
                Some(summary) => {
                    let grade_id = summary.id.clone();
                    let button_id = format!("grade-btn-{grade_id}");
                    let has_pdf = summary.has_pdf;
                    let content_html = summary.content_html.clone();
                    view! {
                        <header class="detail-panel__header">
                            <h2>{summary.title.clone()}</h2>
                            <span class=summary.tone.css_class()>{summary.status.label()}</span>
                        </header>
                        <dl class="detail-panel__fields">
                            {summary
                                .rows()
                                .into_iter()
                                .map(|(label, value)| view! {
                                    <dt>{label}</dt>
                                    <dd>{value}</dd>
                                })
                                .collect_view()}
                        </dl>
                        {on_grade.map(|on_grade| view! {
                            <button
                                id=button_id
                                class="btn btn--primary detail-panel__grade"
                                on:click=move |_| on_grade.run(grade_id.clone())
                            >
                                "Grade"
                            </button>
                        })}
                        <section class="detail-panel__content" inner_html=content_html></section>
                        <Show when=move || has_pdf>
                            <PdfPreview state=pdf/>
                        </Show>
                    }
                        .into_any()
                }
            }}
        </aside>
    }
}
