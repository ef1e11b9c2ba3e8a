//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};
use workflow::api::Resource;
use workflow::config::ClientConfig;

use crate::components::toast_stack::ToastStack;
use crate::pages::{assign::AssignPage, submissions::SubmissionsPage, submit::SubmitPage};
use crate::state::{toast::ToastState, ui::UiState};

/// Root application component.
///
/// Provides the shared config, toast and busy-indicator contexts and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(ClientConfig::default());
    provide_context(RwSignal::new(ToastState::default()));
    provide_context(RwSignal::new(UiState::default()));

    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <Stylesheet id="leptos" href="/pkg/review-desk.css"/>
        <Title text="Review Desk"/>

        <Router>
            <nav class="top-nav">
                <a href="/abstracts">"Abstracts"</a>
                <a href="/best-papers">"Best papers"</a>
                <a href="/assign">"Assign verifiers"</a>
                <a href="/submit">"New submission"</a>
                <span class="top-nav__spacer"></span>
                <Show when=move || ui.get().is_busy()>
                    <span class="top-nav__busy" role="status">"Loading..."</span>
                </Show>
            </nav>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/abstracts"/> }/>
                    <Route
                        path=StaticSegment("abstracts")
                        view=|| view! { <SubmissionsPage resource=Resource::Abstracts/> }
                    />
                    <Route
                        path=StaticSegment("best-papers")
                        view=|| view! { <SubmissionsPage resource=Resource::BestPapers/> }
                    />
                    <Route path=StaticSegment("assign") view=AssignPage/>
                    <Route path=StaticSegment("submit") view=SubmitPage/>
                </Routes>
            </main>
            <ToastStack/>
        </Router>
    }
}
