//! Command handlers. Each one drives the same `workflow` types the browser
//! client uses, so validation and batching behave identically.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::Value;
use workflow::api::{AssignmentApi, GradingApi, Resource, ReviewApi, SubmissionApi};
use workflow::bulk::{self, LinkAction, Transition};
use workflow::config::ClientConfig;
use workflow::controller::{ListController, RefreshOutcome};
use workflow::grading::GradingForm;
use workflow::model::{Submission, Verifier};
use workflow::preview::DetailSummary;
use workflow::query::{PAGE_SIZES, PageSize, SortDir};
use workflow::selection::SelectionSet;
use workflow::store::MemoryStore;
use workflow::wizard::SubmitMode;

use crate::error::CliError;
use crate::input::{apply_scores, parse_scores, parse_submission, pdf_attachment, walk_wizard};
use crate::rest::{PdfUpload, RestClient};

/// List filters and paging as parsed from flags.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub status: Option<String>,
    pub verifiers: Option<String>,
    pub page: u32,
    pub page_size: Option<PageSize>,
    pub sort: Option<String>,
    pub dir: SortDir,
}

/// `--page-size` when given, otherwise `REVIEW_PAGE_SIZE` via the config.
pub fn page_size_or_default(flag: Option<PageSize>, config: &ClientConfig) -> PageSize {
    flag.unwrap_or(config.default_page_size)
}

/// clap value parser for `--page-size`.
pub fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: u32 = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    PageSize::try_from(value).map_err(|v| format!("page size must be one of {PAGE_SIZES:?}, got {v}"))
}

/// clap value parser for `--dir`.
pub fn parse_sort_dir(raw: &str) -> Result<SortDir, String> {
    match raw.to_ascii_lowercase().as_str() {
        "asc" => Ok(SortDir::Asc),
        "desc" => Ok(SortDir::Desc),
        other => Err(format!("sort direction must be asc or desc, got {other}")),
    }
}

/// `y`/`yes` in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// One table line: id, status and title.
pub fn format_row(submission: &Submission) -> String {
    format!("{:>6}  {:<13} {}", submission.id, submission.status.as_str(), submission.title)
}

/// Selection set over exactly `ids`, all checked.
pub fn selection_of(ids: &[String]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    selection.sync_visible(ids.iter().cloned());
    selection.select_all_visible();
    selection
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<(), CliError> {
    if assume_yes {
        return Ok(());
    }
    eprint!("{prompt} [y/N] ");
    io::stderr().flush().map_err(|e| CliError::io("stderr", e))?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).map_err(|e| CliError::io("stdin", e))?;
    if is_affirmative(&answer) { Ok(()) } else { Err(CliError::Aborted) }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

pub async fn list(client: &RestClient, resource: Resource, options: ListOptions) -> Result<(), CliError> {
    let mut list = ListController::<Submission>::new(options.page_size.unwrap_or_default());
    let filter_param = if options.verifiers.is_some() { "verifiers" } else { "status" };
    if let Some(filter) = options.status.as_deref().or(options.verifiers.as_deref()) {
        list.set_filter(filter);
    }
    if let Some(search) = &options.search {
        list.set_search(search);
    }
    if let Some(sort) = &options.sort {
        list.toggle_sort(sort);
        if options.dir == SortDir::Desc {
            list.toggle_sort(sort);
        }
    }

    let source = client.listing::<Submission>(client.endpoints().list(resource), filter_param);
    let mut outcome = list.refresh(&source).await;
    if options.page > 1 && matches!(outcome, RefreshOutcome::Applied { .. }) {
        for _ in 1..options.page {
            list.next_page();
        }
        outcome = list.refresh(&source).await;
    }
    if let RefreshOutcome::Failed(error) = outcome {
        return Err(error.into());
    }

    for submission in list.items() {
        println!("{}", format_row(submission));
    }
    println!("{}  ({})", list.stats(), list.pager_text());
    Ok(())
}

pub async fn show(client: &RestClient, resource: Resource, id: &str) -> Result<(), CliError> {
    let submission = client.fetch_submission(resource, id).await?;
    let summary = DetailSummary::from_submission(&submission);
    for (label, value) in summary.rows() {
        println!("{label:>14}: {value}");
    }
    if summary.has_pdf {
        println!("{:>14}: attached", "PDF");
    }
    Ok(())
}

pub async fn transition(
    client: &RestClient,
    resource: Resource,
    transition: Transition,
    ids: &[String],
    assume_yes: bool,
) -> Result<(), CliError> {
    let noun = resource.noun();
    let mut selection = selection_of(ids);
    confirm(&transition.confirm_prompt(selection.len(), noun), assume_yes)?;

    let report = bulk::transition(client, resource, &mut selection, transition).await?;
    println!("{}", report.message(transition, noun));
    if let Some(notice) = report.notice(noun) {
        eprintln!("{notice}");
    }
    for (id, error) in &report.failed {
        eprintln!("  {id}: {error}");
    }
    Ok(())
}

pub async fn link_many(
    client: &RestClient,
    resource: Resource,
    action: LinkAction,
    verifier_id: &str,
    ids: &[String],
) -> Result<(), CliError> {
    let mut selection = selection_of(ids);
    let verifier = Verifier { id: verifier_id.to_owned(), name: format!("verifier {verifier_id}"), ..Verifier::default() };
    let report = bulk::link(client, resource, &mut selection, Some(&verifier), action).await?;
    println!("{}", report.message(resource.noun()));
    Ok(())
}

pub async fn link_one(
    client: &RestClient,
    resource: Resource,
    id: &str,
    verifier_id: &str,
    link: bool,
) -> Result<(), CliError> {
    if link {
        client.link_verifier(resource, id, verifier_id).await?;
        println!("Linked verifier {verifier_id} to {} {id}", resource.noun());
    } else {
        client.unlink_verifier(resource, id, verifier_id).await?;
        println!("Unlinked verifier {verifier_id} from {} {id}", resource.noun());
    }
    Ok(())
}

pub async fn download_pdf(client: &RestClient, resource: Resource, id: &str, out: &Path) -> Result<(), CliError> {
    let bytes = client.fetch_pdf(resource, id).await?;
    let display = out.display().to_string();
    tokio::fs::write(out, &bytes).await.map_err(|e| CliError::io(&display, e))?;
    println!("Wrote {} bytes to {display}", bytes.len());
    Ok(())
}

pub async fn grade(
    client: &RestClient,
    resource: Resource,
    id: &str,
    scores_path: &Path,
    assume_yes: bool,
) -> Result<(), CliError> {
    let display = scores_path.display().to_string();
    let text = tokio::fs::read_to_string(scores_path).await.map_err(|e| CliError::io(&display, e))?;
    let scores = parse_scores(&text)?;

    let criteria = client.fetch_criteria(resource).await?;
    let store = MemoryStore::new();
    let mut form = GradingForm::build(resource, id, criteria, &store);
    apply_scores(&mut form, &store, &scores)?;
    form.validate()?;

    println!("{}", form.aggregate().live_text());
    confirm(&format!("Submit grading and accept {} {id}?", resource.noun()), assume_yes)?;
    let posted = form.submit(client, &store).await?;
    println!("Posted {posted} score(s); {} {id} accepted", resource.noun());
    Ok(())
}

pub async fn submit(
    client: &RestClient,
    config: &ClientConfig,
    input: &Path,
    pdf: Option<&Path>,
    draft: bool,
) -> Result<(), CliError> {
    let display = input.display().to_string();
    let text = tokio::fs::read_to_string(input).await.map_err(|e| CliError::io(&display, e))?;
    let file = parse_submission(&text)?;

    let upload = match pdf {
        Some(path) => {
            let display = path.display().to_string();
            let bytes = tokio::fs::read(path).await.map_err(|e| CliError::io(&display, e))?;
            let name = path.file_name().map_or_else(|| display.clone(), |n| n.to_string_lossy().into_owned());
            Some(PdfUpload { name, bytes })
        }
        None => None,
    };
    let attachment = upload.as_ref().map(|u| pdf_attachment(&u.name, u.bytes.len() as u64));

    let wizard = walk_wizard(config, file, attachment)?;
    if let Some(preview) = wizard.preview() {
        println!("{} ({}, {} words)", preview.title, preview.category, preview.word_count);
    }
    let mode = if draft { SubmitMode::Draft } else { SubmitMode::Final };
    let request = wizard.prepare_submission(mode)?;
    let response = client.submit(&request, upload.as_ref()).await?;
    tracing::info!(status = mode.status().as_str(), "submission sent");
    print_json(&response)
}
