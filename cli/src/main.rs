mod commands;
mod error;
mod input;
mod rest;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use workflow::api::Resource;
use workflow::bulk::{LinkAction, Transition};
use workflow::config::ClientConfig;
use workflow::query::{PageSize, SortDir};

use crate::commands::{ListOptions, page_size_or_default, parse_page_size, parse_sort_dir};
use crate::error::CliError;
use crate::rest::RestClient;

#[derive(Parser, Debug)]
#[command(name = "review-cli", about = "Research submission review API CLI")]
struct Cli {
    #[arg(long, env = "REVIEW_API_BASE", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    #[arg(long, env = "REVIEW_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ListArgs {
    resource: Resource,
    #[arg(long)]
    q: Option<String>,
    #[arg(long, conflicts_with = "verifiers")]
    status: Option<String>,
    #[arg(long, help = "assigned or unassigned")]
    verifiers: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, value_parser = parse_page_size)]
    page_size: Option<PageSize>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, value_parser = parse_sort_dir, default_value = "asc")]
    dir: SortDir,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One page of a review queue.
    List(ListArgs),
    Show {
        resource: Resource,
        id: String,
    },
    /// Accept every listed id that is still pending.
    Accept {
        resource: Resource,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        yes: bool,
    },
    /// Reject every listed id that is still pending.
    Reject {
        resource: Resource,
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long)]
        yes: bool,
    },
    Assign {
        resource: Resource,
        #[arg(long)]
        verifier: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    Unassign {
        resource: Resource,
        #[arg(long)]
        verifier: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    Link {
        resource: Resource,
        id: String,
        verifier: String,
    },
    Unlink {
        resource: Resource,
        id: String,
        verifier: String,
    },
    Pdf {
        resource: Resource,
        id: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Score every criterion from a JSON file, then accept.
    Grade {
        resource: Resource,
        id: String,
        #[arg(long)]
        scores: PathBuf,
        #[arg(long)]
        yes: bool,
    },
    /// Send a new abstract from a JSON file.
    Submit {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        pdf: Option<PathBuf>,
        #[arg(long)]
        draft: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token = cli.token.ok_or(CliError::MissingToken)?;
    let client = RestClient::new(&cli.base_url, &token)?;
    let config = ClientConfig { api_base: cli.base_url.clone(), ..ClientConfig::from_env()? };

    match cli.command {
        Command::List(args) => {
            let options = ListOptions {
                search: args.q,
                status: args.status,
                verifiers: args.verifiers,
                page: args.page,
                page_size: Some(page_size_or_default(args.page_size, &config)),
                sort: args.sort,
                dir: args.dir,
            };
            commands::list(&client, args.resource, options).await
        }
        Command::Show { resource, id } => commands::show(&client, resource, &id).await,
        Command::Accept { resource, ids, yes } => {
            commands::transition(&client, resource, Transition::Accept, &ids, yes).await
        }
        Command::Reject { resource, ids, yes } => {
            commands::transition(&client, resource, Transition::Reject, &ids, yes).await
        }
        Command::Assign { resource, verifier, ids } => {
            commands::link_many(&client, resource, LinkAction::Assign, &verifier, &ids).await
        }
        Command::Unassign { resource, verifier, ids } => {
            commands::link_many(&client, resource, LinkAction::Unassign, &verifier, &ids).await
        }
        Command::Link { resource, id, verifier } => commands::link_one(&client, resource, &id, &verifier, true).await,
        Command::Unlink { resource, id, verifier } => {
            commands::link_one(&client, resource, &id, &verifier, false).await
        }
        Command::Pdf { resource, id, out } => commands::download_pdf(&client, resource, &id, &out).await,
        Command::Grade { resource, id, scores, yes } => commands::grade(&client, resource, &id, &scores, yes).await,
        Command::Submit { input, pdf, draft } => {
            commands::submit(&client, &config, &input, pdf.as_deref(), draft).await
        }
    }
}
