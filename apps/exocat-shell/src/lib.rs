pub mod command;

use std::io::Write;

use clap::Parser;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::Command;
use exocat_cli::ConfigArgs;
use exocat_service::{
	BrowsePage, BrowseRequest, BrowseSession, BrowseState, CatalogService, ScanOutcome,
	SearchSession, SearchState,
};

#[derive(Debug, Parser)]
#[command(
	version = exocat_cli::VERSION,
	rename_all = "kebab",
	styles = exocat_cli::styles(),
)]
pub struct Args {
	#[command(flatten)]
	pub config: ConfigArgs,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Output<'a> {
	Page { page: &'a BrowsePage },
	BrowseFailed { request: BrowseRequest, error: String },
	Search { outcome: &'a ScanOutcome },
	SearchCleared,
	Error { message: String },
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = args.config.load()?;

	exocat_cli::init_tracing(&config.service.log_level);

	let service = CatalogService::new(config)?;
	let mut browse = service.browse_session();
	let mut search = service.search_session();
	let mut browse_updates = browse.subscribe();
	let mut search_updates = search.subscribe();
	let mut lines = BufReader::new(tokio::io::stdin()).lines();

	browse.request(BrowseRequest::default())?;

	tracing::info!(total_pages = browse.total_pages(), "Shell ready.");

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else { break };

				match command::parse(&line) {
					Ok(Command::Quit) => break,
					Ok(command) => dispatch(command, &mut browse, &mut search)?,
					Err(message) => emit(&Output::Error { message })?,
				}
			},
			changed = browse_updates.changed() => {
				changed?;

				let state = browse_updates.borrow_and_update().clone();

				print_browse(&state)?;
			},
			changed = search_updates.changed() => {
				changed?;

				let state = search_updates.borrow_and_update().clone();

				print_search(&state)?;
			},
		}
	}

	Ok(())
}

fn dispatch(
	command: Command,
	browse: &mut BrowseSession,
	search: &mut SearchSession,
) -> color_eyre::Result<()> {
	let issued = match command {
		Command::Page(page) => browse.go_to(page),
		Command::Next => browse.next_page(),
		Command::Prev => browse.previous_page(),
		Command::Sort(field) => browse.toggle_sort(field),
		Command::Reload => browse.reload(),
		Command::Query(query) => {
			search.set_query(&query);

			return Ok(());
		},
		Command::Quit => return Ok(()),
	};

	if let Err(err) = issued {
		emit(&Output::Error { message: err.to_string() })?;
	}

	Ok(())
}

fn print_browse(state: &BrowseState) -> color_eyre::Result<()> {
	match state {
		BrowseState::Ready { page, .. } => emit(&Output::Page { page }),
		BrowseState::Failed { request, error, .. } =>
			emit(&Output::BrowseFailed { request: *request, error: error.to_string() }),
		BrowseState::Idle | BrowseState::Loading { .. } => Ok(()),
	}
}

fn print_search(state: &SearchState) -> color_eyre::Result<()> {
	match state {
		SearchState::Complete { outcome, .. } => emit(&Output::Search { outcome }),
		SearchState::Idle { generation } if *generation > 0 => emit(&Output::SearchCleared),
		SearchState::Idle { .. } | SearchState::Pending { .. } => Ok(()),
	}
}

fn emit(output: &Output<'_>) -> color_eyre::Result<()> {
	let mut stdout = std::io::stdout().lock();

	serde_json::to_writer(&mut stdout, output)?;
	writeln!(stdout)?;
	stdout.flush()?;

	Ok(())
}
