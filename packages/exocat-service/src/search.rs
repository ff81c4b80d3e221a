use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};

use exocat_loader::ShardLoader;

use crate::scan::{self, ScanOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
	/// No active search; the query is empty.
	Idle { generation: u64 },
	/// Waiting out the debounce window or scanning.
	Pending { generation: u64, query: String },
	Complete { generation: u64, outcome: ScanOutcome },
}
impl SearchState {
	pub fn generation(&self) -> u64 {
		match self {
			Self::Idle { generation }
			| Self::Pending { generation, .. }
			| Self::Complete { generation, .. } => *generation,
		}
	}

	pub fn is_settled(&self) -> bool {
		!matches!(self, Self::Pending { .. })
	}
}

/// Debounced search-everywhere over the whole catalog.
///
/// Each query change takes a new generation. A keystroke inside the debounce window drops the
/// pending scan before it starts; a scan that finishes after a newer query was entered is
/// discarded instead of published.
pub struct SearchSession {
	loader: Arc<dyn ShardLoader>,
	total_shards: u32,
	debounce: Duration,
	max_results: Option<usize>,
	query: String,
	generation: u64,
	state: Arc<watch::Sender<SearchState>>,
	pending: Option<JoinHandle<()>>,
}
impl SearchSession {
	pub fn new(loader: Arc<dyn ShardLoader>, total_shards: u32, debounce: Duration) -> Self {
		let (state, _) = watch::channel(SearchState::Idle { generation: 0 });

		Self {
			loader,
			total_shards,
			debounce,
			max_results: None,
			query: String::new(),
			generation: 0,
			state: Arc::new(state),
			pending: None,
		}
	}

	pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
		self.max_results = max_results;

		self
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn state(&self) -> SearchState {
		self.state.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchState> {
		self.state.subscribe()
	}

	/// Waits until the latest query is either idle or complete.
	pub async fn settled(&self) -> SearchState {
		let mut rx = self.state.subscribe();
		let settled = rx.wait_for(SearchState::is_settled).await.map(|state| state.clone());

		settled.unwrap_or_else(|_| self.state())
	}

	/// Replaces the query and returns its generation.
	pub fn set_query(&mut self, query: &str) -> u64 {
		if let Some(handle) = self.pending.take() {
			handle.abort();
		}

		self.generation += 1;
		self.query = query.trim().to_string();

		let generation = self.generation;

		if self.query.is_empty() {
			self.state.send_replace(SearchState::Idle { generation });

			return generation;
		}

		let query = self.query.clone();

		self.state.send_replace(SearchState::Pending { generation, query: query.clone() });

		let loader = Arc::clone(&self.loader);
		let state = Arc::clone(&self.state);
		let total_shards = self.total_shards;
		let debounce = self.debounce;
		let max_results = self.max_results;

		self.pending = Some(tokio::spawn(async move {
			tokio::time::sleep(debounce).await;

			tracing::debug!(generation, query = %query, "Search scan started.");

			let outcome = scan::scan(loader, total_shards, &query, max_results).await;

			state.send_if_modified(|current| {
				if current.generation() != generation {
					tracing::debug!(generation, query = %query, "Discarded stale search result.");

					return false;
				}

				*current = SearchState::Complete { generation, outcome };

				true
			});
		}));

		generation
	}

	pub fn clear(&mut self) -> u64 {
		self.set_query("")
	}
}

impl Drop for SearchSession {
	fn drop(&mut self) {
		if let Some(handle) = self.pending.take() {
			handle.abort();
		}
	}
}
