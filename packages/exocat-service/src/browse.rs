use std::sync::Arc;

use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};

use exocat_domain::{OutOfRange, Record, ScoreField, SortKey, sort};
use exocat_loader::{LoadError, ShardLoader};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrowseRequest {
	pub page: u32,
	#[serde(flatten)]
	pub sort: SortKey,
}
impl BrowseRequest {
	pub fn new(page: u32, sort: SortKey) -> Self {
		Self { page, sort }
	}
}

impl Default for BrowseRequest {
	fn default() -> Self {
		Self { page: 1, sort: SortKey::default() }
	}
}

/// One shard's records, in the order the shard stores them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowsePage {
	#[serde(flatten)]
	pub request: BrowseRequest,
	pub shard: u32,
	pub total_pages: u32,
	pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseState {
	Idle,
	Loading { generation: u64, request: BrowseRequest, shard: u32 },
	Ready { generation: u64, page: BrowsePage },
	Failed { generation: u64, request: BrowseRequest, error: LoadError },
}
impl BrowseState {
	pub fn generation(&self) -> u64 {
		match self {
			Self::Idle => 0,
			Self::Loading { generation, .. }
			| Self::Ready { generation, .. }
			| Self::Failed { generation, .. } => *generation,
		}
	}

	pub fn is_settled(&self) -> bool {
		!matches!(self, Self::Loading { .. })
	}
}

/// Resolves and loads a single page without any session state.
pub async fn load_page(
	loader: &dyn ShardLoader,
	total_shards: u32,
	request: BrowseRequest,
) -> Result<BrowsePage> {
	let shard = sort::resolve(request.page, request.sort, total_shards)?;
	let records = loader.load(shard).await?;

	Ok(BrowsePage { request, shard, total_pages: total_shards, records })
}

/// Paginated browsing where the newest request always wins.
///
/// At most one fetch is in flight: issuing a request aborts the previous fetch, and a result
/// is only published while its generation is still the published one.
pub struct BrowseSession {
	loader: Arc<dyn ShardLoader>,
	total_shards: u32,
	current: BrowseRequest,
	generation: u64,
	state: Arc<watch::Sender<BrowseState>>,
	in_flight: Option<JoinHandle<()>>,
}
impl BrowseSession {
	pub fn new(loader: Arc<dyn ShardLoader>, total_shards: u32) -> Self {
		let (state, _) = watch::channel(BrowseState::Idle);

		Self {
			loader,
			total_shards,
			current: BrowseRequest::default(),
			generation: 0,
			state: Arc::new(state),
			in_flight: None,
		}
	}

	pub fn total_pages(&self) -> u32 {
		self.total_shards
	}

	pub fn current(&self) -> BrowseRequest {
		self.current
	}

	pub fn state(&self) -> BrowseState {
		self.state.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<BrowseState> {
		self.state.subscribe()
	}

	/// Waits for the latest request to reach `Ready` or `Failed`.
	pub async fn settled(&self) -> BrowseState {
		let mut rx = self.state.subscribe();
		let settled = rx.wait_for(BrowseState::is_settled).await.map(|state| state.clone());

		settled.unwrap_or_else(|_| self.state())
	}

	/// Starts loading `request`, superseding anything still in flight.
	///
	/// An out-of-range page is rejected before any state changes.
	pub fn request(&mut self, request: BrowseRequest) -> Result<u64, OutOfRange> {
		let shard = sort::resolve(request.page, request.sort, self.total_shards)?;

		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}

		self.generation += 1;
		self.current = request;

		let generation = self.generation;

		self.state.send_replace(BrowseState::Loading { generation, request, shard });

		tracing::debug!(
			generation,
			page = request.page,
			shard,
			field = %request.sort.field,
			direction = %request.sort.direction,
			"Browse request issued."
		);

		let loader = Arc::clone(&self.loader);
		let state = Arc::clone(&self.state);
		let total_pages = self.total_shards;

		self.in_flight = Some(tokio::spawn(async move {
			let result = loader.load(shard).await;

			state.send_if_modified(|current| {
				if current.generation() != generation {
					tracing::debug!(generation, shard, "Discarded stale browse result.");

					return false;
				}

				*current = match result {
					Ok(records) => BrowseState::Ready {
						generation,
						page: BrowsePage { request, shard, total_pages, records },
					},
					Err(error) => {
						tracing::warn!(generation, shard, error = %error, "Browse load failed.");

						BrowseState::Failed { generation, request, error }
					},
				};

				true
			});
		}));

		Ok(generation)
	}

	pub fn go_to(&mut self, page: u32) -> Result<u64, OutOfRange> {
		self.request(BrowseRequest { page, ..self.current })
	}

	/// Advances one page, staying on the last page.
	pub fn next_page(&mut self) -> Result<u64, OutOfRange> {
		self.go_to(self.current.page.saturating_add(1).min(self.total_shards))
	}

	/// Goes back one page, staying on the first page.
	pub fn previous_page(&mut self) -> Result<u64, OutOfRange> {
		self.go_to(self.current.page.saturating_sub(1).max(1))
	}

	/// Header click on `field`; any sort change restarts at page 1.
	pub fn toggle_sort(&mut self, field: ScoreField) -> Result<u64, OutOfRange> {
		self.request(BrowseRequest { page: 1, sort: self.current.sort.toggled(field) })
	}

	/// Re-issues the current request, e.g. to retry after `Failed`.
	pub fn reload(&mut self) -> Result<u64, OutOfRange> {
		self.request(self.current)
	}
}

impl Drop for BrowseSession {
	fn drop(&mut self) {
		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_loading_is_unsettled() {
		let request = BrowseRequest::default();

		assert!(BrowseState::Idle.is_settled());
		assert!(!BrowseState::Loading { generation: 2, request, shard: 1 }.is_settled());
		assert_eq!(BrowseState::Loading { generation: 2, request, shard: 1 }.generation(), 2);
	}

	#[test]
	fn default_request_is_most_likely_confirmed_first() {
		let request = BrowseRequest::default();

		assert_eq!(request.page, 1);
		assert_eq!(request.sort.field, ScoreField::ScoreA);
		assert_eq!(request.sort.direction, exocat_domain::Direction::Desc);
	}
}
