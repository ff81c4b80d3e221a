pub mod browse;
pub mod scan;
pub mod search;

mod error;

pub use browse::{BrowsePage, BrowseRequest, BrowseSession, BrowseState, load_page};
pub use error::{Error, Result};
pub use scan::{ScanOutcome, scan};
pub use search::{SearchSession, SearchState};

use std::{sync::Arc, time::Duration};

use exocat_config::Config;
use exocat_loader::ShardLoader;

/// Entry point shared by the apps: one catalog version, one loader.
pub struct CatalogService {
	pub cfg: Config,
	loader: Arc<dyn ShardLoader>,
}
impl CatalogService {
	pub fn new(cfg: Config) -> Result<Self> {
		let loader = exocat_loader::from_config(&cfg.loader, cfg.catalog.total_shards)?;

		Ok(Self { cfg, loader })
	}

	pub fn with_loader(cfg: Config, loader: Arc<dyn ShardLoader>) -> Self {
		Self { cfg, loader }
	}

	pub fn total_shards(&self) -> u32 {
		self.cfg.catalog.total_shards
	}

	pub async fn browse(&self, request: BrowseRequest) -> Result<BrowsePage> {
		load_page(self.loader.as_ref(), self.total_shards(), request).await
	}

	/// One-shot search. An empty query is "no search" and fetches nothing.
	pub async fn search(&self, query: &str) -> ScanOutcome {
		let query = query.trim();

		if query.is_empty() {
			return ScanOutcome::empty(query);
		}

		scan(Arc::clone(&self.loader), self.total_shards(), query, self.cfg.search.max_results)
			.await
	}

	pub fn browse_session(&self) -> BrowseSession {
		BrowseSession::new(Arc::clone(&self.loader), self.total_shards())
	}

	pub fn search_session(&self) -> SearchSession {
		SearchSession::new(
			Arc::clone(&self.loader),
			self.total_shards(),
			Duration::from_millis(self.cfg.search.debounce_ms),
		)
		.with_max_results(self.cfg.search.max_results)
	}
}
