use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{BoxFuture, LoadCause, LoadError, LoadResult, Result, ShardLoader};

/// Fetches shards from a static file host, e.g. `<base_url>/candidate_predictions_7.json`.
#[derive(Debug, Clone)]
pub struct HttpShardLoader {
	client: Client,
	base_url: String,
	file_pattern: String,
	total_shards: u32,
}
impl HttpShardLoader {
	pub fn new(
		base_url: &str,
		file_pattern: &str,
		total_shards: u32,
		timeout_ms: u64,
	) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
			file_pattern: file_pattern.to_string(),
			total_shards,
		})
	}

	pub fn url_for(&self, shard: u32) -> String {
		format!("{}/{}", self.base_url, exocat_config::resource_name(&self.file_pattern, shard))
	}

	async fn fetch(&self, shard: u32) -> LoadResult {
		crate::check_index(shard, self.total_shards)?;

		let url = self.url_for(shard);
		let transport =
			|err: reqwest::Error| LoadError::new(shard, LoadCause::Transport(err.to_string()));
		let res = self.client.get(&url).send().await.map_err(transport)?;

		if res.status() == StatusCode::NOT_FOUND {
			return Err(LoadError::new(shard, LoadCause::NotFound));
		}

		let bytes = res.error_for_status().map_err(transport)?.bytes().await.map_err(transport)?;
		let records = crate::decode_shard(shard, &bytes)?;

		tracing::debug!(shard, records = records.len(), %url, "Shard fetched.");

		Ok(records)
	}
}

impl ShardLoader for HttpShardLoader {
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult> {
		Box::pin(self.fetch(shard))
	}
}
