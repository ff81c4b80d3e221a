pub mod fs;
pub mod http;
pub mod limit;

mod error;

pub use error::{Error, LoadCause, LoadError, Result};
pub use fs::FsShardLoader;
pub use http::HttpShardLoader;
pub use limit::Limited;

use std::{future::Future, pin::Pin, sync::Arc};

use exocat_config::LoaderKind;
use exocat_domain::Record;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type LoadResult = std::result::Result<Vec<Record>, LoadError>;

/// Source of catalog shards, addressed by a 1-based index.
///
/// Implementations must tolerate concurrent calls for distinct indexes.
pub trait ShardLoader
where
	Self: Send + Sync,
{
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult>;
}

impl<L> ShardLoader for Arc<L>
where
	L: ShardLoader + ?Sized,
{
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult> {
		(**self).load(shard)
	}
}

/// Builds the configured loader, already bounded by `max_concurrent_fetches`.
pub fn from_config(cfg: &exocat_config::Loader, total_shards: u32) -> Result<Arc<dyn ShardLoader>> {
	let loader: Arc<dyn ShardLoader> = match cfg.kind {
		LoaderKind::Fs => Arc::new(Limited::new(
			FsShardLoader::new(&cfg.location, &cfg.file_pattern, total_shards),
			cfg.max_concurrent_fetches,
		)?),
		LoaderKind::Http => Arc::new(Limited::new(
			HttpShardLoader::new(&cfg.location, &cfg.file_pattern, total_shards, cfg.timeout_ms)?,
			cfg.max_concurrent_fetches,
		)?),
	};

	tracing::info!(
		kind = ?cfg.kind,
		location = %cfg.location,
		total_shards,
		max_concurrent_fetches = cfg.max_concurrent_fetches,
		"Shard loader ready."
	);

	Ok(loader)
}

/// Decodes a shard body: a JSON array of records, every score a probability.
pub fn decode_shard(shard: u32, bytes: &[u8]) -> LoadResult {
	let records: Vec<Record> = serde_json::from_slice(bytes)
		.map_err(|err| LoadError::new(shard, LoadCause::Decode(err.to_string())))?;

	for record in &records {
		record
			.validate_scores()
			.map_err(|message| LoadError::new(shard, LoadCause::InvalidRecord(message)))?;
	}

	Ok(records)
}

pub(crate) fn check_index(shard: u32, total_shards: u32) -> std::result::Result<(), LoadError> {
	if shard == 0 || shard > total_shards {
		return Err(LoadError::new(shard, LoadCause::OutOfCatalog));
	}

	Ok(())
}
