use std::{io::ErrorKind, path::PathBuf};

use crate::{BoxFuture, LoadCause, LoadError, LoadResult, ShardLoader};

/// Reads shards from a directory of published JSON files.
#[derive(Debug, Clone)]
pub struct FsShardLoader {
	root: PathBuf,
	file_pattern: String,
	total_shards: u32,
}
impl FsShardLoader {
	pub fn new(root: impl Into<PathBuf>, file_pattern: &str, total_shards: u32) -> Self {
		Self { root: root.into(), file_pattern: file_pattern.to_string(), total_shards }
	}

	pub fn path_for(&self, shard: u32) -> PathBuf {
		self.root.join(exocat_config::resource_name(&self.file_pattern, shard))
	}

	async fn read(&self, shard: u32) -> LoadResult {
		crate::check_index(shard, self.total_shards)?;

		let path = self.path_for(shard);
		let bytes = tokio::fs::read(&path).await.map_err(|err| {
			let cause = match err.kind() {
				ErrorKind::NotFound => LoadCause::NotFound,
				_ => LoadCause::Transport(format!("{}: {err}", path.display())),
			};

			LoadError::new(shard, cause)
		})?;
		let records = crate::decode_shard(shard, &bytes)?;

		tracing::debug!(shard, records = records.len(), path = %path.display(), "Shard read.");

		Ok(records)
	}
}

impl ShardLoader for FsShardLoader {
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult> {
		Box::pin(self.read(shard))
	}
}
