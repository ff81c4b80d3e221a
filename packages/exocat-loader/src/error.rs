pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to build a loader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error("{message}")]
	InvalidConfig { message: String },
}

/// Failure to load one shard. Final for that shard; callers decide whether to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to load shard {shard}: {cause}")]
pub struct LoadError {
	pub shard: u32,
	pub cause: LoadCause,
}
impl LoadError {
	pub fn new(shard: u32, cause: LoadCause) -> Self {
		Self { shard, cause }
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self.cause, LoadCause::NotFound)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadCause {
	#[error("Shard not found.")]
	NotFound,
	#[error("Shard index is outside the catalog.")]
	OutOfCatalog,
	#[error("Transport failure: {0}")]
	Transport(String),
	#[error("Decode failure: {0}")]
	Decode(String),
	#[error("Invalid record: {0}")]
	InvalidRecord(String),
}
