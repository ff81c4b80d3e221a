use tokio::sync::Semaphore;

use crate::{BoxFuture, Error, LoadCause, LoadError, LoadResult, Result, ShardLoader};

/// Caps how many fetches of the wrapped loader run at once.
#[derive(Debug)]
pub struct Limited<L> {
	inner: L,
	permits: Semaphore,
	max_in_flight: usize,
}
impl<L> Limited<L>
where
	L: ShardLoader,
{
	pub fn new(inner: L, max_in_flight: usize) -> Result<Self> {
		if max_in_flight == 0 {
			return Err(Error::InvalidConfig {
				message: "Loader concurrency must be greater than zero.".to_string(),
			});
		}

		Ok(Self { inner, permits: Semaphore::new(max_in_flight), max_in_flight })
	}

	pub fn max_in_flight(&self) -> usize {
		self.max_in_flight
	}

	pub fn inner(&self) -> &L {
		&self.inner
	}
}

impl<L> ShardLoader for Limited<L>
where
	L: ShardLoader,
{
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult> {
		Box::pin(async move {
			let _permit = self.permits.acquire().await.map_err(|_| {
				LoadError::new(shard, LoadCause::Transport("Loader is shut down.".to_string()))
			})?;

			self.inner.load(shard).await
		})
	}
}
