use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use exocat_domain::Record;
use exocat_loader::{BoxFuture, LoadCause, LoadError, LoadResult, ShardLoader};

/// In-memory catalog with scripted per-shard failures and latency.
pub struct MemoryLoader {
	shards: Vec<Vec<Record>>,
	failures: HashMap<u32, LoadCause>,
	delays: HashMap<u32, Duration>,
	calls: Mutex<Vec<u32>>,
	in_flight: AtomicUsize,
	peak_in_flight: AtomicUsize,
}
impl MemoryLoader {
	pub fn new(shards: Vec<Vec<Record>>) -> Self {
		Self {
			shards,
			failures: HashMap::new(),
			delays: HashMap::new(),
			calls: Mutex::new(Vec::new()),
			in_flight: AtomicUsize::new(0),
			peak_in_flight: AtomicUsize::new(0),
		}
	}

	pub fn total_shards(&self) -> u32 {
		self.shards.len() as u32
	}

	pub fn with_failure(mut self, shard: u32, cause: LoadCause) -> Self {
		self.failures.insert(shard, cause);

		self
	}

	pub fn with_delay(mut self, shard: u32, delay: Duration) -> Self {
		self.delays.insert(shard, delay);

		self
	}

	pub fn with_delay_all(mut self, delay: Duration) -> Self {
		for shard in 1..=self.total_shards() {
			self.delays.insert(shard, delay);
		}

		self
	}

	/// Shard indexes in the order `load` was called.
	pub fn calls(&self) -> Vec<u32> {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn peak_in_flight(&self) -> usize {
		self.peak_in_flight.load(Ordering::SeqCst)
	}

	async fn serve(&self, shard: u32) -> LoadResult {
		self.calls.lock().unwrap_or_else(|err| err.into_inner()).push(shard);

		let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;

		self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

		let _guard = InFlightGuard(&self.in_flight);

		if let Some(delay) = self.delays.get(&shard) {
			tokio::time::sleep(*delay).await;
		}
		if let Some(cause) = self.failures.get(&shard) {
			return Err(LoadError::new(shard, cause.clone()));
		}

		shard
			.checked_sub(1)
			.and_then(|idx| self.shards.get(idx as usize))
			.cloned()
			.ok_or_else(|| LoadError::new(shard, LoadCause::OutOfCatalog))
	}
}

impl ShardLoader for MemoryLoader {
	fn load<'a>(&'a self, shard: u32) -> BoxFuture<'a, LoadResult> {
		Box::pin(self.serve(shard))
	}
}

struct InFlightGuard<'a>(&'a AtomicUsize);
impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

pub fn record(name: &str, score_a: f64) -> Record {
	Record::new(name, "CANDIDATE", score_a, 1.0 - score_a)
}

/// Builds shards from names, assigning `score_a` ascending across the whole catalog.
pub fn catalog(shards: &[&[&str]]) -> Vec<Vec<Record>> {
	let total = shards.iter().map(|names| names.len()).sum::<usize>().max(1) as f64;
	let mut position = 0_usize;

	shards
		.iter()
		.map(|names| {
			names
				.iter()
				.map(|name| {
					let score_a = position as f64 / total;

					position += 1;

					record(name, score_a)
				})
				.collect()
		})
		.collect()
}

pub fn names(records: &[Record]) -> Vec<String> {
	records.iter().map(Record::candidate_text).collect()
}
