use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use tokio::task::JoinSet;

use exocat_domain::{FuzzyQuery, Record, fuzzy};
use exocat_loader::{LoadError, ShardLoader};

/// Ranked result of one full-catalog search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
	pub query: String,
	pub records: Vec<Record>,
	pub scanned_shards: u32,
	/// Ascending. A failed shard contributes no records.
	pub failed_shards: Vec<u32>,
}
impl ScanOutcome {
	pub fn empty(query: &str) -> Self {
		Self {
			query: query.to_string(),
			records: Vec::new(),
			scanned_shards: 0,
			failed_shards: Vec::new(),
		}
	}
}

/// Fetches every shard concurrently, keeps the records matching `query` and ranks the union.
///
/// Matches are merged in shard order once every fetch has settled, so arrival order never
/// leaks into the ranking. Dropping the returned future aborts the outstanding fetches.
pub async fn scan(
	loader: Arc<dyn ShardLoader>,
	total_shards: u32,
	query: &str,
	max_results: Option<usize>,
) -> ScanOutcome {
	let matcher = Arc::new(FuzzyQuery::new(query));
	let mut tasks = JoinSet::new();
	let mut task_shards = HashMap::with_capacity(total_shards as usize);

	for shard in 1..=total_shards {
		let loader = Arc::clone(&loader);
		let matcher = Arc::clone(&matcher);
		let handle = tasks.spawn(async move {
			let records = loader.load(shard).await?;

			Ok::<_, LoadError>(
				records
					.into_iter()
					.filter(|record| matcher.matches(&record.candidate_text()))
					.collect::<Vec<_>>(),
			)
		});

		task_shards.insert(handle.id(), shard);
	}

	let mut per_shard = vec![Vec::new(); total_shards as usize];
	let mut failed_shards = Vec::new();

	while let Some(joined) = tasks.join_next_with_id().await {
		match joined {
			Ok((id, Ok(matched))) => {
				let shard = task_shards[&id];

				per_shard[(shard - 1) as usize] = matched;
			},
			Ok((id, Err(err))) => {
				let shard = task_shards[&id];

				tracing::warn!(shard, error = %err, "Shard skipped during search.");

				failed_shards.push(shard);
			},
			Err(err) => {
				let Some(&shard) = task_shards.get(&err.id()) else { continue };

				tracing::warn!(shard, error = %err, "Shard task aborted during search.");

				failed_shards.push(shard);
			},
		}
	}

	failed_shards.sort_unstable();

	let mut records = fuzzy::rank(per_shard.into_iter().flatten().collect(), query);

	if let Some(max) = max_results {
		records.truncate(max);
	}

	tracing::debug!(
		query,
		matches = records.len(),
		failed = failed_shards.len(),
		total_shards,
		"Search scan settled."
	);

	ScanOutcome { query: query.to_string(), records, scanned_shards: total_shards, failed_shards }
}
