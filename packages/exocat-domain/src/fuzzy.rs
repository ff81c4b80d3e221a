use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
	Exact,
	Prefix,
	Contains,
	Subsequence,
}

/// Where and how a candidate matched. `start` is a char offset into the case-folded candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchInfo {
	pub tier: MatchTier,
	pub start: usize,
}

/// A query folded once and reused against every candidate of a scan.
#[derive(Debug, Clone)]
pub struct FuzzyQuery {
	folded: String,
}
impl FuzzyQuery {
	pub fn new(query: &str) -> Self {
		Self { folded: query.to_lowercase() }
	}

	pub fn is_empty(&self) -> bool {
		self.folded.is_empty()
	}

	pub fn matches(&self, candidate: &str) -> bool {
		self.is_empty() || self.classify(candidate).is_some()
	}

	pub fn classify(&self, candidate: &str) -> Option<MatchInfo> {
		let candidate = candidate.to_lowercase();
		let query = self.folded.as_str();

		if candidate == query {
			return Some(MatchInfo { tier: MatchTier::Exact, start: 0 });
		}
		if candidate.starts_with(query) {
			return Some(MatchInfo { tier: MatchTier::Prefix, start: 0 });
		}
		if let Some(byte) = candidate.find(query) {
			return Some(MatchInfo {
				tier: MatchTier::Contains,
				start: candidate[..byte].chars().count(),
			});
		}

		subsequence_start(&candidate, query)
			.map(|start| MatchInfo { tier: MatchTier::Subsequence, start })
	}
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
	bucket: u8,
	start: usize,
	len: usize,
	text: String,
}
impl RankKey {
	fn new(query: &FuzzyQuery, text: String) -> Self {
		match query.classify(&text) {
			Some(MatchInfo { tier: MatchTier::Exact, .. }) =>
				Self { bucket: 0, start: 0, len: 0, text },
			Some(MatchInfo { tier: MatchTier::Prefix, .. }) =>
				Self { bucket: 1, start: 0, len: 0, text },
			Some(MatchInfo { start, .. }) => Self { bucket: 2, start, len: text.chars().count(), text },
			None => Self { bucket: 3, start: 0, len: 0, text },
		}
	}
}

pub fn matches(candidate: &str, query: &str) -> bool {
	FuzzyQuery::new(query).matches(candidate)
}

/// Orders matched records by relevance to `query`.
///
/// Exact matches lead, then prefix matches, then the remaining matches by earliest match start
/// and shorter name. Names break the remaining ties, and the sort is stable, so the output only
/// depends on the input sequence.
pub fn rank(records: Vec<Record>, query: &str) -> Vec<Record> {
	let query = FuzzyQuery::new(query);
	let mut keyed = records
		.into_iter()
		.map(|record| (RankKey::new(&query, record.candidate_text()), record))
		.collect::<Vec<_>>();

	keyed.sort_by(|(lhs, _), (rhs, _)| lhs.cmp(rhs));

	keyed.into_iter().map(|(_, record)| record).collect()
}

fn subsequence_start(candidate: &str, query: &str) -> Option<usize> {
	let mut wanted = query.chars().peekable();
	let mut start = None;

	for (offset, ch) in candidate.chars().enumerate() {
		let Some(&next) = wanted.peek() else { break };

		if ch == next {
			start.get_or_insert(offset);
			wanted.next();
		}
	}

	if wanted.peek().is_none() { start.or(Some(0)) } else { None }
}
