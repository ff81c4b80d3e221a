use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
	/// `prob_confirmed`, the field the shards are physically sorted by.
	#[serde(alias = "prob_confirmed")]
	ScoreA,
	/// `prob_false_positive`.
	#[serde(alias = "prob_false_positive")]
	ScoreB,
}
impl ScoreField {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ScoreA => "score_a",
			Self::ScoreB => "score_b",
		}
	}

	pub fn value(self, record: &Record) -> f64 {
		match self {
			Self::ScoreA => record.score_a,
			Self::ScoreB => record.score_b,
		}
	}
}

impl Display for ScoreField {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	Asc,
	Desc,
}
impl Direction {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	pub fn flip(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}
}

impl Display for Direction {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
	pub field: ScoreField,
	pub direction: Direction,
}
impl SortKey {
	pub fn new(field: ScoreField, direction: Direction) -> Self {
		Self { field, direction }
	}

	/// Column-header click: the active field flips direction, another field starts descending.
	pub fn toggled(self, field: ScoreField) -> Self {
		if self.field == field {
			Self { field, direction: self.direction.flip() }
		} else {
			Self { field, direction: Direction::Desc }
		}
	}

	/// True when walking pages forward walks shards in ascending index order.
	pub fn walks_forward(self) -> bool {
		matches!(
			(self.field, self.direction),
			(ScoreField::ScoreA, Direction::Asc) | (ScoreField::ScoreB, Direction::Desc)
		)
	}
}

impl Default for SortKey {
	fn default() -> Self {
		Self { field: ScoreField::ScoreA, direction: Direction::Desc }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Page {page} is outside the catalog range 1..={total_shards}.")]
pub struct OutOfRange {
	pub page: u32,
	pub total_shards: u32,
}

/// Maps a browse page onto the shard that serves it.
///
/// Shards are published ascending by `score_a`, so `score_a` descending reads them back to
/// front. `score_b` reuses the same physical order as an approximation: a low `score_a` shard
/// stands in for a high `score_b` one, which puts `score_b` descending on the forward walk.
pub fn resolve(page: u32, key: SortKey, total_shards: u32) -> Result<u32, OutOfRange> {
	if page == 0 || page > total_shards {
		return Err(OutOfRange { page, total_shards });
	}

	if key.walks_forward() { Ok(page) } else { Ok(total_shards - page + 1) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn score_a_descending_reads_last_shard_first() {
		let key = SortKey::new(ScoreField::ScoreA, Direction::Desc);

		assert_eq!(resolve(1, key, 161), Ok(161));
		assert_eq!(resolve(161, key, 161), Ok(1));
	}

	#[test]
	fn score_b_descending_reuses_forward_order() {
		let key = SortKey::new(ScoreField::ScoreB, Direction::Desc);

		assert_eq!(resolve(1, key, 161), Ok(1));
		assert_eq!(resolve(5, SortKey::new(ScoreField::ScoreB, Direction::Asc), 161), Ok(157));
	}

	#[test]
	fn rejects_pages_outside_catalog() {
		let key = SortKey::default();

		assert_eq!(resolve(0, key, 3), Err(OutOfRange { page: 0, total_shards: 3 }));
		assert_eq!(resolve(4, key, 3), Err(OutOfRange { page: 4, total_shards: 3 }));
		assert!(resolve(1, key, 0).is_err());
	}

	#[test]
	fn handles_largest_catalog_without_overflow() {
		let key = SortKey::new(ScoreField::ScoreA, Direction::Desc);

		assert_eq!(resolve(1, key, u32::MAX), Ok(u32::MAX));
		assert_eq!(resolve(u32::MAX, key, u32::MAX), Ok(1));
	}

	#[test]
	fn toggling_same_field_flips_and_new_field_starts_descending() {
		let key = SortKey::default();

		assert_eq!(key.toggled(ScoreField::ScoreA), SortKey::new(ScoreField::ScoreA, Direction::Asc));
		assert_eq!(
			key.toggled(ScoreField::ScoreA).toggled(ScoreField::ScoreB),
			SortKey::new(ScoreField::ScoreB, Direction::Desc)
		);
	}

	#[test]
	fn deserializes_aliases() {
		let field: ScoreField = serde_json::from_str("\"prob_false_positive\"").expect("decode failed");

		assert_eq!(field, ScoreField::ScoreB);
		assert_eq!(serde_json::to_string(&ScoreField::ScoreA).expect("encode failed"), "\"score_a\"");
	}
}
