use std::collections::BTreeSet;

use exocat_domain::{Direction, OutOfRange, Record, ScoreField, SortKey, fuzzy, sort};

const ALL_KEYS: [SortKey; 4] = [
	SortKey { field: ScoreField::ScoreA, direction: Direction::Asc },
	SortKey { field: ScoreField::ScoreA, direction: Direction::Desc },
	SortKey { field: ScoreField::ScoreB, direction: Direction::Asc },
	SortKey { field: ScoreField::ScoreB, direction: Direction::Desc },
];

fn record(name: &str) -> Record {
	Record::new(name, "CANDIDATE", 0.5, 0.5)
}

fn names(records: &[Record]) -> Vec<String> {
	records.iter().map(Record::candidate_text).collect()
}

#[test]
fn resolve_is_a_permutation_for_every_sort_key() {
	for total in [1_u32, 2, 5, 161] {
		for key in ALL_KEYS {
			let image = (1..=total)
				.map(|page| sort::resolve(page, key, total).expect("page in range"))
				.collect::<BTreeSet<_>>();

			assert_eq!(image, (1..=total).collect::<BTreeSet<_>>(), "key {key:?}, total {total}");
		}
	}
}

#[test]
fn score_a_directions_mirror_each_other() {
	let total = 161;

	for page in 1..=total {
		let asc = sort::resolve(page, SortKey::new(ScoreField::ScoreA, Direction::Asc), total)
			.expect("page in range");
		let desc = sort::resolve(page, SortKey::new(ScoreField::ScoreA, Direction::Desc), total)
			.expect("page in range");

		assert_eq!(asc + desc, total + 1);
	}
}

#[test]
fn resolve_out_of_range_is_reported() {
	let err = sort::resolve(7, SortKey::default(), 5).expect_err("expected out of range");

	assert_eq!(err, OutOfRange { page: 7, total_shards: 5 });
	assert_eq!(err.to_string(), "Page 7 is outside the catalog range 1..=5.");
}

#[test]
fn empty_query_matches_everything() {
	for candidate in ["", "Kepler-442b", "1234567", "Ünicode"] {
		assert!(fuzzy::matches(candidate, ""));
	}
}

#[test]
fn candidate_matches_itself() {
	for candidate in ["Kepler-442b", "K2-18b", "TOI 700 d", "Ünicode"] {
		assert!(fuzzy::matches(candidate, candidate));
	}
}

#[test]
fn matching_ignores_case() {
	assert!(fuzzy::matches("Kepler-442b", "kepler"));
	assert!(fuzzy::matches("kepler-442b", "KEPLER-442B"));
}

#[test]
fn exact_match_ranks_first_regardless_of_input_order() {
	let candidates = ["Kepler-442b", "Kepler-22b", "K2-18b"];
	let orders = [[0, 1, 2], [2, 1, 0], [1, 0, 2], [2, 0, 1]];

	for order in orders {
		let records = order.iter().map(|&idx| record(candidates[idx])).collect::<Vec<_>>();
		let ranked = fuzzy::rank(records, "Kepler-22b");

		assert_eq!(ranked[0].candidate_text(), "Kepler-22b");
	}
}

#[test]
fn rank_is_deterministic() {
	let records = ["Kepler-62f", "kepler-62e", "KOI-7016", "Kepler-62f", "Kepler-186f", "TOI-700d"]
		.into_iter()
		.map(record)
		.collect::<Vec<_>>();
	let first = fuzzy::rank(records.clone(), "k6");
	let second = fuzzy::rank(records, "k6");

	assert_eq!(first, second);
}

#[test]
fn exact_then_prefix_then_earliest_containment() {
	let records = vec![record("HD 10180 c"), record("Gliese 10c"), record("10 Tauri"), record("10")];
	let ranked = fuzzy::rank(records, "10");

	assert_eq!(names(&ranked), vec!["10", "10 Tauri", "HD 10180 c", "Gliese 10c"]);
}
