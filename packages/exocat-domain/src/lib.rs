pub mod fuzzy;
pub mod record;
pub mod sort;

pub use fuzzy::{FuzzyQuery, MatchInfo, MatchTier, matches, rank};
pub use record::{Measurements, Record, RecordName};
pub use sort::{Direction, OutOfRange, ScoreField, SortKey, resolve};
