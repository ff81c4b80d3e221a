use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Catalog names are mostly designations like "Kepler-22b", but some survey rows only carry a
/// numeric identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordName {
	Text(String),
	Numeric(Number),
}
impl Display for RecordName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Text(text) => f.write_str(text),
			Self::Numeric(number) => write!(f, "{number}"),
		}
	}
}

impl From<&str> for RecordName {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

/// Physical measurements carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurements {
	pub orbital_period: Option<f64>,
	pub planet_radius: Option<f64>,
	pub equilibrium_temp: Option<f64>,
	pub insolation_flux: Option<f64>,
	pub transit_depth: Option<f64>,
	pub transit_duration: Option<f64>,
	pub stellar_teff: Option<f64>,
	pub stellar_logg: Option<f64>,
	pub stellar_radius: Option<f64>,
	pub ra: Option<f64>,
	pub dec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
	#[serde(rename = "planet_name", default)]
	pub name: Option<RecordName>,
	pub disposition: String,
	#[serde(flatten)]
	pub measurements: Measurements,
	/// Probability that the candidate is a confirmed planet.
	#[serde(rename = "prob_confirmed")]
	pub score_a: f64,
	/// Probability that the candidate is a false positive.
	#[serde(rename = "prob_false_positive")]
	pub score_b: f64,
}
impl Record {
	pub fn new(name: impl Into<RecordName>, disposition: &str, score_a: f64, score_b: f64) -> Self {
		Self {
			name: Some(name.into()),
			disposition: disposition.to_string(),
			measurements: Measurements::default(),
			score_a,
			score_b,
		}
	}

	/// Text the matcher and ranker see. Unnamed rows produce an empty string.
	pub fn candidate_text(&self) -> String {
		self.name.as_ref().map(ToString::to_string).unwrap_or_default()
	}

	pub fn validate_scores(&self) -> Result<(), String> {
		for (label, value) in [("prob_confirmed", self.score_a), ("prob_false_positive", self.score_b)]
		{
			if !value.is_finite() || !(0.0..=1.0).contains(&value) {
				return Err(format!(
					"{label} of {} must be within 0.0-1.0, got {value}.",
					self.display_name()
				));
			}
		}

		Ok(())
	}

	fn display_name(&self) -> String {
		match self.name.as_ref() {
			Some(name) => format!("{name:?}"),
			None => "unnamed record".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_shard_row_with_numeric_name_and_nulls() {
		let json = serde_json::json!({
			"planet_name": 1234567,
			"disposition": "CANDIDATE",
			"orbital_period": null,
			"planet_radius": 2.1,
			"ra": 291.93423,
			"dec": 48.141651,
			"prob_confirmed": 0.81,
			"prob_false_positive": 0.07
		});
		let record: Record = serde_json::from_value(json).expect("decode failed");

		assert_eq!(record.candidate_text(), "1234567");
		assert_eq!(record.measurements.orbital_period, None);
		assert_eq!(record.measurements.planet_radius, Some(2.1));
		assert_eq!(record.measurements.stellar_teff, None);
		assert_eq!(record.score_a, 0.81);
		assert_eq!(record.score_b, 0.07);
	}

	#[test]
	fn null_name_has_empty_candidate_text() {
		let json = serde_json::json!({
			"planet_name": null,
			"disposition": "FALSE POSITIVE",
			"prob_confirmed": 0.01,
			"prob_false_positive": 0.97
		});
		let record: Record = serde_json::from_value(json).expect("decode failed");

		assert_eq!(record.name, None);
		assert_eq!(record.candidate_text(), "");
	}

	#[test]
	fn scores_must_be_probabilities() {
		assert!(Record::new("K2-18b", "CANDIDATE", 0.4, 0.9).validate_scores().is_ok());
		assert!(Record::new("K2-18b", "CANDIDATE", 1.2, 0.1).validate_scores().is_err());
		assert!(Record::new("K2-18b", "CANDIDATE", 0.2, f64::NAN).validate_scores().is_err());
	}

	#[test]
	fn scores_are_independent() {
		let record = Record::new("TOI-700d", "CANDIDATE", 0.9, 0.9);

		assert!(record.validate_scores().is_ok());
	}
}
