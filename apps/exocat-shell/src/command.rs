use exocat_domain::ScoreField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Page(u32),
	Next,
	Prev,
	Sort(ScoreField),
	Reload,
	Quit,
	/// Any non-command line replaces the search query; an empty line clears it.
	Query(String),
}

pub fn parse(line: &str) -> Result<Command, String> {
	let trimmed = line.trim();
	let Some(rest) = trimmed.strip_prefix(':') else {
		return Ok(Command::Query(trimmed.to_string()));
	};
	let mut parts = rest.split_whitespace();
	let name = parts.next().unwrap_or_default();
	let arg = parts.next();

	match (name, arg) {
		("page", Some(page)) => page
			.parse::<u32>()
			.map(Command::Page)
			.map_err(|_| format!("Page must be a positive integer, got {page:?}.")),
		("next", None) => Ok(Command::Next),
		("prev", None) => Ok(Command::Prev),
		("sort", Some(field)) => parse_field(field).map(Command::Sort),
		("reload", None) => Ok(Command::Reload),
		("quit" | "q", None) => Ok(Command::Quit),
		_ => Err(format!("Unknown command {trimmed:?}.")),
	}
}

fn parse_field(field: &str) -> Result<ScoreField, String> {
	match field {
		"score_a" | "prob_confirmed" => Ok(ScoreField::ScoreA),
		"score_b" | "prob_false_positive" => Ok(ScoreField::ScoreB),
		other => Err(format!("Unknown sort field {other:?}.")),
	}
}
