use serde::Deserialize;

pub const INDEX_PLACEHOLDER: &str = "{index}";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub catalog: Catalog,
	pub loader: Loader,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	#[serde(default = "default_true")]
	pub bind_localhost_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
	/// Number of shard resources published for the current catalog version.
	pub total_shards: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderKind {
	Fs,
	Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Loader {
	pub kind: LoaderKind,
	/// Directory for `fs`, base URL for `http`.
	pub location: String,
	#[serde(default = "default_file_pattern")]
	pub file_pattern: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_max_concurrent_fetches")]
	pub max_concurrent_fetches: usize,
}
impl Loader {
	pub fn resource_name(&self, shard: u32) -> String {
		resource_name(&self.file_pattern, shard)
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_debounce_ms")]
	pub debounce_ms: u64,
	pub max_results: Option<usize>,
}
impl Default for Search {
	fn default() -> Self {
		Self { debounce_ms: default_debounce_ms(), max_results: None }
	}
}

pub fn resource_name(file_pattern: &str, shard: u32) -> String {
	file_pattern.replace(INDEX_PLACEHOLDER, &shard.to_string())
}

fn default_true() -> bool {
	true
}

fn default_file_pattern() -> String {
	"candidate_predictions_{index}.json".to_string()
}

fn default_timeout_ms() -> u64 {
	10_000
}

fn default_max_concurrent_fetches() -> usize {
	16
}

fn default_debounce_ms() -> u64 {
	300
}
