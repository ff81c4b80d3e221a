mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Catalog, Config, INDEX_PLACEHOLDER, Loader, LoaderKind, Search, Service, resource_name,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.catalog.total_shards == 0 {
		return Err(Error::Validation {
			message: "catalog.total_shards must be greater than zero.".to_string(),
		});
	}
	if cfg.loader.location.trim().is_empty() {
		return Err(Error::Validation {
			message: "loader.location must be non-empty.".to_string(),
		});
	}
	if cfg.loader.kind == LoaderKind::Http
		&& !(cfg.loader.location.starts_with("http://")
			|| cfg.loader.location.starts_with("https://"))
	{
		return Err(Error::Validation {
			message: "loader.location must be an http:// or https:// URL when loader.kind is http."
				.to_string(),
		});
	}
	if !cfg.loader.file_pattern.contains(INDEX_PLACEHOLDER) {
		return Err(Error::Validation {
			message: format!("loader.file_pattern must contain {INDEX_PLACEHOLDER}."),
		});
	}
	if cfg.loader.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "loader.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.loader.max_concurrent_fetches == 0 {
		return Err(Error::Validation {
			message: "loader.max_concurrent_fetches must be greater than zero.".to_string(),
		});
	}

	if let Some(max) = cfg.search.max_results
		&& max == 0
	{
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.loader.location = cfg.loader.location.trim().to_string();

	if cfg.loader.kind == LoaderKind::Http {
		while cfg.loader.location.ends_with('/') {
			cfg.loader.location.pop();
		}
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
