mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Analysis, Client, Config, Postgres, Radius, Service, Storage};

use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;

const MAX_ZOOM: u8 = 22;

static COLLECTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Collection name pattern must compile.")
});

/// Whether `name` can be used as a collection (table) name without quoting tricks.
pub fn is_valid_collection_name(name: &str) -> bool {
	COLLECTION_NAME.is_match(name)
}

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
	for (label, value) in [
		("service.records_bind", &cfg.service.records_bind),
		("service.query_bind", &cfg.service.query_bind),
		("storage.postgres.dsn_env", &cfg.storage.postgres.dsn_env),
		("analysis.api_base", &cfg.analysis.api_base),
		("client.records_url", &cfg.client.records_url),
		("client.query_url", &cfg.client.query_url),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !is_valid_collection_name(&cfg.storage.collection) {
		return Err(Error::Validation {
			message: "storage.collection must start with a letter or underscore and contain only letters, digits, or underscores."
				.to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.acquire_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.acquire_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !cfg.analysis.path.is_empty() && !cfg.analysis.path.starts_with('/') {
		return Err(Error::Validation {
			message: "analysis.path must start with '/'.".to_string(),
		});
	}

	for (key, value) in &cfg.analysis.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("analysis.default_headers.{key} must be a string."),
			});
		}
	}

	let client = &cfg.client;

	if !client.center_lat.is_finite() || !(-90.0..=90.0).contains(&client.center_lat) {
		return Err(Error::Validation {
			message: "client.center_lat must be a finite latitude.".to_string(),
		});
	}
	if !client.center_lng.is_finite() || !(-180.0..=180.0).contains(&client.center_lng) {
		return Err(Error::Validation {
			message: "client.center_lng must be a finite longitude.".to_string(),
		});
	}
	if client.zoom > MAX_ZOOM || client.focus_zoom > MAX_ZOOM {
		return Err(Error::Validation {
			message: format!("client zoom levels must be {MAX_ZOOM} or less."),
		});
	}
	if client.radius.min == 0 {
		return Err(Error::Validation {
			message: "client.radius.min must be greater than zero.".to_string(),
		});
	}
	if client.radius.min > client.radius.max {
		return Err(Error::Validation {
			message: "client.radius.min must not exceed client.radius.max.".to_string(),
		});
	}
	if !(client.radius.min..=client.radius.max).contains(&client.radius.initial) {
		return Err(Error::Validation {
			message: "client.radius.initial must lie within client.radius.min..=client.radius.max."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.analysis.api_base,
		&mut cfg.client.records_url,
		&mut cfg.client.query_url,
	] {
		let trimmed = value.trim().trim_end_matches('/');

		if trimmed.len() != value.len() {
			*value = trimmed.to_string();
		}
	}

	cfg.analysis.path = cfg.analysis.path.trim().to_string();
}
