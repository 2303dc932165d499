use std::env;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub analysis: Analysis,
	#[serde(default)]
	pub client: Client,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub records_bind: String,
	pub query_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	/// Table that holds one JSON document per emotion record.
	#[serde(default = "default_collection")]
	pub collection: String,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	/// Name of the environment variable carrying the connection string.
	#[serde(default = "default_dsn_env")]
	pub dsn_env: String,
	#[serde(default = "default_pool_max_conns")]
	pub pool_max_conns: u32,
	/// How long a request waits for a pooled connection before the store counts as down.
	#[serde(default = "default_acquire_timeout_ms")]
	pub acquire_timeout_ms: u64,
}
impl Postgres {
	pub fn resolve_dsn(&self) -> Result<String> {
		match env::var(&self.dsn_env) {
			Ok(dsn) if !dsn.trim().is_empty() => Ok(dsn),
			_ => Err(Error::MissingEnv { name: self.dsn_env.clone() }),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Analysis {
	pub api_base: String,
	#[serde(default = "default_analysis_path")]
	pub path: String,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl Analysis {
	pub fn endpoint(&self) -> String {
		format!("{}{}", self.api_base, self.path)
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Client {
	pub records_url: String,
	pub query_url: String,
	pub center_lat: f64,
	pub center_lng: f64,
	pub zoom: u8,
	/// Zoom applied when the view is centered on freshly rendered points.
	pub focus_zoom: u8,
	pub radius: Radius,
}
impl Default for Client {
	fn default() -> Self {
		Self {
			records_url: "http://localhost:5000/records".to_string(),
			query_url: "http://localhost:3000/query".to_string(),
			center_lat: 22.9734,
			center_lng: 78.6569,
			zoom: 5,
			focus_zoom: 6,
			radius: Radius::default(),
		}
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Radius {
	pub initial: u32,
	pub min: u32,
	pub max: u32,
}
impl Default for Radius {
	fn default() -> Self {
		Self { initial: 40, min: 20, max: 80 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_collection() -> String {
	"emotion".to_string()
}

fn default_dsn_env() -> String {
	"FEELSCAPE_STORE_DSN".to_string()
}

fn default_pool_max_conns() -> u32 {
	4
}

fn default_acquire_timeout_ms() -> u64 {
	30_000
}

fn default_analysis_path() -> String {
	"/analyze".to_string()
}
