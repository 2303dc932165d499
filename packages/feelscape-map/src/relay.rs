use reqwest::{Client, Response};
use serde_json::{Value, json};

use feelscape_domain::{EmotionRecord, QueryResultPoint};

use crate::{Error, Result};

/// HTTP client for the data relay and the query relay.
///
/// The `fetch_*` methods never fail: errors are logged and read as "no data".
pub struct RelayClient {
	client: Client,
	records_url: String,
	query_url: String,
}
impl RelayClient {
	pub fn new(cfg: &feelscape_config::Client) -> Result<Self> {
		Self::with_urls(&cfg.records_url, &cfg.query_url)
	}

	pub fn with_urls(records_url: &str, query_url: &str) -> Result<Self> {
		let client = Client::builder().build()?;

		Ok(Self { client, records_url: records_url.to_string(), query_url: query_url.to_string() })
	}

	pub async fn try_fetch_records(&self) -> Result<Vec<EmotionRecord>> {
		let res = self.client.get(&self.records_url).send().await?;
		let docs = read_list(res, &self.records_url).await?;

		Ok(docs.into_iter().map(EmotionRecord::new).collect())
	}

	pub async fn fetch_records(&self) -> Vec<EmotionRecord> {
		self.try_fetch_records().await.unwrap_or_else(|err| {
			tracing::error!(error = %err, "Error loading initial data.");

			Vec::new()
		})
	}

	pub async fn try_fetch_query(&self, query: &str) -> Result<Vec<QueryResultPoint>> {
		let res = self.client.post(&self.query_url).json(&json!({ "query": query })).send().await?;
		let docs = read_list(res, &self.query_url).await?;

		Ok(docs.into_iter().map(QueryResultPoint::new).collect())
	}

	pub async fn fetch_query(&self, query: &str) -> Vec<QueryResultPoint> {
		self.try_fetch_query(query).await.unwrap_or_else(|err| {
			tracing::error!(error = %err, query, "Error fetching query data.");

			Vec::new()
		})
	}
}

async fn read_list(res: Response, url: &str) -> Result<Vec<Value>> {
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { url: url.to_string(), status: status.as_u16() });
	}

	match res.json::<Value>().await? {
		Value::Array(items) => Ok(items),
		_ => Err(Error::NotAList { url: url.to_string() }),
	}
}
