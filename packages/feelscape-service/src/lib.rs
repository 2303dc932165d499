pub mod query;
pub mod records;

mod error;

pub use error::{Error, Result};
pub use query::QueryService;
pub use records::RecordsService;

use std::{future::Future, pin::Pin};

use serde_json::Value;

use feelscape_providers::analysis::AnalysisClient;
use feelscape_storage::db::Db;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to the stored emotion documents.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn list_documents<'a>(&'a self) -> BoxFuture<'a, feelscape_storage::Result<Vec<Value>>>;
}

/// The external service that scores a free-text query.
pub trait AnalysisProvider
where
	Self: Send + Sync,
{
	fn analyze<'a>(&'a self, query: &'a str) -> BoxFuture<'a, feelscape_providers::Result<Value>>;
}

impl RecordStore for Db {
	fn list_documents<'a>(&'a self) -> BoxFuture<'a, feelscape_storage::Result<Vec<Value>>> {
		Box::pin(feelscape_storage::records::list_documents(self))
	}
}

impl AnalysisProvider for AnalysisClient {
	fn analyze<'a>(&'a self, query: &'a str) -> BoxFuture<'a, feelscape_providers::Result<Value>> {
		Box::pin(AnalysisClient::analyze(self, query))
	}
}
