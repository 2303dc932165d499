use std::sync::Arc;

use feelscape_domain::EmotionRecord;

use crate::{RecordStore, Result};

#[derive(Clone)]
pub struct RecordsService {
	store: Arc<dyn RecordStore>,
}
impl RecordsService {
	pub fn new(store: Arc<dyn RecordStore>) -> Self {
		Self { store }
	}

	/// All stored records, unfiltered and in store order.
	pub async fn list_records(&self) -> Result<Vec<EmotionRecord>> {
		let docs = self.store.list_documents().await.inspect_err(|err| {
			tracing::error!(error = %err, "Failed to fetch emotion records.");
		})?;

		tracing::debug!(count = docs.len(), "Fetched emotion records.");

		Ok(docs.into_iter().map(EmotionRecord::new).collect())
	}
}
