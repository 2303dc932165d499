use std::sync::Arc;

use feelscape_service::{RecordStore, RecordsService};
use feelscape_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub records: RecordsService,
}
impl AppState {
	/// Builds the store pool and tries to create the collection table.
	///
	/// An unreachable store does not stop the relay from serving; `/records` answers 500 until
	/// the store comes back.
	pub async fn new(config: &feelscape_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage)?;

		if let Err(err) = db.ensure_schema().await {
			tracing::warn!(
				error = %err,
				collection = %config.storage.collection,
				"Failed to ensure the collection table; serving anyway."
			);
		}

		Ok(Self::from_store(Arc::new(db)))
	}

	pub fn from_store(store: Arc<dyn RecordStore>) -> Self {
		Self { records: RecordsService::new(store) }
	}
}
