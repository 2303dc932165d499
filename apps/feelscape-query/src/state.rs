use std::sync::Arc;

use feelscape_providers::analysis::AnalysisClient;
use feelscape_service::{AnalysisProvider, QueryService};

#[derive(Clone)]
pub struct AppState {
	pub query: QueryService,
}
impl AppState {
	pub fn new(config: &feelscape_config::Config) -> color_eyre::Result<Self> {
		let client = AnalysisClient::new(&config.analysis)?;

		Ok(Self::from_provider(Arc::new(client)))
	}

	pub fn from_provider(provider: Arc<dyn AnalysisProvider>) -> Self {
		Self { query: QueryService::new(provider) }
	}
}
