use serde_json::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid query: {message}")]
	Validation { message: String },
	#[error("Analysis service returned a non-list response.")]
	UpstreamFormat,
	#[error("Analysis service error: {message}")]
	UpstreamTransport { message: String, details: Value },
	#[error("Store error: {message}")]
	Store { message: String },
}
impl From<feelscape_storage::Error> for Error {
	fn from(err: feelscape_storage::Error) -> Self {
		Self::Store { message: err.to_string() }
	}
}
impl From<feelscape_providers::Error> for Error {
	fn from(err: feelscape_providers::Error) -> Self {
		Self::UpstreamTransport { message: err.to_string(), details: err.details() }
	}
}
