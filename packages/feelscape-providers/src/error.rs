use serde_json::Value;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	/// The service answered with a non-success status; `body` is what it sent back.
	#[error("Analysis service responded with status {status}.")]
	Status { status: u16, body: Value },
}
impl Error {
	/// Best-effort diagnostic payload for callers that surface upstream failures.
	pub fn details(&self) -> Value {
		match self {
			Error::Status { body, .. } if !body.is_null() => body.clone(),
			_ => Value::String(self.to_string()),
		}
	}
}
