#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error(transparent)]
	Config(#[from] feelscape_config::Error),
	#[error("Invalid collection name: {0}")]
	InvalidCollection(String),
}
