pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error("Relay at {url} responded with status {status}.")]
	Status { url: String, status: u16 },
	#[error("Relay at {url} returned a non-list body.")]
	NotAList { url: String },
	#[error("Invalid map settings: {message}")]
	InvalidSettings { message: String },
	#[error("The map has not been created yet.")]
	MapNotCreated,
	#[error("Map backend error: {message}")]
	Backend { message: String },
}
