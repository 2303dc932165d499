use crate::{Error, Result};

/// Double-quoted table identifier for a collection.
pub fn collection_ident(collection: &str) -> Result<String> {
	if !feelscape_config::is_valid_collection_name(collection) {
		return Err(Error::InvalidCollection(collection.to_string()));
	}

	Ok(format!("\"{collection}\""))
}

pub fn render_schema(collection: &str) -> Result<String> {
	let ident = collection_ident(collection)?;

	Ok(format!(
		"\
CREATE TABLE IF NOT EXISTS {ident} (
	doc_id BIGSERIAL PRIMARY KEY,
	doc JSONB NOT NULL
)"
	))
}
