use serde_json::Value;

use crate::{Result, db::Db, schema};

/// Every document in the collection, in insertion order.
pub async fn list_documents(db: &Db) -> Result<Vec<Value>> {
	let ident = schema::collection_ident(&db.collection)?;
	let sql = format!("SELECT doc FROM {ident} ORDER BY doc_id");
	let docs: Vec<Value> = sqlx::query_scalar(&sql).fetch_all(&db.pool).await?;

	Ok(docs)
}

/// Appends documents to the collection. Used by loaders and tests; the relays never write.
pub async fn insert_documents(db: &Db, docs: &[Value]) -> Result<u64> {
	let ident = schema::collection_ident(&db.collection)?;
	let sql = format!("INSERT INTO {ident} (doc) VALUES ($1)");
	let mut tx = db.pool.begin().await?;
	let mut inserted = 0;

	for doc in docs {
		inserted += sqlx::query(&sql).bind(doc).execute(&mut *tx).await?.rows_affected();
	}

	tx.commit().await?;

	Ok(inserted)
}
