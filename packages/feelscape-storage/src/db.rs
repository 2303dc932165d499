use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

pub struct Db {
	pub pool: PgPool,
	pub collection: String,
}
impl Db {
	/// Builds a pool for the DSN held in the environment variable named by the config.
	///
	/// No connection is opened here; an unreachable store surfaces on first use.
	pub fn connect(cfg: &feelscape_config::Storage) -> Result<Self> {
		let dsn = cfg.postgres.resolve_dsn()?;

		Self::connect_dsn(
			&dsn,
			cfg.postgres.pool_max_conns,
			Duration::from_millis(cfg.postgres.acquire_timeout_ms),
			&cfg.collection,
		)
	}

	pub fn connect_dsn(
		dsn: &str,
		max_conns: u32,
		acquire_timeout: Duration,
		collection: &str,
	) -> Result<Self> {
		schema::collection_ident(collection)?;

		let pool = PgPoolOptions::new()
			.max_connections(max_conns)
			.acquire_timeout(acquire_timeout)
			.connect_lazy(dsn)?;

		Ok(Self { pool, collection: collection.to_string() })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema(&self.collection)?;

		sqlx::query(&sql).execute(&self.pool).await?;

		tracing::debug!(collection = %self.collection, "Collection table ensured.");

		Ok(())
	}
}
