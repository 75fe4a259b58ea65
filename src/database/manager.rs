use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::repository::RepositoryError;

/// Handle to the relational store, injected into every repository.
///
/// An unconfigured handle is valid: every operation through it fails fast
/// with `RepositoryError::Unavailable`.
#[derive(Clone, Debug, Default)]
pub struct Store {
    pool: Option<PgPool>,
}

impl Store {
    /// Build a lazily-connecting pool from config, or an unconfigured handle
    /// when no URL is set
    pub fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let Some(url) = config.url.as_deref() else {
            warn!("DATABASE_URL not set; every data operation will report the database as unavailable");
            return Ok(Self::unconfigured());
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(url)?;

        info!("Configured database pool for {}", redact_url(url));
        Ok(Self { pool: Some(pool) })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }

    pub fn pool(&self) -> Result<&PgPool, RepositoryError> {
        self.pool.as_ref().ok_or(RepositoryError::Unavailable)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool()?).await?;
        Ok(())
    }

    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(self.pool()?).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Closed database pool");
        }
    }
}

/// Strip credentials from a connection URL before it reaches the logs
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.into()
        }
        Err(_) => "<unparseable url>".to_string(),
    }
}
