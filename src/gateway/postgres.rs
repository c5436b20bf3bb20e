use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool, Row as _};
use std::time::Duration;
use tracing::{debug, info};

use super::{GatewayError, ParamValue, ProcedureCall, ProcedureGateway, ProcedureOutcome, ResultSets, Row};
use crate::config::DatabaseConfig;

/// PostgreSQL-backed gateway. Stored procedures are set-returning
/// functions called with named notation.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
    log_queries: bool,
}

impl PgGateway {
    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    /// Create the shared pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, GatewayError> {
        let url = config
            .url
            .as_deref()
            .ok_or(GatewayError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool for: {}", redact_url(url)?);
        Ok(Self::new(pool, config.enable_query_logging))
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    /// Build `SELECT row_to_json(t) AS row FROM "proc"("p1" => $1, ...) t`
    fn build_sql(call: &ProcedureCall) -> Result<String, GatewayError> {
        if !is_valid_identifier(call.procedure) {
            return Err(GatewayError::InvalidIdentifier(call.procedure.to_string()));
        }

        let mut args = Vec::with_capacity(call.params.len());
        for (i, (name, _)) in call.params.iter().enumerate() {
            if !is_valid_identifier(name) {
                return Err(GatewayError::InvalidIdentifier(name.to_string()));
            }
            args.push(format!("{} => ${}", quote_identifier(name), i + 1));
        }

        Ok(format!(
            "SELECT row_to_json(t) AS row FROM {}({}) t",
            quote_identifier(call.procedure),
            args.join(", ")
        ))
    }
}

#[async_trait]
impl ProcedureGateway for PgGateway {
    async fn call(&self, call: &ProcedureCall) -> Result<ProcedureOutcome, GatewayError> {
        let sql = Self::build_sql(call)?;

        let mut query = sqlx::query(&sql);
        for (_, value) in &call.params {
            query = match value {
                ParamValue::Int(v) => query.bind(*v),
                ParamValue::Text(v) => query.bind(v.clone()),
                ParamValue::Bit(v) => query.bind(*v),
            };
        }

        let pg_rows = query.fetch_all(&self.pool).await?;

        let mut rows: Vec<Row> = Vec::with_capacity(pg_rows.len());
        for pg_row in pg_rows {
            let value: Value = pg_row.try_get("row")?;
            match value {
                Value::Object(map) => rows.push(map),
                other => {
                    return Err(GatewayError::Decode {
                        procedure: call.procedure.to_string(),
                        message: format!("expected a JSON object per row, got {}", other),
                    })
                }
            }
        }

        let names: Vec<&str> = call.params.iter().map(|(n, _)| *n).collect();
        if self.log_queries {
            info!("{}({}) -> {} rows", call.procedure, names.join(", "), rows.len());
        } else {
            debug!("{}({}) -> {} rows", call.procedure, names.join(", "), rows.len());
        }

        Ok(ProcedureOutcome::from_result_sets(ResultSets::single(rows)))
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Identifiers are quoted into SQL text, so only plain names are accepted
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

/// Quote SQL identifier, preserving case
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Strip credentials from a database URL for logging
pub fn redact_url(raw: &str) -> Result<String, GatewayError> {
    let mut url = url::Url::parse(raw).map_err(|_| GatewayError::InvalidDatabaseUrl)?;
    if !url.username().is_empty() {
        url.set_username("***").map_err(|_| GatewayError::InvalidDatabaseUrl)?;
    }
    if url.password().is_some() {
        url.set_password(Some("***")).map_err(|_| GatewayError::InvalidDatabaseUrl)?;
    }
    Ok(url.into())
}
