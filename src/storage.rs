//! PostgreSQL connection handle
//!
//! One connection is opened at startup and used sequentially for every
//! statement the session issues.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, PgConnection, Postgres, Row as _, TypeInfo, ValueRef};

use crate::config::DatabaseConfig;
use crate::core::data::{Row, RowSet, Value};
use crate::core::traits::QueryExecutor;
use crate::utils::error::{AppError, AppResult, QueryError};

pub struct Database {
    conn: PgConnection,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        log::info!(
            "connecting to postgres at {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        let conn = PgConnection::connect_with(&options).await.map_err(|e| {
            AppError::Connection(format!(
                "cannot reach database '{}' at {}:{}: {}",
                config.database, config.host, config.port, e
            ))
        })?;

        Ok(Self { conn })
    }

    /// Gracefully end the session
    pub async fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;
        log::info!("database connection closed");
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for Database {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<RowSet, QueryError> {
        log::debug!("executing `{}` with {} parameter(s)", sql, params.len());

        let query = bind_params(sqlx::query(sql), params);

        if !returns_rows(sql) {
            let done = query.execute(&mut self.conn).await?;
            return Ok(RowSet {
                rows: Vec::new(),
                row_count: done.rows_affected(),
            });
        }

        let mut rows = Vec::new();
        let mut stream = query.fetch(&mut self.conn);
        while let Some(row) = stream.try_next().await? {
            rows.push(decode_row(&row)?);
        }

        let row_count = rows.len() as u64;
        Ok(RowSet { rows, row_count })
    }
}

/// Whether a statement yields a result set rather than an affected-row count
fn returns_rows(sql: &str) -> bool {
    let sql = sql.trim_start().to_ascii_uppercase();
    sql.starts_with("SELECT") || sql.starts_with("WITH") || sql.contains(" RETURNING ")
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Value],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<String>),
            Value::Int(i) => query.bind(*i),
            Value::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

fn decode_row(row: &PgRow) -> Result<Row, QueryError> {
    let mut decoded = Row::new();

    for column in row.columns() {
        let name = column.name();
        let index = column.ordinal();

        if row.try_get_raw(index)?.is_null() {
            decoded.insert(name, Value::Null);
            continue;
        }

        let value = match column.type_info().name() {
            "INT2" => Value::Int(i64::from(row.try_get::<i16, _>(index)?)),
            "INT4" => Value::Int(i64::from(row.try_get::<i32, _>(index)?)),
            "INT8" => Value::Int(row.try_get::<i64, _>(index)?),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => Value::Text(row.try_get::<String, _>(index)?),
            other => {
                return Err(QueryError::Decode {
                    column: name.to_string(),
                    reason: format!("unsupported column type {}", other),
                });
            }
        };
        decoded.insert(name, value);
    }

    Ok(decoded)
}
