//! Binding rendered arguments onto sqlx PostgreSQL queries
//!
//! Nothing here runs a query; it only hands the driver a statement with its
//! `$N` arguments attached.

use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

use crate::{SelectSql, Value};

/// Bind every value onto `query`, in order
pub fn bind_values<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &'q [Value],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            Value::Null => query.bind(None::<i32>),
            Value::Bool(b) => query.bind(*b),
            Value::I32(i) => query.bind(*i),
            Value::I64(i) => query.bind(*i),
            Value::F32(f) => query.bind(*f),
            Value::F64(f) => query.bind(*f),
            Value::String(s) => query.bind(s.as_str()),
            Value::Bytes(b) => query.bind(b.as_slice()),
            Value::Json(j) => query.bind(j),
            // Heterogeneous arrays have no single postgres element type
            Value::Array(arr) => {
                query.bind(serde_json::Value::Array(arr.iter().map(value_to_json).collect()))
            }
            Value::Timestamp(ts) => query.bind(*ts),
            #[cfg(feature = "uuid-support")]
            Value::Uuid(u) => query.bind(*u),
            #[cfg(feature = "decimal-support")]
            Value::Decimal(d) => query.bind(*d),
        };
    }
    query
}

impl SelectSql {
    /// Build the row-count query with every argument bound
    pub fn to_count_query(&self) -> Query<'_, Postgres, PgArguments> {
        bind_values(sqlx::query(&self.count_sql), &self.args)
    }
}

/// Convert Value to serde_json::Value for array serialization
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::I32(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
        Value::I64(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
        Value::F32(f) => serde_json::Number::from_f64(f64::from(*f))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::F64(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => serde_json::Value::Array(
            b.iter()
                .map(|byte| serde_json::Value::Number(serde_json::Number::from(*byte)))
                .collect(),
        ),
        Value::Json(j) => j.clone(),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
        #[cfg(feature = "uuid-support")]
        Value::Uuid(u) => serde_json::Value::String(u.to_string()),
        #[cfg(feature = "decimal-support")]
        Value::Decimal(d) => serde_json::Value::String(d.to_string()),
    }
}
