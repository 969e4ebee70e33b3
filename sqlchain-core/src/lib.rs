//! sqlchain core - a fluent builder for `$N`-parameterized SQL
//!
//! Clauses are accumulated on a [`Builder`] for one table and rendered into a
//! SQL string plus the ordered argument list its placeholders refer to. The
//! output is meant to be handed to a PostgreSQL-style driver; nothing here
//! parses, validates or executes SQL.

pub mod builder;
pub mod error;
pub mod value;

#[cfg(feature = "postgres")]
pub mod bind;

// Re-export main types
pub use builder::common::{Condition, IntoArgs, IntoColumns};
pub use builder::{
    where_not_empty, Builder, DeleteSql, InsertSql, Join, Prepared, QueryType, SelectSql,
    UpdateSql,
};
pub use error::{Error, Result};
pub use value::Value;

/// Create a new query builder for the given table
///
/// An empty `alias` renders the table name in its place.
pub fn table(name: &str, alias: &str) -> Builder {
    Builder::new(name, alias)
}
