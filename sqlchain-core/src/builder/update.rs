//! UPDATE rendering

use super::common::Prepared;
use super::Builder;
use crate::{Error, Result, Value};

/// A rendered UPDATE statement
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSql {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Prepared for UpdateSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn args(&self) -> &[Value] {
        &self.args
    }
}

impl Builder {
    /// Render the `update_value` assignments and WHERE filters as an UPDATE
    ///
    /// Placeholder numbers were fixed when each clause was added, so a filter
    /// registered before the assignments keeps the lower numbers even though
    /// it renders after SET.
    ///
    /// # Examples
    /// ```
    /// use sqlchain_core::table;
    ///
    /// let query = table("t", "")
    ///     .where_("a != ?", 34)
    ///     .update_value("a=?", 321)
    ///     .update_value("b=?", "x")
    ///     .update_sql()
    ///     .unwrap();
    ///
    /// assert_eq!(query.sql, "UPDATE t t SET a=$2,b=$3 WHERE a != $1");
    /// ```
    pub fn update_sql(&self) -> Result<UpdateSql> {
        self.check()?;
        if self.updates.is_empty() {
            return Err(Error::invalid_query("UPDATE requires SET clauses"));
        }

        let assignments: Vec<&str> = self.updates.values().map(String::as_str).collect();
        let sql = format!(
            "UPDATE {} {} SET {} {}",
            self.table_name,
            self.table_alias,
            assignments.join(","),
            self.where_sql()
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain", sql = %sql, args = self.args.len(), "rendered update");

        Ok(UpdateSql {
            sql,
            args: self.args.clone(),
        })
    }
}
