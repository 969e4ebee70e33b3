//! INSERT rendering

use super::common::Prepared;
use super::Builder;
use crate::{Error, Result, Value};

/// A rendered INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSql {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Prepared for InsertSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn args(&self) -> &[Value] {
        &self.args
    }
}

impl Builder {
    /// Render the `insert_value` columns as a single-row INSERT
    ///
    /// Each column's placeholder points at the argument bound by its own
    /// `insert_value` call.
    ///
    /// # Examples
    /// ```
    /// use sqlchain_core::table;
    ///
    /// let query = table("users", "u")
    ///     .insert_value("name", "Jo")
    ///     .insert_value("age", 30)
    ///     .insert_sql()
    ///     .unwrap();
    ///
    /// assert_eq!(query.sql, "INSERT INTO users u (name,age) VALUES ($1,$2)");
    /// ```
    pub fn insert_sql(&self) -> Result<InsertSql> {
        self.check()?;
        if self.inserts.is_empty() {
            return Err(Error::invalid_query("INSERT requires columns and values"));
        }

        let columns: Vec<&str> = self.inserts.iter().map(|(name, _)| name.as_str()).collect();
        let placeholders: Vec<String> = self
            .inserts
            .iter()
            .map(|(_, position)| format!("${}", position))
            .collect();

        let sql = format!(
            "INSERT INTO {} {} ({}) VALUES ({})",
            self.table_name,
            self.table_alias,
            columns.join(","),
            placeholders.join(",")
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain", sql = %sql, args = self.args.len(), "rendered insert");

        Ok(InsertSql {
            sql,
            args: self.args.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{table, Error, Value};

    #[test]
    fn test_insert_builder() {
        let query = table("users", "")
            .insert_value("name", "John")
            .insert_value("age", 30)
            .insert_value("active", true)
            .insert_sql()
            .unwrap();

        assert_eq!(
            query.sql,
            "INSERT INTO users users (name,age,active) VALUES ($1,$2,$3)"
        );
        assert_eq!(
            query.args,
            vec![
                Value::String("John".to_string()),
                Value::I32(30),
                Value::Bool(true),
            ]
        );
    }

    #[test]
    fn test_insert_allows_repeated_columns() {
        let query = table("t", "")
            .insert_value("a", 1)
            .insert_value("a", 2)
            .insert_sql()
            .unwrap();

        assert_eq!(query.sql, "INSERT INTO t t (a,a) VALUES ($1,$2)");
    }

    #[test]
    fn test_insert_placeholders_follow_bound_positions() {
        // a filter bound first shifts the insert values along
        let query = table("t", "")
            .where_("x=?", 0)
            .insert_value("a", 1)
            .insert_sql()
            .unwrap();

        assert_eq!(query.sql, "INSERT INTO t t (a) VALUES ($2)");
        assert_eq!(query.args, vec![Value::I32(0), Value::I32(1)]);
    }

    #[test]
    fn test_insert_empty_data_fails() {
        let result = table("users", "").insert_sql();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("INSERT requires columns and values"));
    }

    #[test]
    fn test_insert_reports_recorded_mismatch() {
        let result = table("users", "")
            .insert_value("name", "x")
            .update_value("name", "y")
            .insert_sql();
        assert!(matches!(result, Err(Error::ArgumentCountMismatch { .. })));
    }
}
