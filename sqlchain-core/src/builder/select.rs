//! SELECT rendering

use super::common::Prepared;
use super::Builder;
use crate::{Result, Value};

/// A rendered SELECT with its matching row-count query
#[derive(Debug, Clone, PartialEq)]
pub struct SelectSql {
    pub sql: String,
    /// `SELECT count(*)` over the same table, filters and grouping
    pub count_sql: String,
    pub args: Vec<Value>,
}

impl Prepared for SelectSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn args(&self) -> &[Value] {
        &self.args
    }
}

impl Builder {
    /// Render the accumulated state as a SELECT statement
    ///
    /// Fragments are laid out in a fixed order (WHERE, JOIN, GROUP BY,
    /// ORDER BY, LIMIT, OFFSET) and separated by single spaces. Unset fragments
    /// render as empty strings, so the text may carry extra spaces. An empty
    /// column list renders as well, which leaves `count_sql` usable on a
    /// builder that only carries filters.
    pub fn select_sql(&self) -> Result<SelectSql> {
        self.check()?;

        let where_sql = self.where_sql();
        let group_sql = self.group_sql();

        let mut sql = format!(
            "SELECT {} FROM {} {} {} {} {}",
            self.selects.join(","),
            self.table_name,
            self.table_alias,
            where_sql,
            self.join_sql(),
            group_sql,
        );
        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.orders.join(","));
        }
        sql.push(' ');
        sql.push_str(&self.limit_sql());
        sql.push(' ');
        sql.push_str(&self.offset_sql());

        let count_sql = format!(
            "SELECT count(*) FROM {} {} {} {}",
            self.table_name, self.table_alias, where_sql, group_sql
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain", sql = %sql, args = self.args.len(), "rendered select");

        Ok(SelectSql {
            sql,
            count_sql,
            args: self.args.clone(),
        })
    }

    fn join_sql(&self) -> String {
        let joins: Vec<String> = self
            .joins
            .iter()
            .map(|join| {
                format!(
                    "JOIN {} {} ON {}",
                    join.table_name, join.table_alias, join.condition
                )
            })
            .collect();
        joins.join(" ")
    }

    fn group_sql(&self) -> String {
        if self.groups.is_empty() {
            return String::new();
        }
        format!("GROUP BY {}", self.groups.join(","))
    }

    fn limit_sql(&self) -> String {
        if self.limit == 0 {
            return String::new();
        }
        format!("LIMIT {}", self.limit)
    }

    fn offset_sql(&self) -> String {
        if self.offset == 0 {
            return String::new();
        }
        format!("OFFSET {}", self.offset)
    }
}
