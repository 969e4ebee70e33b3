//! Query builder module
//!
//! A [`Builder`] accumulates clauses for one table and renders them on demand
//! as SELECT, INSERT, UPDATE or DELETE statements. Every clause that binds a
//! value appends it to a single argument list shared by all clause kinds, so a
//! `$N` placeholder always refers to the value added by the N-th binding call,
//! whatever position its clause takes in the rendered statement.

pub mod common;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use indexmap::IndexMap;

use crate::{Error, Result, Value};
use common::{substitute_markers, Condition, IntoArgs, IntoColumns};

// Re-export types from submodules
pub use common::{where_not_empty, Prepared, MARKER};
pub use delete::DeleteSql;
pub use insert::InsertSql;
pub use select::SelectSql;
pub use update::UpdateSql;

/// Statement kind implied by the most recent chain call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryType::Select => write!(f, "select"),
            QueryType::Insert => write!(f, "insert"),
            QueryType::Update => write!(f, "update"),
            QueryType::Delete => write!(f, "delete"),
        }
    }
}

/// A JOIN clause
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table_name: String,
    pub table_alias: String,
    pub condition: String,
}

/// Fluent SQL builder for a single table
///
/// Chain methods take the builder by value and hand the same builder back.
/// Nothing is validated until a `*_sql()` renderer runs: a malformed
/// expression is recorded and reported by every renderer afterwards.
///
/// # Examples
/// ```
/// use sqlchain_core::table;
///
/// let query = table("users", "u")
///     .select(("u.id", "u.name"))
///     .where_("u.age > ?", 18)
///     .order_by("u.name")
///     .limit(10)
///     .select_sql()
///     .unwrap();
///
/// assert!(query.sql.starts_with("SELECT u.id,u.name FROM users u WHERE u.age > $1"));
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Builder {
    table_name: String,
    table_alias: String,
    selects: Vec<String>,
    inserts: Vec<(String, usize)>,
    updates: IndexMap<String, String>,
    wheres: IndexMap<String, String>,
    joins: Vec<Join>,
    groups: Vec<String>,
    orders: Vec<String>,
    query_type: Option<QueryType>,
    args: Vec<Value>,
    limit: u64,
    offset: u64,
    error: Option<Error>,
}

impl Builder {
    /// Create a new builder; an empty alias falls back to the table name
    pub fn new(table_name: &str, table_alias: &str) -> Self {
        let table_alias = if table_alias.is_empty() {
            table_name
        } else {
            table_alias
        };
        Self {
            table_name: table_name.to_string(),
            table_alias: table_alias.to_string(),
            selects: Vec::new(),
            inserts: Vec::new(),
            updates: IndexMap::new(),
            wheres: IndexMap::new(),
            joins: Vec::new(),
            groups: Vec::new(),
            orders: Vec::new(),
            query_type: None,
            args: Vec::new(),
            limit: 0,
            offset: 0,
            error: None,
        }
    }

    /// Append columns to the SELECT list
    ///
    /// # Examples
    /// ```
    /// use sqlchain_core::table;
    ///
    /// let query = table("users", "").select("id").select(("name", "email"));
    /// assert_eq!(query.select_sql().unwrap().sql.split_whitespace().collect::<Vec<_>>().join(" "),
    ///     "SELECT id,name,email FROM users users");
    /// ```
    pub fn select<T>(mut self, fields: T) -> Self
    where
        T: IntoColumns,
    {
        self.query_type = Some(QueryType::Select);
        self.selects.extend(fields.into_columns());
        self
    }

    /// Add a WHERE condition carrying a single `?` marker
    pub fn where_<V>(self, expression: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.where_args(expression, (value,))
    }

    /// Add a WHERE condition with one value per `?` marker
    ///
    /// Markers are replaced left to right. Registering an expression that is
    /// already present does nothing, and its values are not bound again.
    ///
    /// # Examples
    /// ```
    /// use sqlchain_core::table;
    ///
    /// let query = table("orders", "o")
    ///     .select("o.id")
    ///     .where_args("o.total BETWEEN ? AND ?", (10, 99))
    ///     .select_sql()
    ///     .unwrap();
    ///
    /// assert!(query.sql.contains("WHERE o.total BETWEEN $1 AND $2"));
    /// assert_eq!(query.args.len(), 2);
    /// ```
    pub fn where_args<A>(mut self, expression: &str, values: A) -> Self
    where
        A: IntoArgs,
    {
        if self.wheres.contains_key(expression) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "sqlchain", expression, "where clause already registered");
            return self;
        }

        let values = values.into_args();
        let value_count = values.len();
        match substitute_markers(expression, values, &mut self.args) {
            Some(rendered) => {
                self.wheres.insert(expression.to_string(), rendered);
            }
            None => self.record_mismatch(expression, value_count),
        }
        self
    }

    /// Add a WHERE condition unless `value` is empty
    pub fn where_not_empty<V>(self, field: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.where_(field, value)
    }

    /// Add a parenthesized group of OR-ed conditions as one WHERE entry
    ///
    /// `None` entries are skipped; if nothing is left the call does nothing.
    pub fn or<I>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Option<Condition>>,
    {
        let (fields, values): (Vec<String>, Vec<Value>) = conditions
            .into_iter()
            .flatten()
            .map(Condition::into_parts)
            .unzip();

        if fields.is_empty() {
            return self;
        }

        let expression = format!("({})", fields.join(" OR "));
        self.where_args(&expression, values)
    }

    /// Add a JOIN clause
    pub fn join(mut self, table_name: &str, table_alias: &str, condition: &str) -> Self {
        self.joins.push(Join {
            table_name: table_name.to_string(),
            table_alias: table_alias.to_string(),
            condition: condition.to_string(),
        });
        self
    }

    /// Add a GROUP BY expression
    pub fn group_by(mut self, expression: &str) -> Self {
        self.groups.push(expression.to_string());
        self
    }

    /// Add an ORDER BY expression
    pub fn order_by(mut self, expression: &str) -> Self {
        self.orders.push(expression.to_string());
        self
    }

    /// Set the LIMIT clause; zero is ignored
    pub fn limit(mut self, limit: u64) -> Self {
        if limit != 0 {
            self.limit = limit;
        }
        self
    }

    /// Set the OFFSET clause; zero is ignored
    pub fn offset(mut self, offset: u64) -> Self {
        if offset != 0 {
            self.offset = offset;
        }
        self
    }

    /// Add a column to the INSERT list and bind its value
    pub fn insert_value<V>(mut self, column: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.query_type = Some(QueryType::Insert);
        self.args.push(value.into());
        self.inserts.push((column.to_string(), self.args.len()));
        self
    }

    /// Add a SET assignment carrying a single `?` marker
    ///
    /// Registering an assignment that is already present does nothing.
    pub fn update_value<V>(mut self, expression: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        if self.updates.contains_key(expression) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "sqlchain", expression, "update assignment already registered");
            return self;
        }

        self.query_type = Some(QueryType::Update);

        match substitute_markers(expression, vec![value.into()], &mut self.args) {
            Some(rendered) => {
                self.updates.insert(expression.to_string(), rendered);
            }
            None => self.record_mismatch(expression, 1),
        }
        self
    }

    /// Add a SET assignment unless `value` is empty
    pub fn update_value_not_empty<V>(self, expression: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        let value = value.into();
        if value.is_empty() {
            return self;
        }
        self.update_value(expression, value)
    }

    /// Arguments bound so far, in placeholder order
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn query_type(&self) -> Option<QueryType> {
        self.query_type
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn table_alias(&self) -> &str {
        &self.table_alias
    }

    /// The first error recorded while building, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    fn record_mismatch(&mut self, expression: &str, values: usize) {
        let markers = expression.matches(MARKER).count();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain", expression, markers, values, "placeholder count mismatch");
        if self.error.is_none() {
            self.error = Some(Error::argument_count_mismatch(expression, markers, values));
        }
    }

    /// Fail with the first recorded build error
    fn check(&self) -> Result<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn where_sql(&self) -> String {
        if self.wheres.is_empty() {
            return String::new();
        }
        let statements: Vec<&str> = self.wheres.values().map(String::as_str).collect();
        format!("WHERE {}", statements.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_defaults_to_table_name() {
        let builder = Builder::new("users", "");
        assert_eq!(builder.table_name(), "users");
        assert_eq!(builder.table_alias(), "users");

        let builder = Builder::new("users", "u");
        assert_eq!(builder.table_alias(), "u");
    }

    #[test]
    fn test_where_numbers_follow_call_order() {
        let builder = Builder::new("t", "")
            .where_("a=?", 1)
            .where_args("b IN (?, ?)", ("x", "y"))
            .where_("c=?", 3.5);

        assert_eq!(builder.where_sql(), "WHERE a=$1 AND b IN ($2, $3) AND c=$4");
        assert_eq!(
            builder.args(),
            &[
                Value::I32(1),
                Value::String("x".to_string()),
                Value::String("y".to_string()),
                Value::F64(3.5),
            ]
        );
    }

    #[test]
    fn test_duplicate_where_is_ignored() {
        let builder = Builder::new("t", "")
            .where_("a=?", 1)
            .where_("a=?", 2)
            .where_args("a=?", vec![3]);

        assert_eq!(builder.where_sql(), "WHERE a=$1");
        assert_eq!(builder.args(), &[Value::I32(1)]);
        assert!(builder.error().is_none());
    }

    #[test]
    fn test_where_without_values() {
        let builder = Builder::new("t", "").where_args("deleted_at IS NULL", ());
        assert_eq!(builder.where_sql(), "WHERE deleted_at IS NULL");
        assert!(builder.args().is_empty());
    }

    #[test]
    fn test_where_not_empty_skips_empty_values() {
        let builder = Builder::new("t", "")
            .where_not_empty("a=?", None::<i32>)
            .where_not_empty("b=?", "")
            .where_not_empty("c=?", 0)
            .where_not_empty("d=?", 0.0)
            .where_not_empty("e=?", Vec::<String>::new())
            .where_not_empty("f=?", chrono::DateTime::from_timestamp(0, 0).unwrap())
            .where_not_empty("g=?", "kept");

        assert_eq!(builder.where_sql(), "WHERE g=$1");
        assert_eq!(builder.args(), &[Value::String("kept".to_string())]);
    }

    #[test]
    fn test_or_groups_surviving_conditions() {
        let builder = Builder::new("t", "").where_("a=?", 1).or([
            where_not_empty("b=?", "x"),
            None,
            where_not_empty("c=?", ""),
            Some(Condition::new("d=?", 4)),
        ]);

        assert_eq!(builder.where_sql(), "WHERE a=$1 AND (b=$2 OR d=$3)");
        assert_eq!(builder.args().len(), 3);
        assert_eq!(builder.args()[2], Value::I32(4));
    }

    #[test]
    fn test_or_with_nothing_left_is_noop() {
        let builder = Builder::new("t", "").or([where_not_empty("a=?", ""), None]);
        assert_eq!(builder.where_sql(), "");
        assert!(builder.args().is_empty());
    }

    #[test]
    fn test_limit_and_offset_ignore_zero() {
        let builder = Builder::new("t", "").limit(10).offset(5).limit(0).offset(0);
        assert_eq!(builder.limit, 10);
        assert_eq!(builder.offset, 5);
    }

    #[test]
    fn test_insert_value_tracks_positions() {
        let builder = Builder::new("t", "")
            .insert_value("a", 1)
            .insert_value("b", "two");

        assert_eq!(builder.inserts, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert_eq!(builder.query_type(), Some(QueryType::Insert));
    }

    #[test]
    fn test_update_value_dedup_and_numbering() {
        let builder = Builder::new("t", "")
            .where_("id=?", 9)
            .update_value("a=?", 1)
            .update_value("a=?", 2)
            .update_value("b=?", 3);

        let assignments: Vec<&str> = builder.updates.values().map(String::as_str).collect();
        assert_eq!(assignments, vec!["a=$2", "b=$3"]);
        assert_eq!(builder.args(), &[Value::I32(9), Value::I32(1), Value::I32(3)]);
        assert_eq!(builder.query_type(), Some(QueryType::Update));
    }

    #[test]
    fn test_repeated_update_leaves_query_type() {
        let builder = Builder::new("t", "")
            .update_value("a=?", 1)
            .select("a")
            .update_value("a=?", 2);

        assert_eq!(builder.query_type(), Some(QueryType::Select));
        assert_eq!(builder.args(), &[Value::I32(1)]);
    }

    #[test]
    fn test_unsigned_arguments() {
        let id: u64 = 42;
        let page: usize = 3;
        let builder = Builder::new("t", "")
            .where_("id=?", id)
            .where_("page=?", page);

        assert_eq!(builder.where_sql(), "WHERE id=$1 AND page=$2");
        assert_eq!(builder.args(), &[Value::I64(42), Value::I64(3)]);
    }

    #[test]
    fn test_update_value_not_empty_checks_value() {
        let builder = Builder::new("t", "")
            .update_value_not_empty("a=?", "")
            .update_value_not_empty("b=?", "set");

        let assignments: Vec<&str> = builder.updates.values().map(String::as_str).collect();
        assert_eq!(assignments, vec!["b=$1"]);
    }

    #[test]
    fn test_mismatch_is_recorded_once() {
        let builder = Builder::new("t", "")
            .where_args("a=? AND b=?", (1,))
            .update_value("c=1", 2)
            .where_("d=?", 3);

        assert_eq!(
            builder.error(),
            Some(&Error::argument_count_mismatch("a=? AND b=?", 2, 1))
        );
        // the failed calls bind nothing
        assert_eq!(builder.args(), &[Value::I32(3)]);
        assert_eq!(builder.where_sql(), "WHERE d=$1");
    }

    #[test]
    fn test_query_type_tracks_last_call() {
        let builder = Builder::new("t", "");
        assert_eq!(builder.query_type(), None);

        let builder = builder.select("a");
        assert_eq!(builder.query_type(), Some(QueryType::Select));
        assert_eq!(QueryType::Select.to_string(), "select");
    }

    #[test]
    fn test_builder_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Builder>();
    }
}
