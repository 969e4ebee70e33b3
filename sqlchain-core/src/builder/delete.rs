//! DELETE rendering

use super::common::Prepared;
use super::Builder;
use crate::{Error, Result, Value};

/// A rendered DELETE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSql {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Prepared for DeleteSql {
    fn sql(&self) -> &str {
        &self.sql
    }

    fn args(&self) -> &[Value] {
        &self.args
    }
}

impl Builder {
    /// Render the WHERE filters as a DELETE
    ///
    /// Unlike [`Builder::update_sql`], which renders an empty WHERE fragment
    /// and so touches every row, a DELETE without any filter is refused with
    /// [`Error::InvalidQuery`]. Add an always-true condition such as
    /// `where_args("1=1", ())` to delete a whole table on purpose.
    pub fn delete_sql(&self) -> Result<DeleteSql> {
        self.check()?;
        if self.wheres.is_empty() {
            return Err(Error::invalid_query(
                "DELETE requires WHERE condition for safety",
            ));
        }

        let sql = format!(
            "DELETE FROM {} {} {}",
            self.table_name,
            self.table_alias,
            self.where_sql()
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlchain", sql = %sql, args = self.args.len(), "rendered delete");

        Ok(DeleteSql {
            sql,
            args: self.args.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{table, where_not_empty, Value};

    #[test]
    fn test_delete_builder() {
        let query = table("users", "u")
            .where_("u.age < ?", 18)
            .delete_sql()
            .unwrap();
        assert_eq!(query.sql, "DELETE FROM users u WHERE u.age < $1");
        assert_eq!(query.args, vec![Value::I32(18)]);
    }

    #[test]
    fn test_delete_multiple_conditions() {
        let query = table("users", "u")
            .where_("u.age < ?", 18)
            .or([
                where_not_empty("u.status=?", "inactive"),
                where_not_empty("u.status=?", "banned"),
            ])
            .delete_sql()
            .unwrap();

        assert_eq!(
            query.sql,
            "DELETE FROM users u WHERE u.age < $1 AND (u.status=$2 OR u.status=$3)"
        );
    }

    #[test]
    fn test_delete_whole_table_needs_explicit_filter() {
        let query = table("sessions", "").where_args("1=1", ()).delete_sql().unwrap();
        assert_eq!(query.sql, "DELETE FROM sessions sessions WHERE 1=1");
        assert!(query.args.is_empty());

        // the same unfiltered state is accepted by update_sql
        let update = table("sessions", "")
            .update_value("expired=?", true)
            .update_sql()
            .unwrap();
        assert_eq!(update.sql, "UPDATE sessions sessions SET expired=$1 ");
        assert!(table("sessions", "").update_value("expired=?", true).delete_sql().is_err());
    }

    #[test]
    fn test_delete_without_where_fails() {
        let result = table("users", "u").delete_sql();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("DELETE requires WHERE condition for safety"));
    }
}
