//! Common types and traits shared by the builder and its renderers

use crate::Value;

/// Marker substituted with the next `$N` placeholder in WHERE and SET expressions
pub const MARKER: &str = "?";

/// A rendered statement: SQL text plus the arguments its placeholders refer to
pub trait Prepared {
    /// The SQL text with `$1..$N` placeholders
    fn sql(&self) -> &str;

    /// Arguments in placeholder order
    fn args(&self) -> &[Value];

    /// Build a sqlx query with every argument bound in order
    #[cfg(feature = "postgres")]
    fn to_query(&self) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
        crate::bind::bind_values(sqlx::query(self.sql()), self.args())
    }
}

/// A single filter used to assemble `or()` groups
///
/// Build one with [`Condition::new`], or with [`where_not_empty`] to drop it
/// when the value is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    value: Value,
}

impl Condition {
    /// Create a condition from an expression carrying one `?` marker and its value
    pub fn new<V>(field: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        Self {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (String, Value) {
        (self.field, self.value)
    }
}

/// Build a condition, or `None` when `value` is empty
///
/// # Examples
/// ```
/// use sqlchain_core::{table, where_not_empty};
///
/// let name: Option<&str> = None;
/// let query = table("users", "u")
///     .select("u.id")
///     .or([
///         where_not_empty("u.name=?", name),
///         where_not_empty("u.email=?", "jo@example.com"),
///     ])
///     .select_sql()
///     .unwrap();
///
/// assert!(query.sql.contains("WHERE (u.email=$1)"));
/// ```
pub fn where_not_empty<V>(field: &str, value: V) -> Option<Condition>
where
    V: Into<Value>,
{
    let value = value.into();
    if value.is_empty() {
        return None;
    }
    Some(Condition {
        field: field.to_string(),
        value,
    })
}

/// Trait for the value lists accepted by `where_args`
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl<T> IntoArgs for Vec<T>
where
    T: Into<Value>,
{
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T, const N: usize> IntoArgs for [T; N]
where
    T: Into<Value>,
{
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! impl_into_args_for_tuple {
    ($($name:ident),+) => {
        impl<$($name),+> IntoArgs for ($($name,)+)
        where
            $($name: Into<Value>,)+
        {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_args_for_tuple!(A);
impl_into_args_for_tuple!(A, B);
impl_into_args_for_tuple!(A, B, C);
impl_into_args_for_tuple!(A, B, C, D);
impl_into_args_for_tuple!(A, B, C, D, E);
impl_into_args_for_tuple!(A, B, C, D, E, F);

/// Trait to convert various types into column lists
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<String> {
        self
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

impl<const N: usize> IntoColumns for [&str; N] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

// For tuples
impl IntoColumns for (&str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string(), self.2.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![
            self.0.to_string(),
            self.1.to_string(),
            self.2.to_string(),
            self.3.to_string(),
        ]
    }
}

impl IntoColumns for (&str, &str, &str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![
            self.0.to_string(),
            self.1.to_string(),
            self.2.to_string(),
            self.3.to_string(),
            self.4.to_string(),
        ]
    }
}

/// Replace each `?` in `expression`, left to right, with the `$N` of the value
/// pushed onto `args` for it. Returns `None` when marker and value counts differ;
/// `args` is left untouched in that case.
pub(crate) fn substitute_markers(
    expression: &str,
    values: Vec<Value>,
    args: &mut Vec<Value>,
) -> Option<String> {
    if expression.matches(MARKER).count() != values.len() {
        return None;
    }

    let mut rendered = String::with_capacity(expression.len() + values.len() * 2);
    let mut pieces = expression.split(MARKER);
    if let Some(head) = pieces.next() {
        rendered.push_str(head);
    }
    for (piece, value) in pieces.zip(values) {
        args.push(value);
        rendered.push('$');
        rendered.push_str(&args.len().to_string());
        rendered.push_str(piece);
    }
    Some(rendered)
}
