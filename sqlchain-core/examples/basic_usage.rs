use sqlchain_core::{table, where_not_empty, Result};

fn main() -> Result<()> {
    // SELECT with a filter group that only keeps the search terms provided
    let search: Option<&str> = Some("%york%");
    let select_query = table("users", "u")
        .select(("u.id", "u.name", "u.email"))
        .where_("u.age > ?", 18)
        .where_("u.status = ?", "active")
        .or([
            where_not_empty("u.city ILIKE ?", search),
            where_not_empty("u.country = ?", ""),
        ])
        .order_by("u.name")
        .limit(10)
        .offset(5)
        .select_sql()?;

    println!("SELECT SQL: {}", select_query.sql);
    println!("COUNT SQL:  {}", select_query.count_sql);
    println!("args:       {:?}", select_query.args);

    // INSERT
    let insert_query = table("users", "")
        .insert_value("name", "John Doe")
        .insert_value("email", "john@example.com")
        .insert_value("age", 30)
        .insert_sql()?;
    println!("INSERT SQL: {}", insert_query.sql);

    // UPDATE: the filter was added first, so it owns $1
    let update_query = table("users", "u")
        .where_("u.id = ?", 123)
        .update_value("email = ?", "newemail@example.com")
        .update_value_not_empty("nickname = ?", "")
        .update_sql()?;
    println!("UPDATE SQL: {}", update_query.sql);

    // DELETE
    let delete_query = table("sessions", "s")
        .where_("s.expires_at < ?", chrono::Utc::now())
        .delete_sql()?;
    println!("DELETE SQL: {}", delete_query.sql);

    // Mismatched markers surface when rendering
    let broken = table("users", "u")
        .select("u.id")
        .where_args("u.age BETWEEN ? AND ?", (18,))
        .select_sql();
    println!("Broken query: {:?}", broken.err());

    Ok(())
}
