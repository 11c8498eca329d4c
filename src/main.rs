use kriteria::{Dialect, JoinKind, QueryBuilder, Raw, prelude::*};

fn main() -> kriteria::Result<()> {
    let query = QueryBuilder::new(Dialect::MySql);

    let mut select = query.select(("user", "u"));
    select
        .columns(["u.id", "username as uname"])
        .join_with(("user_permission", "p"), JoinKind::Inner, |join| {
            join.where_columns_equals("p.user_id", "u.id");
        })
        .limit(5, Some(0))
        .group_by("u.id")
        .order_by(["username", "firstname"], "ASC")?
        .where_("firstname", "=", "Christoffer")
        .where_not_in("u.id", [2]);
    print(&select.to_sql());

    let mut select = query.select("user");
    select
        .order_by_asc("id")
        .where_group(|group| {
            group
                .where_("name", "LIKE", "%chris%")
                .where_or("username", "LIKE", "%chris%");
        })
        .where_("active", "=", 1);
    print(&select.to_sql());

    let mut update = query.update("user");
    update
        .set_value(
            "firstname",
            Raw::with_params("REPLACE(firstname, ?, ?)", ["Doe", "Eod"]),
        )
        .where_("firstname", "LIKE", "%Doe%");
    print(&update.to_sql());

    let mut delete = query.delete("user");
    delete
        .where_columns("created_at", "<", "expires_at")?
        .where_or_is_null("email");
    print(&delete.to_sql());

    Ok(())
}

fn print(raw: &Raw) {
    println!("{raw}\n{:?}\n", raw.params());
}
