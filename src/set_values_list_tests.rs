use crate::{
    Fragment, MySqlGrammar, PlaceholderList, PostgresGrammar, SetGroup, Value, ValuesGroup, query,
    values,
};
use pretty_assertions::assert_eq;

fn pg(f: &impl Fragment) -> String {
    f.render_with(&mut PostgresGrammar::new())
}

#[test]
fn set_assignments() {
    let b = SetGroup::new().set("name", "Marty").set("surname", "McFly");
    let q = query!("UPDATE table SET %s WHERE id = %p", b, 10).expect("valid template");
    assert_eq!(
        pg(&q),
        r#"UPDATE table SET "name" = $1, "surname" = $2 WHERE id = $3"#
    );
    assert_eq!(q.parameters(), values!["Marty", "McFly", 10]);
}

#[test]
fn set_raw_mixed_with_values() {
    let b = SetGroup::new()
        .set_raw(query!("jsondata->%p = %p", "name", "Marty").expect("valid template"))
        .set("t.updated_at", None::<i64>);
    assert_eq!(b.len(), 2);
    let q = query!("UPDATE table SET %s WHERE id = %p", b, 10).expect("valid template");
    assert_eq!(
        pg(&q),
        r#"UPDATE table SET jsondata->$1 = $2, "t"."updated_at" = $3 WHERE id = $4"#
    );
    assert_eq!(
        q.parameters(),
        vec![
            Value::from("name"),
            Value::from("Marty"),
            Value::Null,
            Value::from(10)
        ]
    );
    assert_eq!(
        q.render_with(&mut MySqlGrammar),
        "UPDATE table SET jsondata->? = ?, `t`.`updated_at` = ? WHERE id = ?"
    );
}

#[test]
fn empty_set_group() {
    let b = SetGroup::new();
    assert!(b.is_empty());
    assert_eq!(pg(&b), "");
}

#[test]
fn values_single_row() {
    let b = ValuesGroup::new().values(values![1, "Marty", "McFly"]);
    let q = query!("INSERT INTO table (id, name, surname) VALUES %s", b).expect("valid template");
    assert_eq!(
        pg(&q),
        "INSERT INTO table (id, name, surname) VALUES ($1, $2, $3)"
    );
    assert_eq!(q.parameters(), values![1, "Marty", "McFly"]);
}

#[test]
fn values_many_rows() {
    let b = ValuesGroup::new()
        .values(values![1, "Marty", "McFly"])
        .values(values![2, "Emmett", "Brown"]);
    assert_eq!(b.len(), 2);
    let q = query!("INSERT INTO table (id, name, surname) VALUES %s", b).expect("valid template");
    assert_eq!(
        pg(&q),
        "INSERT INTO table (id, name, surname) VALUES ($1, $2, $3), ($4, $5, $6)"
    );
    assert_eq!(
        q.render_with(&mut MySqlGrammar),
        "INSERT INTO table (id, name, surname) VALUES (?, ?, ?), (?, ?, ?)"
    );
    assert_eq!(
        q.parameters(),
        values![1, "Marty", "McFly", 2, "Emmett", "Brown"]
    );
}

#[test]
fn values_empty_tuple() {
    let b = ValuesGroup::new().values(()).values([7]);
    assert_eq!(pg(&b), "(), ($1)");
    assert_eq!(b.parameters(), values![7]);
}

#[test]
fn list_single_append() {
    let b = PlaceholderList::new().append(["one", "two", "three"]);
    let q = query!("SELECT id FROM table WHERE name ?| ARRAY[%s]", b).expect("valid template");
    assert_eq!(pg(&q), "SELECT id FROM table WHERE name ?| ARRAY[$1, $2, $3]");
    assert_eq!(q.parameters(), values!["one", "two", "three"]);
}

#[test]
fn list_empty_append_is_noop() {
    let b = PlaceholderList::new()
        .append(["one", "two"])
        .append(())
        .append(["three"]);
    assert_eq!(b.len(), 3);
    assert_eq!(pg(&b), "$1, $2, $3");
    assert_eq!(b.parameters(), values!["one", "two", "three"]);

    let leading_empty = PlaceholderList::new().append(Vec::<Value>::new()).append([1]);
    assert_eq!(pg(&leading_empty), "$1");
}

#[test]
fn list_mysql() {
    let b = PlaceholderList::new().append(["one", "two"]).append(["three"]);
    let q = query!("SELECT id FROM table WHERE name ?| ARRAY[%s]", b).expect("valid template");
    assert_eq!(
        q.render_with(&mut MySqlGrammar),
        "SELECT id FROM table WHERE name ?| ARRAY[?, ?, ?]"
    );
    assert_eq!(q.parameters(), values!["one", "two", "three"]);
}

#[test]
fn empty_list_renders_nothing() {
    let b = PlaceholderList::new().append(());
    assert!(b.is_empty());
    assert_eq!(pg(&b), "");
}
