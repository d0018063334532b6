use crate::reader;
use rowcast::{Connection, RowLabeled, Value};

pub async fn dynamic<C: Connection>(connection: &C) {
    let reader = reader(connection);
    let statement = connection
        .prepare("SELECT 1 AS a, 'x' AS a, 2.5 AS b")
        .expect("Failed to prepare the dynamic query");
    let rows = reader
        .load_statement::<RowLabeled, _>(&statement)
        .expect("Failed to load the dynamic rows")
        .rows()
        .expect("Expected one row");
    let [row] = rows.as_slice() else {
        panic!("Expected exactly one row, got {}", rows.len());
    };
    assert_eq!(row.names(), ["a", "a_2", "b"]);
    assert_eq!(row.get_column("a"), Some(&Value::Int64(Some(1))));
    assert_eq!(row.get_column("a_2"), Some(&Value::Varchar(Some("x".into()))));
    assert_eq!(row.get_column("b"), Some(&Value::Float64(Some(2.5))));
}
