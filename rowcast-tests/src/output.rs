use crate::reader;
use rowcast::{Connection, RETURN_VALUE_COLUMN, RowLabeled, Section, Value};

pub async fn output<C: Connection>(connection: &C) {
    let reader = reader(connection);
    let statement = connection
        .prepare(format!(
            "SELECT 42 AS {}, 'done' AS status",
            RETURN_VALUE_COLUMN
        ))
        .expect("Failed to prepare the output query");
    let section = reader
        .load_statement::<(i64, String), _>(&statement)
        .expect("Failed to load the output row");
    let Section::Output(row) = section else {
        panic!("Expected an output row, got {:?}", section);
    };
    assert_eq!(
        row.get_column(RETURN_VALUE_COLUMN),
        Some(&Value::Int64(Some(42)))
    );
    assert_eq!(
        row.get_column("status"),
        Some(&Value::Varchar(Some("done".into())))
    );
    assert!(
        reader
            .load_statement::<RowLabeled, _>(&statement)
            .expect("Failed to load the output row")
            .is_output()
    );
    assert!(reader.cache().is_empty());
}
