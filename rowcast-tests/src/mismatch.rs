use crate::{reader, silent_logs};
use rowcast::{Connection, LoadError, Mismatch, diagnose_mismatch};
use std::any;

pub async fn mismatch<C: Connection>(connection: &C) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS payments;
            CREATE TABLE payments (id INTEGER, amount TEXT);
            INSERT INTO payments (id, amount) VALUES (1, '10'), (2, 'n/a');",
        )
        .expect("Failed to create the payments table");
    let reader = reader(connection);
    let statement = connection
        .prepare("SELECT id, amount FROM payments ORDER BY id")
        .expect("Failed to prepare the payments query");
    silent_logs! {
        let error = reader
            .load_statement::<(i64, i64), _>(&statement)
            .expect_err("A text column cannot be loaded as an integer");
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::ColumnTypeMismatch {
                table: 0,
                column: "amount".into(),
                expected: any::type_name::<i64>(),
                actual: "TEXT".into(),
            })
        );
    }
    assert_eq!(
        diagnose_mismatch::<(i64, i64), _>(reader.cache(), &statement, 0),
        Some(Mismatch {
            column: "amount".into(),
            expected: any::type_name::<i64>(),
            actual: "TEXT".into(),
        })
    );

    // The text type is right
    let rows = reader
        .load_statement::<(i64, String), _>(&statement)
        .expect("Failed to load the payments as text")
        .rows()
        .expect("Expected the payments rows");
    assert_eq!(rows[1], (2, "n/a".to_string()));
}
