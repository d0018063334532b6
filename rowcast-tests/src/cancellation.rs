use crate::{reader, silent_logs};
use rowcast::{Connection, LoadError};

pub async fn cancellation<C: Connection>(connection: &C) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS ticks;
            CREATE TABLE ticks (n INTEGER);
            INSERT INTO ticks (n) VALUES (1), (2), (3), (4), (5), (6), (7), (8), (9), (10);",
        )
        .expect("Failed to create the ticks table");
    let reader = reader(connection);
    let statement = connection
        .prepare("SELECT n FROM ticks ORDER BY n")
        .expect("Failed to prepare the ticks query");
    let token = reader.cancel_token().clone();
    let mut seen = Vec::new();
    silent_logs! {
        let error = reader
            .execute(&statement)
            .and_then(|mut batch| {
                batch.for_each::<(i64,)>(|(n,)| {
                    seen.push(n);
                    if seen.len() == 3 {
                        token.cancel();
                    }
                    Ok(())
                })
            })
            .expect_err("The load should stop once cancelled");
        assert_eq!(seen, [1, 2, 3]);
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::Cancelled {
                table: 0,
                completed_rows: 3,
            })
        );
    }

    token.reset();
    let rows = reader
        .load_statement::<(i64,), _>(&statement)
        .expect("Failed to load the ticks")
        .rows()
        .expect("Expected the ticks rows");
    assert_eq!(rows.len(), 10);
}
