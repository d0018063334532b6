use crate::{reader, silent_logs};
use rowcast::{Connection, LoadError};

pub async fn tuples<C: Connection>(connection: &C) {
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS measures;
            CREATE TABLE measures (sensor VARCHAR(16), reading DOUBLE, note TEXT);
            INSERT INTO measures (sensor, reading, note) VALUES
                ('alpha', 1.5, NULL),
                ('bravo', -2.25, 'calibrated');",
        )
        .expect("Failed to create the measures table");
    let reader = reader(connection);
    let statement = connection
        .prepare("SELECT sensor, reading, note FROM measures ORDER BY sensor")
        .expect("Failed to prepare the measures query");
    let rows = reader
        .load_statement::<(String, f64, Option<String>), _>(&statement)
        .expect("Failed to load the measures")
        .rows()
        .expect("Expected the measures rows");
    assert_eq!(
        rows,
        [
            ("alpha".to_string(), 1.5, None),
            ("bravo".to_string(), -2.25, Some("calibrated".to_string())),
        ]
    );

    // More slots than columns
    silent_logs! {
        let error = reader
            .load_statement::<(String, f64, Option<String>, i32), _>(&statement)
            .expect_err("Four slots should not fit three columns");
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::NoMoreColumns {
                target: std::any::type_name::<(String, f64, Option<String>, i32)>(),
                expected: 4,
                actual: 3,
            })
        );
    }
}
