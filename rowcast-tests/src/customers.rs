use crate::reader;
use rowcast::{
    Connection, Record,
    stream::{StreamExt, TryStreamExt},
};
use rust_decimal::Decimal;
use std::sync::Arc;
use time::{Date, Month};

#[derive(Record, Default, Debug, PartialEq)]
pub struct Customer {
    id: i64,
    name: String,
    email: Option<String>,
    balance: Decimal,
    #[rowcast(name = "created_on")]
    created: Option<Date>,
    active: bool,
}

pub async fn customers<C: Connection>(connection: &C)
where
    C::Statement: 'static,
{
    // Setup
    connection
        .execute_batch(
            "DROP TABLE IF EXISTS customers;
            CREATE TABLE customers (
                id INTEGER PRIMARY KEY,
                name VARCHAR(64) NOT NULL,
                email TEXT,
                balance DECIMAL(10, 2),
                created_on DATE,
                active BOOLEAN
            );
            INSERT INTO customers (id, name, email, balance, created_on, active) VALUES
                (1, 'Ada', 'ada@example.com', 10.50, '2020-01-31', 1),
                (2, 'Grace', NULL, 0, NULL, 0),
                (3, 'Linus', 'linus@example.com', 99.5, '1991-09-17', 1);",
        )
        .expect("Failed to create the customers table");
    let reader = reader(connection);
    let statement = connection
        .prepare("SELECT id, name, email, balance, created_on, active FROM customers ORDER BY id")
        .expect("Failed to prepare the customers query");

    // Blocking
    let rows = reader
        .load_statement::<Customer, _>(&statement)
        .expect("Failed to load the customers")
        .rows()
        .expect("Expected the customers rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        Customer {
            id: 1,
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            balance: Decimal::new(1050, 2),
            created: Some(Date::from_calendar_date(2020, Month::January, 31).unwrap()),
            active: true,
        }
    );
    assert_eq!(
        rows[1],
        Customer {
            id: 2,
            name: "Grace".into(),
            email: None,
            balance: Decimal::ZERO,
            created: None,
            active: false,
        }
    );
    assert_eq!(rows[2].balance, Decimal::new(995, 1));
    assert_eq!(reader.cache().reflections(), 1);

    // Same shape, same loader
    reader
        .load_statement::<Customer, _>(&statement)
        .expect("Failed to load the customers again");
    assert_eq!(reader.cache().reflections(), 1);

    // Async
    let statement = Arc::new(statement);
    let again = reader
        .load_statement_async::<Customer, _>(statement.clone())
        .await
        .expect("Failed to load the customers asynchronously")
        .rows()
        .expect("Expected the customers rows");
    assert_eq!(again, rows);

    // Stream
    let names = reader
        .stream_statement::<Customer, _>(statement.clone())
        .map_ok(|v| v.name)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to stream the customers");
    assert_eq!(names, ["Ada", "Grace", "Linus"]);
    let first = reader
        .stream_statement::<Customer, _>(statement)
        .take(1)
        .collect::<Vec<_>>()
        .await;
    assert!(matches!(first.as_slice(), [Ok(Customer { id: 1, .. })]));
    assert_eq!(reader.cache().reflections(), 1);
}
