#[cfg(test)]
mod tests {
    use rowcast_core::{Connection, Cursor, LoadError, Reader, ShapeCache, Statement, Value};
    use rowcast_sqlite::SqliteConnection;
    use rowcast_tests::{execute_tests, init_logs, silent_logs};
    use std::{
        path::Path,
        sync::{Arc, Mutex},
    };
    use time::{Date, Month};
    use tokio::fs;

    static MUTEX: Mutex<()> = Mutex::new(());

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/tests.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH).await.expect(
                format!("Failed to remove existing test database file {}", DB_PATH).as_str(),
            );
        }
        let connection = SqliteConnection::connect(format!("sqlite://{}?mode=rwc", DB_PATH))
            .await
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        execute_tests(connection).await;
    }

    #[tokio::test]
    async fn memory() {
        init_logs();
        let connection =
            SqliteConnection::open("sqlite://:memory:").expect("Could not open the database");
        execute_tests(connection).await;
    }

    #[test]
    fn wrong_url() {
        init_logs();
        silent_logs! {
            assert!(SqliteConnection::open("postgres://localhost").is_err());
            assert!(SqliteConnection::open("sqlite://../target/debug/missing.sqlite?mode=ro").is_err());
        }
    }

    #[test]
    fn parameters() {
        init_logs();
        let connection =
            SqliteConnection::open("sqlite://:memory:").expect("Could not open the database");
        connection
            .execute_batch("CREATE TABLE events (id INTEGER, day DATE, label TEXT);")
            .expect("Failed to create the events table");
        let day = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        connection
            .prepare("INSERT INTO events (id, day, label) VALUES (?, ?, ?), (?, ?, ?);")
            .unwrap()
            .bind(1)
            .bind(day)
            .bind("leap".to_string())
            .bind(2)
            .bind(None::<Date>)
            .bind(None::<String>)
            .execute()
            .expect("Failed to insert the events");
        let reader = Reader::new(Arc::new(ShapeCache::new(connection.type_map())));
        let statement = connection
            .prepare("SELECT id, day, label FROM events WHERE id >= ? ORDER BY id")
            .unwrap()
            .bind(1);
        let rows = reader
            .load_statement::<(i64, Option<Date>, Option<String>), _>(&statement)
            .expect("Failed to load the events")
            .rows()
            .unwrap();
        assert_eq!(
            rows,
            [(1, Some(day), Some("leap".to_string())), (2, None, None)]
        );
        silent_logs! {
            let missing = connection.prepare("SELECT ?, ?").unwrap().bind(1);
            assert!(missing.execute().is_err());
        }
    }

    #[test]
    fn expression_types() {
        init_logs();
        let connection =
            SqliteConnection::open("sqlite://:memory:").expect("Could not open the database");
        let statement = connection
            .prepare("SELECT 1 + 1 AS two, 'text' AS word, NULL AS empty")
            .unwrap();
        let mut cursor = statement.execute().unwrap();
        assert_eq!(cursor.data_type_name(0), Some(""));
        assert!(cursor.read().unwrap());
        assert_eq!(cursor.data_type_name(0), Some("INTEGER"));
        assert_eq!(cursor.data_type_name(1), Some("TEXT"));
        assert_eq!(cursor.data_type_name(2), Some(""));
        assert!(cursor.is_null(2).unwrap());
        assert_eq!(
            cursor.get(0, &Value::Int32(None)).unwrap(),
            Value::Int32(Some(2))
        );
        assert!(!cursor.read().unwrap());
        assert!(!cursor.read().unwrap());
        assert!(!cursor.next_result().unwrap());
    }

    #[test]
    fn unrepresentable_member() {
        init_logs();
        let connection =
            SqliteConnection::open("sqlite://:memory:").expect("Could not open the database");
        let reader = Reader::new(Arc::new(ShapeCache::new(connection.type_map())));
        let statement = connection.prepare("SELECT 1 AS big").unwrap();
        silent_logs! {
            let error = reader.load_statement::<(u64,), _>(&statement).unwrap_err();
            assert!(matches!(
                error.downcast_ref::<LoadError>(),
                Some(LoadError::TypeNotSupported { .. })
            ));
        }
    }
}
