use crate::{reader, silent_logs};
use rowcast::{Connection, LoadError, RowLabeled, Section};

pub async fn multiple<C: Connection>(connection: &C) {
    let reader = reader(connection).allow_empty(false);
    let statement = connection
        .prepare(
            "SELECT 1 AS n;
            SELECT 'two' AS s;
            SELECT 3 AS n WHERE 1 = 0;",
        )
        .expect("Failed to prepare the multiple statements");
    let mut batch = reader
        .execute(&statement)
        .expect("Failed to execute the multiple statements");
    assert_eq!(
        batch.table::<(i64,)>().expect("Failed to load the first table"),
        Section::Rows(vec![(1,)])
    );
    assert_eq!(
        batch
            .table::<(String,)>()
            .expect("Failed to load the second table"),
        Section::Rows(vec![("two".to_string(),)])
    );
    assert_eq!(batch.current_table(), 1);
    assert_eq!(
        batch.table::<(i64,)>().expect("Failed to load the third table"),
        Section::Empty
    );
    silent_logs! {
        let error = batch
            .table::<RowLabeled>()
            .expect_err("There is no fourth table");
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::NoMoreResults { table: 3 })
        );
    }
}
