#[cfg(test)]
mod tests {
    use rowcast::{
        LoadError, Reader, Record, RowLabeled, Section, ShapeCache, Target, Value,
        memory::{MemoryCursor, MemoryStatement, ResultSet},
    };
    use rust_decimal::Decimal;
    use std::{any, sync::Arc};
    use time::{Date, Month};
    use uuid::Uuid;

    #[derive(Record, Default, Debug, PartialEq)]
    #[rowcast(rename_all = "PascalCase")]
    struct Customer {
        id: i32,
        name: Option<String>,
    }

    #[derive(Debug, PartialEq, Default)]
    struct Email(String);

    impl From<String> for Email {
        fn from(value: String) -> Self {
            Email(value.to_lowercase())
        }
    }

    #[derive(Record, Default, Debug, PartialEq)]
    struct Account {
        #[rowcast(name = "account_id")]
        id: Uuid,
        #[rowcast(from = String)]
        email: Email,
        balance: Decimal,
        opened: Option<Date>,
        #[rowcast(skip)]
        cached: Vec<String>,
        r#type: String,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    struct Order {
        id: i32,
        #[rowcast(name = "order-date")]
        order_date: Option<String>,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    #[rowcast(rename_all = "kebab-case")]
    struct Shipment {
        order_id: i32,
        ship_to: String,
    }

    fn customers() -> ResultSet {
        ResultSet::new([("Id", "INT"), ("Name", "VARCHAR")])
            .row([Value::Int32(Some(1)), Value::Varchar(Some("a".into()))])
            .row([Value::Int32(Some(2)), Value::Varchar(None)])
    }

    #[test]
    fn customers_end_to_end() {
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([customers()]);
        let rows = reader.load_table::<Customer, _>(&mut cursor).unwrap();
        assert_eq!(
            rows,
            Section::Rows(vec![
                Customer {
                    id: 1,
                    name: Some("a".into()),
                },
                Customer { id: 2, name: None },
            ])
        );
        assert_eq!(reader.cache().reflections(), 1);
        let mut cursor = MemoryCursor::new([customers()]);
        reader.load_table::<Customer, _>(&mut cursor).unwrap();
        assert_eq!(reader.cache().reflections(), 1);
    }

    #[test]
    fn derived_shape() {
        let rowcast::Shape::Record { members, .. } = Customer::shape() else {
            panic!("Expected a record shape");
        };
        let names: Vec<_> = members.iter().map(|m| m.name).collect();
        assert_eq!(names, ["Id", "Name"]);
        assert!(!members[0].nullable);
        assert!(members[1].nullable);
        assert_eq!(members[1].value, Value::Varchar(None));
        let rowcast::Shape::Record { members, .. } = Account::shape() else {
            panic!("Expected a record shape");
        };
        let names: Vec<_> = members.iter().map(|m| m.name).collect();
        assert_eq!(names, ["account_id", "email", "balance", "opened", "type"]);
        assert!(members[1].alternate);
        assert_eq!(members[1].type_name, any::type_name::<Email>());
    }

    #[test]
    fn attributes() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let set = ResultSet::new([
            ("account_id", "UUID"),
            ("email", "VARCHAR"),
            ("balance", "DECIMAL"),
            ("opened", "DATE"),
            ("type", "VARCHAR"),
            ("cached", "VARCHAR"),
        ])
        .row([
            Value::Uuid(Some(id)),
            Value::Varchar(Some("Someone@Example.com".into())),
            Value::Decimal(Some(Decimal::new(1999, 2)), 10, 2),
            Value::Varchar(Some("2020-01-31".into())),
            Value::Varchar(Some("savings".into())),
            Value::Varchar(Some("ignored".into())),
        ]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([set]);
        let rows = reader
            .load_table::<Account, _>(&mut cursor)
            .unwrap()
            .rows()
            .unwrap();
        assert_eq!(
            rows,
            [Account {
                id,
                email: Email("someone@example.com".into()),
                balance: Decimal::new(1999, 2),
                opened: Some(Date::from_calendar_date(2020, Month::January, 31).unwrap()),
                cached: vec![],
                r#type: "savings".into(),
            }]
        );
    }

    #[test]
    fn explicit_name_with_symbols() {
        let set = ResultSet::new([("id", "INT"), ("order-date", "VARCHAR")])
            .row([Value::Int32(Some(1)), Value::Varchar(Some("2024-05-01".into()))]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([set]);
        let rows = reader
            .load_table::<Order, _>(&mut cursor)
            .unwrap()
            .rows()
            .unwrap();
        assert_eq!(
            rows,
            [Order {
                id: 1,
                order_date: Some("2024-05-01".into()),
            }]
        );
    }

    #[test]
    fn kebab_case_members() {
        let set = ResultSet::new([("order-id", "INT"), ("ship-to", "VARCHAR")])
            .row([Value::Int32(Some(7)), Value::Varchar(Some("Turin".into()))]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([set]);
        let rows = reader
            .load_table::<Shipment, _>(&mut cursor)
            .unwrap()
            .rows()
            .unwrap();
        assert_eq!(
            rows,
            [Shipment {
                order_id: 7,
                ship_to: "Turin".into(),
            }]
        );
    }

    #[test]
    fn alternate_is_diagnosed() {
        let set = ResultSet::new([("account_id", "UUID"), ("email", "INT")])
            .row([Value::Uuid(Some(Uuid::nil())), Value::Int32(Some(5))]);
        let statement = MemoryStatement::new("SELECT account_id, email FROM accounts", [set]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let error = reader.load_statement::<Account, _>(&statement).unwrap_err();
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::ColumnTypeMismatch {
                table: 0,
                column: "email".into(),
                expected: any::type_name::<String>(),
                actual: "INT".into(),
            })
        );
    }

    #[test]
    fn duplicate_column() {
        let set = ResultSet::new([("Id", "INT"), ("Name", "VARCHAR"), ("Name", "VARCHAR")]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([set.row([
            Value::Int32(Some(1)),
            Value::Varchar(None),
            Value::Varchar(None),
        ])]);
        let error = reader.load_table::<Customer, _>(&mut cursor).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<LoadError>(),
            Some(LoadError::ColumnNameDuplicate { column, .. }) if column == "Name"
        ));
    }

    #[test]
    fn unrelated_columns() {
        let set = ResultSet::new([("x", "INT")]).row([Value::Int32(Some(1))]);
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([set]);
        let error = reader.load_table::<Customer, _>(&mut cursor).unwrap_err();
        assert_eq!(
            error.downcast_ref::<LoadError>(),
            Some(&LoadError::InvalidDataClass {
                target: any::type_name::<Customer>()
            })
        );
    }

    #[test]
    fn dynamic_and_record_share_cursor_shape() {
        let reader = Reader::new(Arc::new(ShapeCache::default()));
        let mut cursor = MemoryCursor::new([customers()]);
        let rows = reader
            .load_table::<RowLabeled, _>(&mut cursor)
            .unwrap()
            .rows()
            .unwrap();
        assert_eq!(rows[0].get_column("Name"), Some(&Value::Varchar(Some("a".into()))));
        let mut cursor = MemoryCursor::new([customers()]);
        reader.load_table::<Customer, _>(&mut cursor).unwrap();
        assert_eq!(reader.cache().len(), 2);
    }
}
