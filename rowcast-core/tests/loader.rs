#[cfg(test)]
mod tests {
    use rowcast_core::{
        AsValue, ColumnSchema, Cursor, Error, GenericTypeMap, LoadError, LoaderKind, Member,
        Result, RowLabeled, Shape, Target, Value,
        memory::{MemoryCursor, ResultSet},
        reflect, synthesize,
    };
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use time::{Date, Month, PrimitiveDateTime, Time};

    #[derive(Debug, PartialEq)]
    struct Settings {
        level: i64,
        label: String,
        ratio: f64,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                level: -1,
                label: "unset".into(),
                ratio: 0.5,
            }
        }
    }

    impl Target for Settings {
        const KIND: LoaderKind = LoaderKind::Record;
        fn shape() -> Shape<Self> {
            Shape::Record {
                new: <Self as Default>::default,
                members: vec![
                    Member::new::<i64>("level", |target: &mut Self, value: Value| -> Result<()> {
                        target.level = AsValue::try_from_value(value)?;
                        Ok(())
                    }),
                    Member::new::<String>("label", |target: &mut Self, value: Value| -> Result<()> {
                        target.label = AsValue::try_from_value(value)?;
                        Ok(())
                    }),
                    Member::new::<f64>("ratio", |target: &mut Self, value: Value| -> Result<()> {
                        target.ratio = AsValue::try_from_value(value)?;
                        Ok(())
                    }),
                ],
            }
        }
    }

    fn load_all<T: Target>(set: ResultSet) -> Result<Vec<T>> {
        let mut cursor = MemoryCursor::new([set]);
        let shape = T::shape();
        let bindings = reflect(cursor.columns(), &shape, &GenericTypeMap)?;
        let loader = synthesize(Arc::from(bindings), shape)?;
        let mut result = Vec::new();
        while cursor.read()? {
            result.push(loader.load(&cursor)?);
        }
        Ok(result)
    }

    #[test]
    fn null_keeps_default() {
        let set = ResultSet::new([("level", "INT"), ("label", "TEXT"), ("ratio", "DOUBLE")])
            .row([
                Value::Int32(None),
                Value::Varchar(Some("x".into())),
                Value::Float64(None),
            ])
            .row([
                Value::Int32(Some(3)),
                Value::Varchar(None),
                Value::Float64(Some(1.5)),
            ]);
        let rows = load_all::<Settings>(set).unwrap();
        assert_eq!(
            rows,
            [
                Settings {
                    level: -1,
                    label: "x".into(),
                    ratio: 0.5,
                },
                Settings {
                    level: 3,
                    label: "unset".into(),
                    ratio: 1.5,
                },
            ]
        );
    }

    #[test]
    fn unboxing_widens() {
        let set = ResultSet::new([("level", "SMALLINT")]).row([Value::Int16(Some(7))]);
        let rows = load_all::<Settings>(set).unwrap();
        assert_eq!(rows[0].level, 7);
        assert_eq!(rows[0].label, "unset");
    }

    #[test]
    fn tuple_positional() {
        let set = ResultSet::new([("A", "INT"), ("B", "VARCHAR"), ("C", "BOOLEAN")])
            .row([
                Value::Int32(Some(1)),
                Value::Varchar(Some("one".into())),
                Value::Boolean(Some(true)),
            ])
            .row([
                Value::Int32(Some(2)),
                Value::Varchar(None),
                Value::Boolean(Some(false)),
            ]);
        let rows = load_all::<(i32, Option<String>, bool)>(set).unwrap();
        assert_eq!(rows, [(1, Some("one".into()), true), (2, None, false)]);
    }

    #[test]
    fn invalid_cast() {
        let set = ResultSet::new([("level", "VARCHAR")]).row([Value::Varchar(Some("high".into()))]);
        let error = load_all::<Settings>(set).unwrap_err();
        let Some(LoadError::InvalidCast { target, reason }) = error.downcast_ref::<LoadError>()
        else {
            panic!("Unexpected error: {:#}", error);
        };
        assert_eq!(*target, std::any::type_name::<Settings>());
        assert!(reason.contains("level"), "{}", reason);
    }

    #[test]
    fn dynamic_rows() {
        let set = ResultSet::new([("id", "INT"), ("id", "TEXT"), ("when", "DATE")])
            .row([
                Value::Int32(Some(1)),
                Value::Varchar(Some("one".into())),
                Value::Date(None),
            ]);
        let rows = load_all::<RowLabeled>(set).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.names(), ["id", "id_2", "when"]);
        assert_eq!(row.get_column("id"), Some(&Value::Int32(Some(1))));
        assert_eq!(row.get_column("id_2"), Some(&Value::Varchar(Some("one".into()))));
        assert_eq!(row.get_column("when"), Some(&Value::Date(None)));
    }

    #[test]
    fn temporal_from_text() {
        let set = ResultSet::new([("day", "VARCHAR"), ("at", "TEXT"), ("stamp", "VARCHAR")])
            .row([
                Value::Varchar(Some("2024-02-29".into())),
                Value::Varchar(Some("13:05:09".into())),
                Value::Varchar(Some("2024-02-29 13:05:09".into())),
            ]);
        let rows = load_all::<(Date, Time, PrimitiveDateTime)>(set).unwrap();
        let day = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        let at = Time::from_hms(13, 5, 9).unwrap();
        assert_eq!(rows, [(day, at, PrimitiveDateTime::new(day, at))]);
    }

    #[test]
    fn long_text_cast_fails() {
        let text = format!("{}é{}", "a".repeat(496), "b".repeat(20));
        let set = ResultSet::new([("amount", "VARCHAR")]).row([Value::Varchar(Some(text))]);
        let error = load_all::<(Decimal,)>(set).unwrap_err();
        let Some(LoadError::InvalidCast { reason, .. }) = error.downcast_ref::<LoadError>() else {
            panic!("Unexpected error: {:#}", error);
        };
        assert!(reason.contains("amount"), "{}", reason);
        assert!(reason.contains("..."), "{}", reason);
    }

    /// Fails to read the values of one column.
    struct Garbled {
        cursor: MemoryCursor,
        column: usize,
    }

    impl Cursor for Garbled {
        fn columns(&self) -> &[ColumnSchema] {
            self.cursor.columns()
        }
        fn read(&mut self) -> Result<bool> {
            self.cursor.read()
        }
        fn next_result(&mut self) -> Result<bool> {
            self.cursor.next_result()
        }
        fn is_null(&self, index: usize) -> Result<bool> {
            self.cursor.is_null(index)
        }
        fn get(&self, index: usize, expected: &Value) -> Result<Value> {
            if index == self.column {
                return Err(Error::msg("invalid utf-8 sequence"));
            }
            self.cursor.get(index, expected)
        }
    }

    #[test]
    fn driver_read_failure_is_cast() {
        let set = ResultSet::new([("level", "BIGINT"), ("label", "TEXT")])
            .row([Value::Int64(Some(1)), Value::Varchar(Some("x".into()))]);
        let mut cursor = Garbled {
            cursor: MemoryCursor::new([set]),
            column: 1,
        };
        let shape = Settings::shape();
        let bindings = reflect(cursor.columns(), &shape, &GenericTypeMap).unwrap();
        let loader = synthesize(Arc::from(bindings), shape).unwrap();
        assert!(cursor.read().unwrap());
        let error = loader.load(&cursor).unwrap_err();
        let Some(LoadError::InvalidCast { reason, .. }) = error.downcast_ref::<LoadError>() else {
            panic!("Unexpected error: {:#}", error);
        };
        assert!(reason.contains("label"), "{}", reason);
        assert!(reason.contains("invalid utf-8"), "{}", reason);
    }

    #[test]
    fn loader_is_shared() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<rowcast_core::Loader<Settings>>();
        assert_send_sync::<rowcast_core::Loader<RowLabeled>>();
    }
}
