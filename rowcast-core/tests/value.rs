#[cfg(test)]
mod tests {
    use rowcast_core::{AsValue, TRUNCATE_LENGTH, Truncated, Value};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{Date, Month, PrimitiveDateTime, Time};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert_eq!(Value::Int32(None), Value::Int32(None));
        assert_ne!(Value::Int32(None), Value::Int64(None));
    }

    #[test]
    fn value_is_null() {
        assert!(Value::Null.is_null());
        assert!(Value::Varchar(None).is_null());
        assert!(Value::Decimal(None, 10, 2).is_null());
        assert!(!Value::Boolean(Some(false)).is_null());
        assert_eq!(Value::Decimal(Some(Decimal::ONE), 4, 1).as_null(), Value::Decimal(None, 4, 1));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert_eq!(bool::try_from_value((1 as i8).into()).unwrap(), true);
        assert_eq!(bool::try_from_value((0 as i64).into()).unwrap(), false);
        assert_eq!(bool::try_from_value((2 as u16).into()).unwrap(), true);
        assert!(matches!(bool::try_from_value((0.5 as f32).into()), Err(..)));
        assert!(matches!(bool::try_from_value(Value::Varchar(Some("true".into()))), Err(..)));
        assert_eq!(bool::try_from_value(Value::Unknown(Some("false".into()))).unwrap(), false);
    }

    #[test]
    fn value_integers() {
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert!(matches!(i8::try_from_value((200 as u8).into()), Err(..)));
        assert_eq!(i64::try_from_value((-5 as i16).into()).unwrap(), -5);
        assert_eq!(u32::try_from_value((70000 as i64).into()).unwrap(), 70000);
        assert!(matches!(u64::try_from_value((-1 as i32).into()), Err(..)));
        assert_eq!(i32::try_from_value(true.into()).unwrap(), 1);
        assert_eq!(
            i32::try_from_value(Value::Decimal(Some(Decimal::from(12)), 10, 0)).unwrap(),
            12
        );
        assert!(matches!(
            i32::try_from_value(Value::Decimal(Some(Decimal::new(125, 1)), 10, 1)),
            Err(..)
        ));
        assert!(matches!(i16::try_from_value((0.1 as f64).into()), Err(..)));
        assert!(matches!(i32::try_from_value(Value::Varchar(Some("12".into()))), Err(..)));
        assert_eq!(i32::try_from_value(Value::Unknown(Some(" 12 ".into()))).unwrap(), 12);
    }

    #[test]
    fn value_out_of_range_message() {
        let error = i8::try_from_value((1000 as i32).into()).unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains("1000"), "{}", message);
        assert!(message.contains("i8"), "{}", message);
    }

    #[test]
    fn value_long_text_message() {
        let text = format!("{}é{}", "a".repeat(496), "b".repeat(20));
        let error = Uuid::try_from_value(Value::Varchar(Some(text.clone()))).unwrap_err();
        let message = format!("{:#}", error);
        assert!(message.contains(&format!("{}...", "a".repeat(496))), "{}", message);
        assert!(!message.contains('é'), "{}", message);
        assert_eq!(Truncated::new("żółw").to_string(), "żółw");
        let shown = Truncated::new(&text).to_string();
        assert!(shown.len() <= TRUNCATE_LENGTH + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn value_floats() {
        assert_eq!(f64::try_from_value((3 as i32).into()).unwrap(), 3.0);
        assert_eq!(f32::try_from_value((0.5 as f64).into()).unwrap(), 0.5);
        assert_eq!(
            f64::try_from_value(Value::Decimal(Some(Decimal::new(25, 1)), 2, 1)).unwrap(),
            2.5
        );
        assert!(matches!(f64::try_from_value(Value::Varchar(Some("2.5".into()))), Err(..)));
    }

    #[test]
    fn value_decimal() {
        let expected = Decimal::from_str("12.34").unwrap();
        assert_eq!(
            Decimal::try_from_value(Value::Varchar(Some("12.34".into()))).unwrap(),
            expected
        );
        assert_eq!(Decimal::try_from_value((7 as i64).into()).unwrap(), Decimal::from(7));
        assert!(matches!(
            Decimal::try_from_value(Value::Varchar(Some("n/a".into()))),
            Err(..)
        ));
        assert!(matches!(Decimal::try_from_value(Value::Boolean(Some(true))), Err(..)));
    }

    #[test]
    fn value_text() {
        assert_eq!(String::try_from_value('x'.into()).unwrap(), "x");
        assert_eq!(char::try_from_value(Value::Varchar(Some("y".into()))).unwrap(), 'y');
        assert!(matches!(char::try_from_value(Value::Varchar(Some("yz".into()))), Err(..)));
        assert!(matches!(String::try_from_value((1 as i32).into()), Err(..)));
        let val: Value = "hello".into();
        assert_eq!(val, Value::Varchar(Some("hello".into())));
    }

    #[test]
    fn value_blob() {
        let val: Value = vec![1u8, 2, 3].into();
        assert_eq!(val, Value::Blob(Some([1, 2, 3].into())));
        assert_eq!(Vec::<u8>::try_from_value(val).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn value_temporal() {
        let date = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        assert_eq!(
            Date::try_from_value(Value::Varchar(Some("2024-02-29".into()))).unwrap(),
            date
        );
        let time = Time::from_hms(13, 5, 9).unwrap();
        assert_eq!(
            Time::try_from_value(Value::Varchar(Some("13:05:09".into()))).unwrap(),
            time
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Varchar(Some("2024-02-29 13:05:09".into())))
                .unwrap(),
            PrimitiveDateTime::new(date, time)
        );
        assert_eq!(
            PrimitiveDateTime::try_from_value(Value::Varchar(Some("2024-02-29T13:05:09".into())))
                .unwrap(),
            PrimitiveDateTime::new(date, time)
        );
        assert!(matches!(
            Date::try_from_value(Value::Varchar(Some("2024-02-30".into()))),
            Err(..)
        ));
    }

    #[test]
    fn value_uuid() {
        let text = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(text.into()))).unwrap(),
            Uuid::parse_str(text).unwrap()
        );
    }

    #[test]
    fn value_option() {
        assert!(<Option<i32> as AsValue>::NULLABLE);
        assert!(!<i32 as AsValue>::NULLABLE);
        assert_eq!(Option::<i32>::try_from_value(Value::Int32(None)).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value((4 as i16).into()).unwrap(), Some(4));
        assert_eq!(Option::<String>::as_empty_value(), Value::Varchar(None));
        assert_eq!(None::<i64>.as_value(), Value::Int64(None));
    }

    #[test]
    fn value_convert_to() {
        assert_eq!(
            Value::Int64(Some(5)).convert_to(&Value::Int32(None)).unwrap(),
            Value::Int32(Some(5))
        );
        assert_eq!(
            Value::Int64(None).convert_to(&Value::Varchar(None)).unwrap(),
            Value::Varchar(None)
        );
        assert_eq!(
            Value::Varchar(Some("1.5".into()))
                .convert_to(&Value::Decimal(None, 4, 1))
                .unwrap(),
            Value::Decimal(Some(Decimal::new(15, 1)), 4, 1)
        );
        let error = Value::Varchar(Some("abc".into()))
            .convert_to(&Value::Int32(None))
            .unwrap_err();
        assert!(format!("{:#}", error).contains("Cannot cast into i32"));
    }

    #[test]
    fn value_same_type() {
        assert!(Value::Decimal(None, 10, 2).same_type(&Value::Decimal(Some(Decimal::ONE), 10, 2)));
        assert!(!Value::Decimal(None, 10, 2).same_type(&Value::Decimal(None, 10, 3)));
        assert!(Value::Decimal(None, 10, 2).same_kind(&Value::Decimal(None, 10, 3)));
        assert!(!Value::Int32(None).same_kind(&Value::Int64(None)));
    }
}
