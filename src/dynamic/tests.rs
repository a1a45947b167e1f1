use std::sync::Arc;

use crate::{
    error::CastFailure,
    temporal::{Currency, Timestamp},
    Optional,
};

use super::*;

#[test]
fn types_and_predicates() {
    assert_eq!(DynamicValue::default().get_type(), DynamicType::Empty);
    assert!(DynamicValue::Empty.is_empty_or_null());
    assert!(DynamicValue::Null.is_empty_or_null());
    assert!(!DynamicValue::Bool(false).is_empty_or_null());
    assert!(!DynamicValue::U8(0).is_empty_or_null());
    assert!(!DynamicValue::from("").is_empty_or_null());
    assert_eq!(DynamicValue::from(3u16).get_type(), DynamicType::U16);
    assert_eq!(DynamicValue::from("x").get_type(), DynamicType::Text);
}

#[test]
fn bool_encodes_as_bool() {
    assert_eq!(true.to_dynamic(), Ok(DynamicValue::Bool(true)));
    assert_ne!(true.to_dynamic(), Ok(DynamicValue::U8(1)));
    assert_ne!(true.to_dynamic(), Ok(DynamicValue::I32(1)));
}

#[test]
fn integers_coerce_within_range() {
    assert_eq!(u8::from_dynamic(&DynamicValue::I64(200)), Ok(200));
    assert_eq!(i64::from_dynamic(&DynamicValue::U8(7)), Ok(7));
    assert_eq!(i32::from_dynamic(&DynamicValue::Bool(true)), Ok(1));
    assert_eq!(u16::from_dynamic(&DynamicValue::F64(12.0)), Ok(12));
    assert_eq!(i8::from_dynamic(&"-5".into()), Ok(-5));

    let err = u8::from_dynamic(&DynamicValue::I32(256)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    let err = u32::from_dynamic(&DynamicValue::I8(-1)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    let err = u8::from_dynamic(&"300".into()).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
}

#[test]
fn integers_reject_fractions_and_garbage() {
    let err = i32::from_dynamic(&DynamicValue::F64(1.5)).unwrap_err();
    assert_eq!(err.reason, CastFailure::NotIntegral);
    let err = i32::from_dynamic(&DynamicValue::F64(f64::NAN)).unwrap_err();
    assert_eq!(err.reason, CastFailure::NotIntegral);
    let err = i64::from_dynamic(&DynamicValue::F64(f64::INFINITY)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    let err = u8::from_dynamic(&DynamicValue::F32(f32::NEG_INFINITY)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    let err = i32::from_dynamic(&"twelve".into()).unwrap_err();
    assert_eq!(err.reason, CastFailure::Unparseable("twelve".into()));
    let err = i32::from_dynamic(&DynamicValue::Char('1')).unwrap_err();
    assert_eq!(err.reason, CastFailure::Incompatible);
    let err = i32::from_dynamic(&DynamicValue::Null).unwrap_err();
    assert_eq!(err.reason, CastFailure::Incompatible);
}

#[test]
fn wide_integers() {
    assert_eq!(usize::MAX.to_dynamic().map(|d| d.get_type()), Ok(DynamicType::U64));
    assert_eq!(7u128.to_dynamic(), Ok(DynamicValue::U64(7)));
    assert_eq!((-7i128).to_dynamic(), Ok(DynamicValue::I64(-7)));

    let err = u128::MAX.to_dynamic().unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    insta::assert_snapshot!(
        err.to_string(),
        @"`u128` value is out of range for `U64`"
    );

    assert_eq!(u128::from_dynamic(&DynamicValue::U64(9)), Ok(9));
}

#[test]
fn floats() {
    assert_eq!(f64::from_dynamic(&DynamicValue::I32(3)), Ok(3.0));
    assert_eq!(f64::from_dynamic(&DynamicValue::F32(0.5)), Ok(0.5));
    assert_eq!(f64::from_dynamic(&" 2.25 ".into()), Ok(2.25));
    assert_eq!(f32::from_dynamic(&DynamicValue::F64(0.25)), Ok(0.25));
    assert_eq!(
        f64::from_dynamic(&DynamicValue::Currency(Currency::from_scaled(12_500))),
        Ok(1.25)
    );

    let err = f32::from_dynamic(&DynamicValue::F64(1e300)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);
    let err = f64::from_dynamic(&DynamicValue::Char('x')).unwrap_err();
    assert_eq!(err.reason, CastFailure::Incompatible);
}

#[test]
fn booleans() {
    assert_eq!(bool::from_dynamic(&DynamicValue::Bool(false)), Ok(false));
    assert_eq!(bool::from_dynamic(&DynamicValue::I16(-3)), Ok(true));
    assert_eq!(bool::from_dynamic(&DynamicValue::F64(0.0)), Ok(false));
    assert_eq!(bool::from_dynamic(&"TRUE".into()), Ok(true));
    assert_eq!(bool::from_dynamic(&"False".into()), Ok(false));
    assert!(bool::from_dynamic(&"yes".into()).is_err());
}

#[test]
fn characters_and_text() {
    assert_eq!(char::from_dynamic(&"é".into()), Ok('é'));
    assert!(char::from_dynamic(&"ab".into()).is_err());
    assert!(char::from_dynamic(&"".into()).is_err());

    assert_eq!(String::from_dynamic(&DynamicValue::I32(-4)), Ok("-4".into()));
    assert_eq!(String::from_dynamic(&DynamicValue::Bool(true)), Ok("true".into()));
    assert_eq!(String::from_dynamic(&DynamicValue::Char('q')), Ok("q".into()));
    assert_eq!(
        Box::<str>::from_dynamic(&"boxed".into()),
        Ok(Box::<str>::from("boxed"))
    );
    assert!(String::from_dynamic(&DynamicValue::Null).is_err());

    let shared: Arc<str> = "shared".into();
    let dynamic = shared.to_dynamic().unwrap();
    let DynamicValue::Text(inner) = &dynamic else {
        panic!("expected text, got {dynamic:?}");
    };
    assert!(Arc::ptr_eq(inner, &shared));
    assert!(Arc::ptr_eq(&Arc::<str>::from_dynamic(&dynamic).unwrap(), &shared));
}

#[test]
fn currency_and_timestamp() {
    assert_eq!(
        Currency::from_dynamic(&DynamicValue::I32(3)),
        Ok(Currency::from_scaled(30_000))
    );
    assert_eq!(
        Currency::from_dynamic(&DynamicValue::F64(1.23456)),
        Ok(Currency::from_scaled(12_346))
    );
    assert_eq!(
        Currency::from_dynamic(&"19.99".into()),
        Ok(Currency::from_scaled(199_900))
    );
    let err = Currency::from_dynamic(&DynamicValue::U64(u64::MAX)).unwrap_err();
    assert_eq!(err.reason, CastFailure::Overflow);

    assert_eq!(
        Timestamp::from_dynamic(&DynamicValue::F64(1.5)),
        Ok(Timestamp::from_days(1.5))
    );
    assert!(Timestamp::from_dynamic(&"2024-01-01".into()).is_err());
    assert!(Timestamp::from_dynamic(&DynamicValue::Bool(true)).is_err());
}

#[derive(Clone, Debug, PartialEq)]
struct Token(u32);

crate::opaque_dynamic!(Token);

#[test]
fn other_values_only_return_to_their_own_type() {
    let dynamic = Token(9).to_dynamic().unwrap();
    assert_eq!(dynamic.get_type(), DynamicType::Other);
    assert_eq!(Token::from_dynamic(&dynamic), Ok(Token(9)));
    assert_eq!(dynamic.downcast_ref::<Token>(), Some(&Token(9)));

    let err = u32::from_dynamic(&dynamic).unwrap_err();
    assert_eq!(err.reason, CastFailure::Incompatible);
    assert!(Token::from_dynamic(&DynamicValue::U32(9)).is_err());
    assert!(Token::from_dynamic(&DynamicValue::other(9u32)).is_err());
}

#[test]
fn other_values_compare_by_identity() {
    let a = DynamicValue::other(Token(1));
    let b = DynamicValue::other(Token(1));
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn to_optional() {
    assert_eq!(DynamicValue::Null.to_optional::<i32>(), Ok(Optional::Absent));
    assert_eq!(
        DynamicValue::I32(4).to_optional::<i64>(),
        Ok(Optional::Present(4))
    );
}

#[test]
fn display_and_debug() {
    let values = [
        DynamicValue::Null,
        DynamicValue::Bool(true),
        DynamicValue::I64(-12),
        DynamicValue::F64(2.5),
        DynamicValue::Currency(Currency::from_scaled(12_345)),
        DynamicValue::Timestamp(Timestamp::from_days(0.5)),
        DynamicValue::from("text"),
    ];
    let display: Vec<_> = values.iter().map(|v| v.to_string()).collect();
    insta::assert_snapshot!(
        display.join(" | "),
        @"Null | true | -12 | 2.5 | 1.2345 | 1899-12-30 12:00:00 | text"
    );
    let debug: Vec<_> = values.iter().map(|v| format!("{v:?}")).collect();
    insta::assert_snapshot!(
        debug.join(" | "),
        @r#"Null | Bool(true) | I64(-12) | F64(2.5) | Currency(1.2345) | Timestamp(1899-12-30 12:00:00) | Text("text")"#
    );
}

#[test]
fn cast_error_display() {
    let err = u8::from_dynamic(&DynamicValue::from("abc")).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"cannot parse "abc" as `u8`"#);
    let err = char::from_dynamic(&DynamicValue::F32(1.0)).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"cannot cast `F32` to `char`");
}
