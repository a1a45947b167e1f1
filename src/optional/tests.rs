use crate::{
    dynamic::DynamicValue,
    equality::{Category, Precision, Width},
    error::CastFailure,
    temporal::{Currency, Timestamp},
};

use super::*;

#[test]
fn construction() {
    let present = Optional::new(5);
    assert!(present.is_present());
    assert!(!present.is_absent());

    let absent = Optional::<i32>::absent();
    assert!(absent.is_absent());
    assert!(Optional::<i32>::default().is_absent());
    assert!(Optional::<i32>::from_null(Null).is_absent());

    assert!(Optional::from(7u8).is_present());
    assert!(Optional::<char>::from(Some('x')).is_present());
    assert!(Optional::<char>::from(None).is_absent());
}

#[test]
fn value_access() {
    assert_eq!(Optional::new(5).value(), Ok(&5));
    assert_eq!(Optional::new("a".to_string()).into_value(), Ok("a".to_string()));

    let err = Optional::<i32>::absent().value().unwrap_err();
    assert_eq!(err.type_name, "i32");
    insta::assert_snapshot!(
        err.to_string(),
        @"the optional value of type `i32` is absent"
    );
    assert!(Optional::<String>::absent().into_value().is_err());
}

#[test]
fn defaults() {
    assert_eq!(Optional::new(5).value_or(9), 5);
    assert_eq!(Optional::absent().value_or(9), 9);
    assert_eq!(Optional::<u32>::absent().value_or_default(), 0);
    assert_eq!(Optional::new(3u32).value_or_default(), 3);

    assert_eq!(Optional::new(4).try_get_value(), (4, true));
    assert_eq!(Optional::<i32>::absent().try_get_value(), (0, false));
    assert_eq!(
        Optional::<String>::absent().try_get_value(),
        (String::new(), false)
    );
}

#[test]
fn option_interop() {
    assert_eq!(Optional::new(1).as_option(), Some(&1));
    assert_eq!(Optional::<i32>::absent().as_option(), None);
    assert_eq!(Optional::new(1).into_option(), Some(1));
    let back: Option<i32> = Optional::absent().into();
    assert_eq!(back, None);
}

#[test]
fn presence_decides_first() {
    let absent = Optional::<i32>::absent();
    let present = Optional::new(0);
    assert!(absent.equals(&Optional::absent()));
    assert!(!absent.equals(&present));
    assert!(!present.equals(&absent));
    assert!(present.equals(&Optional::new(0)));
}

#[test]
fn values_compare_by_category() {
    assert!(Optional::new(5).equals(&Optional::new(5)));
    assert!(!Optional::new(5).equals(&Optional::new(6)));
    assert!(Optional::new(0.1 + 0.2).equals(&Optional::new(0.3)));
    assert!(!Optional::new(0.1).equals(&Optional::new(0.1001)));
    assert!(Optional::new(String::from("x")).equals(&Optional::new("x".into())));
    assert!(Optional::new(vec![1, 2]).equals(&Optional::new(vec![1, 2])));
    assert!(!Optional::new(vec![1, 2]).equals(&Optional::new(vec![2, 1])));
    assert!(Optional::new(Currency::from_scaled(1))
        .equals(&Optional::new(Currency::from_scaled(1))));
    assert!(Optional::new(Timestamp::from_days(100.0))
        .equals(&Optional::new(Timestamp::from_days(100.0 + 1e-12))));
}

#[test]
fn operators() {
    assert!(Optional::new(5) == Optional::new(5));
    assert!(Optional::new(5) != Optional::new(6));
    assert!(Optional::<f64>::absent() == Optional::absent());
    assert!(Optional::new(1.0) != Optional::absent());

    assert!(Optional::<u8>::absent() == Null);
    assert!(Optional::new(0u8) != Null);
    assert!(Null == Optional::<u8>::absent());
    assert!(Null != Optional::new(0u8));
}

#[test]
fn compare_with_plain_values() {
    assert!(Optional::new(3).equals_value(&3));
    assert!(!Optional::new(3).equals_value(&4));
    assert!(!Optional::absent().equals_value(&3));
    assert!(Optional::new(0.3).equals_value(&(0.1 + 0.2)));

    assert!(Optional::<i32>::absent().equals_null());
    assert!(!Optional::new(0).equals_null());
}

#[test]
fn category_and_type_info() {
    assert_eq!(Optional::<i16>::category(), Category::Integral(Width::Two));
    assert_eq!(
        Optional::<f32>::category(),
        Category::Float(Precision::Single)
    );
    assert_eq!(Optional::<Timestamp>::category(), Category::Temporal);

    let ty = Optional::<u32>::type_info();
    assert_eq!(ty.size, 4);
    assert_eq!(ty.category, Category::Integral(Width::Four));
}

#[test]
fn display() {
    assert_eq!(Optional::new(42).to_string(), "42");
    assert_eq!(Optional::new(true).to_string(), "true");
    assert_eq!(Optional::new("hi").to_string(), "hi");
    assert_eq!(Optional::new(Currency::from_scaled(12_300)).to_string(), "1.23");
    assert_eq!(Optional::<i32>::absent().to_string(), "Null");
    assert_eq!(Optional::<String>::absent().to_string(), "Null");
    assert_eq!(format!("{:?}", Optional::new(1)), "Present(1)");
    assert_eq!(format!("{:?}", Optional::<i32>::absent()), "Absent");
}

#[test]
fn to_dynamic() {
    assert_eq!(Optional::new(true).to_dynamic(), Ok(DynamicValue::Bool(true)));
    assert_eq!(Optional::new(-3i16).to_dynamic(), Ok(DynamicValue::I16(-3)));
    assert_eq!(Optional::<bool>::absent().to_dynamic(), Ok(DynamicValue::Null));
    assert_eq!(
        Optional::new(String::from("s")).to_dynamic(),
        Ok(DynamicValue::from("s"))
    );
    assert!(Optional::new(u128::MAX).to_dynamic().is_err());
}

#[test]
fn from_dynamic() {
    assert_eq!(
        Optional::<i32>::from_dynamic(&DynamicValue::Empty),
        Ok(Optional::Absent)
    );
    assert_eq!(
        Optional::<i32>::from_dynamic(&DynamicValue::Null),
        Ok(Optional::Absent)
    );
    assert_eq!(
        Optional::<i32>::from_dynamic(&DynamicValue::U8(8)),
        Ok(Optional::new(8))
    );

    let err = Optional::<i32>::from_dynamic(&DynamicValue::from("x")).unwrap_err();
    assert_eq!(err.reason, CastFailure::Unparseable("x".into()));
}

#[test]
fn dynamic_round_trip() {
    fn round_trip<T>(x: T)
    where
        T: Equatable + IntoDynamic + FromDynamic + std::fmt::Debug,
    {
        let original = Optional::new(x);
        let dynamic = original.to_dynamic().unwrap();
        let back = Optional::<T>::from_dynamic(&dynamic).unwrap();
        assert!(back.equals(&original), "{original:?} became {back:?}");
    }

    round_trip(0u8);
    round_trip(-17i64);
    round_trip(u64::MAX);
    round_trip(true);
    round_trip(false);
    round_trip('ß');
    round_trip(String::from("text"));
    round_trip(0.1f64 + 0.2);
    round_trip(Currency::from_scaled(-5));
    round_trip(Timestamp::from_days(45_000.25));

    let absent = Optional::<i32>::absent();
    let back = Optional::<i32>::from_dynamic(&absent.to_dynamic().unwrap());
    assert_eq!(back, Ok(Optional::Absent));
}
