//! Coercions from [`DynamicValue`] into Rust types
//!
//! Every function is generic over, or named after, its target type so that
//! the [`CastError`] can name it.

use std::str::FromStr;

use crate::{
    error::{CastError, CastFailure},
    temporal::{Currency, Timestamp},
};

use super::DynamicValue;

/// Numeric view of a dynamic value
enum Number {
    Int(i128),
    Float(f64),
}

fn number(value: &DynamicValue) -> Option<Number> {
    use DynamicValue::*;
    Some(match value {
        Bool(x) => Number::Int(i128::from(*x)),
        U8(x) => Number::Int(i128::from(*x)),
        U16(x) => Number::Int(i128::from(*x)),
        U32(x) => Number::Int(i128::from(*x)),
        U64(x) => Number::Int(i128::from(*x)),
        I8(x) => Number::Int(i128::from(*x)),
        I16(x) => Number::Int(i128::from(*x)),
        I32(x) => Number::Int(i128::from(*x)),
        I64(x) => Number::Int(i128::from(*x)),
        F32(x) => Number::Float(f64::from(*x)),
        F64(x) => Number::Float(*x),
        Currency(x) => Number::Float(x.to_f64()),
        _ => return None,
    })
}

fn parse<T: FromStr>(value: &DynamicValue, text: &str) -> Result<T, CastError> {
    text.trim().parse().map_err(|_| {
        CastError::new::<T>(value, CastFailure::Unparseable(text.to_string()))
    })
}

pub fn integer<T: TryFrom<i128>>(value: &DynamicValue) -> Result<T, CastError> {
    let overflow = || CastError::new::<T>(value, CastFailure::Overflow);

    if let DynamicValue::Text(text) = value {
        let x = text.trim().parse::<i128>().map_err(|_| {
            CastError::new::<T>(value, CastFailure::Unparseable(text.to_string()))
        })?;
        return T::try_from(x).map_err(|_| overflow());
    }

    match number(value) {
        Some(Number::Int(x)) => T::try_from(x).map_err(|_| overflow()),
        Some(Number::Float(x)) => {
            if x.is_infinite() {
                return Err(overflow());
            }
            if x.is_nan() || x.fract() != 0.0 {
                return Err(CastError::new::<T>(
                    value,
                    CastFailure::NotIntegral,
                ));
            }
            if x < i128::MIN as f64 || x >= i128::MAX as f64 {
                return Err(overflow());
            }
            T::try_from(x as i128).map_err(|_| overflow())
        }
        None => Err(CastError::incompatible::<T>(value)),
    }
}

pub fn double<T>(value: &DynamicValue) -> Result<f64, CastError> {
    match value {
        DynamicValue::Text(text) => {
            let x: f64 = parse(value, text)?;
            Ok(x)
        }
        DynamicValue::Timestamp(t) => Ok(t.days()),
        _ => match number(value) {
            Some(Number::Int(x)) => Ok(x as f64),
            Some(Number::Float(x)) => Ok(x),
            None => Err(CastError::incompatible::<T>(value)),
        },
    }
}

pub fn single(value: &DynamicValue) -> Result<f32, CastError> {
    let x = double::<f32>(value)?;
    let narrowed = x as f32;
    if x.is_finite() && narrowed.is_infinite() {
        return Err(CastError::new::<f32>(value, CastFailure::Overflow));
    }
    Ok(narrowed)
}

pub fn boolean(value: &DynamicValue) -> Result<bool, CastError> {
    match value {
        DynamicValue::Bool(x) => Ok(*x),
        DynamicValue::Text(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(CastError::new::<bool>(
                    value,
                    CastFailure::Unparseable(text.to_string()),
                ))
            }
        }
        _ => match number(value) {
            Some(Number::Int(x)) => Ok(x != 0),
            Some(Number::Float(x)) => Ok(x != 0.0),
            None => Err(CastError::incompatible::<bool>(value)),
        },
    }
}

pub fn character(value: &DynamicValue) -> Result<char, CastError> {
    match value {
        DynamicValue::Char(c) => Ok(*c),
        DynamicValue::Text(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(CastError::new::<char>(
                    value,
                    CastFailure::Unparseable(text.to_string()),
                )),
            }
        }
        _ => Err(CastError::incompatible::<char>(value)),
    }
}

/// Read any scalar as text, using its display form
pub fn text<T>(value: &DynamicValue) -> Result<String, CastError> {
    match value {
        DynamicValue::Text(text) => Ok(text.to_string()),
        DynamicValue::Empty | DynamicValue::Null | DynamicValue::Other(_) => {
            Err(CastError::incompatible::<T>(value))
        }
        _ => Ok(value.to_string()),
    }
}

pub fn currency(value: &DynamicValue) -> Result<Currency, CastError> {
    let overflow = || CastError::new::<Currency>(value, CastFailure::Overflow);
    match value {
        DynamicValue::Currency(x) => Ok(*x),
        DynamicValue::Text(text) => parse(value, text),
        _ => match number(value) {
            Some(Number::Int(x)) => i64::try_from(x)
                .ok()
                .and_then(Currency::from_units)
                .ok_or_else(overflow),
            Some(Number::Float(x)) => {
                Currency::from_f64(x).ok_or_else(overflow)
            }
            None => Err(CastError::incompatible::<Currency>(value)),
        },
    }
}

pub fn timestamp(value: &DynamicValue) -> Result<Timestamp, CastError> {
    match value {
        DynamicValue::Timestamp(x) => Ok(*x),
        DynamicValue::Bool(_)
        | DynamicValue::Currency(_)
        | DynamicValue::Text(_) => Err(CastError::incompatible::<Timestamp>(value)),
        _ => double::<Timestamp>(value).map(Timestamp::from_days),
    }
}
