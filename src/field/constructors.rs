//! One constructor per supported kind
//!
//! Optional ("pointer") constructors take an `Option`; `None` yields a nil
//! reflected field that renders as `null`. Slice constructors take anything
//! convertible into `Option<Vec<T>>`, so `None` (the nil slice) stays
//! distinguishable from `vec![]`.

use super::dict::DictObject;
use super::marshaler::{ArrayMarshaler, ObjectMarshaler};
use super::stack::Stacktrace;
use super::{Complex, Field, FieldValue, SharedError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Key used by [`err`] and [`err_opt`]
pub const ERROR_KEY: &str = "error";

fn nil(key: impl Into<String>) -> Field {
    Field::new(key, FieldValue::Reflect(None))
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

pub fn bool(key: impl Into<String>, val: bool) -> Field {
    Field::new(key, FieldValue::Bool(val))
}

/// Platform-sized signed integer, stored as `Int64`
pub fn int(key: impl Into<String>, val: isize) -> Field {
    int64(key, val as i64)
}

pub fn int64(key: impl Into<String>, val: i64) -> Field {
    Field::new(key, FieldValue::Int64(val))
}

pub fn int32(key: impl Into<String>, val: i32) -> Field {
    Field::new(key, FieldValue::Int32(val))
}

pub fn int16(key: impl Into<String>, val: i16) -> Field {
    Field::new(key, FieldValue::Int16(val))
}

pub fn int8(key: impl Into<String>, val: i8) -> Field {
    Field::new(key, FieldValue::Int8(val))
}

/// Platform-sized unsigned integer, stored as `Uint64`
pub fn uint(key: impl Into<String>, val: usize) -> Field {
    uint64(key, val as u64)
}

pub fn uint64(key: impl Into<String>, val: u64) -> Field {
    Field::new(key, FieldValue::Uint64(val))
}

pub fn uint32(key: impl Into<String>, val: u32) -> Field {
    Field::new(key, FieldValue::Uint32(val))
}

pub fn uint16(key: impl Into<String>, val: u16) -> Field {
    Field::new(key, FieldValue::Uint16(val))
}

pub fn uint8(key: impl Into<String>, val: u8) -> Field {
    Field::new(key, FieldValue::Uint8(val))
}

pub fn uintptr(key: impl Into<String>, val: usize) -> Field {
    Field::new(key, FieldValue::Uintptr(val))
}

pub fn float64(key: impl Into<String>, val: f64) -> Field {
    Field::new(key, FieldValue::Float64(val))
}

pub fn float32(key: impl Into<String>, val: f32) -> Field {
    Field::new(key, FieldValue::Float32(val))
}

pub fn complex64(key: impl Into<String>, val: Complex<f32>) -> Field {
    Field::new(key, FieldValue::Complex64(val))
}

pub fn complex128(key: impl Into<String>, val: Complex<f64>) -> Field {
    Field::new(key, FieldValue::Complex128(val))
}

pub fn string(key: impl Into<String>, val: impl Into<String>) -> Field {
    Field::new(key, FieldValue::String(val.into()))
}

/// Opaque bytes, rendered as an array of byte values
pub fn binary(key: impl Into<String>, val: impl Into<Vec<u8>>) -> Field {
    Field::new(key, FieldValue::Binary(val.into()))
}

/// UTF-8 text held as bytes; invalid sequences are replaced when rendered
pub fn byte_string(key: impl Into<String>, val: impl Into<Vec<u8>>) -> Field {
    Field::new(key, FieldValue::ByteString(val.into()))
}

pub fn duration(key: impl Into<String>, val: Duration) -> Field {
    Field::new(key, FieldValue::Duration(val))
}

pub fn time(key: impl Into<String>, val: DateTime<Utc>) -> Field {
    Field::new(key, FieldValue::Time(val))
}

// ---------------------------------------------------------------------------
// Optional values
// ---------------------------------------------------------------------------

macro_rules! optional_constructors {
    ($($(#[$meta:meta])* $name:ident => $base:ident($ty:ty);)*) => {
        $(
            $(#[$meta])*
            pub fn $name(key: impl Into<String>, val: Option<$ty>) -> Field {
                match val {
                    Some(v) => $base(key, v),
                    None => nil(key),
                }
            }
        )*
    };
}

optional_constructors! {
    boolp => bool(bool);
    intp => int(isize);
    int64p => int64(i64);
    int32p => int32(i32);
    int16p => int16(i16);
    int8p => int8(i8);
    uintp => uint(usize);
    uint64p => uint64(u64);
    uint32p => uint32(u32);
    uint16p => uint16(u16);
    uint8p => uint8(u8);
    uintptrp => uintptr(usize);
    float64p => float64(f64);
    float32p => float32(f32);
    complex64p => complex64(Complex<f32>);
    complex128p => complex128(Complex<f64>);
    durationp => duration(Duration);
    timep => time(DateTime<Utc>);
}

pub fn stringp(key: impl Into<String>, val: Option<&str>) -> Field {
    match val {
        Some(v) => string(key, v),
        None => nil(key),
    }
}

// ---------------------------------------------------------------------------
// Slices
// ---------------------------------------------------------------------------

macro_rules! slice_constructors {
    ($($name:ident => $variant:ident($ty:ty);)*) => {
        $(
            pub fn $name(key: impl Into<String>, vals: impl Into<Option<Vec<$ty>>>) -> Field {
                Field::new(key, FieldValue::$variant(vals.into()))
            }
        )*
    };
}

slice_constructors! {
    bools => Bools(bool);
    ints => Ints(isize);
    int64s => Int64s(i64);
    int32s => Int32s(i32);
    int16s => Int16s(i16);
    int8s => Int8s(i8);
    uints => Uints(usize);
    uint64s => Uint64s(u64);
    uint32s => Uint32s(u32);
    uint16s => Uint16s(u16);
    uint8s => Uint8s(u8);
    uintptrs => Uintptrs(usize);
    float64s => Float64s(f64);
    float32s => Float32s(f32);
    complex64s => Complex64s(Complex<f32>);
    complex128s => Complex128s(Complex<f64>);
    durations => Durations(Duration);
    strings => Strings(String);
    times => Times(DateTime<Utc>);
    errors => Errors(SharedError);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

pub fn named_error<E>(key: impl Into<String>, err: E) -> Field
where
    E: std::error::Error + Send + Sync + 'static,
{
    Field::new(key, FieldValue::Error(Some(Arc::new(err))))
}

/// [`named_error`] under the key `"error"`
pub fn err<E>(err: E) -> Field
where
    E: std::error::Error + Send + Sync + 'static,
{
    named_error(ERROR_KEY, err)
}

/// Like [`named_error`] but accepts a missing error, which every encoder skips
pub fn named_error_opt<E>(key: impl Into<String>, err: Option<E>) -> Field
where
    E: std::error::Error + Send + Sync + 'static,
{
    let err = err.map(|e| Arc::new(e) as SharedError);
    Field::new(key, FieldValue::Error(err))
}

pub fn err_opt<E>(err: Option<E>) -> Field
where
    E: std::error::Error + Send + Sync + 'static,
{
    named_error_opt(ERROR_KEY, err)
}

/// Error already behind an `Arc`, e.g. one shared with another field
pub fn shared_error(key: impl Into<String>, err: SharedError) -> Field {
    Field::new(key, FieldValue::Error(Some(err)))
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

/// A field every encoder ignores
pub fn skip() -> Field {
    Field::new(String::new(), FieldValue::Skip)
}

/// Nest every following field of the same entry under `key`
pub fn namespace(key: impl Into<String>) -> Field {
    Field::new(key, FieldValue::Namespace)
}

/// Call stack of the point where the field is rendered
pub fn stack(key: impl Into<String>) -> Field {
    stack_skip(key, 0)
}

/// Like [`stack`], discarding the `skip` innermost caller frames
pub fn stack_skip(key: impl Into<String>, skip: usize) -> Field {
    Field::new(key, FieldValue::Stringer(Arc::new(Stacktrace::new(skip))))
}

pub fn stringer(key: impl Into<String>, val: impl fmt::Display + Send + Sync + 'static) -> Field {
    Field::new(key, FieldValue::Stringer(Arc::new(val)))
}

pub fn object(key: impl Into<String>, val: impl ObjectMarshaler + 'static) -> Field {
    Field::new(key, FieldValue::ObjectMarshaler(Arc::new(val)))
}

/// Splice the marshaler's fields into the enclosing object
pub fn inline(val: impl ObjectMarshaler + 'static) -> Field {
    Field::new(String::new(), FieldValue::InlineMarshaler(Arc::new(val)))
}

pub fn array(key: impl Into<String>, val: impl ArrayMarshaler + 'static) -> Field {
    Field::new(key, FieldValue::ArrayMarshaler(Arc::new(val)))
}

/// A nested object built from a literal list of fields
pub fn dict(key: impl Into<String>, fields: Vec<Field>) -> Field {
    object(key, dict_object(fields))
}

pub fn dict_object(fields: Vec<Field>) -> DictObject {
    DictObject::new(fields)
}

// ---------------------------------------------------------------------------
// Arbitrary values
// ---------------------------------------------------------------------------

/// Serialize `val` now and log the result as-is.
///
/// A serialization failure is kept and rendered as the string field
/// `<key>Error`.
pub fn reflect<T: Serialize + ?Sized>(key: impl Into<String>, val: &T) -> Field {
    let value = serde_json::to_value(val).map_err(|e| e.to_string());
    Field::new(key, FieldValue::Reflect(Some(value)))
}

/// Serialize `val` and pick the most specific kind for the result.
///
/// Booleans, numbers and strings become their scalar kinds, `null` becomes
/// the nil field, and anything structured stays reflected.
pub fn any<T: Serialize + ?Sized>(key: impl Into<String>, val: &T) -> Field {
    match serde_json::to_value(val) {
        Ok(Value::Null) => nil(key),
        Ok(Value::Bool(b)) => bool(key, b),
        Ok(Value::String(s)) => string(key, s),
        Ok(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                int64(key, i)
            } else if let Some(u) = n.as_u64() {
                uint64(key, u)
            } else {
                float64(key, n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Ok(value) => Field::new(key, FieldValue::Reflect(Some(Ok(value)))),
        Err(e) => Field::new(key, FieldValue::Reflect(Some(Err(e.to_string())))),
    }
}
