//! Backend-neutral structured fields
//!
//! A [`Field`] is one named, typed piece of structured data attached to a log
//! entry. The set of kinds is closed: [`FieldValue`] has one variant per kind
//! and every encoder matches on it exhaustively, so adding a kind is a compile
//! error everywhere a dispatch table needs a new arm.
//!
//! Fields are built with the free constructor functions re-exported from this
//! module (`string`, `int64`, `durationp`, `strings`, `err`, `dict`, ...).
//! Constructors never fail; a missing optional value degrades to a `null`
//! field instead of panicking.
//!
//! ```
//! use cleanstack_logging::field::{self, FieldType};
//!
//! let fields = [
//!     field::string("user", "alice"),
//!     field::int("age", 30),
//!     field::intp("retries", None),
//! ];
//! assert_eq!(fields[0].kind(), FieldType::String);
//! assert_eq!(fields[2].kind(), FieldType::Reflect);
//! ```

mod constructors;
mod dict;
mod encode;
mod marshaler;
mod stack;

pub use constructors::*;
pub use dict::DictObject;
pub use marshaler::{
    ArrayEncoder, ArrayMarshaler, ArrayMarshalerFn, ObjectEncoder, ObjectMarshaler,
    ObjectMarshalerFn,
};
pub use stack::Stacktrace;

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Error payload shared between clones of a field
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A value whose `Display` output is logged as a string
///
/// Implemented for every `Display + Send + Sync` type.
pub trait Stringer: fmt::Display + Send + Sync {}

impl<T: fmt::Display + Send + Sync + ?Sized> Stringer for T {}

impl fmt::Debug for dyn Stringer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stringer({:?})", self.to_string())
    }
}

/// A complex number, rendered as `re+imi`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: fmt::Display + PartialOrd + Default> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < T::default() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

/// Discriminant of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Skip,
    Bool,
    Int64,
    Int32,
    Int16,
    Int8,
    Uint64,
    Uint32,
    Uint16,
    Uint8,
    Uintptr,
    Float64,
    Float32,
    Complex64,
    Complex128,
    String,
    Binary,
    ByteString,
    Duration,
    Time,
    Error,
    Reflect,
    Namespace,
    Stringer,
    ObjectMarshaler,
    InlineMarshaler,
    ArrayMarshaler,
    Bools,
    Ints,
    Int64s,
    Int32s,
    Int16s,
    Int8s,
    Uints,
    Uint64s,
    Uint32s,
    Uint16s,
    Uint8s,
    Uintptrs,
    Float64s,
    Float32s,
    Complex64s,
    Complex128s,
    Durations,
    Strings,
    Times,
    Errors,
}

/// Typed payload of a [`Field`]
///
/// Optional payloads (`Error`, `Reflect` and every slice kind) use `None`
/// for the nil value. A `None` slice and an empty `Some` slice are distinct
/// payloads of the same kind.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Skip,
    Bool(bool),
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    Uint64(u64),
    Uint32(u32),
    Uint16(u16),
    Uint8(u8),
    Uintptr(usize),
    Float64(f64),
    Float32(f32),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    String(String),
    Binary(Vec<u8>),
    ByteString(Vec<u8>),
    Duration(Duration),
    Time(DateTime<Utc>),
    Error(Option<SharedError>),
    /// Serialized form of an arbitrary value; `Err` holds the serializer's message.
    Reflect(Option<Result<serde_json::Value, String>>),
    Namespace,
    Stringer(Arc<dyn Stringer>),
    ObjectMarshaler(Arc<dyn ObjectMarshaler>),
    InlineMarshaler(Arc<dyn ObjectMarshaler>),
    ArrayMarshaler(Arc<dyn ArrayMarshaler>),
    Bools(Option<Vec<bool>>),
    Ints(Option<Vec<isize>>),
    Int64s(Option<Vec<i64>>),
    Int32s(Option<Vec<i32>>),
    Int16s(Option<Vec<i16>>),
    Int8s(Option<Vec<i8>>),
    Uints(Option<Vec<usize>>),
    Uint64s(Option<Vec<u64>>),
    Uint32s(Option<Vec<u32>>),
    Uint16s(Option<Vec<u16>>),
    Uint8s(Option<Vec<u8>>),
    Uintptrs(Option<Vec<usize>>),
    Float64s(Option<Vec<f64>>),
    Float32s(Option<Vec<f32>>),
    Complex64s(Option<Vec<Complex<f32>>>),
    Complex128s(Option<Vec<Complex<f64>>>),
    Durations(Option<Vec<Duration>>),
    Strings(Option<Vec<String>>),
    Times(Option<Vec<DateTime<Utc>>>),
    Errors(Option<Vec<SharedError>>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldType {
        match self {
            FieldValue::Skip => FieldType::Skip,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::Int32(_) => FieldType::Int32,
            FieldValue::Int16(_) => FieldType::Int16,
            FieldValue::Int8(_) => FieldType::Int8,
            FieldValue::Uint64(_) => FieldType::Uint64,
            FieldValue::Uint32(_) => FieldType::Uint32,
            FieldValue::Uint16(_) => FieldType::Uint16,
            FieldValue::Uint8(_) => FieldType::Uint8,
            FieldValue::Uintptr(_) => FieldType::Uintptr,
            FieldValue::Float64(_) => FieldType::Float64,
            FieldValue::Float32(_) => FieldType::Float32,
            FieldValue::Complex64(_) => FieldType::Complex64,
            FieldValue::Complex128(_) => FieldType::Complex128,
            FieldValue::String(_) => FieldType::String,
            FieldValue::Binary(_) => FieldType::Binary,
            FieldValue::ByteString(_) => FieldType::ByteString,
            FieldValue::Duration(_) => FieldType::Duration,
            FieldValue::Time(_) => FieldType::Time,
            FieldValue::Error(_) => FieldType::Error,
            FieldValue::Reflect(_) => FieldType::Reflect,
            FieldValue::Namespace => FieldType::Namespace,
            FieldValue::Stringer(_) => FieldType::Stringer,
            FieldValue::ObjectMarshaler(_) => FieldType::ObjectMarshaler,
            FieldValue::InlineMarshaler(_) => FieldType::InlineMarshaler,
            FieldValue::ArrayMarshaler(_) => FieldType::ArrayMarshaler,
            FieldValue::Bools(_) => FieldType::Bools,
            FieldValue::Ints(_) => FieldType::Ints,
            FieldValue::Int64s(_) => FieldType::Int64s,
            FieldValue::Int32s(_) => FieldType::Int32s,
            FieldValue::Int16s(_) => FieldType::Int16s,
            FieldValue::Int8s(_) => FieldType::Int8s,
            FieldValue::Uints(_) => FieldType::Uints,
            FieldValue::Uint64s(_) => FieldType::Uint64s,
            FieldValue::Uint32s(_) => FieldType::Uint32s,
            FieldValue::Uint16s(_) => FieldType::Uint16s,
            FieldValue::Uint8s(_) => FieldType::Uint8s,
            FieldValue::Uintptrs(_) => FieldType::Uintptrs,
            FieldValue::Float64s(_) => FieldType::Float64s,
            FieldValue::Float32s(_) => FieldType::Float32s,
            FieldValue::Complex64s(_) => FieldType::Complex64s,
            FieldValue::Complex128s(_) => FieldType::Complex128s,
            FieldValue::Durations(_) => FieldType::Durations,
            FieldValue::Strings(_) => FieldType::Strings,
            FieldValue::Times(_) => FieldType::Times,
            FieldValue::Errors(_) => FieldType::Errors,
        }
    }
}

/// One named unit of structured log data
#[derive(Debug, Clone)]
pub struct Field {
    /// Empty for `skip` and `inline` fields
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    #[inline]
    pub fn kind(&self) -> FieldType {
        self.value.kind()
    }

    #[inline]
    pub fn is_skip(&self) -> bool {
        matches!(self.value, FieldValue::Skip)
    }

    /// The value as a single 64-bit integer slot.
    ///
    /// Integers are widened (unsigned values are reinterpreted, not
    /// saturated), booleans are `0`/`1`, durations are whole nanoseconds
    /// (saturating at `i64::MAX`) and floats are their IEEE-754 bit patterns.
    /// Kinds without a scalar payload return `None`.
    pub fn integer(&self) -> Option<i64> {
        match &self.value {
            FieldValue::Bool(v) => Some(i64::from(*v)),
            FieldValue::Int64(v) => Some(*v),
            FieldValue::Int32(v) => Some(i64::from(*v)),
            FieldValue::Int16(v) => Some(i64::from(*v)),
            FieldValue::Int8(v) => Some(i64::from(*v)),
            FieldValue::Uint64(v) => Some(*v as i64),
            FieldValue::Uint32(v) => Some(i64::from(*v)),
            FieldValue::Uint16(v) => Some(i64::from(*v)),
            FieldValue::Uint8(v) => Some(i64::from(*v)),
            FieldValue::Uintptr(v) => Some(*v as i64),
            FieldValue::Float64(v) => Some(v.to_bits() as i64),
            FieldValue::Float32(v) => Some(i64::from(v.to_bits())),
            FieldValue::Duration(d) => Some(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)),
            _ => None,
        }
    }
}
