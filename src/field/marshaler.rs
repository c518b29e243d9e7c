//! Nested-value contracts
//!
//! [`ObjectMarshaler`] and [`ArrayMarshaler`] let a value write its own
//! sub-fields or elements, so the field model can nest data without knowing
//! the concrete nested types. Encoders implement [`ObjectEncoder`] and
//! [`ArrayEncoder`].

use crate::core::error::Result;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Receives named sub-fields of an object
pub trait ObjectEncoder {
    fn add_string(&mut self, key: &str, val: &str);
    fn add_i64(&mut self, key: &str, val: i64);
    fn add_u64(&mut self, key: &str, val: u64);
    fn add_bool(&mut self, key: &str, val: bool);
    fn add_f64(&mut self, key: &str, val: f64);

    fn add_f32(&mut self, key: &str, val: f32) {
        self.add_f64(key, f64::from(val));
    }

    fn add_duration(&mut self, key: &str, val: Duration);
    fn add_time(&mut self, key: &str, val: &DateTime<Utc>);

    /// Add a pre-serialized value; `Value::Null` represents nil.
    fn add_reflected(&mut self, key: &str, val: &serde_json::Value);

    fn add_object(&mut self, key: &str, val: &dyn ObjectMarshaler) -> Result<()>;
    fn add_array(&mut self, key: &str, val: &dyn ArrayMarshaler) -> Result<()>;

    /// Nest every field added afterwards under `key`.
    fn open_namespace(&mut self, key: &str);
}

/// Receives ordered elements of an array
pub trait ArrayEncoder {
    fn append_string(&mut self, val: &str);
    fn append_i64(&mut self, val: i64);
    fn append_u64(&mut self, val: u64);
    fn append_bool(&mut self, val: bool);
    fn append_f64(&mut self, val: f64);

    fn append_f32(&mut self, val: f32) {
        self.append_f64(f64::from(val));
    }

    fn append_duration(&mut self, val: Duration);
    fn append_time(&mut self, val: &DateTime<Utc>);
    fn append_reflected(&mut self, val: &serde_json::Value);
    fn append_object(&mut self, val: &dyn ObjectMarshaler) -> Result<()>;
    fn append_array(&mut self, val: &dyn ArrayMarshaler) -> Result<()>;
}

/// A value that writes its own named sub-fields
///
/// # Example
///
/// ```
/// use cleanstack_logging::field::{ObjectEncoder, ObjectMarshaler};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl ObjectMarshaler for User {
///     fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> cleanstack_logging::Result<()> {
///         enc.add_string("name", &self.name);
///         enc.add_u64("age", u64::from(self.age));
///         Ok(())
///     }
/// }
/// ```
pub trait ObjectMarshaler: Send + Sync {
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()>;
}

/// A value that writes its own ordered elements
pub trait ArrayMarshaler: Send + Sync {
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()>;
}

impl fmt::Debug for dyn ObjectMarshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ObjectMarshaler")
    }
}

impl fmt::Debug for dyn ArrayMarshaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArrayMarshaler")
    }
}

/// Closure adapter for [`ObjectMarshaler`]
pub struct ObjectMarshalerFn<F>(pub F);

impl<F> ObjectMarshaler for ObjectMarshalerFn<F>
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<()> + Send + Sync,
{
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        (self.0)(enc)
    }
}

/// Closure adapter for [`ArrayMarshaler`]
pub struct ArrayMarshalerFn<F>(pub F);

impl<F> ArrayMarshaler for ArrayMarshalerFn<F>
where
    F: Fn(&mut dyn ArrayEncoder) -> Result<()> + Send + Sync,
{
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()> {
        (self.0)(enc)
    }
}

/// Array view over a borrowed slice, appending each element with `append`
pub(crate) struct Elements<'a, T> {
    items: &'a [T],
    append: fn(&mut dyn ArrayEncoder, &T),
}

impl<'a, T> Elements<'a, T> {
    pub(crate) fn new(items: &'a Option<Vec<T>>, append: fn(&mut dyn ArrayEncoder, &T)) -> Self {
        Self {
            items: items.as_deref().unwrap_or(&[]),
            append,
        }
    }
}

impl<T: Sync> ArrayMarshaler for Elements<'_, T> {
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()> {
        for item in self.items {
            (self.append)(enc, item);
        }
        Ok(())
    }
}
