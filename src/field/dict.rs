//! Literal field lists as nested objects

use super::marshaler::{ObjectEncoder, ObjectMarshaler};
use super::{Field, FieldValue};
use crate::core::error::{LoggerError, Result};
use std::fmt;

/// An [`ObjectMarshaler`] built from a literal list of fields
///
/// Produced by [`dict`](super::dict) and [`dict_object`](super::dict_object).
/// Scalar kinds go through the matching typed encoder call; complex
/// numbers, reflected values and slices fall back to a debug-style string.
#[derive(Debug, Clone, Default)]
pub struct DictObject {
    fields: Vec<Field>,
}

impl DictObject {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl From<Vec<Field>> for DictObject {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl ObjectMarshaler for DictObject {
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        for f in &self.fields {
            let key = f.key.as_str();
            match &f.value {
                FieldValue::Skip => continue,
                FieldValue::String(s) => enc.add_string(key, s),
                FieldValue::Int64(v) => enc.add_i64(key, *v),
                FieldValue::Int32(v) => enc.add_i64(key, i64::from(*v)),
                FieldValue::Int16(v) => enc.add_i64(key, i64::from(*v)),
                FieldValue::Int8(v) => enc.add_i64(key, i64::from(*v)),
                FieldValue::Uint64(v) => enc.add_u64(key, *v),
                FieldValue::Uint32(v) => enc.add_u64(key, u64::from(*v)),
                FieldValue::Uint16(v) => enc.add_u64(key, u64::from(*v)),
                FieldValue::Uint8(v) => enc.add_u64(key, u64::from(*v)),
                FieldValue::Uintptr(v) => enc.add_u64(key, *v as u64),
                FieldValue::Bool(v) => enc.add_bool(key, *v),
                FieldValue::Float64(v) => enc.add_f64(key, *v),
                FieldValue::Float32(v) => enc.add_f64(key, f64::from(*v)),
                FieldValue::Duration(d) => enc.add_duration(key, *d),
                FieldValue::Time(t) => enc.add_time(key, t),
                FieldValue::ObjectMarshaler(m) => enc
                    .add_object(key, m.as_ref())
                    .map_err(|e| LoggerError::marshal(key, format!("failed to add object: {e}")))?,
                FieldValue::InlineMarshaler(m) => m.marshal_log_object(enc)?,
                FieldValue::ArrayMarshaler(m) => enc
                    .add_array(key, m.as_ref())
                    .map_err(|e| LoggerError::marshal(key, format!("failed to add array: {e}")))?,
                FieldValue::Namespace => enc.open_namespace(key),
                FieldValue::Error(Some(err)) => enc.add_string(key, &err.to_string()),
                FieldValue::Error(None) => {}
                FieldValue::Stringer(s) => enc.add_string(key, &s.to_string()),
                FieldValue::Binary(b) | FieldValue::ByteString(b) => {
                    enc.add_string(key, &String::from_utf8_lossy(b))
                }
                FieldValue::Complex64(c) => enc.add_string(key, &c.to_string()),
                FieldValue::Complex128(c) => enc.add_string(key, &c.to_string()),
                FieldValue::Reflect(None) => enc.add_string(key, "<nil>"),
                FieldValue::Reflect(Some(Ok(v))) => enc.add_string(key, &v.to_string()),
                FieldValue::Reflect(Some(Err(msg))) => enc.add_string(key, msg),
                FieldValue::Bools(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Ints(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Int64s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Int32s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Int16s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Int8s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uints(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uint64s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uint32s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uint16s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uint8s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Uintptrs(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Float64s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Float32s(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Complex64s(v) => enc.add_string(key, &display_list(v)),
                FieldValue::Complex128s(v) => enc.add_string(key, &display_list(v)),
                FieldValue::Durations(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Strings(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Times(v) => enc.add_string(key, &debug_list(v)),
                FieldValue::Errors(v) => enc.add_string(key, &display_list(v)),
            }
        }

        Ok(())
    }
}

/// `[a, b]` using each element's `Debug`; a nil slice renders as `[]`
fn debug_list<T: fmt::Debug>(items: &Option<Vec<T>>) -> String {
    format!("{:?}", items.as_deref().unwrap_or(&[]))
}

/// `[a, b]` using each element's `Display`
fn display_list<T: fmt::Display>(items: &Option<Vec<T>>) -> String {
    let parts: Vec<String> = items
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(ToString::to_string)
        .collect();
    format!("[{}]", parts.join(", "))
}
