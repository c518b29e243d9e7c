//! Full-fidelity translation of fields into an [`ObjectEncoder`]

use super::marshaler::{Elements, ObjectEncoder};
use super::{Field, FieldValue};
use crate::core::error::Result;
use serde_json::Value;

impl Field {
    /// Write this field into `enc`.
    ///
    /// Every kind maps to a typed encoder call. Slices become arrays (a nil
    /// slice renders as `[]`), inline marshalers splice their fields into
    /// the enclosing object, and a nil error or a skip field writes nothing.
    /// A reflected value that failed to serialize is written as the string
    /// field `<key>Error`.
    ///
    /// Errors come only from nested marshalers.
    pub fn add_to(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        let key = self.key.as_str();
        match &self.value {
            FieldValue::Skip => {}
            FieldValue::Bool(v) => enc.add_bool(key, *v),
            FieldValue::Int64(v) => enc.add_i64(key, *v),
            FieldValue::Int32(v) => enc.add_i64(key, i64::from(*v)),
            FieldValue::Int16(v) => enc.add_i64(key, i64::from(*v)),
            FieldValue::Int8(v) => enc.add_i64(key, i64::from(*v)),
            FieldValue::Uint64(v) => enc.add_u64(key, *v),
            FieldValue::Uint32(v) => enc.add_u64(key, u64::from(*v)),
            FieldValue::Uint16(v) => enc.add_u64(key, u64::from(*v)),
            FieldValue::Uint8(v) => enc.add_u64(key, u64::from(*v)),
            FieldValue::Uintptr(v) => enc.add_u64(key, *v as u64),
            FieldValue::Float64(v) => enc.add_f64(key, *v),
            FieldValue::Float32(v) => enc.add_f32(key, *v),
            FieldValue::Complex64(c) => enc.add_string(key, &c.to_string()),
            FieldValue::Complex128(c) => enc.add_string(key, &c.to_string()),
            FieldValue::String(s) => enc.add_string(key, s),
            FieldValue::Binary(b) => {
                let bytes = Value::Array(b.iter().map(|x| Value::from(*x)).collect());
                enc.add_reflected(key, &bytes);
            }
            FieldValue::ByteString(b) => enc.add_string(key, &String::from_utf8_lossy(b)),
            FieldValue::Duration(d) => enc.add_duration(key, *d),
            FieldValue::Time(t) => enc.add_time(key, t),
            FieldValue::Error(Some(err)) => enc.add_string(key, &err.to_string()),
            FieldValue::Error(None) => {}
            FieldValue::Reflect(None) => enc.add_reflected(key, &Value::Null),
            FieldValue::Reflect(Some(Ok(v))) => enc.add_reflected(key, v),
            FieldValue::Reflect(Some(Err(msg))) => enc.add_string(&format!("{key}Error"), msg),
            FieldValue::Namespace => enc.open_namespace(key),
            FieldValue::Stringer(s) => enc.add_string(key, &s.to_string()),
            FieldValue::ObjectMarshaler(m) => enc.add_object(key, m.as_ref())?,
            FieldValue::InlineMarshaler(m) => m.marshal_log_object(enc)?,
            FieldValue::ArrayMarshaler(m) => enc.add_array(key, m.as_ref())?,
            FieldValue::Bools(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_bool(*x)))?
            }
            FieldValue::Ints(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_i64(*x as i64)),
            )?,
            FieldValue::Int64s(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_i64(*x)))?
            }
            FieldValue::Int32s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_i64(i64::from(*x))),
            )?,
            FieldValue::Int16s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_i64(i64::from(*x))),
            )?,
            FieldValue::Int8s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_i64(i64::from(*x))),
            )?,
            FieldValue::Uints(v) | FieldValue::Uintptrs(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_u64(*x as u64)),
            )?,
            FieldValue::Uint64s(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_u64(*x)))?
            }
            FieldValue::Uint32s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_u64(u64::from(*x))),
            )?,
            FieldValue::Uint16s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_u64(u64::from(*x))),
            )?,
            FieldValue::Uint8s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_u64(u64::from(*x))),
            )?,
            FieldValue::Float64s(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_f64(*x)))?
            }
            FieldValue::Float32s(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_f32(*x)))?
            }
            FieldValue::Complex64s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_string(&x.to_string())),
            )?,
            FieldValue::Complex128s(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_string(&x.to_string())),
            )?,
            FieldValue::Durations(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_duration(*x)),
            )?,
            FieldValue::Strings(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_string(x)))?
            }
            FieldValue::Times(v) => {
                enc.add_array(key, &Elements::new(v, |e, x| e.append_time(x)))?
            }
            FieldValue::Errors(v) => enc.add_array(
                key,
                &Elements::new(v, |e, x| e.append_string(&x.to_string())),
            )?,
        }

        Ok(())
    }
}
