//! # Population Engine
//!
//! [`populate`] walks a [`Data`] mapping in iteration order and assigns each
//! entry to the matching populatable field. [`coerce`] decides what the
//! writer receives: primitives pass through, object-typed writers go through
//! [`resolve`](crate::resolve()).
//!
//! Population is not transactional. When an entry fails, fields written by
//! earlier entries of the same call keep their new values.

use tracing::debug;

use crate::dto::Dto;
use crate::error::DtoError;
use crate::resolve::resolve;
use crate::schema::{Expected, Property};
use crate::value::{Data, Value};

/// Assigns every entry of `data` to `dto`, in order.
#[tracing::instrument(skip_all, fields(dto = T::schema().dto_name(), entries = data.len()))]
pub fn populate<T: Dto>(dto: &mut T, data: Data) -> Result<(), DtoError> {
    for (name, value) in data {
        assign(dto, &name, value)?;
    }
    Ok(())
}

/// Assigns one raw value to the populatable field `name`.
///
/// `Value::Null` returns the field to the unset state.
pub fn assign<T: Dto>(dto: &mut T, name: &str, value: Value) -> Result<(), DtoError> {
    let schema = T::schema();
    let property = schema
        .populatable(name)
        .ok_or_else(|| DtoError::UndefinedField {
            dto: schema.dto_name(),
            field: name.to_string(),
        })?;

    if value.is_null() {
        debug!(dto = schema.dto_name(), field = name, "Unset");
        return property.clear(dto);
    }

    let value = coerce(dto, property, value)?;
    debug!(dto = schema.dto_name(), field = name, kind = value.kind(), "Assign");
    property.write(dto, value)
}

/// Turns a raw value into what the field's writer accepts.
pub fn coerce<T: Dto>(dto: &T, property: &Property<T>, value: Value) -> Result<Value, DtoError> {
    match property.expected() {
        None | Some(Expected::Primitive(_)) => Ok(value),
        Some(Expected::Object(expected)) => {
            resolve(dto.resolver(), property.name(), expected, value).map(Value::Object)
        }
    }
}
