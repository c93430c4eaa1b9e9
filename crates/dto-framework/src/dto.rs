//! # The DTO Contract
//!
//! A DTO is a struct whose declared fields are `Option<_>` storage described
//! by a static [`Schema`]. Implementing [`Dto`] takes three methods (the
//! schema and the resolver handle accessors) plus
//! [`impl_object!(dto Type)`](crate::impl_object); everything else is
//! provided:
//!
//! - construction from data: [`Dto::with_data`], [`Dto::from_json`]
//! - indexed access by field name: [`Dto::has`], [`Dto::get`], [`Dto::set`],
//!   [`Dto::unset`]
//! - the export projection: [`Dto::to_exportable`], [`Dto::to_json`],
//!   [`Dto::to_json_pretty`]
//!
//! Typed accessors such as `name()` / `set_name()` are generated over the same
//! storage with [`accessors!`](crate::accessors).

use std::sync::Arc;

use crate::error::DtoError;
use crate::object::Object;
use crate::populatable::Populatable;
use crate::populate::{assign, populate};
use crate::resolver::Resolver;
use crate::schema::Schema;
use crate::value::{Data, Value};

/// A populatable, exportable record.
pub trait Dto: Object + Populatable + Default {
    /// The accessor directory of this type.
    fn schema() -> &'static Schema<Self>;

    /// The resolver used for object-typed fields; `None` means nested values
    /// cannot be constructed from raw data.
    fn resolver(&self) -> Option<&Arc<dyn Resolver>>;

    fn set_resolver(&mut self, resolver: Option<Arc<dyn Resolver>>);

    /// Builds an instance, attaches `resolver` and populates it with `data`.
    fn with_data(data: Data, resolver: Option<Arc<dyn Resolver>>) -> Result<Self, DtoError> {
        let mut dto = Self::default();
        dto.set_resolver(resolver);
        populate(&mut dto, data)?;
        Ok(dto)
    }

    /// Like [`with_data`](Self::with_data), from JSON object text.
    fn from_json(json: &str, resolver: Option<Arc<dyn Resolver>>) -> Result<Self, DtoError> {
        let data: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let data = data
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        Self::with_data(data, resolver)
    }

    /// Names of the populatable fields, in declaration order.
    fn populatable_fields() -> Vec<&'static str> {
        Self::schema().populatable_fields()
    }

    /// Whether `name` is a populatable field that is currently set.
    fn has(&self, name: &str) -> bool {
        Self::schema()
            .populatable(name)
            .is_some_and(|property| property.is_set(self))
    }

    /// Reads a populatable field; an unset field reads as `Value::Null`.
    fn get(&self, name: &str) -> Result<Value, DtoError> {
        let property = Self::schema()
            .populatable(name)
            .ok_or_else(|| undefined::<Self>(name))?;
        Ok(property.read(self).unwrap_or_default())
    }

    /// Assigns a populatable field through the same path as population.
    fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DtoError> {
        assign(self, name, value.into())
    }

    /// Returns a populatable field to the unset state.
    fn unset(&mut self, name: &str) -> Result<(), DtoError> {
        Self::schema()
            .populatable(name)
            .ok_or_else(|| undefined::<Self>(name))?
            .clear(self)
    }

    /// The populatable fields that are set, in declaration order, with
    /// nested objects exported recursively.
    fn to_exportable(&self) -> Result<serde_json::Map<String, serde_json::Value>, DtoError> {
        Self::schema()
            .populatable_properties()
            .filter_map(|property| {
                property
                    .export(self)
                    .map(|exported| exported.map(|json| (property.name().to_string(), json)))
            })
            .collect()
    }

    fn to_json(&self) -> Result<String, DtoError> {
        Ok(serde_json::to_string(&self.to_exportable()?)?)
    }

    fn to_json_pretty(&self) -> Result<String, DtoError> {
        Ok(serde_json::to_string_pretty(&self.to_exportable()?)?)
    }
}

fn undefined<T: Dto>(name: &str) -> DtoError {
    DtoError::UndefinedField {
        dto: T::schema().dto_name(),
        field: name.to_string(),
    }
}
