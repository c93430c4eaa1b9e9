//! # Nested-Instance Resolution
//!
//! Decides what to store in an object-typed field given a raw value. The
//! steps run in a fixed order and the first that applies wins:
//!
//! 1. The raw value is already an instance of the expected type: use it
//!    as-is. The resolver is never consulted.
//! 2. There is no resolver: fail with [`DtoError::NoResolverAvailable`].
//! 3. Ask the resolver for an instance, passing the raw value as the seed.
//!    An instance of any other type is [`DtoError::UnresolvableType`].
//! 4. Reconcile the instance with the raw value:
//!    - the resolver has an explicit binding for the type: the binding
//!      already used the seed, so the instance is returned untouched;
//!    - the raw value is a mapping and the instance can be populated:
//!      populate it with the mapping (recursively, through its own
//!      resolver) and return it;
//!    - otherwise fail with [`DtoError::UnpopulatableTarget`].
//!
//! Nothing here guesses or falls back to a default value.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::DtoError;
use crate::object::{Object, ObjectType};
use crate::resolver::{Request, Resolver};
use crate::value::Value;

/// Produces the instance to store in `field` for the raw `value`.
pub fn resolve(
    resolver: Option<&Arc<dyn Resolver>>,
    field: &str,
    expected: ObjectType,
    value: Value,
) -> Result<Box<dyn Object>, DtoError> {
    let key = expected.key();

    let value = match value {
        Value::Object(object) if object.implements(key) => {
            debug!(field, expected = key.name(), "Already an instance");
            return Ok(object);
        }
        other => other,
    };

    let Some(resolver) = resolver else {
        warn!(field, expected = key.name(), "No resolver available");
        return Err(DtoError::NoResolverAvailable {
            field: field.to_string(),
            expected: key.name(),
            value: value.to_string(),
        });
    };

    let mut instance = resolver.make(&Request::new(field, expected, &value, resolver))?;
    if !instance.implements(key) {
        warn!(field, expected = key.name(), found = instance.type_name(), "Resolver returned wrong type");
        return Err(DtoError::UnresolvableType {
            type_name: key.name(),
            reason: format!("the resolver produced an instance of {}", instance.type_name()),
        });
    }

    if resolver.is_bound(key) {
        debug!(field, expected = key.name(), "Bound instance");
        return Ok(instance);
    }

    let unpopulatable = |value: &Value| DtoError::UnpopulatableTarget {
        field: field.to_string(),
        expected: key.name(),
        value: value.to_string(),
    };

    let data = match value {
        Value::Map(data) => data,
        other => {
            warn!(field, expected = key.name(), found = other.kind(), "Cannot populate from a non-mapping");
            return Err(unpopulatable(&other));
        }
    };

    match instance.as_populatable() {
        Some(target) => {
            debug!(field, expected = key.name(), "Populating resolved instance");
            target.populate(data)?;
            Ok(instance)
        }
        None => {
            warn!(field, expected = key.name(), "Resolved instance is not populatable");
            Err(unpopulatable(&Value::Map(data)))
        }
    }
}
