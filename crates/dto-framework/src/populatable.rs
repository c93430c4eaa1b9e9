use crate::error::DtoError;
use crate::value::Data;

/// Capability of absorbing a keyed mapping of raw values.
///
/// Every DTO has it (through [`impl_object!`](crate::impl_object)); plain
/// objects do not. The resolution policy only re-populates resolved
/// instances that expose it through
/// [`Object::as_populatable`](crate::Object::as_populatable).
pub trait Populatable {
    fn populate(&mut self, data: Data) -> Result<(), DtoError>;
}
