use serde::Serialize;

use dto_framework::impl_object;

/// A plain object that is not a DTO.
///
/// It can be stored in an object field when supplied ready-made, but it
/// cannot be populated from a mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BadUnpopulatableObject {
    foo: String,
}

impl_object!(BadUnpopulatableObject);

impl BadUnpopulatableObject {
    pub fn foo(&self) -> &str {
        &self.foo
    }

    pub fn set_foo(&mut self, foo: impl Into<String>) {
        self.foo = foo.into();
    }
}
