use std::sync::{Arc, LazyLock};

use dto_framework::{accessors, impl_object, Dto, Resolver, Schema, SchemaBuilder};

use super::{Address, BadUnpopulatableObject, NotesContract};

/// A person, exercising every kind of object field:
///
/// - `address`: a nested DTO, built blank and populated from a mapping
/// - `notes`: an interface, only constructible through a binding
/// - `badInstance`: a plain object, accepted only when supplied ready-made
#[derive(Debug, Clone, Default)]
pub struct Person {
    name: Option<String>,
    address: Option<Box<Address>>,
    notes: Option<Box<dyn NotesContract>>,
    bad_instance: Option<Box<BadUnpopulatableObject>>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for Person {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Person>> = LazyLock::new(|| {
            SchemaBuilder::<Person>::new()
                .field("name", |p| &p.name, |p| &mut p.name)
                .dto("address", |p| &p.address, |p| &mut p.address)
                .interface("notes", |p| &p.notes, |p| &mut p.notes)
                .object("badInstance", |p| &p.bad_instance, |p| &mut p.bad_instance)
                .build()
        });
        &SCHEMA
    }

    fn resolver(&self) -> Option<&Arc<dyn Resolver>> {
        self.resolver.as_ref()
    }

    fn set_resolver(&mut self, resolver: Option<Arc<dyn Resolver>>) {
        self.resolver = resolver;
    }
}

impl_object!(dto Person);
accessors!(Person { name: String } objects {
    address: Address,
    notes: dyn NotesContract,
    bad_instance: BadUnpopulatableObject,
});
