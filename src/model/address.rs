use std::sync::{Arc, LazyLock};

use dto_framework::{accessors, impl_object, Dto, Resolver, Schema, SchemaBuilder};

use super::City;

/// A street address. `city` is a nested DTO, so a plain mapping is enough to
/// populate it when a resolver is attached.
#[derive(Debug, Clone, Default)]
pub struct Address {
    street: Option<String>,
    city: Option<Box<City>>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for Address {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Address>> = LazyLock::new(|| {
            SchemaBuilder::<Address>::new()
                .field("street", |a| &a.street, |a| &mut a.street)
                .dto("city", |a| &a.city, |a| &mut a.city)
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

impl_object!(dto Address);
accessors!(Address { street: String } objects { city: City });
