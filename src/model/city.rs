use std::sync::{Arc, LazyLock};

use dto_framework::{accessors, impl_object, Dto, Resolver, Schema, SchemaBuilder};

/// A city with a postal code.
///
/// The postal code is declared as `zipCode`, so its accessors are
/// `zip_code()` / `set_zip_code()`.
#[derive(Debug, Clone, Default)]
pub struct City {
    name: Option<String>,
    zip_code: Option<i64>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for City {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<City>> = LazyLock::new(|| {
            SchemaBuilder::<City>::new()
                .field("name", |c| &c.name, |c| &mut c.name)
                .field("zipCode", |c| &c.zip_code, |c| &mut c.zip_code)
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

impl_object!(dto City);
accessors!(City { name: String, zip_code: i64 });

impl City {
    pub fn new(name: impl Into<String>, zip_code: i64) -> Self {
        let mut city = Self::default();
        city.set_name(name).set_zip_code(zip_code);
        city
    }
}
