//! # DTO Framework
//!
//! This crate provides typed Data Transfer Objects that can be populated from
//! untyped data, read and written by field name, and exported back to JSON.
//!
//! The interesting part is nested population. When a field expects a complex
//! type rather than a primitive, the framework decides from the supplied
//! value whether to use it directly, construct an instance through a
//! dependency [`Resolver`], or populate a freshly resolved instance with the
//! supplied mapping, and fails with a typed [`DtoError`] when none applies.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Object Layer** ([`Object`], [`Value`]) - What a field can hold and what raw input looks like
//! 2. **Schema Layer** ([`Schema`]) - Per-type accessor directory built once with [`SchemaBuilder`]
//! 3. **Population Layer** ([`populate()`], [`coerce()`], [`resolve()`]) - Writing raw data onto a DTO
//! 4. **Resolution Layer** ([`Resolver`], [`Container`]) - Constructing nested instances
//!
//! You describe fields **once** in the schema; indexed access, population,
//! export and the typed accessors all work from it.
//!
//! ## Core Abstractions
//!
//! ### [`Dto`] - The Record
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//! use dto_framework::{accessors, data, impl_object, Dto, Resolver, Schema, SchemaBuilder};
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct Dummy {
//!     name: Option<String>,
//!     age: Option<i64>,
//!     resolver: Option<Arc<dyn Resolver>>,
//! }
//!
//! impl Dto for Dummy {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<Dummy>> = LazyLock::new(|| {
//!             SchemaBuilder::<Dummy>::new()
//!                 .field("name", |d| &d.name, |d| &mut d.name)
//!                 .field("age", |d| &d.age, |d| &mut d.age)
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//!
//!     fn resolver(&self) -> Option<&Arc<dyn Resolver>> {
//!         self.resolver.as_ref()
//!     }
//!
//!     fn set_resolver(&mut self, resolver: Option<Arc<dyn Resolver>>) {
//!         self.resolver = resolver;
//!     }
//! }
//!
//! impl_object!(dto Dummy);
//! accessors!(Dummy { name: String, age: i64 });
//!
//! let mut dummy = Dummy::with_data(data!({"name": "Ann", "age": 5}), None).unwrap();
//! assert_eq!(dummy.name().map(String::as_str), Some("Ann"));
//! assert_eq!(dummy.to_json().unwrap(), r#"{"name":"Ann","age":5}"#);
//!
//! dummy.unset("age").unwrap();
//! assert_eq!(dummy.to_string(), r#"{"name":"Ann"}"#);
//! ```
//!
//! ### [`Resolver`] - Nested Construction
//!
//! DTOs do not share a global container. Each one carries an explicit
//! `Option<Arc<dyn Resolver>>`, and every DTO a resolver constructs receives
//! the same handle. [`Container`] is the default implementation: explicit
//! bindings for interfaces, blank construction for concrete types.
//!
//! ## Error Handling
//!
//! Every failure is a [`DtoError`] raised at the offending field and
//! propagated unchanged to the caller that started the population.
//!
//! ## Testing
//!
//! See [`mock`] for [`MockResolver`](mock::MockResolver), which scripts what
//! a resolver returns and records what it was asked for.

pub mod accessors;
pub mod dto;
pub mod error;
pub mod mock;
pub mod object;
pub mod populatable;
pub mod populate;
pub mod resolve;
pub mod resolver;
pub mod schema;
pub mod tracing;
pub mod value;

pub use dto::Dto;
pub use error::DtoError;
pub use object::{AsObject, Constructor, Object, ObjectType, TypeKey};
pub use populatable::Populatable;
pub use populate::{assign, coerce, populate};
pub use resolve::resolve;
pub use resolver::{Container, Request, Resolver};
pub use schema::{Expected, FieldDescriptor, Property, Schema, SchemaBuilder};
pub use value::{Data, FromValue, Value};

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
    pub use serde;
    pub use serde_json;
}
