//! # Dependency Resolution
//!
//! The population engine never builds complex values itself. When an
//! object-typed field receives raw data, it asks a [`Resolver`] for an
//! instance of the expected type and then reconciles that instance with the
//! data (see [`resolve`](crate::resolve())).
//!
//! ## Explicit Injection
//!
//! There is no process-wide default resolver. Every DTO carries its own
//! `Option<Arc<dyn Resolver>>`; `None` means "nothing can construct nested
//! values for me" and is reported as
//! [`DtoError::NoResolverAvailable`] when such a value is needed. Nested
//! DTOs built by a resolver receive the same handle through
//! [`Request::resolver`], so a whole object graph shares one resolver.
//!
//! ## Thread Safety
//!
//! `Resolver` is `Send + Sync`. [`Container`] guards its bindings with a
//! read/write lock and never holds the lock while a binding runs, so two
//! threads may populate two different DTOs against one container, and a
//! binding may itself resolve further types.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::DtoError;
use crate::object::{Constructor, Object, ObjectType, TypeKey};
use crate::value::{Data, Value};

/// Produces instances of requested types.
pub trait Resolver: fmt::Debug + Send + Sync {
    /// Builds an instance for `request`, optionally using its seed data.
    ///
    /// Fails with [`DtoError::UnresolvableType`] when no instance can be
    /// produced at all.
    fn make(&self, request: &Request<'_>) -> Result<Box<dyn Object>, DtoError>;

    /// Whether an explicit construction rule exists for `key`, as opposed to
    /// generic construction of a blank instance.
    fn is_bound(&self, key: TypeKey) -> bool;
}

/// A single construction request.
pub struct Request<'a> {
    field: &'a str,
    expected: ObjectType,
    seed: &'a Value,
    resolver: &'a Arc<dyn Resolver>,
}

impl<'a> Request<'a> {
    pub fn new(
        field: &'a str,
        expected: ObjectType,
        seed: &'a Value,
        resolver: &'a Arc<dyn Resolver>,
    ) -> Self {
        Self {
            field,
            expected,
            seed,
            resolver,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.expected.key()
    }

    /// Name of the field being assigned.
    pub fn field(&self) -> &'a str {
        self.field
    }

    /// The raw value that triggered the request.
    pub fn seed(&self) -> &'a Value {
        self.seed
    }

    /// The seed as a mapping. Any other seed is
    /// [`DtoError::UnpopulatableTarget`]; bindings that build from a mapping
    /// use this so other data is never dropped.
    pub fn seed_data(&self) -> Result<&'a Data, DtoError> {
        self.seed.as_data().ok_or_else(|| DtoError::UnpopulatableTarget {
            field: self.field.to_string(),
            expected: self.key().name(),
            value: self.seed.to_string(),
        })
    }

    /// The resolver handle to attach to DTOs built for this request.
    pub fn resolver(&self) -> &'a Arc<dyn Resolver> {
        self.resolver
    }

    /// Blank construction for concrete types; `None` for interfaces.
    pub fn default_constructor(&self) -> Option<Constructor> {
        self.expected.constructor()
    }

    /// Runs the default constructor, failing for types that have none.
    pub fn construct_default(&self) -> Result<Box<dyn Object>, DtoError> {
        let constructor = self.default_constructor().ok_or_else(|| DtoError::UnresolvableType {
            type_name: self.key().name(),
            reason: "no binding is registered and the type cannot be constructed generically"
                .to_string(),
        })?;
        Ok(constructor(Some(Arc::clone(self.resolver))))
    }
}

type Binding = Arc<dyn Fn(&Request<'_>) -> Result<Box<dyn Object>, DtoError> + Send + Sync>;

/// The default [`Resolver`]: explicit bindings first, then blank
/// construction of concrete types.
///
/// Cheap to clone; clones share the same binding table.
///
/// ```rust
/// use dto_framework::{Container, Resolver};
///
/// trait Greeter {}
///
/// let container = Container::new();
/// assert!(!container.is_bound(dto_framework::TypeKey::of::<dyn Greeter>()));
/// ```
#[derive(Clone, Default)]
pub struct Container {
    bindings: Arc<RwLock<HashMap<TypeKey, Binding>>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an explicit construction rule for `T`, replacing any
    /// previous one. `T` is usually an interface (`dyn Trait`).
    pub fn bind<T, F>(&self, factory: F) -> &Self
    where
        T: ?Sized + 'static,
        F: Fn(&Request<'_>) -> Result<Box<dyn Object>, DtoError> + Send + Sync + 'static,
    {
        let key = TypeKey::of::<T>();
        debug!(type_name = key.name(), "Bound");
        self.bindings.write().insert(key, Arc::new(factory));
        self
    }

    /// Removes the binding for `T`, if any.
    pub fn forget<T: ?Sized + 'static>(&self) -> bool {
        self.bindings.write().remove(&TypeKey::of::<T>()).is_some()
    }

    /// Removes every binding.
    pub fn flush(&self) {
        let mut bindings = self.bindings.write();
        debug!(size = bindings.len(), "Flushed");
        bindings.clear();
    }

    pub fn bound_types(&self) -> Vec<TypeKey> {
        self.bindings.read().keys().copied().collect()
    }

    pub fn into_resolver(self) -> Arc<dyn Resolver> {
        Arc::new(self)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.bindings.read();
        f.debug_struct("Container")
            .field("bindings", &bindings.keys().map(TypeKey::name).collect::<Vec<_>>())
            .finish()
    }
}

impl Resolver for Container {
    fn make(&self, request: &Request<'_>) -> Result<Box<dyn Object>, DtoError> {
        // Clone the binding out so the lock is released before it runs.
        let binding = self.bindings.read().get(&request.key()).cloned();
        match binding {
            Some(binding) => {
                debug!(type_name = request.key().name(), "Make via binding");
                binding(request)
            }
            None => {
                debug!(type_name = request.key().name(), "Make blank");
                request.construct_default()
            }
        }
    }

    fn is_bound(&self, key: TypeKey) -> bool {
        self.bindings.read().contains_key(&key)
    }
}
