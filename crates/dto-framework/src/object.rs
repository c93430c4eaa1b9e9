//! # Object Model
//!
//! An [`Object`] is any constructed complex value that can sit inside a
//! [`Value`](crate::Value) or in an object-typed DTO field: nested DTOs, plain
//! structs that are not DTOs, and implementations of interface traits.
//!
//! Rust has no `instanceof`, so every object answers two questions itself:
//!
//! - [`Object::implements`]: "am I an instance of this [`TypeKey`]?", true
//!   for the object's own type and for every interface it declares.
//! - [`Object::into_type`]: hand the box over as that type, so an object
//!   field typed `Box<dyn NotesContract>` can take a `Box<dyn Object>`.
//!
//! Both are generated by [`impl_object!`](crate::impl_object), which is the
//! only supported way to implement the trait.
//!
//! ```rust
//! use dto_framework::{impl_object, Object, TypeKey};
//! use serde::Serialize;
//!
//! pub trait Shape: Object {
//!     fn area(&self) -> f64;
//! }
//! dto_framework::interface!(Shape);
//!
//! #[derive(Debug, Clone, Default, Serialize)]
//! pub struct Square {
//!     side: f64,
//! }
//!
//! impl Shape for Square {
//!     fn area(&self) -> f64 {
//!         self.side * self.side
//!     }
//! }
//!
//! impl_object!(Square: dyn Shape);
//!
//! let square: Box<dyn Object> = Box::new(Square { side: 2.0 });
//! assert!(square.implements(TypeKey::of::<dyn Shape>()));
//! let shape = dto_framework::object::cast::<dyn Shape>(square).unwrap();
//! assert_eq!(shape.area(), 4.0);
//! ```

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::DtoError;
use crate::populatable::Populatable;
use crate::resolver::Resolver;

/// Identity of a concrete type or of an interface (`dyn Trait`) type.
///
/// Equality and hashing only look at the [`TypeId`]; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Short type name (e.g. `"City"` instead of `"app::model::city::City"`).
    pub fn name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upcast to `&dyn Any` for downcasting borrowed objects.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Clones an object into a new box.
pub trait CloneObject {
    fn clone_object(&self) -> Box<dyn Object>;
}

impl<T: Object + Clone> CloneObject for T {
    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }
}

/// A constructed complex value.
///
/// Implement with [`impl_object!`](crate::impl_object).
pub trait Object: AsAny + CloneObject + fmt::Debug + Send + Sync {
    /// Short name of the concrete type, used in diagnostics.
    fn type_name(&self) -> &'static str;

    /// Whether this object is an instance of `key`: its own type or one of
    /// the interfaces it declares.
    fn implements(&self, key: TypeKey) -> bool;

    /// Converts the box into `Box<Box<K>>` (erased as `Any`) for the type `K`
    /// identified by `key`. Returns the object unchanged when it is not an
    /// instance of `key`.
    fn into_type(
        self: Box<Self>,
        key: TypeKey,
    ) -> Result<Box<dyn Any + Send + Sync>, Box<dyn Object>>;

    /// JSON projection of the object.
    fn export(&self) -> Result<serde_json::Value, DtoError>;

    /// The population capability, if the object has one.
    fn as_populatable(&mut self) -> Option<&mut dyn Populatable> {
        None
    }
}

impl dyn Object {
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        (**self).clone_object()
    }
}

/// Borrow anything stored in an object field (a concrete object or a
/// `dyn Interface` declared with [`interface!`](crate::interface)) as
/// `&dyn Object`.
pub trait AsObject {
    fn as_object(&self) -> &dyn Object;
}

impl<T: Object> AsObject for T {
    fn as_object(&self) -> &dyn Object {
        self
    }
}

/// Moves an object into a box of type `T`, which may be the concrete type
/// or an interface the object declares.
///
/// On failure the short type name of the rejected object is returned.
pub fn cast<T: ?Sized + 'static>(object: Box<dyn Object>) -> Result<Box<T>, &'static str> {
    let found = object.type_name();
    object
        .into_type(TypeKey::of::<T>())
        .ok()
        .and_then(|erased| erased.downcast::<Box<T>>().ok())
        .map(|boxed| *boxed)
        .ok_or(found)
}

/// Builds a blank instance of a concrete type, attaching the resolver that
/// requested it.
pub type Constructor = fn(Option<Arc<dyn Resolver>>) -> Box<dyn Object>;

/// The type an object-typed writer expects.
#[derive(Clone, Copy, Debug)]
pub struct ObjectType {
    key: TypeKey,
    constructor: Option<Constructor>,
}

impl ObjectType {
    /// A nested DTO; blank construction attaches the requesting resolver.
    pub fn dto<T: crate::Dto>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructor: Some(|resolver| {
                let mut dto = T::default();
                dto.set_resolver(resolver);
                Box::new(dto)
            }),
        }
    }

    /// A concrete object that is not a DTO.
    pub fn object<T: Object + Default>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructor: Some(|_| Box::new(T::default())),
        }
    }

    /// An interface type; only an explicit binding can construct it.
    pub fn interface<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            constructor: None,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}

/// Implements [`Object`] for a type.
///
/// - `impl_object!(Foo)`: a plain object; exported through its
///   `serde::Serialize` impl, no population capability.
/// - `impl_object!(Foo: dyn Bar, dyn Baz)`: same, also an instance of the
///   listed interfaces.
/// - `impl_object!(dto Foo)` / `impl_object!(dto Foo: dyn Bar)`: a DTO, also
///   implements [`Populatable`], `Display` (the JSON form, or the debug form when export fails) and
///   `serde::Serialize` (the export projection). The type must implement
///   [`Dto`](crate::Dto).
#[macro_export]
macro_rules! impl_object {
    (@common $ty:ty, [$($iface:ty),*]) => {
        fn type_name(&self) -> &'static str {
            stringify!($ty)
        }

        fn implements(&self, key: $crate::TypeKey) -> bool {
            key == $crate::TypeKey::of::<$ty>()
                $(|| key == $crate::TypeKey::of::<$iface>())*
        }

        fn into_type(
            self: ::std::boxed::Box<Self>,
            key: $crate::TypeKey,
        ) -> ::std::result::Result<
            ::std::boxed::Box<dyn ::std::any::Any + Send + Sync>,
            ::std::boxed::Box<dyn $crate::Object>,
        > {
            if key == $crate::TypeKey::of::<$ty>() {
                return Ok(::std::boxed::Box::new(self));
            }
            $(
                if key == $crate::TypeKey::of::<$iface>() {
                    let typed: ::std::boxed::Box<$iface> = self;
                    return Ok(::std::boxed::Box::new(typed));
                }
            )*
            Err(self)
        }
    };
    (dto $ty:ty $(: $($iface:ty),+)?) => {
        impl $crate::Object for $ty {
            $crate::impl_object!(@common $ty, [$($($iface),+)?]);

            fn export(&self) -> ::std::result::Result<$crate::__private::serde_json::Value, $crate::DtoError> {
                $crate::Dto::to_exportable(self).map($crate::__private::serde_json::Value::Object)
            }

            fn as_populatable(&mut self) -> Option<&mut dyn $crate::Populatable> {
                Some(self)
            }
        }

        impl $crate::Populatable for $ty {
            fn populate(&mut self, data: $crate::Data) -> ::std::result::Result<(), $crate::DtoError> {
                $crate::populate(self, data)
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match $crate::Dto::to_json(self) {
                    Ok(json) => f.write_str(&json),
                    Err(_) => write!(f, "{self:?}"),
                }
            }
        }

        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                let exported = $crate::Dto::to_exportable(self)
                    .map_err(<S::Error as $crate::__private::serde::ser::Error>::custom)?;
                $crate::__private::serde::Serialize::serialize(&exported, serializer)
            }
        }
    };
    ($ty:ty $(: $($iface:ty),+)?) => {
        impl $crate::Object for $ty {
            $crate::impl_object!(@common $ty, [$($($iface),+)?]);

            fn export(&self) -> ::std::result::Result<$crate::__private::serde_json::Value, $crate::DtoError> {
                Ok($crate::__private::serde_json::to_value(self)?)
            }
        }
    };
}

/// Makes `dyn Trait` usable as the type of an object field.
///
/// The trait must have [`Object`] as a supertrait. Implementors list it in
/// their [`impl_object!`](crate::impl_object) invocation.
#[macro_export]
macro_rules! interface {
    ($iface:ident) => {
        impl $crate::AsObject for dyn $iface {
            fn as_object(&self) -> &dyn $crate::Object {
                self
            }
        }

        impl Clone for ::std::boxed::Box<dyn $iface> {
            fn clone(&self) -> Self {
                let copy = $crate::AsObject::as_object(&**self).clone_object();
                $crate::object::cast::<dyn $iface>(copy).unwrap_or_else(|found| {
                    panic!("{} does not implement {}", found, stringify!($iface))
                })
            }
        }
    };
}
