//! # Field Schema
//!
//! A [`Schema`] is the accessor directory of one DTO type: the ordered list of
//! its declared fields, each with an optional reader and an optional writer.
//! It is built once per type with [`SchemaBuilder`] and kept in a static.
//!
//! A field is *populatable* when it has both a reader and a writer. Only
//! populatable fields take part in population, indexed access and export.
//!
//! Readers and writers are typed projections into the struct's own
//! `Option<_>` fields, so the struct is the single source of truth for both
//! values and presence (`None` = unset).
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//! use dto_framework::{impl_object, Dto, Resolver, Schema, SchemaBuilder};
//!
//! #[derive(Debug, Clone, Default)]
//! pub struct Pet {
//!     name: Option<String>,
//!     resolver: Option<Arc<dyn Resolver>>,
//! }
//!
//! impl Dto for Pet {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<Pet>> = LazyLock::new(|| {
//!             SchemaBuilder::<Pet>::new()
//!                 .field("name", |p| &p.name, |p| &mut p.name)
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
//! impl_object!(dto Pet);
//!
//! assert_eq!(Pet::schema().populatable_fields(), ["name"]);
//! ```

use serde::Serialize;

use crate::dto::Dto;
use crate::error::DtoError;
use crate::object::{cast, AsObject, Object, ObjectType, TypeKey};
use crate::value::{FromValue, Value};

type ReadFn<T> = Box<dyn Fn(&T) -> Option<Value> + Send + Sync>;
type ExportFn<T> = Box<dyn Fn(&T) -> Option<Result<serde_json::Value, DtoError>> + Send + Sync>;
type PresentFn<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type WriteFn<T> = Box<dyn Fn(&mut T, Value) -> Result<(), DtoError> + Send + Sync>;
type ClearFn<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// What a writer accepts.
#[derive(Debug, Clone, Copy)]
pub enum Expected {
    /// A scalar or collection; passed through unchanged by the coercer.
    Primitive(&'static str),
    /// A complex type; goes through the resolution policy.
    Object(ObjectType),
}

impl Expected {
    pub fn object_type(&self) -> Option<ObjectType> {
        match self {
            Expected::Primitive(_) => None,
            Expected::Object(ty) => Some(*ty),
        }
    }
}

struct Reader<T> {
    read: ReadFn<T>,
    export: ExportFn<T>,
    present: PresentFn<T>,
}

struct Writer<T> {
    expected: Expected,
    write: WriteFn<T>,
    clear: ClearFn<T>,
}

/// One declared field of a DTO type.
pub struct Property<T> {
    dto: &'static str,
    name: &'static str,
    reader: Option<Reader<T>>,
    writer: Option<Writer<T>>,
}

impl<T> Property<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_populatable(&self) -> bool {
        self.reader.is_some() && self.writer.is_some()
    }

    /// The writer's expected type; `None` when the field has no writer.
    pub fn expected(&self) -> Option<Expected> {
        self.writer.as_ref().map(|writer| writer.expected)
    }

    pub fn is_set(&self, dto: &T) -> bool {
        self.reader
            .as_ref()
            .is_some_and(|reader| (reader.present)(dto))
    }

    /// Current value, cloned; `None` when unset or write-only.
    pub fn read(&self, dto: &T) -> Option<Value> {
        self.reader.as_ref().and_then(|reader| (reader.read)(dto))
    }

    /// JSON projection of the current value; `None` when unset.
    pub fn export(&self, dto: &T) -> Option<Result<serde_json::Value, DtoError>> {
        self.reader.as_ref().and_then(|reader| (reader.export)(dto))
    }

    /// Stores `value`, converting it to the field type.
    pub fn write(&self, dto: &mut T, value: Value) -> Result<(), DtoError> {
        match &self.writer {
            Some(writer) => (writer.write)(dto, value),
            None => Err(self.undefined()),
        }
    }

    /// Returns the field to the unset state.
    pub fn clear(&self, dto: &mut T) -> Result<(), DtoError> {
        match &self.writer {
            Some(writer) => {
                (writer.clear)(dto);
                Ok(())
            }
            None => Err(self.undefined()),
        }
    }

    pub fn descriptor(&self) -> FieldDescriptor {
        FieldDescriptor {
            name: self.name,
            reader_name: self.reader.as_ref().map(|_| reader_name(self.name)),
            writer_name: self.writer.as_ref().map(|_| writer_name(self.name)),
            expected: self
                .expected()
                .and_then(|expected| expected.object_type())
                .map(|ty| ty.key()),
        }
    }

    fn undefined(&self) -> DtoError {
        DtoError::UndefinedField {
            dto: self.dto,
            field: self.name.to_string(),
        }
    }
}

/// Derived description of a field: its accessor names and the writer's
/// expected complex type (`None` for primitives and untyped writers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub reader_name: Option<String>,
    pub writer_name: Option<String>,
    pub expected: Option<TypeKey>,
}

/// Accessor directory of one DTO type.
pub struct Schema<T> {
    dto: &'static str,
    properties: Vec<Property<T>>,
}

impl<T> Schema<T> {
    pub fn dto_name(&self) -> &'static str {
        self.dto
    }

    pub fn property(&self, name: &str) -> Option<&Property<T>> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// The property for `name` if it is populatable.
    pub fn populatable(&self, name: &str) -> Option<&Property<T>> {
        self.property(name).filter(|property| property.is_populatable())
    }

    /// Names of the populatable fields, in declaration order.
    pub fn populatable_fields(&self) -> Vec<&'static str> {
        self.populatable_properties().map(Property::name).collect()
    }

    pub fn populatable_properties(&self) -> impl Iterator<Item = &Property<T>> {
        self.properties
            .iter()
            .filter(|property| property.is_populatable())
    }

    pub fn descriptor(&self, name: &str) -> Option<FieldDescriptor> {
        self.property(name).map(Property::descriptor)
    }

    /// Descriptors of every declared field, populatable or not.
    pub fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.properties.iter().map(Property::descriptor).collect()
    }
}

impl<T: 'static> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Declares the fields of a DTO type, in order.
///
/// Every method takes the field name plus typed projections into the
/// struct's `Option<_>` storage. Non-capturing closures coerce to the
/// expected `fn` pointers.
pub struct SchemaBuilder<T> {
    dto: &'static str,
    properties: Vec<Property<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub fn new() -> Self {
        Self {
            dto: TypeKey::of::<T>().name(),
            properties: Vec::new(),
        }
    }

    /// A readable and writable primitive field.
    pub fn field<F>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<F>,
        get_mut: fn(&mut T) -> &mut Option<F>,
    ) -> Self
    where
        F: FromValue + Into<Value> + Clone + Serialize + 'static,
    {
        let reader = primitive_reader(get);
        let writer = primitive_writer(name, get_mut);
        self.push(name, Some(reader), Some(writer))
    }

    /// A field holding a nested DTO, blank-constructible by a resolver.
    pub fn dto<O: Dto>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<Box<O>>,
        get_mut: fn(&mut T) -> &mut Option<Box<O>>,
    ) -> Self {
        self.object_field(name, ObjectType::dto::<O>(), get, get_mut)
    }

    /// A field holding a concrete object that is not a DTO.
    pub fn object<O: Object + Default>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<Box<O>>,
        get_mut: fn(&mut T) -> &mut Option<Box<O>>,
    ) -> Self {
        self.object_field(name, ObjectType::object::<O>(), get, get_mut)
    }

    /// A field typed by an interface (`dyn Trait` declared with
    /// [`interface!`](crate::interface)); only a binding can construct it.
    pub fn interface<O: ?Sized + AsObject + 'static>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<Box<O>>,
        get_mut: fn(&mut T) -> &mut Option<Box<O>>,
    ) -> Self {
        self.object_field(name, ObjectType::interface::<O>(), get, get_mut)
    }

    /// A field with a reader only. Not populatable.
    pub fn read_only<F>(self, name: &'static str, get: fn(&T) -> &Option<F>) -> Self
    where
        F: Into<Value> + Clone + Serialize + 'static,
    {
        let reader = primitive_reader(get);
        self.push(name, Some(reader), None)
    }

    /// A field with a writer only. Not populatable.
    pub fn write_only<F>(self, name: &'static str, get_mut: fn(&mut T) -> &mut Option<F>) -> Self
    where
        F: FromValue + 'static,
    {
        let writer = primitive_writer(name, get_mut);
        self.push(name, None, Some(writer))
    }

    pub fn build(self) -> Schema<T> {
        Schema {
            dto: self.dto,
            properties: self.properties,
        }
    }

    fn object_field<O: ?Sized + AsObject + 'static>(
        self,
        name: &'static str,
        expected: ObjectType,
        get: fn(&T) -> &Option<Box<O>>,
        get_mut: fn(&mut T) -> &mut Option<Box<O>>,
    ) -> Self {
        let reader = Reader {
            read: Box::new(move |dto: &T| {
                get(dto)
                    .as_deref()
                    .map(|object| Value::Object(AsObject::as_object(object).clone_object()))
            }),
            export: Box::new(move |dto: &T| {
                get(dto)
                    .as_deref()
                    .map(|object| AsObject::as_object(object).export())
            }),
            present: Box::new(move |dto: &T| get(dto).is_some()),
        };
        let writer = Writer {
            expected: Expected::Object(expected),
            write: Box::new(move |dto: &mut T, value: Value| {
                let typed = match value {
                    Value::Object(object) => cast::<O>(object),
                    other => Err(other.kind()),
                }
                .map_err(|found| DtoError::InvalidValue {
                    field: name.to_string(),
                    expected: expected.name(),
                    found,
                })?;
                *get_mut(dto) = Some(typed);
                Ok(())
            }),
            clear: Box::new(move |dto: &mut T| *get_mut(dto) = None),
        };
        self.push(name, Some(reader), Some(writer))
    }

    fn push(mut self, name: &'static str, reader: Option<Reader<T>>, writer: Option<Writer<T>>) -> Self {
        self.properties.push(Property {
            dto: self.dto,
            name,
            reader,
            writer,
        });
        self
    }
}

fn primitive_reader<T: 'static, F>(get: fn(&T) -> &Option<F>) -> Reader<T>
where
    F: Into<Value> + Clone + Serialize + 'static,
{
    Reader {
        read: Box::new(move |dto: &T| get(dto).clone().map(Into::into)),
        export: Box::new(move |dto: &T| {
            get(dto)
                .as_ref()
                .map(|value| serde_json::to_value(value).map_err(DtoError::from))
        }),
        present: Box::new(move |dto: &T| get(dto).is_some()),
    }
}

fn primitive_writer<T: 'static, F>(name: &'static str, get_mut: fn(&mut T) -> &mut Option<F>) -> Writer<T>
where
    F: FromValue + 'static,
{
    Writer {
        expected: Expected::Primitive(F::EXPECTED),
        write: Box::new(move |dto: &mut T, value: Value| {
            let converted = F::from_value(value).map_err(|found| DtoError::InvalidValue {
                field: name.to_string(),
                expected: F::EXPECTED,
                found,
            })?;
            *get_mut(dto) = Some(converted);
            Ok(())
        }),
        clear: Box::new(move |dto: &mut T| *get_mut(dto) = None),
    }
}

/// Name of the reader method for a field: the snake_case field name.
pub fn reader_name(field: &str) -> String {
    snake_case(field)
}

/// Name of the writer method for a field: `set_` + the snake_case name.
pub fn writer_name(field: &str) -> String {
    format!("set_{}", snake_case(field))
}

fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Record {
        title: Option<String>,
        page_count: Option<i64>,
        checksum: Option<String>,
        secret: Option<String>,
    }

    fn schema() -> Schema<Record> {
        SchemaBuilder::<Record>::new()
            .field("title", |r| &r.title, |r| &mut r.title)
            .read_only("checksum", |r| &r.checksum)
            .field("pageCount", |r| &r.page_count, |r| &mut r.page_count)
            .write_only("secret", |r| &mut r.secret)
            .build()
    }

    #[test]
    fn test_populatable_fields_keep_declaration_order() {
        let schema = schema();
        assert_eq!(schema.populatable_fields(), ["title", "pageCount"]);
        assert_eq!(schema.dto_name(), "Record");
        assert!(schema.populatable("checksum").is_none());
        assert!(schema.populatable("secret").is_none());
        assert!(schema.property("secret").is_some());
    }

    #[test]
    fn test_accessor_names() {
        assert_eq!(reader_name("zipCode"), "zip_code");
        assert_eq!(writer_name("zipCode"), "set_zip_code");
        assert_eq!(writer_name("name"), "set_name");
        assert_eq!(reader_name("already_snake"), "already_snake");
    }

    #[test]
    fn test_descriptors() {
        let schema = schema();
        let descriptor = schema.descriptor("pageCount").unwrap();
        assert_eq!(descriptor.reader_name.as_deref(), Some("page_count"));
        assert_eq!(descriptor.writer_name.as_deref(), Some("set_page_count"));
        assert_eq!(descriptor.expected, None);

        let read_only = schema.descriptor("checksum").unwrap();
        assert_eq!(read_only.writer_name, None);
        assert_eq!(schema.descriptors().len(), 4);
        assert!(schema.descriptor("missing").is_none());
    }

    #[test]
    fn test_write_read_and_clear() {
        let schema = schema();
        let mut record = Record::default();
        let title = schema.property("title").unwrap();

        assert!(!title.is_set(&record));
        title.write(&mut record, "Dune".into()).unwrap();
        assert_eq!(title.read(&record), Some(Value::from("Dune")));
        assert_eq!(
            title.export(&record).unwrap().unwrap(),
            serde_json::json!("Dune")
        );

        title.clear(&mut record).unwrap();
        assert_eq!(record.title, None);
        assert!(title.read(&record).is_none());
    }

    #[test]
    fn test_writer_rejects_wrong_kind() {
        let schema = schema();
        let mut record = Record::default();
        let err = schema
            .property("pageCount")
            .unwrap()
            .write(&mut record, "many".into())
            .unwrap_err();
        assert!(matches!(
            err,
            DtoError::InvalidValue { expected: "int", found: "string", .. }
        ));
        assert_eq!(record.page_count, None);
    }

    #[test]
    fn test_missing_accessors() {
        let schema = schema();
        let mut record = Record {
            checksum: Some("abc".into()),
            ..Record::default()
        };
        let checksum = schema.property("checksum").unwrap();
        assert!(checksum.expected().is_none());
        assert!(matches!(
            checksum.write(&mut record, "x".into()),
            Err(DtoError::UndefinedField { dto: "Record", .. })
        ));

        let secret = schema.property("secret").unwrap();
        secret.write(&mut record, "hidden".into()).unwrap();
        assert_eq!(record.secret.as_deref(), Some("hidden"));
        assert!(secret.read(&record).is_none());
    }
}
