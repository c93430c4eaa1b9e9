use std::sync::{Arc, LazyLock};

use dto_framework::{impl_object, interface, Dto, Object, Resolver, Schema, SchemaBuilder};

/// Anything that holds a list of notes.
///
/// Only an explicit container binding can construct a `dyn NotesContract`;
/// see [`boot`](crate::lifecycle::boot).
pub trait NotesContract: Object {
    fn notes(&self) -> &[String];

    fn set_notes(&mut self, notes: Vec<String>);
}

interface!(NotesContract);

/// The default [`NotesContract`] implementation.
#[derive(Debug, Clone, Default)]
pub struct Notes {
    notes: Option<Vec<String>>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for Notes {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Notes>> = LazyLock::new(|| {
            SchemaBuilder::<Notes>::new()
                .field("notes", |n| &n.notes, |n| &mut n.notes)
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

impl_object!(dto Notes: dyn NotesContract);

impl NotesContract for Notes {
    fn notes(&self) -> &[String] {
        self.notes.as_deref().unwrap_or_default()
    }

    fn set_notes(&mut self, notes: Vec<String>) {
        self.notes = Some(notes);
    }
}
