use std::sync::Arc;

use dto_framework::{Container, Dto};
use tracing::info;

use crate::model::{Notes, NotesContract};

/// Builds the application container.
///
/// Concrete DTOs need no binding; the container builds them blank and the
/// population engine fills them in. Interfaces do: `dyn NotesContract` is
/// bound to a [`Notes`] built from the seed mapping; any other seed is
/// rejected.
pub fn boot() -> Container {
    let container = Container::new();

    container.bind::<dyn NotesContract, _>(|request| {
        let data = request.seed_data()?.clone();
        let notes = Notes::with_data(data, Some(Arc::clone(request.resolver())))?;
        Ok(Box::new(notes))
    });

    info!(bindings = container.bound_types().len(), "Container booted");
    container
}

/// Drops every binding. DTOs still holding the container keep working, but
/// only concrete types can be resolved afterwards.
pub fn destroy(container: &Container) {
    container.flush();
    info!("Container destroyed");
}
