//! # Application Lifecycle
//!
//! Wiring that turns the framework into a working application.
//!
//! **Key Responsibilities:**
//! 1. **Container Setup** - [`boot`] registers the bindings interfaces need
//! 2. **Teardown** - [`destroy`] flushes them again
//! 3. **Batch Import** - [`import_people`] populates many DTOs concurrently against one container
//!
//! ## Explicit Resolver Injection
//!
//! There is no global container. The container built by [`boot`] is handed
//! to every DTO that needs one:
//!
//! ```rust,ignore
//! let resolver = lifecycle::boot().into_resolver();
//! let person = Person::with_data(data, Some(resolver.clone()))?;
//! ```
//!
//! Nested DTOs constructed during population receive the same handle, so
//! one `boot` serves a whole object graph.
//!
//! ## Observability
//!
//! [`setup_tracing`](dto_framework::tracing::setup_tracing) initializes
//! structured logging; `RUST_LOG=debug` shows every assignment and
//! resolution step.

pub mod bootstrap;
pub mod import;

pub use bootstrap::{boot, destroy};
pub use import::{import_people, import_people_json, ImportError};
