//! # Observability & Tracing
//!
//! The framework emits structured `tracing` events along the population
//! path. [`setup_tracing`] installs a compact subscriber for applications
//! that do not bring their own.
//!
//! ## What Gets Traced
//!
//! - **Population**: a `populate` span per call, with the DTO name and the
//!   number of entries
//! - **Assignment**: one `debug` event per field written or unset
//! - **Resolution**: the path taken for every object-typed field (already an
//!   instance, bound, populated) at `debug`, failures at `warn`
//! - **Container**: bindings added, flushed, and how each `make` was served
//!
//! ## Usage Examples
//!
//! ```bash
//! # Failures only
//! RUST_LOG=warn cargo run
//!
//! # Every assignment and resolution step
//! RUST_LOG=debug cargo run
//!
//! # Framework internals only
//! RUST_LOG=dto_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a nested population reads like:
//!
//! ```text
//! DEBUG populate: Assign dto="Person" field="name" kind="string"
//! DEBUG populate: Make blank type_name="Address"
//! DEBUG populate: Populating resolved instance field="address" expected="Address"
//! DEBUG populate:populate: Assign dto="Address" field="street" kind="string"
//! DEBUG populate:populate: Make blank type_name="City"
//! DEBUG populate:populate: Populating resolved instance field="city" expected="City"
//! DEBUG populate:populate:populate: Assign dto="City" field="name" kind="string"
//! ```
//!
//! Nested spans show which DTO a step belongs to.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Field names carry the DTO, module paths add nothing
        .compact()
        .init();
}
