#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # DTO Recipe
//!
//! > **A Recipe for typed Data Transfer Objects in Rust.**
//!
//! This crate demonstrates how to build DTOs with the
//! [`dto_framework`] crate: records that are populated from untyped data,
//! nest other records, hold interface-typed values, and export themselves
//! back to JSON.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Describe once, use everywhere
//!
//! Every DTO declares its fields once, in a static
//! [`Schema`](dto_framework::Schema). Population, indexed access
//! (`get`/`set`/`has`/`unset`), JSON export and the generated typed
//! accessors all read from that one description.
//!
//! ### Explicit resolution
//!
//! Nested values that arrive as plain mappings need something to construct
//! them. Instead of a global container, each DTO carries an explicit
//! resolver handle; without one, nested mappings are rejected with
//! [`NoResolverAvailable`](dto_framework::DtoError::NoResolverAvailable).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Records ([`model`])
//! - **Role**: Domain DTOs built on the framework.
//! - **Key items**: [`Person`](model::Person), [`Address`](model::Address),
//!   [`City`](model::City), [`NotesContract`](model::NotesContract).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Builds the container with its bindings and runs concurrent batch imports.
//! - **Key items**: [`boot`](lifecycle::boot), [`import_people`](lifecycle::import_people).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with resolution steps logged
//! RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod lifecycle;
pub mod model;
