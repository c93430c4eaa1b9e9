//! Domain DTOs implementing the [`Dto`](dto_framework::Dto) trait.
//!
//! [`Person`] nests an [`Address`], which nests a [`City`]. Person also holds
//! a [`NotesContract`] (an interface, implemented by [`Notes`]) and a
//! [`BadUnpopulatableObject`] (a plain object that is not a DTO).

pub mod address;
pub mod bad_instance;
pub mod city;
pub mod notes;
pub mod person;

pub use address::*;
pub use bad_instance::*;
pub use city::*;
pub use notes::*;
pub use person::*;
