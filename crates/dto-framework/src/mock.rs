//! # Mock Resolver & Testing Guide
//!
//! [`MockResolver`] implements [`Resolver`] entirely from scripted
//! expectations. It lets a test pin down exactly which types the population
//! path asks for, in which order, and what each request yields, without
//! writing real bindings.
//!
//! ## When to use the Mock vs a Container
//!
//! | Feature | MockResolver | Container |
//! |---------|--------------|-----------|
//! | **Construction** | Scripted per request | Bindings or blank construction |
//! | **Call tracking** | `calls()` records every requested type | None |
//! | **Error Injection** | Easy (`return_err`) | Requires a failing binding |
//! | **Use Case** | Testing the resolution policy and DTO wiring | Application setup, end-to-end tests |
//!
//! ## Example
//!
//! ```rust
//! use dto_framework::mock::MockResolver;
//! use dto_framework::{DtoError, ObjectType, Request, Resolver, Value};
//!
//! let mock = MockResolver::new();
//! mock.expect_make::<String>().return_err(DtoError::UnresolvableType {
//!     type_name: "String",
//!     reason: "not an object".to_string(),
//! });
//!
//! let resolver = mock.resolver();
//! let seed = Value::Null;
//! let request = Request::new("label", ObjectType::interface::<String>(), &seed, &resolver);
//! let result = resolver.make(&request);
//! assert!(result.is_err());
//! mock.verify();
//! ```
//!
//! Unmet or unexpected requests panic, like a failed assertion.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::DtoError;
use crate::object::{Object, TypeKey};
use crate::resolver::{Request, Resolver};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

#[derive(Debug)]
enum Response {
    /// Use the request's default constructor.
    Blank,
    Instance(Box<dyn Object>),
    Err(DtoError),
}

#[derive(Debug)]
struct Expectation {
    key: TypeKey,
    response: Response,
}

#[derive(Debug, Default)]
struct State {
    expectations: VecDeque<Expectation>,
    bound: HashSet<TypeKey>,
    calls: Vec<TypeKey>,
}

/// A resolver with expectation tracking for fluent testing.
///
/// Clones share state, so the handle returned by [`resolver`](Self::resolver)
/// reports into the same mock.
///
/// # Example
/// ```ignore
/// let mock = MockResolver::new();
/// mock.bind::<dyn NotesContract>();
/// mock.expect_make::<dyn NotesContract>().return_instance(notes);
/// mock.expect_make::<Address>().return_blank();
///
/// let person = Person::with_data(data, Some(mock.resolver()))?;
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    state: Arc<Mutex<State>>,
}

impl MockResolver {
    /// Creates a new mock with no expectations and no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle to hand to DTOs under test.
    pub fn resolver(&self) -> Arc<dyn Resolver> {
        Arc::new(self.clone())
    }

    /// Reports `T` as explicitly bound from now on.
    pub fn bind<T: ?Sized + 'static>(&self) -> &Self {
        self.state.lock().bound.insert(TypeKey::of::<T>());
        self
    }

    /// Expects the next `make` request to be for `T`.
    pub fn expect_make<T: ?Sized + 'static>(&self) -> MakeExpectationBuilder {
        MakeExpectationBuilder {
            key: TypeKey::of::<T>(),
            state: Arc::clone(&self.state),
        }
    }

    /// Types requested so far, in request order.
    pub fn calls(&self) -> Vec<TypeKey> {
        self.state.lock().calls.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock();
        if !state.expectations.is_empty() {
            let remaining: Vec<_> = state.expectations.iter().map(|e| e.key.name()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                remaining.len(),
                remaining
            );
        }
    }
}

impl Resolver for MockResolver {
    fn make(&self, request: &Request<'_>) -> Result<Box<dyn Object>, DtoError> {
        let mut state = self.state.lock();
        state.calls.push(request.key());
        let expectation = state.expectations.pop_front();
        drop(state); // Release lock before constructing

        match expectation {
            Some(Expectation { key, response }) if key == request.key() => match response {
                Response::Blank => request.construct_default(),
                Response::Instance(object) => Ok(object),
                Response::Err(error) => Err(error),
            },
            Some(Expectation { key, .. }) => panic!(
                "Expectation mismatch: expected make for {}, got {}",
                key.name(),
                request.key().name()
            ),
            None => panic!("Unexpected make request for {}", request.key().name()),
        }
    }

    fn is_bound(&self, key: TypeKey) -> bool {
        self.state.lock().bound.contains(&key)
    }
}

/// Builder for `make` expectations.
pub struct MakeExpectationBuilder {
    key: TypeKey,
    state: Arc<Mutex<State>>,
}

impl MakeExpectationBuilder {
    /// Answers with a blank instance from the request's default constructor.
    pub fn return_blank(self) {
        self.push(Response::Blank);
    }

    /// Answers with the given instance.
    pub fn return_instance(self, object: impl Object) {
        self.push(Response::Instance(Box::new(object)));
    }

    /// Answers with an error.
    pub fn return_err(self, error: DtoError) {
        self.push(Response::Err(error));
    }

    fn push(self, response: Response) {
        self.state.lock().expectations.push_back(Expectation {
            key: self.key,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectType;
    use crate::value::Value;
    use serde::Serialize;

    #[derive(Debug, Clone, Default, Serialize)]
    struct Gear {
        teeth: u32,
    }

    crate::impl_object!(Gear);

    fn make_gear(resolver: &Arc<dyn Resolver>) -> Result<Box<dyn Object>, DtoError> {
        let seed = Value::Null;
        resolver.make(&Request::new("gear", ObjectType::object::<Gear>(), &seed, resolver))
    }

    #[test]
    fn test_expectations_answer_in_order() {
        let mock = MockResolver::new();
        mock.expect_make::<Gear>().return_instance(Gear { teeth: 12 });
        mock.expect_make::<Gear>().return_blank();
        let resolver = mock.resolver();

        let first = make_gear(&resolver).unwrap();
        let second = make_gear(&resolver).unwrap();

        assert_eq!(first.downcast_ref::<Gear>().map(|g| g.teeth), Some(12));
        assert_eq!(second.downcast_ref::<Gear>().map(|g| g.teeth), Some(0));
        assert_eq!(mock.calls().len(), 2);
        mock.verify();
    }

    #[test]
    fn test_bind_marks_type() {
        let mock = MockResolver::new();
        assert!(!mock.is_bound(TypeKey::of::<Gear>()));
        mock.bind::<Gear>();
        assert!(mock.resolver().is_bound(TypeKey::of::<Gear>()));
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_unmet_expectation() {
        let mock = MockResolver::new();
        mock.expect_make::<Gear>().return_blank();
        mock.verify();
    }

    #[test]
    #[should_panic(expected = "Unexpected make request")]
    fn test_unexpected_request_panics() {
        let mock = MockResolver::new();
        let _ = make_gear(&mock.resolver());
    }

    #[test]
    #[should_panic(expected = "Expectation mismatch")]
    fn test_mismatched_request_panics() {
        let mock = MockResolver::new();
        mock.expect_make::<String>().return_blank();
        let _ = make_gear(&mock.resolver());
    }
}
