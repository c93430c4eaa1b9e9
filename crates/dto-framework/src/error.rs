//! # Framework Errors
//!
//! Every failure the population path can raise is a variant of [`DtoError`].
//! Errors are raised at the offending field and propagate unchanged through
//! [`populate`](crate::populate()) to whoever started the population (a
//! constructor such as [`Dto::with_data`](crate::Dto::with_data) or a direct
//! [`Dto::set`](crate::Dto::set) call). Nothing in the framework recovers from
//! them locally.

/// Errors raised while populating, reading or exporting a DTO.
#[derive(Debug, thiserror::Error)]
pub enum DtoError {
    /// Indexed access to a name that is not a populatable field of the DTO.
    #[error("Undefined field \"{field}\" on {dto}")]
    UndefinedField { dto: &'static str, field: String },

    /// A complex-typed field needs resolution but the DTO has no resolver.
    #[error(
        "No dependency resolver is available, cannot resolve field \"{field}\" of the type \"{expected}\"; do not know how to populate with {value}"
    )]
    NoResolverAvailable {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// The resolver could not produce an instance of the requested type.
    #[error("Unable to resolve type \"{type_name}\": {reason}")]
    UnresolvableType {
        type_name: &'static str,
        reason: String,
    },

    /// The resolved instance cannot absorb the supplied data.
    #[error(
        "Unable to resolve dependency for field \"{field}\" of the type \"{expected}\"; do not know how to populate with {value}"
    )]
    UnpopulatableTarget {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// A writer received a value of an incompatible kind.
    #[error("Invalid value for field \"{field}\": expected {expected}, found {found}")]
    InvalidValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
