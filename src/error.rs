use thiserror::Error;

macro_rules! violation_error {
    ($($arg:tt)*) => {
        crate::Error::ConstraintViolation {
            message: format!($($arg)*),
        }
    };
}

macro_rules! fault_error {
    ($($arg:tt)*) => {
        crate::Error::Fault(format!($($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The engines are deliberately defensive: the describer and the tabular extractor render
/// blanks or placeholders for anything they cannot resolve, so most of these variants can
/// only surface from validation, enum parsing, or list-source resolution.
///
/// # Error Categories
///
/// ## Request Validation
/// - [`Error::InvalidInput`] - A missing record where a schema expects one
/// - [`Error::ConstraintViolation`] - A field failed one of its declared constraints
///
/// ## Metadata Consistency
/// - [`Error::MetadataInconsistency`] - A declared list source does not resolve
/// - [`Error::UnsupportedEnumSource`] - An enum was parsed from a value of an unsupported shape
///
/// ## Internal
/// - [`Error::Fault`] - The accessor and the metadata disagree about a field
/// - [`Error::Rendering`] - Output serialization failed
#[derive(Error, Debug)]
pub enum Error {
    /// No record was supplied where a schema description is present.
    ///
    /// Carries the display name of the message description the record was
    /// expected to satisfy.
    #[error("{0}: is not a valid message")]
    InvalidInput(String),

    /// A field failed one of its declared constraints.
    ///
    /// The message is the complete, transport-ready violation text, always
    /// attributed to a single field path (e.g. `"Name is required"` or
    /// `"Limit: maximum value is 1000"`). Validation is fail-fast, so a
    /// single violation is reported even when several exist.
    #[error("{message}")]
    ConstraintViolation {
        /// The full violation text, starting with the field path
        message: String,
    },

    /// Schema metadata is internally inconsistent.
    ///
    /// Returned when a declared list source cannot be resolved against the
    /// message description: the field does not exist, is disabled for
    /// projection, or is not a repeated message field.
    #[error("{0}")]
    MetadataInconsistency(String),

    /// An enum value was parsed from a runtime value of an unsupported shape.
    ///
    /// The associated name identifies the offending value kind. Unsupported
    /// shapes fail loudly instead of silently parsing to 0.
    #[error("unsupported enum source type: {0}")]
    UnsupportedEnumSource(&'static str),

    /// The accessor and the metadata disagree about a field.
    ///
    /// Raised when a record reports a value whose runtime shape contradicts
    /// the declared field kind. Depending on the configured
    /// [`FaultMode`](crate::validation::FaultMode), validation either
    /// surfaces this error or converts it into a success.
    #[error("{0}")]
    Fault(String),

    /// Serializing an output structure to text failed.
    #[error("failed to render output: {0}")]
    Rendering(String),
}

impl Error {
    /// Classification tag for transport layers.
    ///
    /// Input and constraint failures classify as `"bad_request"` so an outer
    /// gRPC/HTTP adapter can map them to the right status; everything else is
    /// an `"internal"` condition.
    #[must_use]
    pub fn classification(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) | Error::ConstraintViolation { .. } => "bad_request",
            Error::MetadataInconsistency(_)
            | Error::UnsupportedEnumSource(_)
            | Error::Fault(_)
            | Error::Rendering(_) => "internal",
        }
    }
}
