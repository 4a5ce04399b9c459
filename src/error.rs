/// Error types for drawing fragment codec operations.
use thiserror::Error;

/// Result type for drawing fragment codec operations.
pub type Result<T> = std::result::Result<T, DrawingError>;

/// Error types for decoding and encoding drawing fragments.
///
/// All decode failures are surfaced synchronously with the offending
/// element or attribute named in the variant. Unrecognized elements and
/// attributes are never errors; they are preserved as data.
#[derive(Error, Debug)]
pub enum DrawingError {
    /// A numeric attribute failed to parse as a whole number
    #[error("malformed number in attribute `{attr}`: `{value}`")]
    MalformedNumber { attr: String, value: String },

    /// A numeric attribute parsed but falls outside the representable
    /// range, including negative values where an unsigned quantity is
    /// required
    #[error("value out of range for attribute `{attr}`: `{value}`")]
    InvalidRange { attr: String, value: String },

    /// A required attribute or child element is absent
    #[error("missing required `{field}` on `{element}`")]
    MissingRequiredField { element: String, field: String },

    /// A singular child element appeared more than once
    #[error("duplicate element `{0}`")]
    DuplicateElement(String),

    /// The document structure does not contain the expected element
    #[error("unexpected element structure: {0}")]
    UnexpectedElement(String),

    /// XML tokenization or encoding error
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for DrawingError {
    fn from(err: quick_xml::Error) -> Self {
        DrawingError::Xml(err.to_string())
    }
}
