//! Error type shared by the frame model, the presentation model and the converter.
use thiserror::Error;

/// Main error type for deckframe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An argument or option value outside of its accepted set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A dtype/format combination the formatter cannot handle
    #[error("Not implemented: {0}")]
    Unimplemented(String),

    /// An aggregation function could not be applied to a column or row
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// A malformed format pattern, or a value the pattern cannot render
    #[error("Format error: {0}")]
    Format(String),

    /// A label rejected by a categorical index level
    #[error("Label {label:?} is not an allowed category of index level {level}")]
    LabelNotAllowed { level: usize, label: String },

    /// Mismatched lengths or out-of-range positions
    #[error("Shape error: {0}")]
    Shape(String),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for deckframe operations.
pub type Result<T> = std::result::Result<T, Error>;
