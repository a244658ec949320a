//! Error types for loading data, parsing templates and rendering.

use crate::format::Format;
use crate::value::Kind;
use thiserror::Error;

/// Errors that can occur while turning data and a template into output.
#[derive(Error, Debug)]
pub enum DtmplError {
    /// A resource could not be opened, read or written.
    #[error("I/O error on {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The input bytes did not parse under the selected format.
    #[error("{format} decode error: {message}")]
    Decode { format: Format, message: String },

    /// A format name that is not one of json, yaml or toml.
    #[error("unknown data format '{0}' (expected json, yaml or toml)")]
    UnknownFormat(String),

    /// The template source is not valid template syntax.
    #[error("template parse error: {0}")]
    TemplateParse(#[source] minijinja::Error),

    /// Evaluation failed: undefined field, helper failure, bad directive.
    #[error("render error: {0}")]
    Render(#[source] minijinja::Error),
}

/// Failures raised by the comparator and the orderers built on it.
///
/// These never escape a render on their own: the helper table converts them
/// into template errors, which then surface as [`DtmplError::Render`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Both operands are scalars, but of different categories.
    #[error("cannot compare {left} with {right}")]
    Incomparable { left: Kind, right: Kind },

    /// An operand has no natural ordering (bool, null, sequence, mapping).
    #[error("values of kind {0} have no ordering")]
    Unordered(Kind),

    /// Field-keyed sorting was handed an element that is not a mapping.
    #[error("element {index} is a {kind}, expected a mapping")]
    NotAMapping { index: usize, kind: Kind },
}

/// Convenience alias used throughout dtmpl-core.
pub type Result<T> = std::result::Result<T, DtmplError>;
