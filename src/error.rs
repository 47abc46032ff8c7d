//! Error types for radiation pressure model construction and evaluation
//!
//! Two classes are distinguished deliberately:
//!
//! - **Configuration errors** are raised while building a model graph
//!   (invalid reflectivity fractions, non-positive mass or area, missing
//!   model attachments). They are fatal and never silently corrected.
//! - **Degenerate geometry errors** are raised during an evaluation when the
//!   geometry makes the result undefined (coincident source and target,
//!   zero-length normalization input). They are distinct from legitimate
//!   zero-irradiance outcomes such as a full eclipse, which are plain zeros.

use thiserror::Error;

/// Errors produced by the radiation pressure framework
#[derive(Debug, Error)]
pub enum RadPressError {
    /// Invalid or inconsistent parameters detected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A body identifier could not be resolved
    #[error("unknown body: {0}")]
    UnknownBody(String),

    /// Geometry for which the evaluation is undefined
    ///
    /// Callers can distinguish this from a normal zero-irradiance outcome
    /// (full occultation, no visible panels), which is not an error.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RadPressError>;
