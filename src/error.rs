//! Error types for the certificate pipeline.
//!
//! Two failure classes, surfaced separately so callers can show a precise
//! message for bad input and a generic one for assembly failures:
//!
//! - [`ValidationError`] – a required field is empty or a date range is
//!   inverted; nothing is rendered.
//! - [`RenderError`] – the layout/PDF step could not produce output.

use chrono::NaiveDate;
use thiserror::Error;

/// A request field violated the input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("leave period is inverted: {from} is after {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
}

/// Document assembly failed; no partial artifact exists.
#[derive(Debug, Clone, Error)]
#[error("document assembly failed: {0}")]
pub struct RenderError(pub String);

/// Any failure of [`crate::pipeline::generate_certificate`].
#[derive(Debug, Error)]
pub enum CertificateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CertificateError {
    /// True when the failure is a user-correctable input problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, CertificateError::Validation(_))
    }
}
