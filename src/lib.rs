//! # cert-forge – Template-driven certificate → PDF pipeline
//!
//! This crate turns a validated certificate request into a paginated A4 PDF
//! plus a derived filename. The pipeline stages are:
//!
//! 1. **Validate** – required fields and date ordering ([`validate`])
//! 2. **Recipe** – expand the certificate kind into section descriptors and
//!    a field map ([`recipe`], [`template`])
//! 3. **Layout** – flow sections into positioned, wrapped text boxes
//!    ([`layout`], [`fonts`])
//! 4. **Paginate** – split into pages with the footer pinned to each page
//!    bottom ([`pagination`])
//! 5. **Render** – emit PDF bytes via printpdf ([`render`])
//!
//! Four certificate kinds share this one pipeline: general medical, fitness,
//! sick leave, and Form 1A driving fitness. Profiles are explicit arguments
//! to every render; the library holds no ambient state.

pub mod error;
pub mod fonts;
pub mod layout;
pub mod layout_config;
pub mod model;
pub mod pagination;
pub mod pipeline;
pub mod recipe;
pub mod render;
pub mod samples;
pub mod template;
pub mod validate;

// Re-exports for convenience
pub use error::{CertificateError, RenderError, ValidationError};
pub use model::{
    CertificateArtifact, CertificateKind, CertificateRequest, OrganizationProfile,
    PractitionerProfile, RenderRequest,
};
pub use pipeline::{generate_certificate, generate_certificate_at, PipelineConfig};
