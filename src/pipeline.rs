//! Pipeline – ties together validation, recipe construction, layout,
//! pagination, and rendering into a single call.

use chrono::{DateTime, Local};

use crate::error::{CertificateError, RenderError, ValidationError};
use crate::fonts::FontManager;
use crate::layout::flow_certificate;
use crate::layout_config::DocumentLayout;
use crate::model::{
    CertificateArtifact, CertificateKind, CertificateRequest, OrganizationProfile,
    PractitionerProfile,
};
use crate::pagination::{paginate, PAGE_MARGIN_PT};
use crate::recipe::build_recipe;
use crate::render::render_pdf;
use crate::validate;

/// Page configuration for the generated PDF.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Page width in points (default: A4 = 595.28).
    pub page_width: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height: f32,
    /// Page margin in points (default: 40).
    pub page_margin: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            page_margin: PAGE_MARGIN_PT,
        }
    }
}

impl PipelineConfig {
    /// Width available to content after both margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.page_margin
    }
}

/// Full pipeline: validated request -> PDF artifact.
///
/// Fails with [`CertificateError::Validation`] before any layout work when a
/// required field is blank or a leave range is inverted, and with
/// [`CertificateError::Render`] if PDF assembly cannot complete. Nothing
/// partial is ever returned.
pub fn generate_certificate(
    organization: &OrganizationProfile,
    practitioner: &PractitionerProfile,
    request: &CertificateRequest,
    config: &PipelineConfig,
) -> Result<CertificateArtifact, CertificateError> {
    generate_certificate_at(organization, practitioner, request, config, Local::now())
}

/// Like [`generate_certificate`] but with an injected generation timestamp.
///
/// The timestamp feeds the artifact filename, the fitness certificate
/// number, and the `Date:` attestation lines; injecting it makes renders
/// reproducible byte-for-byte.
pub fn generate_certificate_at(
    organization: &OrganizationProfile,
    practitioner: &PractitionerProfile,
    request: &CertificateRequest,
    config: &PipelineConfig,
    generated_at: DateTime<Local>,
) -> Result<CertificateArtifact, CertificateError> {
    let layout =
        compute_document_layout(organization, practitioner, request, config, generated_at)?;

    log::debug!(
        "rendering {} for {:?} ({} page(s))",
        layout.title,
        request.kind(),
        layout.pages.len()
    );

    let bytes = render_pdf(&layout).map_err(RenderError)?;

    Ok(CertificateArtifact {
        bytes,
        filename: artifact_filename(request.kind(), request.subject_name(), generated_at),
        generated_at,
    })
}

/// Validate and lay out without rendering the PDF – useful for testing.
pub fn compute_document_layout(
    organization: &OrganizationProfile,
    practitioner: &PractitionerProfile,
    request: &CertificateRequest,
    config: &PipelineConfig,
    generated_at: DateTime<Local>,
) -> Result<DocumentLayout, ValidationError> {
    validate::validate(practitioner, request)?;

    let recipe = build_recipe(practitioner, request, generated_at);
    let fonts = FontManager::new();
    let flow = flow_certificate(
        organization,
        practitioner,
        &recipe,
        config.content_width(),
        &fonts,
    );

    let title = format!(
        "{} - {}",
        request.kind().display_name(),
        request.subject_name().trim()
    );
    Ok(paginate(
        &flow,
        &title,
        config.page_width,
        config.page_height,
        config.page_margin,
    ))
}

/// `{KindLabel}_{Subject_Name}_{YYYYMMDD_HHMMSS}.pdf`, spaces in the subject
/// name replaced with underscores.
///
/// Unique only to the second; callers persisting artifacts should resolve
/// collisions at the write site (the CLI appends a numeric suffix).
pub fn artifact_filename(
    kind: CertificateKind,
    subject_name: &str,
    generated_at: DateTime<Local>,
) -> String {
    let name = subject_name.trim().replace(' ', "_");
    format!(
        "{}_{}_{}.pdf",
        kind.label(),
        name,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use chrono::TimeZone;

    #[test]
    fn pipeline_basic() {
        let artifact = generate_certificate(
            &samples::sample_organization(),
            &samples::sample_practitioner(),
            &samples::sample_general_medical(),
            &PipelineConfig::default(),
        )
        .unwrap();
        assert!(!artifact.bytes.is_empty());
        assert_eq!(&artifact.bytes[0..5], b"%PDF-");
        assert!(artifact.filename.starts_with("Medical_Certificate_Asha_Rao_"));
        assert!(artifact.filename.ends_with(".pdf"));
    }

    #[test]
    fn filename_shape() {
        let at = Local.with_ymd_and_hms(2024, 6, 10, 14, 30, 5).unwrap();
        assert_eq!(
            artifact_filename(CertificateKind::SickLeave, " Ravi Kumar ", at),
            "Sick_Leave_Certificate_Ravi_Kumar_20240610_143005.pdf"
        );
    }

    #[test]
    fn validation_failure_yields_no_artifact() {
        let mut request = samples::sample_general_medical();
        if let crate::model::CertificateRequest::GeneralMedical(r) = &mut request {
            r.diagnosis.clear();
        }
        let err = generate_certificate(
            &samples::sample_organization(),
            &samples::sample_practitioner(),
            &request,
            &PipelineConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
