//! Input records and the rendered artifact.
//!
//! Everything the renderer consumes arrives through these types: two
//! session-scoped profiles (organization, practitioner) and one
//! [`CertificateRequest`] per render. Requests are immutable once built;
//! the renderer never mutates or retains them.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The clinic or hospital issuing the certificate.
///
/// Supplied once per session and shared by every generated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    /// Multi-line postal address (`\n`-separated).
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub registration_no: Option<String>,
}

/// The examining practitioner, as printed in the signature block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PractitionerProfile {
    /// Name without the `Dr.` prefix; the signature block adds it.
    pub name: String,
    pub qualification: String,
    #[serde(default)]
    pub registration_no: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        })
    }
}

/// Purpose options for the fitness certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessPurpose {
    GovernmentService,
    PrivateJob,
    Promotion,
    Transfer,
    SportsAthletics,
    Other,
}

impl fmt::Display for FitnessPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitnessPurpose::GovernmentService => "Government Service",
            FitnessPurpose::PrivateJob => "Private Job",
            FitnessPurpose::Promotion => "Promotion",
            FitnessPurpose::Transfer => "Transfer",
            FitnessPurpose::SportsAthletics => "Sports/Athletics",
            FitnessPurpose::Other => "Other",
        })
    }
}

/// License classes accepted on Form 1A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    TwoWheeler,
    FourWheelerLmv,
    TransportVehicle,
    CommercialVehicle,
    Renewal,
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LicenseType::TwoWheeler => "Two Wheeler",
            LicenseType::FourWheelerLmv => "Four Wheeler (LMV)",
            LicenseType::TransportVehicle => "Transport Vehicle",
            LicenseType::CommercialVehicle => "Commercial Vehicle",
            LicenseType::Renewal => "Renewal",
        })
    }
}

/// Snellen acuity scale used in the Form 1A vision block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualAcuity {
    #[serde(rename = "6/6")]
    V6_6,
    #[serde(rename = "6/9")]
    V6_9,
    #[serde(rename = "6/12")]
    V6_12,
    #[serde(rename = "6/18")]
    V6_18,
    #[serde(rename = "6/24")]
    V6_24,
    #[serde(rename = "6/36")]
    V6_36,
    #[serde(rename = "6/60")]
    V6_60,
}

impl fmt::Display for VisualAcuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisualAcuity::V6_6 => "6/6",
            VisualAcuity::V6_9 => "6/9",
            VisualAcuity::V6_12 => "6/12",
            VisualAcuity::V6_18 => "6/18",
            VisualAcuity::V6_24 => "6/24",
            VisualAcuity::V6_36 => "6/36",
            VisualAcuity::V6_60 => "6/60",
        })
    }
}

/// The four supported certificate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    GeneralMedical,
    Fitness,
    SickLeave,
    DrivingFitness,
}

impl CertificateKind {
    /// Label used as the filename prefix.
    pub fn label(&self) -> &'static str {
        match self {
            CertificateKind::GeneralMedical => "Medical_Certificate",
            CertificateKind::Fitness => "Fitness_Certificate",
            CertificateKind::SickLeave => "Sick_Leave_Certificate",
            CertificateKind::DrivingFitness => "Form_1A",
        }
    }

    /// Human-readable name, used for PDF metadata.
    pub fn display_name(&self) -> &'static str {
        match self {
            CertificateKind::GeneralMedical => "Medical Certificate",
            CertificateKind::Fitness => "Fitness Certificate",
            CertificateKind::SickLeave => "Sick Leave Certificate",
            CertificateKind::DrivingFitness => "Form 1A",
        }
    }
}

/// Request for a general medical certificate with a leave recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralMedicalRequest {
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    /// Designation/occupation; the certificate falls back to "Patient".
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    pub examined_on: NaiveDate,
    pub diagnosis: String,
    pub leave_from: NaiveDate,
    pub leave_to: NaiveDate,
    #[serde(default)]
    pub recommendations: Option<String>,
}

/// Request for an employment/service fitness certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessRequest {
    pub applicant_name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    pub examined_on: NaiveDate,
    pub purpose: FitnessPurpose,
    #[serde(default)]
    pub medical_history: Option<String>,
    /// Practitioner-editable remarks printed under CERTIFICATION.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Request for a sick-leave letter addressed to the employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SickLeaveRequest {
    pub employee_name: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub company: String,
    pub examined_on: NaiveDate,
    pub illness: String,
    pub leave_from: NaiveDate,
    pub leave_to: NaiveDate,
    #[serde(default)]
    pub bed_rest: bool,
    #[serde(default)]
    pub follow_up: Option<NaiveDate>,
}

/// Request for a Form 1A driving-fitness certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrivingFitnessRequest {
    pub applicant_name: String,
    pub age: u8,
    pub gender: Gender,
    /// Multi-line postal address (`\n`-separated).
    pub address: String,
    pub license_type: LicenseType,
    pub examined_on: NaiveDate,
    pub height_cm: u16,
    pub weight_kg: u16,
    pub vision_right: VisualAcuity,
    pub vision_left: VisualAcuity,
    #[serde(default)]
    pub color_blind: bool,
    pub hearing_normal: bool,
    #[serde(default)]
    pub deformity: Option<String>,
    pub fit_to_drive: bool,
}

/// One certificate request, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CertificateRequest {
    GeneralMedical(GeneralMedicalRequest),
    Fitness(FitnessRequest),
    SickLeave(SickLeaveRequest),
    DrivingFitness(DrivingFitnessRequest),
}

impl CertificateRequest {
    pub fn kind(&self) -> CertificateKind {
        match self {
            CertificateRequest::GeneralMedical(_) => CertificateKind::GeneralMedical,
            CertificateRequest::Fitness(_) => CertificateKind::Fitness,
            CertificateRequest::SickLeave(_) => CertificateKind::SickLeave,
            CertificateRequest::DrivingFitness(_) => CertificateKind::DrivingFitness,
        }
    }

    /// The person the certificate is about; feeds the artifact filename.
    pub fn subject_name(&self) -> &str {
        match self {
            CertificateRequest::GeneralMedical(r) => &r.patient_name,
            CertificateRequest::Fitness(r) => &r.applicant_name,
            CertificateRequest::SickLeave(r) => &r.employee_name,
            CertificateRequest::DrivingFitness(r) => &r.applicant_name,
        }
    }
}

/// A full render request as accepted by the `certify` CLI: both profiles
/// plus the certificate record, in one JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub organization: OrganizationProfile,
    pub practitioner: PractitionerProfile,
    pub certificate: CertificateRequest,
}

/// The rendered output: PDF bytes plus the derived filename.
#[derive(Debug, Clone)]
pub struct CertificateArtifact {
    pub bytes: Vec<u8>,
    /// `{KindLabel}_{Subject_Name}_{YYYYMMDD_HHMMSS}.pdf`
    pub filename: String,
    pub generated_at: DateTime<Local>,
}

/// Inclusive day count of a leave range: `(to - from).days + 1`.
///
/// Callers must have validated `from <= to`; the result is then >= 1.
pub fn inclusive_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn inclusive_day_count() {
        assert_eq!(inclusive_days(d(2024, 5, 1), d(2024, 5, 3)), 3);
        assert_eq!(inclusive_days(d(2024, 5, 1), d(2024, 5, 1)), 1);
        assert_eq!(inclusive_days(d(2024, 2, 28), d(2024, 3, 1)), 3); // leap year
    }

    #[test]
    fn request_kind_tagging() {
        let json = r#"{
            "kind": "sick_leave",
            "employee_name": "Ravi Kumar",
            "company": "Acme Ltd",
            "examined_on": "2024-05-01",
            "illness": "Influenza",
            "leave_from": "2024-05-01",
            "leave_to": "2024-05-02"
        }"#;
        let req: CertificateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind(), CertificateKind::SickLeave);
        assert_eq!(req.subject_name(), "Ravi Kumar");
    }

    #[test]
    fn acuity_serializes_as_scale_notation() {
        let json = serde_json::to_string(&VisualAcuity::V6_12).unwrap();
        assert_eq!(json, "\"6/12\"");
        assert_eq!(VisualAcuity::V6_12.to_string(), "6/12");
    }

    #[test]
    fn kind_labels() {
        assert_eq!(CertificateKind::GeneralMedical.label(), "Medical_Certificate");
        assert_eq!(CertificateKind::DrivingFitness.label(), "Form_1A");
    }
}
