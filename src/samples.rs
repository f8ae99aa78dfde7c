//! Sample profiles and requests for testing and demonstration.
//!
//! One request per certificate kind, with realistic field values; the
//! `certify --sample` flag emits these as a ready-to-edit JSON file.

use chrono::NaiveDate;

use crate::model::{
    CertificateRequest, DrivingFitnessRequest, FitnessPurpose, FitnessRequest, Gender,
    GeneralMedicalRequest, LicenseType, OrganizationProfile, PractitionerProfile, RenderRequest,
    SickLeaveRequest, VisualAcuity,
};

pub fn sample_organization() -> OrganizationProfile {
    OrganizationProfile {
        name: "City Care Clinic".to_string(),
        address: "123 Medical Street\nBangalore, Karnataka - 560001".to_string(),
        phone: "+91 1234567890".to_string(),
        email: "frontdesk@citycareclinic.in".to_string(),
        registration_no: Some("REG/2024/12345".to_string()),
    }
}

pub fn sample_practitioner() -> PractitionerProfile {
    PractitionerProfile {
        name: "Meera Iyer".to_string(),
        qualification: "MBBS, MD".to_string(),
        registration_no: Some("MCI12345".to_string()),
        specialty: Some("General Physician".to_string()),
    }
}

pub fn sample_general_medical() -> CertificateRequest {
    CertificateRequest::GeneralMedical(GeneralMedicalRequest {
        patient_name: "Asha Rao".to_string(),
        age: 25,
        gender: Gender::Female,
        designation: Some("Software Engineer".to_string()),
        organization: Some("Acme Technologies".to_string()),
        examined_on: date(2024, 5, 1),
        diagnosis: "Viral Fever".to_string(),
        leave_from: date(2024, 5, 1),
        leave_to: date(2024, 5, 3),
        recommendations: Some("Complete bed rest advised".to_string()),
    })
}

pub fn sample_fitness() -> CertificateRequest {
    CertificateRequest::Fitness(FitnessRequest {
        applicant_name: "Ravi Kumar".to_string(),
        age: 32,
        gender: Gender::Male,
        designation: Some("Junior Assistant".to_string()),
        organization: Some("State Secretariat".to_string()),
        examined_on: date(2024, 5, 10),
        purpose: FitnessPurpose::GovernmentService,
        medical_history: None,
        remarks: Some(
            "The applicant is medically fit and has no physical disabilities that would \
             prevent them from performing their duties."
                .to_string(),
        ),
    })
}

pub fn sample_sick_leave() -> CertificateRequest {
    CertificateRequest::SickLeave(SickLeaveRequest {
        employee_name: "Sunil Nair".to_string(),
        employee_id: Some("EMP-4821".to_string()),
        department: Some("Operations".to_string()),
        company: "Meridian Logistics Pvt Ltd".to_string(),
        examined_on: date(2024, 5, 6),
        illness: "Acute Upper Respiratory Tract Infection".to_string(),
        leave_from: date(2024, 5, 6),
        leave_to: date(2024, 5, 9),
        bed_rest: true,
        follow_up: Some(date(2024, 5, 10)),
    })
}

pub fn sample_driving_fitness() -> CertificateRequest {
    CertificateRequest::DrivingFitness(DrivingFitnessRequest {
        applicant_name: "Vikram Shetty".to_string(),
        age: 28,
        gender: Gender::Male,
        address: "45 Lake View Road\nMysore, Karnataka - 570001".to_string(),
        license_type: LicenseType::FourWheelerLmv,
        examined_on: date(2024, 5, 12),
        height_cm: 172,
        weight_kg: 70,
        vision_right: VisualAcuity::V6_6,
        vision_left: VisualAcuity::V6_9,
        color_blind: false,
        hearing_normal: true,
        deformity: None,
        fit_to_drive: true,
    })
}

/// One sample request per kind.
pub fn all_sample_requests() -> Vec<CertificateRequest> {
    vec![
        sample_general_medical(),
        sample_fitness(),
        sample_sick_leave(),
        sample_driving_fitness(),
    ]
}

/// A complete CLI input document for the given certificate.
pub fn sample_render_request(certificate: CertificateRequest) -> RenderRequest {
    RenderRequest {
        organization: sample_organization(),
        practitioner: sample_practitioner(),
        certificate,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_roundtrip_through_json() {
        for certificate in all_sample_requests() {
            let request = sample_render_request(certificate);
            let json = serde_json::to_string_pretty(&request).unwrap();
            let back: RenderRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(
                back.certificate.kind(),
                request.certificate.kind(),
                "kind survives the roundtrip"
            );
        }
    }
}
