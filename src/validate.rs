//! Request validation.
//!
//! The input collector is contractually required to hand over validated
//! records, but the renderer re-checks everything it depends on and fails
//! with a [`ValidationError`] rather than producing a broken certificate
//! (e.g. one with a negative leave-day count).

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::model::{CertificateRequest, PractitionerProfile};

/// Validate the practitioner profile and the request for its kind.
pub fn validate(
    practitioner: &PractitionerProfile,
    request: &CertificateRequest,
) -> Result<(), ValidationError> {
    require(&practitioner.name, "practitioner.name")?;
    require(&practitioner.qualification, "practitioner.qualification")?;

    match request {
        CertificateRequest::GeneralMedical(r) => {
            require(&r.patient_name, "patient_name")?;
            require(&r.diagnosis, "diagnosis")?;
            require_ordered(r.leave_from, r.leave_to)?;
        }
        CertificateRequest::Fitness(r) => {
            require(&r.applicant_name, "applicant_name")?;
        }
        CertificateRequest::SickLeave(r) => {
            require(&r.employee_name, "employee_name")?;
            require(&r.company, "company")?;
            require(&r.illness, "illness")?;
            require_ordered(r.leave_from, r.leave_to)?;
        }
        CertificateRequest::DrivingFitness(r) => {
            require(&r.applicant_name, "applicant_name")?;
            require(&r.address, "address")?;
        }
    }
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn require_ordered(from: NaiveDate, to: NaiveDate) -> Result<(), ValidationError> {
    if from > to {
        Err(ValidationError::InvertedDateRange { from, to })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;

    #[test]
    fn sample_requests_are_valid() {
        let practitioner = samples::sample_practitioner();
        for request in samples::all_sample_requests() {
            assert!(
                validate(&practitioner, &request).is_ok(),
                "sample for {:?} should validate",
                request.kind()
            );
        }
    }

    #[test]
    fn blank_patient_name_is_rejected() {
        let practitioner = samples::sample_practitioner();
        let mut request = samples::sample_general_medical();
        if let CertificateRequest::GeneralMedical(r) = &mut request {
            r.patient_name = "   ".to_string();
        }
        assert_eq!(
            validate(&practitioner, &request),
            Err(ValidationError::MissingField("patient_name"))
        );
    }

    #[test]
    fn missing_practitioner_qualification_is_rejected() {
        let mut practitioner = samples::sample_practitioner();
        practitioner.qualification.clear();
        let request = samples::sample_fitness();
        assert_eq!(
            validate(&practitioner, &request),
            Err(ValidationError::MissingField("practitioner.qualification"))
        );
    }

    #[test]
    fn inverted_leave_range_is_rejected() {
        let practitioner = samples::sample_practitioner();
        let mut request = samples::sample_sick_leave();
        if let CertificateRequest::SickLeave(r) = &mut request {
            std::mem::swap(&mut r.leave_from, &mut r.leave_to);
        }
        assert!(matches!(
            validate(&practitioner, &request),
            Err(ValidationError::InvertedDateRange { .. })
        ));
    }
}
