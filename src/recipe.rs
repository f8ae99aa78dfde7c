//! Recipes – the per-kind layout programs.
//!
//! A recipe is an ordered list of [`Section`] descriptors plus the
//! [`FieldMap`] its paragraph templates render against. All four
//! certificate kinds share one skeleton (header, centred title, dated body
//! paragraphs, signature block, pinned footer); they differ only in which
//! fields feed the body and in a few conditional clauses.

use chrono::{DateTime, Local, NaiveDate};

use crate::model::{
    inclusive_days, CertificateRequest, DrivingFitnessRequest, FitnessRequest,
    GeneralMedicalRequest, PractitionerProfile, SickLeaveRequest,
};
use crate::template::{FieldMap, Template};

/// Horizontal alignment of a paragraph or signature block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual style of one paragraph.
#[derive(Debug, Clone, Copy)]
pub struct ParaStyle {
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub align: HAlign,
    /// Left indent in points (left-aligned text only).
    pub indent: f32,
    /// Vertical gap after the paragraph, in points.
    pub space_after: f32,
}

impl ParaStyle {
    /// Regular 11 pt body text.
    pub fn body() -> Self {
        Self {
            size: 11.0,
            bold: false,
            italic: false,
            align: HAlign::Left,
            indent: 0.0,
            space_after: 8.0,
        }
    }

    /// Bold section heading (e.g. `APPLICANT DETAILS:`).
    pub fn heading() -> Self {
        Self {
            size: 12.0,
            bold: true,
            space_after: 4.0,
            ..Self::body()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn indent(mut self, pt: f32) -> Self {
        self.indent = pt;
        self
    }

    pub fn spaced(mut self, after: f32) -> Self {
        self.space_after = after;
        self
    }
}

/// One layout instruction. `Header`, `Signature`, and `Footer` are expanded
/// by the layout stage from the profiles and fixed wording.
#[derive(Debug, Clone)]
pub enum Section {
    /// Organization block: name, address, contact line, optional
    /// registration line, horizontal rule.
    Header,
    /// Centred bold title line.
    Title { text: &'static str, size: f32 },
    Paragraph { template: Template, style: ParaStyle },
    Spacer(f32),
    /// Practitioner block: `Dr. {name}`, qualification, optional
    /// registration number and specialty, optional trailer line.
    Signature {
        align: HAlign,
        trailer: Option<&'static str>,
    },
    /// Italic disclaimer lines pinned to the bottom of every page.
    Footer { lines: &'static [&'static str] },
}

/// A certificate layout program ready for the layout stage.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub sections: Vec<Section>,
    pub fields: FieldMap,
}

const DISCLAIMER: &[&str] =
    &["This is a computer-generated certificate and requires doctor's signature and official seal to be valid."];

const FORM_1A_FOOTER: &[&str] = &[
    "This certificate is valid only with doctor's signature and official stamp/seal.",
    "Note: This certificate should be submitted to the RTO along with other required documents.",
];

/// Certificate number printed on the fitness certificate, derived from the
/// generation timestamp to the second.
pub fn fitness_certificate_number(generated_at: DateTime<Local>) -> String {
    format!("FC/{}", generated_at.format("%Y%m%d%H%M%S"))
}

/// Build the recipe for `request`.
pub fn build_recipe(
    practitioner: &PractitionerProfile,
    request: &CertificateRequest,
    generated_at: DateTime<Local>,
) -> Recipe {
    let mut fields = FieldMap::new();
    fields.set("practitioner_name", practitioner.name.trim());
    fields.set("qualification", practitioner.qualification.trim());
    fields.set_opt("practitioner_reg", practitioner.registration_no.clone());
    fields.set("generated_date", generated_at.format("%d/%m/%Y").to_string());

    let sections = match request {
        CertificateRequest::GeneralMedical(r) => general_medical(r, &mut fields),
        CertificateRequest::Fitness(r) => fitness(r, &mut fields, generated_at),
        CertificateRequest::SickLeave(r) => sick_leave(r, &mut fields),
        CertificateRequest::DrivingFitness(r) => driving_fitness(r, &mut fields),
    };

    Recipe { sections, fields }
}

fn general_medical(r: &GeneralMedicalRequest, fields: &mut FieldMap) -> Vec<Section> {
    fields.set("patient_name", r.patient_name.trim());
    fields.set("age", r.age.to_string());
    fields.set("gender", r.gender.to_string());
    fields.set_opt("designation", r.designation.clone());
    fields.set_opt("organization", r.organization.clone());
    fields.set("exam_date", fmt_date(r.examined_on));
    fields.set("diagnosis", r.diagnosis.trim());
    fields.set("leave_from", fmt_date(r.leave_from));
    fields.set("leave_to", fmt_date(r.leave_to));
    fields.set("leave_days", inclusive_days(r.leave_from, r.leave_to).to_string());
    fields.set_opt("recommendations", r.recommendations.clone());

    let mut sections = vec![
        Section::Header,
        Section::Title {
            text: "MEDICAL CERTIFICATE",
            size: 16.0,
        },
        Section::Spacer(5.0),
        line(Template::new().lit("Date: ").field("exam_date")),
        paragraph(
            Template::new()
                .lit("This is to certify that I, ")
                .field("practitioner_name")
                .lit(", ")
                .field("qualification")
                .opt("practitioner_reg", ", Registration No: ")
                .lit(", have examined ")
                .field("patient_name")
                .lit(", ")
                .field("gender")
                .lit(", Age: ")
                .field("age")
                .lit(" years, ")
                .field_or("designation", "Patient")
                .opt("organization", " of ")
                .lit(" on ")
                .field("exam_date")
                .lit("."),
        ),
        paragraph(
            Template::new()
                .lit("After careful examination, I hereby certify that the patient is suffering from ")
                .field("diagnosis")
                .lit("."),
        ),
        paragraph(
            Template::new()
                .lit("I consider that a period of absence from duty from ")
                .field("leave_from")
                .lit(" to ")
                .field("leave_to")
                .lit(" (")
                .field("leave_days")
                .lit(" day(s)) is absolutely necessary for the restoration of his/her health."),
        ),
        paragraph(Template::new().opt("recommendations", "Additional Recommendations: ")),
        Section::Spacer(12.0),
    ];
    push_place_date(&mut sections);
    sections.push(Section::Spacer(10.0));
    sections.push(Section::Signature {
        align: HAlign::Right,
        trailer: None,
    });
    sections.push(Section::Footer { lines: DISCLAIMER });
    sections
}

fn fitness(
    r: &FitnessRequest,
    fields: &mut FieldMap,
    generated_at: DateTime<Local>,
) -> Vec<Section> {
    fields.set("applicant_name", r.applicant_name.trim());
    fields.set("age", r.age.to_string());
    fields.set("gender", r.gender.to_string());
    fields.set_opt("designation", r.designation.clone());
    fields.set_opt("organization", r.organization.clone());
    fields.set("exam_date", fmt_date(r.examined_on));
    fields.set("purpose", r.purpose.to_string());
    fields.set_opt("medical_history", r.medical_history.clone());
    fields.set_opt("remarks", r.remarks.clone());
    fields.set("certificate_no", fitness_certificate_number(generated_at));

    let mut sections = vec![
        Section::Header,
        Section::Title {
            text: "FITNESS CERTIFICATE",
            size: 16.0,
        },
        Section::Spacer(5.0),
        line(Template::new().lit("Date: ").field("exam_date")),
        line(Template::new().lit("Certificate No: ").field("certificate_no")),
        paragraph(
            Template::new()
                .lit("This is to certify that I, ")
                .field("practitioner_name")
                .lit(", ")
                .field("qualification")
                .opt("practitioner_reg", ", Registration No: ")
                .lit(", have carefully examined ")
                .field("applicant_name")
                .lit(", ")
                .field("gender")
                .lit(", Age: ")
                .field("age")
                .lit(" years, ")
                .field_or("designation", "Applicant")
                .opt("organization", " of ")
                .lit(" on ")
                .field("exam_date")
                .lit("."),
        ),
        paragraph(Template::new().lit("Purpose: ").field("purpose")),
        paragraph(Template::new().opt("medical_history", "Previous Medical History: ")),
        Section::Paragraph {
            template: Template::literal("CERTIFICATION:"),
            style: ParaStyle::body().bold().spaced(4.0),
        },
        paragraph(Template::new().opt("remarks", "")),
        Section::Paragraph {
            template: Template::literal(
                "The applicant is MEDICALLY FIT for the above-mentioned purpose.",
            ),
            style: ParaStyle::body().bold(),
        },
        Section::Spacer(12.0),
    ];
    push_place_date(&mut sections);
    sections.push(Section::Spacer(10.0));
    sections.push(Section::Signature {
        align: HAlign::Right,
        trailer: None,
    });
    sections.push(Section::Footer { lines: DISCLAIMER });
    sections
}

fn sick_leave(r: &SickLeaveRequest, fields: &mut FieldMap) -> Vec<Section> {
    fields.set("employee_name", r.employee_name.trim());
    fields.set_opt("employee_id", r.employee_id.clone());
    fields.set_opt("department", r.department.clone());
    fields.set("company", r.company.trim());
    fields.set("exam_date", fmt_date(r.examined_on));
    fields.set("illness", r.illness.trim());
    fields.set("leave_from", fmt_date(r.leave_from));
    fields.set("leave_to", fmt_date(r.leave_to));
    fields.set("leave_days", inclusive_days(r.leave_from, r.leave_to).to_string());
    fields.set_opt("follow_up", r.follow_up.map(fmt_date));

    let mut sections = vec![
        Section::Header,
        Section::Title {
            text: "SICK LEAVE CERTIFICATE",
            size: 16.0,
        },
        Section::Spacer(5.0),
        line(Template::new().lit("Date: ").field("exam_date")),
        tight(Template::literal("To,")),
        tight(Template::literal("The HR Manager / Concerned Authority")),
        line(Template::new().field("company")),
        line(Template::literal("Subject: Medical Certificate for Sick Leave")),
        line(Template::literal("Dear Sir/Madam,")),
        paragraph(
            Template::new()
                .lit("This is to certify that ")
                .field("employee_name")
                .opt("employee_id", ", Employee ID: ")
                .opt("department", ", ")
                .lit(" has been under my medical care."),
        ),
        paragraph(
            Template::new()
                .lit("After thorough examination on ")
                .field("exam_date")
                .lit(", I have diagnosed the patient with ")
                .field("illness")
                .lit("."),
        ),
        paragraph(
            Template::new()
                .lit("Due to this medical condition, I recommend sick leave from ")
                .field("leave_from")
                .lit(" to ")
                .field("leave_to")
                .lit(" (")
                .field("leave_days")
                .lit(" day(s))."),
        ),
    ];
    if r.bed_rest {
        sections.push(paragraph(Template::literal(
            "Complete bed rest and avoiding strenuous activities is advised during this period.",
        )));
    }
    sections.push(paragraph(
        Template::new().opt("follow_up", "Follow-up consultation is scheduled for: "),
    ));
    sections.push(paragraph(Template::literal(
        "I request you to kindly grant the necessary leave for the recovery and restoration of health.",
    )));
    sections.push(Section::Spacer(6.0));
    sections.push(line(Template::literal("Thanking you,")));
    sections.push(Section::Spacer(14.0));
    sections.push(Section::Signature {
        align: HAlign::Left,
        trailer: None,
    });
    sections.push(Section::Spacer(6.0));
    sections.push(Section::Paragraph {
        template: Template::new().lit("Date: ").field("generated_date"),
        style: ParaStyle::body().size(9.0).spaced(2.0),
    });
    sections.push(Section::Paragraph {
        template: Template::literal("Place: _________________"),
        style: ParaStyle::body().size(9.0).spaced(2.0),
    });
    sections.push(Section::Footer { lines: DISCLAIMER });
    sections
}

fn driving_fitness(r: &DrivingFitnessRequest, fields: &mut FieldMap) -> Vec<Section> {
    fields.set("applicant_name", r.applicant_name.trim());
    fields.set("age", r.age.to_string());
    fields.set("gender", r.gender.to_string());
    fields.set("address", r.address.trim());
    fields.set("license_type", r.license_type.to_string());
    fields.set("exam_date", fmt_date(r.examined_on));
    fields.set("height", r.height_cm.to_string());
    fields.set("weight", r.weight_kg.to_string());
    fields.set("vision_right", r.vision_right.to_string());
    fields.set("vision_left", r.vision_left.to_string());
    fields.set("color_blind", if r.color_blind { "Yes" } else { "No" });
    fields.set(
        "hearing",
        if r.hearing_normal { "Normal" } else { "Impaired" },
    );
    fields.set_opt("deformity", r.deformity.clone());

    let detail = || ParaStyle::body().spaced(2.0);

    let mut sections = vec![
        Section::Header,
        Section::Title {
            text: "FORM 1A",
            size: 16.0,
        },
        Section::Title {
            text: "Medical Certificate for Driving License",
            size: 14.0,
        },
        Section::Spacer(5.0),
        line(Template::new().lit("Date of Examination: ").field("exam_date")),
        heading("APPLICANT DETAILS:"),
        Section::Paragraph {
            template: Template::new().lit("Name: ").field("applicant_name"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new().lit("Age: ").field("age").lit(" years"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new().lit("Gender: ").field("gender"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new().lit("Address: ").field("address"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new().lit("License Type Applied: ").field("license_type"),
            style: detail().spaced(8.0),
        },
        heading("MEDICAL EXAMINATION REPORT:"),
        Section::Paragraph {
            template: Template::new().lit("Height: ").field("height").lit(" cm"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new().lit("Weight: ").field("weight").lit(" kg"),
            style: detail().spaced(4.0),
        },
        Section::Paragraph {
            template: Template::literal("Vision Test:"),
            style: ParaStyle::body().bold().spaced(2.0),
        },
        Section::Paragraph {
            template: Template::new().lit("Right Eye: ").field("vision_right"),
            style: detail().indent(12.0),
        },
        Section::Paragraph {
            template: Template::new().lit("Left Eye: ").field("vision_left"),
            style: detail().indent(12.0),
        },
        Section::Paragraph {
            template: Template::new().lit("Color Blindness: ").field("color_blind"),
            style: detail().indent(12.0).spaced(4.0),
        },
        Section::Paragraph {
            template: Template::new().lit("Hearing: ").field("hearing"),
            style: detail(),
        },
        Section::Paragraph {
            template: Template::new()
                .lit("Physical Deformity: ")
                .field_or("deformity", "None"),
            style: detail().spaced(8.0),
        },
        heading("CERTIFICATION:"),
    ];

    let attestation = Template::new()
        .lit("I, ")
        .field("practitioner_name")
        .lit(", ")
        .field("qualification")
        .opt("practitioner_reg", ", Registration No: ")
        .lit(", hereby certify that I have personally examined the above-named applicant and find him/her ");
    sections.push(paragraph(if r.fit_to_drive {
        attestation
            .lit("MEDICALLY FIT to drive a ")
            .field("license_type")
            .lit(".")
    } else {
        attestation.lit("NOT FIT to drive at this time due to medical reasons.")
    }));
    sections.push(paragraph(Template::literal(
        "The applicant has been examined for any physical or mental disability that may interfere with safe driving.",
    )));
    sections.push(Section::Spacer(12.0));
    push_place_date(&mut sections);
    sections.push(Section::Spacer(10.0));
    sections.push(Section::Signature {
        align: HAlign::Right,
        trailer: Some("(Signature & Seal)"),
    });
    sections.push(Section::Footer {
        lines: FORM_1A_FOOTER,
    });
    sections
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn paragraph(template: Template) -> Section {
    Section::Paragraph {
        template,
        style: ParaStyle::body(),
    }
}

/// Body paragraph with tighter spacing, for short single lines.
fn line(template: Template) -> Section {
    Section::Paragraph {
        template,
        style: ParaStyle::body().spaced(4.0),
    }
}

fn tight(template: Template) -> Section {
    Section::Paragraph {
        template,
        style: ParaStyle::body().spaced(1.0),
    }
}

fn heading(text: &'static str) -> Section {
    Section::Paragraph {
        template: Template::literal(text),
        style: ParaStyle::heading(),
    }
}

fn push_place_date(sections: &mut Vec<Section>) {
    sections.push(line(Template::literal("Place: _________________")));
    sections.push(line(Template::new().lit("Date: ").field("generated_date")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 10, 14, 30, 5).unwrap()
    }

    fn rendered_body(request: &CertificateRequest) -> String {
        let recipe = build_recipe(&samples::sample_practitioner(), request, at());
        let mut out = String::new();
        for section in &recipe.sections {
            if let Section::Paragraph { template, .. } = section {
                out.push_str(&template.render(&recipe.fields));
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn every_recipe_has_skeleton_sections() {
        let practitioner = samples::sample_practitioner();
        for request in samples::all_sample_requests() {
            let recipe = build_recipe(&practitioner, &request, at());
            assert!(matches!(recipe.sections.first(), Some(Section::Header)));
            assert!(matches!(recipe.sections.last(), Some(Section::Footer { .. })));
            assert!(recipe
                .sections
                .iter()
                .any(|s| matches!(s, Section::Title { .. })));
            assert!(recipe
                .sections
                .iter()
                .any(|s| matches!(s, Section::Signature { .. })));
        }
    }

    #[test]
    fn medical_body_counts_inclusive_days() {
        let body = rendered_body(&samples::sample_general_medical());
        assert!(body.contains("from 01/05/2024 to 03/05/2024 (3 day(s))"), "{body}");
    }

    #[test]
    fn certificate_number_derives_from_timestamp() {
        assert_eq!(fitness_certificate_number(at()), "FC/20240610143005");
        let body = rendered_body(&samples::sample_fitness());
        assert!(body.contains("Certificate No: FC/20240610143005"));
    }

    #[test]
    fn unfit_driver_gets_not_fit_sentence() {
        let mut request = samples::sample_driving_fitness();
        if let CertificateRequest::DrivingFitness(r) = &mut request {
            r.fit_to_drive = false;
        }
        let body = rendered_body(&request);
        assert!(body.contains("NOT FIT to drive"));
        assert!(!body.contains("MEDICALLY FIT to drive"));
    }

    #[test]
    fn follow_up_sentence_is_all_or_nothing() {
        let mut request = samples::sample_sick_leave();
        let with = rendered_body(&request);
        assert!(with.contains("Follow-up consultation is scheduled for: "));

        if let CertificateRequest::SickLeave(r) = &mut request {
            r.follow_up = None;
        }
        let without = rendered_body(&request);
        assert!(!without.contains("Follow-up"));
    }
}
