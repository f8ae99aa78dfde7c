//! Paragraph templates – a small mini-language for certificate body text.
//!
//! A [`Template`] is an ordered list of fragments: literal text, field
//! references, fields with a fallback, and conditional clauses that vanish
//! entirely when their field is absent. Rendering happens against a
//! [`FieldMap`], so optional-field edge cases (no stray separators, no
//! `Label:` with an empty value) are handled in one place instead of at
//! every call site.

use std::collections::BTreeMap;

/// Field values available to a template, keyed by field name.
///
/// Empty or whitespace-only values are never stored, so "absent" and
/// "blank" behave identically in conditionals.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    values: BTreeMap<&'static str, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; blank values are dropped.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.values.insert(name, value);
        }
    }

    /// Insert an optional value; `None` and blank values are dropped.
    pub fn set_opt(&mut self, name: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
enum Fragment {
    Lit(String),
    /// Field value; renders as empty when absent (validation keeps required
    /// fields present).
    Field(&'static str),
    /// Field value, or the fallback text when absent.
    FieldOr(&'static str, String),
    /// `prefix + value + suffix`, or nothing at all when the field is absent.
    Opt {
        field: &'static str,
        prefix: String,
        suffix: String,
    },
}

/// A paragraph template; build with the fluent methods, then [`render`].
///
/// [`render`]: Template::render
#[derive(Debug, Clone, Default)]
pub struct Template {
    fragments: Vec<Fragment>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a template that is a single literal.
    pub fn literal(text: &str) -> Self {
        Self::new().lit(text)
    }

    pub fn lit(mut self, text: &str) -> Self {
        self.fragments.push(Fragment::Lit(text.to_string()));
        self
    }

    pub fn field(mut self, name: &'static str) -> Self {
        self.fragments.push(Fragment::Field(name));
        self
    }

    pub fn field_or(mut self, name: &'static str, fallback: &str) -> Self {
        self.fragments
            .push(Fragment::FieldOr(name, fallback.to_string()));
        self
    }

    /// Conditional clause: `prefix + value` when the field is present,
    /// nothing otherwise.
    pub fn opt(self, name: &'static str, prefix: &str) -> Self {
        self.opt_wrapped(name, prefix, "")
    }

    /// Conditional clause with both prefix and suffix text.
    pub fn opt_wrapped(mut self, name: &'static str, prefix: &str, suffix: &str) -> Self {
        self.fragments.push(Fragment::Opt {
            field: name,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        });
        self
    }

    /// Render against `fields`. A template made only of absent conditionals
    /// renders to an empty string, which the layout stage skips entirely.
    pub fn render(&self, fields: &FieldMap) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Lit(text) => out.push_str(text),
                Fragment::Field(name) => {
                    if let Some(value) = fields.get(name) {
                        out.push_str(value);
                    }
                }
                Fragment::FieldOr(name, fallback) => {
                    out.push_str(fields.get(name).unwrap_or(fallback));
                }
                Fragment::Opt {
                    field,
                    prefix,
                    suffix,
                } => {
                    if let Some(value) = fields.get(field) {
                        out.push_str(prefix);
                        out.push_str(value);
                        out.push_str(suffix);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldMap {
        let mut f = FieldMap::new();
        f.set("name", "Asha Rao");
        f.set("reg_no", "MCI12345");
        f
    }

    #[test]
    fn literal_and_field_interpolation() {
        let t = Template::new().lit("Patient: ").field("name");
        assert_eq!(t.render(&fields()), "Patient: Asha Rao");
    }

    #[test]
    fn conditional_clause_vanishes_when_absent() {
        let t = Template::new()
            .field("name")
            .opt("reg_no", ", Registration No: ")
            .lit(".");
        assert_eq!(t.render(&fields()), "Asha Rao, Registration No: MCI12345.");

        let mut without = FieldMap::new();
        without.set("name", "Asha Rao");
        assert_eq!(t.render(&without), "Asha Rao.");
    }

    #[test]
    fn blank_values_behave_as_absent() {
        let mut f = FieldMap::new();
        f.set("dept", "   ");
        let t = Template::new().opt("dept", ", ");
        assert_eq!(t.render(&f), "");
    }

    #[test]
    fn field_fallback() {
        let t = Template::new().field_or("designation", "Patient");
        assert_eq!(t.render(&FieldMap::new()), "Patient");
        let mut f = FieldMap::new();
        f.set("designation", "Engineer");
        assert_eq!(t.render(&f), "Engineer");
    }

    #[test]
    fn all_optional_template_renders_empty() {
        let t = Template::new().opt("follow_up", "Follow-up consultation is scheduled for: ");
        assert_eq!(t.render(&FieldMap::new()), "");
    }
}
