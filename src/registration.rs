use log::debug;
use thiserror::Error;

use crate::config::i18n::{ I18n, RegistrationText };
use crate::models::language::Language;
use crate::models::registration::RegistrationData;

pub const INDIAN_STATES: [&str; 28] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

pub const INCOME_RANGES: [&str; 4] = ["below-2lakh", "2-5lakh", "5-8lakh", "above-8lakh"];

pub const SOCIAL_CATEGORIES: [&str; 4] = ["general", "obc", "sc", "st"];

const MOBILE_LEN: usize = 10;
const AADHAR_LEN: usize = 12;

/// First rule a registration record breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a required field is empty")]
    Required,
    #[error("mobile number must be exactly 10 characters")]
    InvalidMobile,
    #[error("Aadhar number must be exactly 12 characters")]
    InvalidAadhar,
}

impl ValidationError {
    pub fn message<'a>(&self, i18n: &'a I18n, language: Language) -> &'a str {
        let text = &i18n.t(language).validation;
        match self {
            ValidationError::Required => &text.required,
            ValidationError::InvalidMobile => &text.invalid_mobile,
            ValidationError::InvalidAadhar => &text.invalid_aadhar,
        }
    }
}

/// Presence of name, mobile, aadhar and address, then the exact lengths of
/// mobile and aadhar, in that order. Lengths count characters; values are
/// neither trimmed nor checked for digits.
pub fn validate(data: &RegistrationData) -> Result<(), ValidationError> {
    if
        data.name.is_empty() ||
        data.mobile.is_empty() ||
        data.aadhar.is_empty() ||
        data.address.is_empty()
    {
        return Err(ValidationError::Required);
    }
    if data.mobile.chars().count() != MOBILE_LEN {
        return Err(ValidationError::InvalidMobile);
    }
    if data.aadhar.chars().count() != AADHAR_LEN {
        return Err(ValidationError::InvalidAadhar);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("'{value}' is not one of the {field} options")]
    UnknownOption {
        field: &'static str,
        value: String,
    },
    #[error("all fields have been answered")]
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Mobile,
    Email,
    Aadhar,
    Address,
    State,
    District,
    Income,
    Category,
}

impl Field {
    pub const ORDER: [Field; 9] = [
        Field::Name,
        Field::Mobile,
        Field::Email,
        Field::Aadhar,
        Field::Address,
        Field::State,
        Field::District,
        Field::Income,
        Field::Category,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Mobile => "mobile",
            Field::Email => "email",
            Field::Aadhar => "aadhar",
            Field::Address => "address",
            Field::State => "state",
            Field::District => "district",
            Field::Income => "income",
            Field::Category => "category",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Field::Name | Field::Mobile | Field::Aadhar | Field::Address)
    }

    pub fn label<'a>(&self, text: &'a RegistrationText) -> &'a str {
        match self {
            Field::Name => &text.name,
            Field::Mobile => &text.mobile,
            Field::Email => &text.email,
            Field::Aadhar => &text.aadhar,
            Field::Address => &text.address,
            Field::State => &text.state,
            Field::District => &text.district,
            Field::Income => &text.income,
            Field::Category => &text.category,
        }
    }

    pub fn placeholder<'a>(&self, text: &'a RegistrationText) -> &'a str {
        match self {
            Field::Name => &text.name_placeholder,
            Field::Mobile => &text.mobile_placeholder,
            Field::Email => &text.email_placeholder,
            Field::Aadhar => &text.aadhar_placeholder,
            Field::Address => &text.address_placeholder,
            Field::State => &text.state_placeholder,
            Field::District => &text.district_placeholder,
            Field::Income => &text.income_placeholder,
            Field::Category => &text.category_placeholder,
        }
    }

    /// `(value, label)` pairs for select fields, `None` for free text.
    pub fn options(&self, text: &RegistrationText) -> Option<Vec<(String, String)>> {
        let pairs = match self {
            Field::State =>
                INDIAN_STATES.iter()
                    .map(|s| (s.to_string(), s.to_string()))
                    .collect(),
            Field::Income => localized_options(&INCOME_RANGES, |v| text.income_ranges.get(v)),
            Field::Category => localized_options(&SOCIAL_CATEGORIES, |v| text.categories.get(v)),
            _ => {
                return None;
            }
        };
        Some(pairs)
    }

    pub fn value<'a>(&self, data: &'a RegistrationData) -> &'a str {
        match self {
            Field::Name => &data.name,
            Field::Mobile => &data.mobile,
            Field::Email => &data.email,
            Field::Aadhar => &data.aadhar,
            Field::Address => &data.address,
            Field::State => &data.state,
            Field::District => &data.district,
            Field::Income => &data.income,
            Field::Category => &data.category,
        }
    }

    fn slot<'a>(&self, data: &'a mut RegistrationData) -> &'a mut String {
        match self {
            Field::Name => &mut data.name,
            Field::Mobile => &mut data.mobile,
            Field::Email => &mut data.email,
            Field::Aadhar => &mut data.aadhar,
            Field::Address => &mut data.address,
            Field::State => &mut data.state,
            Field::District => &mut data.district,
            Field::Income => &mut data.income,
            Field::Category => &mut data.category,
        }
    }
}

fn localized_options<'a, F>(values: &[&str], label: F) -> Vec<(String, String)>
    where F: Fn(&str) -> Option<&'a String>
{
    values
        .iter()
        .map(|&v| {
            let shown = label(v).cloned().unwrap_or_else(|| v.to_string());
            (v.to_string(), shown)
        })
        .collect()
}

/// Accepts a 1-based index, an option value or a label (case-insensitive).
fn resolve_option(options: &[(String, String)], input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        if n >= 1 && n <= options.len() {
            return Some(options[n - 1].0.clone());
        }
    }
    let wanted = input.to_lowercase();
    options
        .iter()
        .find(|(value, label)| value.to_lowercase() == wanted || label.to_lowercase() == wanted)
        .map(|(value, _)| value.clone())
}

/// Field-by-field capture of a [`RegistrationData`] record.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    data: RegistrationData,
    cursor: usize,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &RegistrationData {
        &self.data
    }

    /// The field waiting for input, or `None` once every field was visited.
    pub fn current_field(&self) -> Option<Field> {
        Field::ORDER.get(self.cursor).copied()
    }

    pub fn set(
        &mut self,
        field: Field,
        input: &str,
        text: &RegistrationText
    ) -> Result<(), FieldError> {
        let value = match field.options(text) {
            Some(options) if !input.trim().is_empty() =>
                resolve_option(&options, input).ok_or_else(|| FieldError::UnknownOption {
                    field: field.key(),
                    value: input.to_string(),
                })?,
            Some(_) => String::new(),
            None => input.to_string(),
        };
        debug!("Registration field '{}' set", field.key());
        *field.slot(&mut self.data) = value;
        Ok(())
    }

    /// Stores `input` in the current field and moves on. An empty answer keeps
    /// whatever the field already holds.
    pub fn answer(&mut self, input: &str, text: &RegistrationText) -> Result<Option<Field>, FieldError> {
        let field = self.current_field().ok_or(FieldError::Complete)?;
        if !input.trim().is_empty() {
            self.set(field, input, text)?;
        }
        self.cursor += 1;
        Ok(self.current_field())
    }

    pub fn is_complete(&self) -> bool {
        self.current_field().is_none()
    }

    /// Starts over at the first field, keeping earlier answers as defaults.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn submit(&self) -> Result<RegistrationData, ValidationError> {
        validate(&self.data)?;
        Ok(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::i18n::builtin_i18n;

    fn record(name: &str, mobile: &str, aadhar: &str, address: &str) -> RegistrationData {
        RegistrationData {
            name: name.into(),
            mobile: mobile.into(),
            aadhar: aadhar.into(),
            address: address.into(),
            ..Default::default()
        }
    }

    #[test]
    fn required_is_checked_first() {
        let data = record("", "9999999999", "123456789012", "x");
        assert_eq!(validate(&data), Err(ValidationError::Required));
        // a bad mobile does not mask a missing address
        let data = record("A", "123", "123456789012", "");
        assert_eq!(validate(&data), Err(ValidationError::Required));
    }

    #[test]
    fn short_mobile_is_invalid_mobile() {
        let data = record("A", "12345", "123456789012", "x");
        assert_eq!(validate(&data), Err(ValidationError::InvalidMobile));
    }

    #[test]
    fn aadhar_length_checked_after_mobile() {
        assert_eq!(
            validate(&record("A", "9999999999", "1234", "x")),
            Err(ValidationError::InvalidAadhar)
        );
        assert_eq!(validate(&record("A", "99999", "1234", "x")), Err(ValidationError::InvalidMobile));
    }

    #[test]
    fn optional_fields_and_content_are_not_checked() {
        assert_eq!(validate(&record("A", "abcdefghij", "abcdefghijkl", "x")), Ok(()));
        // surrounding spaces count towards the length
        assert_eq!(validate(&record("A", " 999999999", "123456789012", "x")), Ok(()));
        assert_eq!(
            validate(&record("A", "9999999999 ", "123456789012", "x")),
            Err(ValidationError::InvalidMobile)
        );
    }

    #[test]
    fn messages_are_localized() {
        let i18n = builtin_i18n().unwrap();
        assert_eq!(
            ValidationError::InvalidMobile.message(&i18n, Language::En),
            "Please enter a valid 10-digit mobile number"
        );
        assert_eq!(ValidationError::Required.message(&i18n, Language::Hi), "यह फ़ील्ड आवश्यक है");
    }

    #[test]
    fn form_walks_fields_in_order() {
        let i18n = builtin_i18n().unwrap();
        let text = &i18n.t(Language::En).registration;
        let mut form = RegistrationForm::new();
        let answers = [
            "Asha",
            "9876543210",
            "",
            "123412341234",
            "12 MG Road",
            "kerala",
            "Kochi",
            "1",
            "OBC",
        ];
        for answer in answers {
            form.answer(answer, text).unwrap();
        }
        assert!(form.is_complete());
        assert_eq!(form.answer("extra", text), Err(FieldError::Complete));

        let data = form.submit().unwrap();
        assert_eq!(data.state, "Kerala");
        assert_eq!(data.income, "below-2lakh");
        assert_eq!(data.category, "obc");
        assert_eq!(data.email, "");
    }

    #[test]
    fn select_fields_reject_unknown_options() {
        let i18n = builtin_i18n().unwrap();
        let text = &i18n.t(Language::Hi).registration;
        let mut form = RegistrationForm::new();
        let err = form.set(Field::State, "Atlantis", text).unwrap_err();
        assert!(matches!(err, FieldError::UnknownOption { field: "state", .. }));
        form.set(Field::Category, "एससी", text).unwrap();
        assert_eq!(form.data().category, "sc");
        form.set(Field::Income, "5", text).unwrap_err();
    }

    #[test]
    fn rewind_keeps_earlier_answers() {
        let i18n = builtin_i18n().unwrap();
        let text = &i18n.t(Language::En).registration;
        let mut form = RegistrationForm::new();
        form.answer("Asha", text).unwrap();
        form.answer("12345", text).unwrap();
        form.rewind();
        assert_eq!(form.current_field(), Some(Field::Name));
        form.answer("  ", text).unwrap();
        form.answer("9876543210", text).unwrap();
        assert_eq!(form.data().name, "Asha");
        assert_eq!(form.data().mobile, "9876543210");
    }

    #[test]
    fn submit_reports_first_violation() {
        let i18n = builtin_i18n().unwrap();
        let text = &i18n.t(Language::En).registration;
        let mut form = RegistrationForm::new();
        form.set(Field::Name, "A", text).unwrap();
        assert_eq!(form.submit(), Err(ValidationError::Required));
    }

    #[test]
    fn option_lists() {
        let i18n = builtin_i18n().unwrap();
        let text = &i18n.t(Language::En).registration;
        assert_eq!(Field::State.options(text).unwrap().len(), 28);
        let income = Field::Income.options(text).unwrap();
        assert_eq!(income[3], ("above-8lakh".to_string(), "Above ₹8 Lakh".to_string()));
        assert!(Field::Name.options(text).is_none());
        assert!(Field::Aadhar.is_required() && !Field::Email.is_required());
    }
}
