pub mod prompt;

pub use prompt::{prompt, prompt_with_default, prompt_yes_no, run_intake};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::Language;

/// Who is taking the quiz. Every field is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub country: String,
    pub city: String,
}

/// Raw, unvalidated form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityForm {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub country: String,
    pub city: String,
}

impl From<&Identity> for IdentityForm {
    fn from(identity: &Identity) -> Self {
        Self {
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            mobile_number: identity.mobile_number.clone(),
            country: identity.country.clone(),
            city: identity.city.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    MobileNumber,
    Country,
    City,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::MobileNumber,
        Field::Country,
        Field::City,
    ];

    pub fn label(self, lang: Language) -> &'static str {
        match self {
            Field::FirstName => lang.pick("Name", "نام"),
            Field::LastName => lang.pick("Last Name", "نام خانوادگی"),
            Field::MobileNumber => lang.pick("Mobile Number", "شماره موبایل"),
            Field::Country => lang.pick("Country", "کشور"),
            Field::City => lang.pick("City", "شهر"),
        }
    }

    fn value(self, form: &IdentityForm) -> &str {
        match self {
            Field::FirstName => &form.first_name,
            Field::LastName => &form.last_name,
            Field::MobileNumber => &form.mobile_number,
            Field::Country => &form.country,
            Field::City => &form.city,
        }
    }
}

/// A single rejected form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label(Language::En))]
    Required(Field),
    #[error("Invalid mobile number")]
    InvalidMobile,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(field) => *field,
            FieldError::InvalidMobile => Field::MobileNumber,
        }
    }

    pub fn message(&self, lang: Language) -> String {
        match (self, lang) {
            (_, Language::En) => self.to_string(),
            (FieldError::Required(field), Language::Fa) => {
                format!("{} الزامی است", field.label(Language::Fa))
            }
            (FieldError::InvalidMobile, Language::Fa) => "شماره موبایل معتبر نیست".to_string(),
        }
    }
}

fn is_valid_mobile(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}

/// Check every field and report all problems at once.
pub fn validate_identity(form: &IdentityForm) -> Result<Identity, Vec<FieldError>> {
    let mut errors = Vec::new();

    for field in Field::ALL {
        let value = field.value(form).trim();
        if value.is_empty() {
            errors.push(FieldError::Required(field));
        } else if field == Field::MobileNumber && !is_valid_mobile(value) {
            errors.push(FieldError::InvalidMobile);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Identity {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        mobile_number: form.mobile_number.trim().to_string(),
        country: form.country.trim().to_string(),
        city: form.city.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> IdentityForm {
        IdentityForm {
            first_name: " Sara ".into(),
            last_name: "Ahmadi".into(),
            mobile_number: "+98 (912) 123-4567".into(),
            country: "Iran".into(),
            city: "Tehran".into(),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let identity = validate_identity(&filled()).unwrap();
        assert_eq!(identity.first_name, "Sara");
        assert_eq!(identity.mobile_number, "+98 (912) 123-4567");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate_identity(&IdentityForm::default()).unwrap_err();
        assert_eq!(errors.len(), 5);
        let fields: Vec<Field> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = filled();
        form.city = "   ".into();
        let errors = validate_identity(&form).unwrap_err();
        assert_eq!(errors, vec![FieldError::Required(Field::City)]);
    }

    #[test]
    fn test_mobile_rejects_letters() {
        let mut form = filled();
        form.mobile_number = "0912abc".into();
        let errors = validate_identity(&form).unwrap_err();
        assert_eq!(errors, vec![FieldError::InvalidMobile]);
    }

    #[test]
    fn test_errors_collected_together() {
        let mut form = filled();
        form.first_name.clear();
        form.mobile_number = "call me".into();
        let errors = validate_identity(&form).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::Required(Field::FirstName), FieldError::InvalidMobile]
        );
    }

    #[test]
    fn test_messages_are_bilingual() {
        let err = FieldError::Required(Field::LastName);
        assert_eq!(err.message(Language::En), "Last Name is required");
        assert_eq!(err.message(Language::Fa), "نام خانوادگی الزامی است");
        assert_eq!(FieldError::InvalidMobile.message(Language::En), "Invalid mobile number");
    }

    #[test]
    fn test_identity_serializes_camel_case() {
        let identity = validate_identity(&filled()).unwrap();
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["firstName"], "Sara");
        assert_eq!(json["mobileNumber"], "+98 (912) 123-4567");
    }
}
