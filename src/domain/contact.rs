use super::*;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single contact record as held in the cache and sent to the remote service.
///
/// `id` stays `None` until the remote service acknowledges a create; until then
/// `full_name` is the only identity this client has for the record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cell: String,

    #[serde(default, alias = "date")]
    pub registration_date: String,

    #[serde(default, deserialize_with = "deserialize_age")]
    pub age: u32,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial contact used by updates. Only the `Some` fields are applied.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn required_req(field: &str) -> String {
        format!("{} is required", field)
    }

    pub fn number_req(field: &str) -> String {
        format!("{} must contain exactly 10 digits", field)
    }

    pub fn email_req() -> String {
        "Email is required and must be a valid email".to_string()
    }

    pub fn date_req() -> String {
        "Registration date must be YYYY-MM-DD or an RFC 3339 timestamp".to_string()
    }
}

impl Contact {
    pub fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Validates the contact as a form submission. Seeded contacts skip this,
    /// they carry no email.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.full_name.trim().is_empty() {
            return Err(AppError::Validation(ValidationReq::required_req(
                "Full name",
            )));
        }
        if self.full_address.trim().is_empty() {
            return Err(AppError::Validation(ValidationReq::required_req(
                "Full address",
            )));
        }
        if !validate_number(&self.phone)? {
            return Err(AppError::Validation(ValidationReq::number_req("Phone")));
        }
        if !validate_number(&self.cell)? {
            return Err(AppError::Validation(ValidationReq::number_req("Cell")));
        }
        if !validate_date(&self.registration_date) {
            return Err(AppError::Validation(ValidationReq::date_req()));
        }
        if !validate_email(&self.email)? {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }
        Ok(())
    }

    /// Shallow merge: fields absent from the patch are left untouched.
    pub fn apply(&mut self, patch: &ContactPatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(full_address) = &patch.full_address {
            self.full_address = full_address.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(cell) = &patch.cell {
            self.cell = cell.clone();
        }
        if let Some(registration_date) = &patch.registration_date {
            self.registration_date = registration_date.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
    }
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        *self == ContactPatch::default()
    }

    /// Validates only the fields that are present.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.full_name
            && name.trim().is_empty()
        {
            return Err(AppError::Validation(ValidationReq::required_req(
                "Full name",
            )));
        }
        if let Some(address) = &self.full_address
            && address.trim().is_empty()
        {
            return Err(AppError::Validation(ValidationReq::required_req(
                "Full address",
            )));
        }
        if let Some(phone) = &self.phone
            && !validate_number(phone)?
        {
            return Err(AppError::Validation(ValidationReq::number_req("Phone")));
        }
        if let Some(cell) = &self.cell
            && !validate_number(cell)?
        {
            return Err(AppError::Validation(ValidationReq::number_req("Cell")));
        }
        if let Some(date) = &self.registration_date
            && !validate_date(date)
        {
            return Err(AppError::Validation(ValidationReq::date_req()));
        }
        if let Some(email) = &self.email
            && !validate_email(email)?
        {
            return Err(AppError::Validation(ValidationReq::email_req()));
        }
        Ok(())
    }
}

pub fn validate_number(number: &str) -> Result<bool, AppError> {
    // Three digit prefix followed by seven digits, nothing else
    let re = Regex::new(r"^\d{3}\d{7}$")?;
    Ok(re.is_match(number))
}

pub fn validate_email(email: &str) -> Result<bool, AppError> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?;
    Ok(email.len() <= 254 && re.is_match(email))
}

pub fn validate_date(date: &str) -> bool {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(date).is_ok()
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(age_from_value(value))
}

/// Seed sources send age either as a number or as a numeric string. Anything
/// else becomes zero.
pub fn age_from_value(value: Option<Value>) -> u32 {
    let age = match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    age.unwrap_or_default()
}

/// Accepts a JSON string or number and keeps its text form.
pub fn text_from_value(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_contact() -> Contact {
        Contact {
            id: None,
            full_name: "Ada Obi".to_string(),
            full_address: "12 Marina Road, Lagos".to_string(),
            phone: "0801234567".to_string(),
            cell: "0907654321".to_string(),
            registration_date: "2024-03-01".to_string(),
            age: 34,
            email: "ada@example.com".to_string(),
            image: None,
        }
    }

    #[test]
    fn valid_form_contact_passes() -> Result<(), AppError> {
        form_contact().validate()
    }

    #[test]
    fn phone_must_be_ten_digits() {
        let mut contact = form_contact();
        contact.phone = "08012345678".to_string();
        assert!(matches!(contact.validate(), Err(AppError::Validation(_))));

        contact.phone = "080-123-456".to_string();
        assert!(matches!(contact.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn email_is_required() {
        let mut contact = form_contact();
        contact.email = String::new();
        assert!(matches!(contact.validate(), Err(AppError::Validation(_))));

        contact.email = "foo@bar".to_string();
        assert!(matches!(contact.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn registration_date_accepts_rfc3339() {
        assert!(validate_date("2019-07-04T09:12:44Z"));
        assert!(validate_date("2019-07-04"));
        assert!(!validate_date("04/07/2019"));
    }

    #[test]
    fn apply_leaves_unrelated_fields_untouched() {
        let mut contact = form_contact();
        contact.id = Some("1".to_string());
        let before = contact.clone();

        contact.apply(&ContactPatch {
            age: Some(35),
            ..Default::default()
        });

        assert_eq!(contact.age, 35);
        assert_eq!(contact.full_name, before.full_name);
        assert_eq!(contact.full_address, before.full_address);
        assert_eq!(contact.phone, before.phone);
        assert_eq!(contact.cell, before.cell);
        assert_eq!(contact.email, before.email);
        assert_eq!(contact.id, before.id);
    }

    #[test]
    fn patch_only_validates_present_fields() {
        let patch = ContactPatch {
            age: Some(31),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let patch = ContactPatch {
            cell: Some("12".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn deserializes_remote_shapes() -> Result<(), AppError> {
        let json = r#"{
            "_id": "65f1c0",
            "full_name": "Kathy Bello",
            "date": "2020-01-02",
            "age": "41",
            "image": "https://example.com/k.png"
        }"#;
        let contact: Contact = serde_json::from_str(json)?;

        assert_eq!(contact.id.as_deref(), Some("65f1c0"));
        assert_eq!(contact.registration_date, "2020-01-02");
        assert_eq!(contact.age, 41);
        assert!(contact.email.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_age_shape_defaults_to_zero() -> Result<(), AppError> {
        let contact: Contact = serde_json::from_str(r#"{"full_name":"A","age":[1]}"#)?;
        assert_eq!(contact.age, 0);
        Ok(())
    }

    #[test]
    fn contact_without_id_serializes_without_id_key() -> Result<(), AppError> {
        let json = serde_json::to_string(&form_contact())?;
        assert!(!json.contains("_id"));
        Ok(())
    }
}
