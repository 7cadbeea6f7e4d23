use super::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// One entry of the contact form schema, consumed by the view layer only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FormSchema {
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

pub trait FormFieldSource {
    fn fetch(&self) -> Result<FormSchema, AppError>;
}

/// Reads the form schema from a JSON file on disk.
pub struct JsonFormFields {
    pub path: PathBuf,
}

impl JsonFormFields {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FormFieldSource for JsonFormFields {
    fn fetch(&self) -> Result<FormSchema, AppError> {
        if !self.path.exists() {
            return Err(AppError::NotFound(format!(
                "Form schema {}",
                self.path.display()
            )));
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn default_field_type() -> String {
    "text".to_string()
}
