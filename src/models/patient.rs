use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "reason_for_visit")]
    pub reason: String,
}

/// Patient fields as submitted; every field is checked by [`PatientInfoPayload::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientInfoPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "reason")]
    pub reason_for_visit: Option<String>,
}

impl PatientInfoPayload {
    pub fn validate(self) -> Result<PatientInfo, AppError> {
        let mut missing = Vec::new();
        let name = take_field(self.name, "name", &mut missing);
        let email = take_field(self.email, "email", &mut missing);
        let phone = take_field(self.phone, "phone", &mut missing);
        let reason = take_field(self.reason_for_visit, "reason_for_visit", &mut missing);

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing patient information: {}",
                missing.join(", ")
            )));
        }

        Ok(PatientInfo {
            name,
            email,
            phone,
            reason,
        })
    }
}

fn take_field(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            missing.push(field);
            String::new()
        }
    }
}

impl PatientInfo {
    /// First and last name as the booking platform expects them.
    pub fn split_name(&self) -> (&str, &str) {
        let mut parts = self.name.split_whitespace();
        let first = parts.next().unwrap_or("");
        let last = parts.last().unwrap_or("");
        (first, last)
    }
}
