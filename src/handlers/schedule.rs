use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AppointmentType, PatientInfoPayload, TimeOfDay};
use crate::services::conversation::DATE_FORMAT;
use crate::services::scheduling::{self, ScheduleParams};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub patient_info: Option<PatientInfoPayload>,
    pub appointment_type: String,
    pub preferred_date: Option<String>,
    pub preferred_time_range: Option<String>,
    /// Start of the slot the patient chose.
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub confirmation_code: String,
    pub message: String,
    pub start_time: DateTime<Utc>,
}

impl ScheduleRequest {
    fn validate(self) -> Result<ScheduleParams, AppError> {
        let patient = self
            .patient_info
            .ok_or_else(|| AppError::Validation("Patient information required".to_string()))?
            .validate()?;

        let appointment_type = AppointmentType::from_name(&self.appointment_type).ok_or_else(|| {
            AppError::Validation(format!(
                "unknown appointment type: {}",
                self.appointment_type
            ))
        })?;

        let preferred_date = non_blank(self.preferred_date)
            .map(|d| {
                NaiveDate::parse_from_str(&d, DATE_FORMAT).map_err(|_| {
                    AppError::Validation(format!("preferred_date must be YYYY-MM-DD, got {d}"))
                })
            })
            .transpose()?;

        let time_range = non_blank(self.preferred_time_range)
            .map(|r| r.parse::<TimeOfDay>().map_err(AppError::Validation))
            .transpose()?;

        Ok(ScheduleParams {
            patient,
            appointment_type,
            start_time: self.start_time,
            preferred_date,
            time_range,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn schedule(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let Json(payload) = payload?;
    let params = payload.validate()?;
    let confirmation = scheduling::schedule_appointment(&state, params).await?;

    Ok(Json(ScheduleResponse {
        success: true,
        confirmation_code: confirmation.confirmation_code,
        message: "Appointment scheduled successfully".to_string(),
        start_time: confirmation.start_time,
    }))
}
