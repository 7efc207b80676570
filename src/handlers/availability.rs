use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{AppointmentType, AppointmentTypeInfo, SlotQuery, TimeSlot};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub start_date: String,
    pub end_date: String,
    /// Event-type identifier or appointment type name.
    pub appointment_type: Option<String>,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub appointment_type: String,
    pub available_slots: Vec<TimeSlot>,
    pub total_slots: usize,
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Json<AvailabilityResponse> {
    let event_type = match params.appointment_type.as_deref().map(str::trim) {
        None | Some("") => state.config.event_types.default.clone(),
        Some(raw) => match AppointmentType::from_name(raw) {
            Some(t) => state.config.event_types.for_type(t).to_string(),
            None => raw.to_string(),
        },
    };

    let query = SlotQuery {
        start: params.start_date,
        end: params.end_date,
        event_type,
    };

    let slots = match state.availability.available_slots(&query).await {
        Ok(slots) => slots,
        Err(e) => {
            tracing::warn!(error = %e, event_type = %query.event_type, "availability lookup failed");
            Vec::new()
        }
    };

    Json(AvailabilityResponse {
        total_slots: slots.len(),
        available_slots: slots,
        appointment_type: query.event_type,
    })
}

pub async fn get_appointment_types() -> Json<Vec<AppointmentTypeInfo>> {
    Json(
        AppointmentType::ALL
            .into_iter()
            .map(AppointmentTypeInfo::from)
            .collect(),
    )
}
