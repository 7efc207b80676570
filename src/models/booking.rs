use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AppointmentType, PatientInfo};

/// Everything the booking platform needs to reserve one slot.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub patient: PatientInfo,
    pub appointment_type: AppointmentType,
    pub event_type: String,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub confirmation_code: String,
    pub start_time: DateTime<Utc>,
}
