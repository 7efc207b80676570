use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::AppError;
use crate::models::{
    AppointmentType, BookingConfirmation, BookingRequest, PatientInfo, SlotQuery, TimeOfDay,
    TimeSlot,
};
use crate::services::conversation::DATE_FORMAT;
use crate::services::slots::filter_slots;
use crate::state::AppState;

/// A validated booking request.
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub patient: PatientInfo,
    pub appointment_type: AppointmentType,
    /// The slot the patient picked. When absent the earliest matching slot is used.
    pub start_time: Option<DateTime<Utc>>,
    pub preferred_date: Option<NaiveDate>,
    pub time_range: Option<TimeOfDay>,
}

pub async fn schedule_appointment(
    state: &AppState,
    params: ScheduleParams,
) -> Result<BookingConfirmation, AppError> {
    let event_type = state
        .config
        .event_types
        .for_type(params.appointment_type)
        .to_string();
    let start_time = resolve_start_time(state, &params, &event_type).await?;

    let request = BookingRequest {
        patient: params.patient,
        appointment_type: params.appointment_type,
        event_type,
        start_time,
    };

    match state.booking.create_booking(&request).await {
        Ok(confirmation) => {
            tracing::info!(
                confirmation = %confirmation.confirmation_code,
                appointment_type = %request.appointment_type,
                duration_minutes = request.appointment_type.duration_minutes(),
                start = %start_time,
                "appointment booked"
            );
            Ok(confirmation)
        }
        Err(e) => {
            tracing::error!(error = %e, appointment_type = %request.appointment_type, "booking failed");
            Err(AppError::Booking(format!("{e:#}")))
        }
    }
}

async fn resolve_start_time(
    state: &AppState,
    params: &ScheduleParams,
    event_type: &str,
) -> Result<DateTime<Utc>, AppError> {
    if let Some(start) = params.start_time {
        if start < Utc::now() {
            return Err(AppError::Validation(format!(
                "start_time {} is in the past",
                start.to_rfc3339()
            )));
        }
        return Ok(start);
    }

    let (from, to) = match params.preferred_date {
        Some(date) => (date, date + Duration::days(1)),
        None => {
            let today = Utc::now().date_naive();
            (today, today + Duration::days(i64::from(state.config.availability_window_days)))
        }
    };
    let query = SlotQuery {
        start: from.format(DATE_FORMAT).to_string(),
        end: to.format(DATE_FORMAT).to_string(),
        event_type: event_type.to_string(),
    };

    let slots = match state.availability.available_slots(&query).await {
        Ok(slots) => slots,
        Err(e) => {
            tracing::warn!(error = %e, "availability lookup failed while scheduling");
            Vec::new()
        }
    };

    earliest_open_slot(&slots, params.time_range)
        .map(|slot| slot.start_time)
        .ok_or_else(|| {
            let when = params.time_range.map(|t| t.as_str()).unwrap_or("any time");
            AppError::NoAvailability(format!(
                "no {} slots between {} and {} ({when})",
                params.appointment_type, query.start, query.end
            ))
        })
}

fn earliest_open_slot(slots: &[TimeSlot], time_range: Option<TimeOfDay>) -> Option<TimeSlot> {
    let now = Utc::now();
    filter_slots(slots, time_range)
        .into_iter()
        .filter(|s| s.is_available && s.start_time > now)
        .min_by_key(|s| s.start_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: DateTime<Utc>, is_available: bool) -> TimeSlot {
        TimeSlot {
            start_time: start,
            end_time: start + Duration::minutes(30),
            is_available,
        }
    }

    fn tomorrow_at(hour: u32) -> DateTime<Utc> {
        let date = Utc::now().date_naive() + Duration::days(1);
        date.and_hms_opt(hour, 0, 0).unwrap().and_utc()
    }

    #[test]
    fn test_earliest_open_slot_respects_range() {
        let slots = vec![
            slot(tomorrow_at(15), true),
            slot(tomorrow_at(9), true),
            slot(tomorrow_at(13), true),
        ];
        let picked = earliest_open_slot(&slots, Some(TimeOfDay::Afternoon)).unwrap();
        assert_eq!(picked.start_time, tomorrow_at(13));

        let any = earliest_open_slot(&slots, None).unwrap();
        assert_eq!(any.start_time, tomorrow_at(9));
    }

    #[test]
    fn test_earliest_open_slot_skips_unavailable_and_past() {
        let past = Utc::now() - Duration::hours(2);
        let slots = vec![slot(past, true), slot(tomorrow_at(10), false)];
        assert!(earliest_open_slot(&slots, None).is_none());
    }
}
