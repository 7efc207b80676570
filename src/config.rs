use std::env;

use crate::models::AppointmentType;

pub const DEFAULT_EVENT_TYPE: &str =
    "https://api.calendly.com/event_types/ec19aed1-b6ad-45e6-974c-1302f33564b9";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origin: String,
    pub google_api_key: String,
    pub gemini_model: String,
    pub calendly_api_key: String,
    pub calendly_base_url: String,
    pub event_types: EventTypes,
    /// Number of trailing conversation turns shown to the model.
    pub history_window: usize,
    pub availability_timeout_secs: u64,
    pub availability_cache_size: usize,
    /// Days after today covered by the chat availability lookup.
    pub availability_window_days: u32,
}

/// Calendly event-type identifiers, one per appointment type.
#[derive(Clone, Debug, Default)]
pub struct EventTypes {
    pub default: String,
    pub general_consultation: Option<String>,
    pub follow_up: Option<String>,
    pub physical_exam: Option<String>,
    pub specialist: Option<String>,
}

impl EventTypes {
    pub fn for_type(&self, appointment_type: AppointmentType) -> &str {
        let configured = match appointment_type {
            AppointmentType::GeneralConsultation => &self.general_consultation,
            AppointmentType::FollowUp => &self.follow_up,
            AppointmentType::PhysicalExam => &self.physical_exam,
            AppointmentType::SpecialistConsultation => &self.specialist,
        };
        configured.as_deref().unwrap_or(&self.default)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_var("PORT", 8000),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            google_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            calendly_api_key: env::var("CALENDLY_API_KEY").unwrap_or_default(),
            calendly_base_url: env::var("CALENDLY_BASE_URL")
                .unwrap_or_else(|_| "https://api.calendly.com".to_string()),
            event_types: EventTypes {
                default: env::var("CALENDLY_DEFAULT_EVENT_TYPE")
                    .unwrap_or_else(|_| DEFAULT_EVENT_TYPE.to_string()),
                general_consultation: non_empty_var("CALENDLY_GENERAL_CONSULTATION_URI"),
                follow_up: non_empty_var("CALENDLY_FOLLOWUP_URI"),
                physical_exam: non_empty_var("CALENDLY_PHYSICAL_EXAM_URI"),
                specialist: non_empty_var("CALENDLY_SPECIALIST_URI"),
            },
            history_window: parse_var("HISTORY_WINDOW", 5),
            availability_timeout_secs: parse_var("AVAILABILITY_TIMEOUT_SECS", 30),
            availability_cache_size: parse_var("AVAILABILITY_CACHE_SIZE", 128),
            availability_window_days: clamp_window_days(parse_var(
                "AVAILABILITY_WINDOW_DAYS",
                6,
            )),
        }
    }
}

/// Upper bound on the lookup window; larger values are cut down to it.
pub const MAX_WINDOW_DAYS: u32 = 365;

fn clamp_window_days(days: u32) -> u32 {
    days.min(MAX_WINDOW_DAYS)
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
