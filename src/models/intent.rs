use serde::{Deserialize, Serialize};

use super::{AppointmentType, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Routine,
}

/// Structured reading of one patient message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<AppointmentType>,
    pub time_preference: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Greet,
    AskAppointmentType,
    SuggestAlternatives,
    AskTimePreference,
    CollectPatientInfo,
}

impl NextStep {
    /// Re-derived from scratch on every message; nothing about the previous step is stored.
    pub fn determine(intent: Option<&Intent>, available_slots: usize) -> Self {
        let Some(intent) = intent else {
            return NextStep::Greet;
        };
        if intent.appointment_type.is_none() {
            NextStep::AskAppointmentType
        } else if available_slots == 0 {
            NextStep::SuggestAlternatives
        } else if intent.time_preference.is_none() {
            NextStep::AskTimePreference
        } else {
            NextStep::CollectPatientInfo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NextStep::Greet => "greet",
            NextStep::AskAppointmentType => "ask_appointment_type",
            NextStep::SuggestAlternatives => "suggest_alternatives",
            NextStep::AskTimePreference => "ask_time_preference",
            NextStep::CollectPatientInfo => "collect_patient_info",
        }
    }
}
