use crate::models::{AppointmentType, TimeOfDay};

/// One row of the appointment-type table: any keyword found as a substring selects the type.
#[derive(Debug)]
pub struct KeywordRule {
    pub keywords: &'static [&'static str],
    pub appointment_type: AppointmentType,
}

impl KeywordRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Evaluated top to bottom; the first matching row wins.
pub const APPOINTMENT_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["headache", "fever", "cough", "general"],
        appointment_type: AppointmentType::GeneralConsultation,
    },
    KeywordRule {
        keywords: &["follow", "check", "routine"],
        appointment_type: AppointmentType::FollowUp,
    },
    KeywordRule {
        keywords: &["physical", "exam", "complete"],
        appointment_type: AppointmentType::PhysicalExam,
    },
    KeywordRule {
        keywords: &["specialist", "cardio", "neuro", "dermat"],
        appointment_type: AppointmentType::SpecialistConsultation,
    },
];

pub const DEFAULT_APPOINTMENT_TYPE: AppointmentType = AppointmentType::GeneralConsultation;

pub fn classify_appointment_type(text: &str) -> AppointmentType {
    let lowered = text.to_lowercase();
    APPOINTMENT_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.appointment_type)
        .unwrap_or(DEFAULT_APPOINTMENT_TYPE)
}

pub fn extract_time_preference(text: &str) -> Option<TimeOfDay> {
    let lowered = text.to_lowercase();
    TimeOfDay::ALL
        .into_iter()
        .find(|t| lowered.contains(t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headache_morning() {
        let text = "I have a bad headache this morning";
        assert_eq!(
            classify_appointment_type(text),
            AppointmentType::GeneralConsultation
        );
        assert_eq!(extract_time_preference(text), Some(TimeOfDay::Morning));
    }

    #[test]
    fn test_general_symptom_words() {
        for text in ["Fever since Tuesday", "a nasty COUGH", "general question"] {
            assert_eq!(
                classify_appointment_type(text),
                AppointmentType::GeneralConsultation,
                "{text}"
            );
        }
    }

    #[test]
    fn test_follow_up_words() {
        for text in ["I need a follow-up", "time for my check", "routine visit"] {
            assert_eq!(classify_appointment_type(text), AppointmentType::FollowUp, "{text}");
        }
    }

    #[test]
    fn test_physical_and_specialist() {
        assert_eq!(
            classify_appointment_type("annual physical please"),
            AppointmentType::PhysicalExam
        );
        assert_eq!(
            classify_appointment_type("referral to a dermatologist"),
            AppointmentType::SpecialistConsultation
        );
    }

    #[test]
    fn test_table_order_decides_ties() {
        // follow-up row precedes the physical-exam row
        assert_eq!(
            classify_appointment_type("physical follow-up"),
            AppointmentType::FollowUp
        );
        // general-symptom row precedes the specialist row
        assert_eq!(
            classify_appointment_type("specialist for my headache"),
            AppointmentType::GeneralConsultation
        );
    }

    #[test]
    fn test_no_keyword_defaults_to_general() {
        assert_eq!(
            classify_appointment_type("hello there"),
            DEFAULT_APPOINTMENT_TYPE
        );
        assert_eq!(classify_appointment_type(""), DEFAULT_APPOINTMENT_TYPE);
    }

    #[test]
    fn test_time_preference_first_in_order_wins() {
        assert_eq!(
            extract_time_preference("evening or afternoon works"),
            Some(TimeOfDay::Afternoon)
        );
        assert_eq!(
            extract_time_preference("Any MORNING, not evening"),
            Some(TimeOfDay::Morning)
        );
        assert_eq!(extract_time_preference("next tuesday"), None);
    }
}
