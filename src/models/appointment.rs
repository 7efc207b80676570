use serde::{Deserialize, Serialize};

/// The fixed catalogue of bookable visit kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentType {
    #[serde(rename = "General Consultation")]
    GeneralConsultation,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "Physical Exam")]
    PhysicalExam,
    #[serde(rename = "Specialist Consultation")]
    SpecialistConsultation,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 4] = [
        AppointmentType::GeneralConsultation,
        AppointmentType::FollowUp,
        AppointmentType::PhysicalExam,
        AppointmentType::SpecialistConsultation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AppointmentType::GeneralConsultation => "General Consultation",
            AppointmentType::FollowUp => "Follow-up",
            AppointmentType::PhysicalExam => "Physical Exam",
            AppointmentType::SpecialistConsultation => "Specialist Consultation",
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        match self {
            AppointmentType::GeneralConsultation => 30,
            AppointmentType::FollowUp => 15,
            AppointmentType::PhysicalExam => 45,
            AppointmentType::SpecialistConsultation => 60,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AppointmentType::GeneralConsultation => {
                "For general health concerns and initial assessments"
            }
            AppointmentType::FollowUp => "For routine follow-up appointments",
            AppointmentType::PhysicalExam => "For comprehensive physical examinations",
            AppointmentType::SpecialistConsultation => "For specialized medical consultations",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppointmentTypeInfo {
    pub name: &'static str,
    pub duration: u32,
    pub description: &'static str,
}

impl From<AppointmentType> for AppointmentTypeInfo {
    fn from(t: AppointmentType) -> Self {
        Self {
            name: t.name(),
            duration: t.duration_minutes(),
            description: t.description(),
        }
    }
}
