use std::ops::Range;
use std::str::FromStr;

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl TimeSlot {
    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Checked in this order when scanning free text.
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    /// Start hours (UTC) belonging to this part of the day.
    pub fn hours(&self) -> Range<u32> {
        match self {
            TimeOfDay::Morning => 6..12,
            TimeOfDay::Afternoon => 12..17,
            TimeOfDay::Evening => 17..21,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            other => Err(format!("unknown time range: {other}")),
        }
    }
}

/// Parameters of one availability lookup; also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub start: String,
    pub end: String,
    pub event_type: String,
}
