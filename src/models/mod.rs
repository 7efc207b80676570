pub mod appointment;
pub mod booking;
pub mod conversation;
pub mod intent;
pub mod patient;
pub mod slot;

pub use appointment::{AppointmentType, AppointmentTypeInfo};
pub use booking::{BookingConfirmation, BookingRequest};
pub use conversation::{ConversationTurn, Role};
pub use intent::{Intent, NextStep, Urgency};
pub use patient::{PatientInfo, PatientInfoPayload};
pub use slot::{SlotQuery, TimeOfDay, TimeSlot};
