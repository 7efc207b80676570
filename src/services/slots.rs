use crate::models::{TimeOfDay, TimeSlot};

/// Keeps the slots whose start hour falls in the preferred part of the day.
/// Without a preference the input comes back unchanged.
pub fn filter_slots(slots: &[TimeSlot], preference: Option<TimeOfDay>) -> Vec<TimeSlot> {
    match preference {
        None => slots.to_vec(),
        Some(pref) => {
            let hours = pref.hours();
            slots
                .iter()
                .filter(|slot| hours.contains(&slot.start_hour()))
                .cloned()
                .collect()
        }
    }
}
