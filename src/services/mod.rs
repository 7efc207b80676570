pub mod ai;
pub mod calendly;
pub mod classifier;
pub mod conversation;
pub mod scheduling;
pub mod slots;
