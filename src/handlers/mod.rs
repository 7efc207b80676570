pub mod availability;
pub mod chat;
pub mod info;
pub mod schedule;
