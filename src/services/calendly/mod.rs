pub mod availability;
pub mod booking;
pub mod cache;

use async_trait::async_trait;

use crate::models::{BookingConfirmation, BookingRequest, SlotQuery, TimeSlot};

#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    async fn available_slots(&self, query: &SlotQuery) -> anyhow::Result<Vec<TimeSlot>>;
}

#[async_trait]
pub trait BookingProvider: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> anyhow::Result<BookingConfirmation>;
}
