use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::AvailabilityProvider;
use crate::models::{SlotQuery, TimeSlot};

pub struct CalendlyAvailability {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl CalendlyAvailability {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Calendly HTTP client")?;
        Ok(Self {
            api_key,
            base_url,
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AvailableTimes {
    #[serde(default)]
    collection: Vec<AvailableTime>,
}

#[derive(Debug, Deserialize)]
struct AvailableTime {
    start_time: DateTime<Utc>,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl AvailabilityProvider for CalendlyAvailability {
    async fn available_slots(&self, query: &SlotQuery) -> anyhow::Result<Vec<TimeSlot>> {
        let resp = self
            .client
            .get(format!("{}/event_type_available_times", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[
                ("start_time", query.start.as_str()),
                ("end_time", query.end.as_str()),
                ("event_type", query.event_type.as_str()),
            ])
            .send()
            .await
            .context("failed to call Calendly availability API")?
            .error_for_status()
            .context("Calendly availability API returned error")?;

        let times: AvailableTimes = resp
            .json()
            .await
            .context("failed to parse Calendly availability response")?;

        Ok(times.collection.into_iter().map(to_slot).collect())
    }
}

fn to_slot(time: AvailableTime) -> TimeSlot {
    TimeSlot {
        start_time: time.start_time,
        end_time: time.end_time.unwrap_or(time.start_time),
        is_available: time
            .status
            .as_deref()
            .map(|s| s == "available")
            .unwrap_or(true),
    }
}
